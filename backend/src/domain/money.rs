//! Money conversion, input parsing and display formatting.
//!
//! This module is the single boundary between the integer-cent amounts the
//! backend stores and the decimal amounts users type and read. Every input
//! form funnels its amount fields through [`MoneyService::parse_amount`]
//! (or the [`parse_money_input_to_cents`] shorthand) before a record is sent
//! to the backend, and every display surface converts cents with
//! [`cents_to_units`] or [`format_money_from_cents`].

use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use shared::{Cents, CurrencyCode, InvalidAmount, MoneyConfig, MoneyInputValidation, RoundingMode};
use std::str::FromStr;

/// Convert integer cents to decimal units without rounding.
///
/// `Decimal` keeps 28 significant digits, so every `i64` cent amount maps to
/// its exact unit value (`72299` -> `722.99`).
pub fn cents_to_units(amount: Cents) -> Decimal {
    Decimal::new(amount.value(), 2)
}

/// Format cents for display with an explicit currency, e.g. `"EUR 722.99"`
pub fn format_money_from_cents(amount: Cents, currency: &CurrencyCode) -> String {
    format!("{} {}", currency, cents_to_units(amount))
}

/// Parse a user-typed amount into cents using the default bounds
/// (0.01 ..= 10,000,000.00) and half-up rounding.
pub fn parse_money_input_to_cents(input: &str) -> Result<Cents, InvalidAmount> {
    MoneyService::new().parse_amount(input)
}

/// Non-failing variant of [`parse_money_input_to_cents`] for inline form errors
pub fn validate_money_input(input: &str) -> MoneyInputValidation {
    MoneyService::new().validate_amount(input)
}

/// Money service that owns the parsing bounds and rounding rule
#[derive(Debug, Clone)]
pub struct MoneyService {
    config: MoneyConfig,
}

impl MoneyService {
    pub fn new() -> Self {
        Self {
            config: MoneyConfig::default(),
        }
    }

    pub fn with_config(config: MoneyConfig) -> Self {
        Self { config }
    }

    /// Parse a decimal string into whole cents.
    ///
    /// Checks run in order: empty, not a number, negative, below minimum,
    /// above maximum. Bounds apply to the value as typed, before rounding.
    pub fn parse_amount(&self, input: &str) -> Result<Cents, InvalidAmount> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(InvalidAmount::Empty);
        }

        let value = self.parse_decimal(trimmed)?;

        if value.is_sign_negative() && !value.is_zero() {
            return Err(InvalidAmount::Negative);
        }
        if value < cents_to_units(self.config.min_amount_cents) {
            return Err(InvalidAmount::BelowMinimum {
                min_cents: self.config.min_amount_cents.value(),
            });
        }
        if value > cents_to_units(self.config.max_amount_cents) {
            return Err(InvalidAmount::AboveMaximum {
                max_cents: self.config.max_amount_cents.value(),
            });
        }

        let rounded = value.round_dp_with_strategy(2, self.rounding_strategy());
        let cents = (rounded * Decimal::ONE_HUNDRED)
            .to_i64()
            .ok_or(InvalidAmount::AboveMaximum {
                max_cents: self.config.max_amount_cents.value(),
            })?;

        debug!("Parsed amount input '{}' as {} cents", trimmed, cents);
        Ok(Cents(cents))
    }

    /// Validate an amount without failing, for displaying inline errors
    pub fn validate_amount(&self, input: &str) -> MoneyInputValidation {
        match self.parse_amount(input) {
            Ok(cents) => MoneyInputValidation {
                is_valid: true,
                error: None,
                cents: Some(cents),
            },
            Err(error) => MoneyInputValidation {
                is_valid: false,
                error: Some(error.to_string()),
                cents: None,
            },
        }
    }

    /// Format cents in the given currency
    pub fn format_amount(&self, amount: Cents, currency: &CurrencyCode) -> String {
        format_money_from_cents(amount, currency)
    }

    /// Get configuration
    pub fn get_config(&self) -> &MoneyConfig {
        &self.config
    }

    fn rounding_strategy(&self) -> RoundingStrategy {
        match self.config.rounding_mode {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }

    fn parse_decimal(&self, trimmed: &str) -> Result<Decimal, InvalidAmount> {
        // Decimal::from_str skips digit separators, so "5_0" would read as 50
        if trimmed.contains('_') {
            debug!("Rejected amount input with digit separator '{}'", trimmed);
            return Err(InvalidAmount::NotANumber);
        }

        if let Ok(value) = Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
            return Ok(value);
        }

        // Numbers outside Decimal's range ("1e40", "inf") still deserve a
        // bounds error rather than "not a number".
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_nan() => Err(InvalidAmount::NotANumber),
            Ok(value) if value < 0.0 => Err(InvalidAmount::Negative),
            Ok(value) if value > 1.0 => Err(InvalidAmount::AboveMaximum {
                max_cents: self.config.max_amount_cents.value(),
            }),
            Ok(_) => Err(InvalidAmount::BelowMinimum {
                min_cents: self.config.min_amount_cents.value(),
            }),
            Err(_) => {
                debug!("Rejected non-numeric amount input '{}'", trimmed);
                Err(InvalidAmount::NotANumber)
            }
        }
    }
}

impl Default for MoneyService {
    fn default() -> Self {
        Self::new()
    }
}
