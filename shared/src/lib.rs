use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Integer amount of minor currency units (1/100 of the display unit).
///
/// Stored records are never negative; derived figures such as net profit
/// can be. Arithmetic saturates at the `i64` bounds instead of wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for Cents {
    type Output = Cents;

    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Cents {
    type Output = Cents;

    fn sub(self, rhs: Cents) -> Cents {
        Cents(self.0.saturating_sub(rhs.0))
    }
}

impl From<i64> for Cents {
    fn from(value: i64) -> Self {
        Cents(value)
    }
}

/// ISO-4217 style currency code, always three uppercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse a currency code, trimming whitespace and uppercasing it
    pub fn parse(code: &str) -> Result<Self, InvalidCurrencyCode> {
        let trimmed = code.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(InvalidCurrencyCode(code.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = InvalidCurrencyCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = InvalidCurrencyCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid currency code '{0}': expected three letters such as EUR")]
pub struct InvalidCurrencyCode(pub String);

/// Opaque member identity (the textual principal of a group member)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(value: &str) -> Self {
        MemberId(value.to_string())
    }
}

/// Reason a user-typed amount was rejected.
///
/// This is the only error the money utilities produce. It is shown next to
/// the offending input and never treated as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum InvalidAmount {
    #[error("Amount cannot be empty")]
    Empty,
    #[error("Amount must be a valid number")]
    NotANumber,
    #[error("Amount cannot be negative")]
    Negative,
    #[error("Amount must be at least {}", units_label(.min_cents))]
    BelowMinimum { min_cents: i64 },
    #[error("Amount exceeds maximum allowed ({})", units_label(.max_cents))]
    AboveMaximum { max_cents: i64 },
}

/// Renders a cent bound as "10,000,000.00" for error messages
fn units_label(cents: &i64) -> String {
    let abs = (*cents as i128).abs();
    let whole = (abs / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if *cents < 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, grouped, abs % 100)
}

/// Non-throwing result of validating a money input field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneyInputValidation {
    pub is_valid: bool,
    pub error: Option<String>,
    /// Parsed amount when the input is valid
    pub cents: Option<Cents>,
}

/// How a typed amount is rounded to whole cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Half away from zero: 10.505 -> 10.51
    #[default]
    HalfUp,
    /// Banker's rounding: 10.505 -> 10.50
    HalfEven,
}

/// Configuration for money input parsing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneyConfig {
    pub min_amount_cents: Cents,
    pub max_amount_cents: Cents,
    #[serde(default)]
    pub rounding_mode: RoundingMode,
}

impl Default for MoneyConfig {
    fn default() -> Self {
        Self {
            min_amount_cents: Cents(1),
            max_amount_cents: Cents(1_000_000_000),
            rounding_mode: RoundingMode::HalfUp,
        }
    }
}

/// A venture group as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentureGroup {
    pub id: String,
    pub name: String,
    pub currency: CurrencyCode,
    pub target_amount: Cents,
    pub monthly_contribution_amount: Cents,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub member: MemberId,
    pub display_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionStatus {
    Pending,
    Paid,
    Overdue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: String,
    pub member: MemberId,
    pub group_id: String,
    pub amount: Cents,
    pub status: ContributionStatus,
    pub date_paid: Option<DateTime<Utc>>,
}

impl Contribution {
    pub fn is_paid(&self) -> bool {
        self.status == ContributionStatus::Paid
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub group_id: String,
    pub description: String,
    pub category: String,
    pub amount: Cents,
    pub date_spent: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revenue {
    pub id: String,
    pub group_id: String,
    pub source: String,
    pub description: String,
    pub amount: Cents,
    pub date: DateTime<Utc>,
}

/// A payout that has actually been made to a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub id: String,
    pub group_id: String,
    pub member: MemberId,
    pub amount: Cents,
    pub date_paid: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipPercentage {
    pub member: MemberId,
    pub total_contributed: Cents,
    /// Rounded share of the group's paid contributions, 0..=100
    pub ownership_percentage: u8,
}

/// Suggested, not yet committed, payout for one member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutSuggestion {
    pub member: MemberId,
    pub member_name: String,
    pub ownership_percentage: u8,
    pub payout_amount: Cents,
    pub is_paid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub currency: CurrencyCode,
    pub total_raised: Cents,
    pub total_spent: Cents,
    pub remaining_balance: Cents,
    pub total_revenue: Cents,
    pub net_profit: Cents,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupProgress {
    pub group_id: String,
    pub currency: CurrencyCode,
    pub progress_percentage: u8,
    pub total_contributions: Cents,
    pub target_amount: Cents,
    pub total_spent: Cents,
    pub total_revenue: Cents,
    pub remaining_balance: Cents,
    pub net_profit: Cents,
    pub per_member_contribution: Cents,
}

/// A single member's returns from a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberReturns {
    pub total_received: Cents,
    pub total_contributed: Cents,
    pub net_profit: Cents,
}

/// A member's contributions added up per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionTotals {
    pub paid: Cents,
    pub pending: Cents,
    pub overdue: Cents,
}
