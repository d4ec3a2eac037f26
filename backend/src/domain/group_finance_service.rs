//! Group-level financial figures: summary, progress and payout funds.
//!
//! All totals are summed in raw cents first; nothing here converts to decimal
//! units. Only paid contributions count towards money raised.

use log::debug;
use shared::{Cents, Contribution, CurrencyCode, Expense, FinancialSummary, GroupProgress, Revenue, VentureGroup};

use super::money_math::{calculate_percentage, sum_cents};

#[derive(Debug, Clone, Default)]
pub struct GroupFinanceService;

impl GroupFinanceService {
    pub fn new() -> Self {
        Self
    }

    pub fn financial_summary(
        &self,
        currency: &CurrencyCode,
        contributions: &[Contribution],
        expenses: &[Expense],
        revenues: &[Revenue],
    ) -> FinancialSummary {
        let total_raised = sum_cents(contributions.iter().filter(|c| c.is_paid()).map(|c| c.amount));
        let total_spent = sum_cents(expenses.iter().map(|e| e.amount));
        let total_revenue = sum_cents(revenues.iter().map(|r| r.amount));

        FinancialSummary {
            currency: currency.clone(),
            total_raised,
            total_spent,
            remaining_balance: total_raised - total_spent,
            total_revenue,
            net_profit: total_revenue - total_spent,
        }
    }

    /// Cash a group can distribute: what is left of contributions plus revenue, never negative
    pub fn available_for_payout(&self, summary: &FinancialSummary) -> Cents {
        std::cmp::max(summary.remaining_balance + summary.total_revenue, Cents::ZERO)
    }

    pub fn group_progress(
        &self,
        group: &VentureGroup,
        member_count: usize,
        contributions: &[Contribution],
        expenses: &[Expense],
        revenues: &[Revenue],
    ) -> GroupProgress {
        let summary = self.financial_summary(&group.currency, contributions, expenses, revenues);
        let per_member_contribution = match i64::try_from(member_count) {
            Ok(count) if count > 0 => Cents(summary.total_raised.value() / count),
            _ => Cents::ZERO,
        };
        let progress_percentage = calculate_percentage(summary.total_raised, group.target_amount);

        debug!(
            "Group {} progress {}% of target {:?}",
            group.id, progress_percentage, group.target_amount
        );

        GroupProgress {
            group_id: group.id.clone(),
            currency: group.currency.clone(),
            progress_percentage,
            total_contributions: summary.total_raised,
            target_amount: group.target_amount,
            total_spent: summary.total_spent,
            total_revenue: summary.total_revenue,
            remaining_balance: summary.remaining_balance,
            net_profit: summary.net_profit,
            per_member_contribution,
        }
    }
}
