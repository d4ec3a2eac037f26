//! Ownership shares derived from paid contributions.

use log::debug;
use shared::{Cents, Contribution, ContributionStatus, ContributionTotals, MemberId, OwnershipPercentage};
use std::collections::BTreeMap;

use super::money_math::{calculate_percentage, saturate_i64, sum_cents};

/// Computes each member's share of a group from its contribution history
#[derive(Debug, Clone, Default)]
pub struct OwnershipService;

impl OwnershipService {
    pub fn new() -> Self {
        Self
    }

    /// Calculate ownership percentages for every member with paid contributions.
    ///
    /// Pending and overdue contributions do not count. Results are ordered by
    /// member id so the output is stable across calls.
    pub fn calculate_ownership(&self, contributions: &[Contribution]) -> Vec<OwnershipPercentage> {
        let totals = self.member_totals(contributions);
        let group_total = sum_cents(totals.values().copied());

        debug!(
            "Calculating ownership for {} members, group total {:?}",
            totals.len(),
            group_total
        );

        totals
            .into_iter()
            .map(|(member, total_contributed)| OwnershipPercentage {
                ownership_percentage: calculate_percentage(total_contributed, group_total),
                member,
                total_contributed,
            })
            .collect()
    }

    /// Total paid contributions of a single member
    pub fn member_total(&self, member: &MemberId, contributions: &[Contribution]) -> Cents {
        sum_cents(
            contributions
                .iter()
                .filter(|c| c.is_paid() && &c.member == member)
                .map(|c| c.amount),
        )
    }

    /// A member's paid, pending and overdue contributions, each summed in cents
    pub fn member_contribution_totals(&self, member: &MemberId, contributions: &[Contribution]) -> ContributionTotals {
        let total_for = |status: ContributionStatus| {
            sum_cents(
                contributions
                    .iter()
                    .filter(|c| c.status == status && &c.member == member)
                    .map(|c| c.amount),
            )
        };

        ContributionTotals {
            paid: total_for(ContributionStatus::Paid),
            pending: total_for(ContributionStatus::Pending),
            overdue: total_for(ContributionStatus::Overdue),
        }
    }

    fn member_totals(&self, contributions: &[Contribution]) -> BTreeMap<MemberId, Cents> {
        let mut totals: BTreeMap<MemberId, i128> = BTreeMap::new();
        for contribution in contributions.iter().filter(|c| c.is_paid()) {
            *totals.entry(contribution.member.clone()).or_default() += contribution.amount.value() as i128;
        }
        totals
            .into_iter()
            .map(|(member, total)| (member, Cents(saturate_i64(total))))
            .collect()
    }
}
