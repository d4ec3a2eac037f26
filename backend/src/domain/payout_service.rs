//! Payout suggestions and payout records.
//!
//! Suggestions split the funds available to a group across its members in
//! proportion to what each member actually contributed. The split is done in
//! whole cents with the largest-remainder method: every member first gets the
//! floor of their exact share, then the leftover cents go one at a time to the
//! members with the largest fractional remainders (ties broken by member id).
//! The suggestions therefore always add up to exactly the available amount.

use chrono::Utc;
use log::{debug, info};
use shared::{Cents, Contribution, GroupMember, MemberId, MemberReturns, OwnershipPercentage, Payout, PayoutSuggestion};
use std::collections::HashMap;
use uuid::Uuid;

use super::money_math::sum_cents;
use super::ownership_service::OwnershipService;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PayoutError {
    #[error("Payout amount must be positive")]
    NonPositiveAmount,
    #[error("Group id cannot be empty")]
    EmptyGroupId,
}

#[derive(Debug, Clone, Default)]
pub struct PayoutService {
    ownership_service: OwnershipService,
}

impl PayoutService {
    pub fn new() -> Self {
        Self {
            ownership_service: OwnershipService::new(),
        }
    }

    /// Suggest how much each member should receive out of `available`.
    ///
    /// `members` supplies display names; a member without a profile is shown
    /// by id. `payouts` are the payouts already recorded for the group and
    /// decide the `is_paid` flag.
    pub fn calculate_payouts(
        &self,
        ownership: &[OwnershipPercentage],
        members: &[GroupMember],
        available: Cents,
        payouts: &[Payout],
    ) -> Vec<PayoutSuggestion> {
        let amounts = allocate_by_share(ownership, available);
        let names: HashMap<&MemberId, &str> = members
            .iter()
            .map(|m| (&m.member, m.display_name.as_str()))
            .collect();

        ownership
            .iter()
            .zip(amounts)
            .map(|(share, payout_amount)| {
                let already_paid = self.total_paid_to(&share.member, payouts);
                PayoutSuggestion {
                    member: share.member.clone(),
                    member_name: names
                        .get(&share.member)
                        .map(|name| name.to_string())
                        .unwrap_or_else(|| share.member.to_string()),
                    ownership_percentage: share.ownership_percentage,
                    payout_amount,
                    is_paid: payout_amount.is_positive() && already_paid >= payout_amount,
                }
            })
            .collect()
    }

    /// Sum of all suggested payouts, in cents
    pub fn total_payout_amount(&self, suggestions: &[PayoutSuggestion]) -> Cents {
        sum_cents(suggestions.iter().map(|s| s.payout_amount))
    }

    /// Build the record of a payout made to a member
    pub fn record_payout(&self, group_id: &str, member: MemberId, amount: Cents) -> Result<Payout, PayoutError> {
        if group_id.trim().is_empty() {
            return Err(PayoutError::EmptyGroupId);
        }
        if !amount.is_positive() {
            return Err(PayoutError::NonPositiveAmount);
        }

        let payout = Payout {
            id: format!("payout::{}", Uuid::new_v4()),
            group_id: group_id.to_string(),
            member,
            amount,
            date_paid: Utc::now(),
        };
        info!(
            "Recorded payout {} of {:?} to {} in group {}",
            payout.id, payout.amount, payout.member, payout.group_id
        );
        Ok(payout)
    }

    /// What a member has put into and taken out of a group
    pub fn member_returns(&self, member: &MemberId, contributions: &[Contribution], payouts: &[Payout]) -> MemberReturns {
        let total_contributed = self.ownership_service.member_total(member, contributions);
        let total_received = self.total_paid_to(member, payouts);
        MemberReturns {
            total_received,
            total_contributed,
            net_profit: total_received - total_contributed,
        }
    }

    fn total_paid_to(&self, member: &MemberId, payouts: &[Payout]) -> Cents {
        sum_cents(payouts.iter().filter(|p| &p.member == member).map(|p| p.amount))
    }
}

/// Split `available` cents proportionally to each share's contributed total.
///
/// Returns one amount per entry of `ownership`, in the same order.
fn allocate_by_share(ownership: &[OwnershipPercentage], available: Cents) -> Vec<Cents> {
    let group_total: i128 = ownership.iter().map(|o| o.total_contributed.value().max(0) as i128).sum();
    if group_total == 0 || !available.is_positive() {
        return vec![Cents::ZERO; ownership.len()];
    }

    let available = available.value() as i128;
    let mut amounts = Vec::with_capacity(ownership.len());
    let mut remainders = Vec::with_capacity(ownership.len());
    for (index, share) in ownership.iter().enumerate() {
        let exact = available * share.total_contributed.value().max(0) as i128;
        amounts.push(exact / group_total);
        remainders.push((index, exact % group_total));
    }

    let allocated: i128 = amounts.iter().sum();
    let leftover = (available - allocated) as usize;

    remainders.sort_by(|(a_index, a_rem), (b_index, b_rem)| {
        b_rem
            .cmp(a_rem)
            .then_with(|| ownership[*a_index].member.cmp(&ownership[*b_index].member))
    });
    for (index, _) in remainders.into_iter().take(leftover) {
        amounts[index] += 1;
    }

    debug!(
        "Allocated {} cents across {} members with {} leftover cents",
        available,
        ownership.len(),
        leftover
    );

    // each amount is at most `available`, which came from an i64
    amounts.into_iter().map(|a| Cents(a as i64)).collect()
}
