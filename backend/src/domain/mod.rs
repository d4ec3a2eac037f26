//! # Domain Module
//!
//! Contains the money and allocation logic of the venture tracker.
//!
//! Records are created and stored by the remote backend; this layer only
//! validates what users type before it is sent out, and derives the figures
//! the UI displays from what comes back. Every function is pure.
//!
//! ## Module Organization
//!
//! - **money**: cents/units conversion, input parsing and validation, formatting
//! - **money_math**: exact cent summation and percentage calculation
//! - **expense_normalization**: display shim for historically mis-scaled expenses
//! - **ownership_service**: ownership percentages from paid contributions
//! - **payout_service**: payout suggestions, payout records and member returns
//! - **group_finance_service**: financial summary and group progress
//!
//! ## Business Rules
//!
//! - Amounts are integer cents until the final display conversion
//! - A typed amount must lie between 0.01 and 10,000,000.00 and is rounded half-up
//! - Only paid contributions count towards ownership and money raised
//! - Payout suggestions always add up to exactly the funds available
//! - Every formatted amount names its currency explicitly

pub mod money;
pub mod money_math;
pub mod expense_normalization;
pub mod ownership_service;
pub mod payout_service;
pub mod group_finance_service;

pub use money::*;
pub use money_math::{calculate_percentage, sum_cents};
pub use expense_normalization::*;
pub use ownership_service::*;
pub use payout_service::*;
pub use group_finance_service::*;
