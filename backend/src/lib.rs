//! # Venture Tracker Backend
//!
//! Money and allocation logic for the venture group tracker.
//!
//! The remote backend owns every record (groups, contributions, expenses,
//! revenue, payouts). This crate is the layer the UI talks to in between:
//!
//! ```text
//! UI forms / display surfaces
//!     ↓
//! Domain layer (money parsing, aggregation, ownership, payouts)
//!     ↓
//! Shared records (cents, currency codes, backend value types)
//! ```
//!
//! Logging goes through the `log` facade; the host application installs the
//! logger. The only file this crate touches is the optional money config.

pub mod config;
pub mod domain;

pub use config::MoneyConfigStore;
pub use domain::*;
