//! Mining Joint-Venture Simulator
//!
//! A financial simulator for a two-party Bitcoin mining joint venture
//! (HEARST / Qatar) supporting:
//! - BTC production estimation from hashrate, difficulty, uptime, and pool fee
//! - CAPEX/OPEX computation with phase volume discounts
//! - Deal A: revenue-share profit split
//! - Deal B: megawatt-allocation profit split
//! - Multi-year projections and named, persisted scenarios
//!
//! The calculation core is pure and infallible: invalid numeric input
//! degrades to zero rather than raising, with a diagnostic channel for
//! callers that need to tell the two apart.

pub mod config;
pub mod constants;
pub mod costs;
pub mod deal_a;
pub mod deal_b;
pub mod error;
pub mod estimator;
pub mod projection;
pub mod report;
pub mod scenario;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;

/// Application information
pub const APP_NAME: &str = "mining-jv-simulator";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
