//! Bitcoin production estimator
//!
//! Converts an allocated megawattage and a [`MiningParams`] snapshot into
//! an estimated monthly coin yield. The estimate approximates total network
//! hashrate from difficulty via a calibration constant, takes the fleet's
//! proportional share of daily issuance, and derates it by uptime and pool
//! fee.
//!
//! The estimator never errors. Any zero or non-finite driving input
//! short-circuits the whole estimate to 0; callers that need to tell a
//! genuine zero-yield computation apart from suppressed bad input use
//! [`estimate_monthly_btc_checked`].

use crate::constants::{
    BLOCKS_PER_DAY, DAYS_PER_MONTH, NETWORK_HASHRATE_PER_DIFFICULTY,
};
use crate::types::MiningParams;
use serde::Serialize;
use tracing::debug;

/// Outcome classification for a production estimate.
///
/// Distinguishes "the arithmetic ran and produced this number" from "an
/// input was invalid and the estimate was suppressed to zero". The plain
/// estimator conflates the two; the checked API keeps the never-throws
/// contract while making the difference observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "field")]
pub enum EstimateDiagnostic {
    /// All inputs were usable and the yield was computed.
    Computed,
    /// The named input was zero or non-finite; the estimate is a
    /// suppressed 0, not a computed one.
    SuppressedInput(&'static str),
}

impl EstimateDiagnostic {
    /// Whether the estimate was genuinely computed.
    pub fn is_computed(&self) -> bool {
        matches!(self, EstimateDiagnostic::Computed)
    }
}

/// A monthly yield estimate together with its diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyYield {
    /// Estimated coins mined per month, never negative.
    pub btc: f64,
    /// How the figure was arrived at.
    pub diagnostic: EstimateDiagnostic,
}

/// Estimate monthly BTC production for `mw` megawatts under `params`.
///
/// Returns 0 for any invalid input without raising; the suppression is
/// logged at `debug` level. See [`estimate_monthly_btc_checked`] for a
/// variant that reports which input was rejected.
pub fn estimate_monthly_btc(mw: f64, params: &MiningParams) -> f64 {
    let yield_estimate = estimate_monthly_btc_checked(mw, params);
    if let EstimateDiagnostic::SuppressedInput(field) = yield_estimate.diagnostic {
        debug!(field, "production estimate suppressed to 0 by invalid input");
    }
    yield_estimate.btc
}

/// Estimate monthly BTC production, reporting whether the figure was
/// computed or suppressed.
pub fn estimate_monthly_btc_checked(mw: f64, params: &MiningParams) -> MonthlyYield {
    // Zero or non-finite driving inputs short-circuit the whole estimate.
    let guards = [
        ("mw", mw),
        ("hashrate_per_mw", params.hashrate_per_mw),
        ("network_difficulty", params.network_difficulty),
        ("uptime", params.uptime),
        ("block_reward", params.block_reward),
    ];
    for (field, value) in guards {
        if !value.is_finite() || value == 0.0 {
            return MonthlyYield {
                btc: 0.0,
                diagnostic: EstimateDiagnostic::SuppressedInput(field),
            };
        }
    }
    let pool_fee = if params.pool_fee.is_finite() {
        params.pool_fee
    } else {
        return MonthlyYield {
            btc: 0.0,
            diagnostic: EstimateDiagnostic::SuppressedInput("pool_fee"),
        };
    };

    let network_hashrate = params.network_difficulty * NETWORK_HASHRATE_PER_DIFFICULTY;
    if network_hashrate == 0.0 {
        return MonthlyYield {
            btc: 0.0,
            diagnostic: EstimateDiagnostic::SuppressedInput("network_hashrate"),
        };
    }

    let hashrate_share = (mw * params.hashrate_per_mw) / network_hashrate;
    let daily_issuance = BLOCKS_PER_DAY * params.block_reward;
    let daily_btc =
        hashrate_share * daily_issuance * (params.uptime / 100.0) * (1.0 - pool_fee / 100.0);
    let monthly_btc = (daily_btc * DAYS_PER_MONTH).max(0.0);

    MonthlyYield {
        btc: monthly_btc,
        diagnostic: EstimateDiagnostic::Computed,
    }
}
