//! Deal B: megawatt-allocation
//!
//! The total project megawattage is split by percentage into two
//! independent capacity pools; each pool computes its own coin yield from
//! its own MW under shared market parameters. HEARST's pool pays only a
//! fixed OPEX-per-MW charge (no electricity, by contract); Qatar's pool
//! pays OPEX-per-MW plus the full electricity cost of its capacity.

use crate::constants::{
    DEAL_B_RESALE_RATE_CENTS, DEFAULT_ENERGY_RATE_CENTS, HOURS_PER_MONTH, KW_PER_MW,
    MONTHS_PER_YEAR,
};
use crate::estimator::estimate_monthly_btc;
use crate::types::{clamp_percent, finite_or_zero, MiningParams};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Inputs to the Deal B allocator, constructed fresh per calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DealBInputs {
    /// Total project megawattage to split.
    pub total_mw: f64,
    /// HEARST's capacity share, percent 0-100. Qatar receives
    /// `total_mw - hearst_mw` by construction, so the split always sums.
    pub hearst_mw_percent: f64,
    /// Market and hardware snapshot, shared by both pools.
    pub params: MiningParams,
    /// Fixed OPEX charge per allocated MW per month, USD. Paid by both
    /// pools.
    pub opex_per_mw_monthly: f64,
    /// Grid energy rate for Qatar's electricity cost, US cents per kWh.
    /// `None` falls back to [`DEFAULT_ENERGY_RATE_CENTS`].
    pub energy_rate_cents: Option<f64>,
}

impl DealBInputs {
    /// Create inputs with the split clamped into `[0, 100]` and the
    /// default energy rate.
    pub fn new(total_mw: f64, hearst_mw_percent: f64, params: MiningParams) -> Self {
        Self {
            total_mw: finite_or_zero(total_mw),
            hearst_mw_percent: clamp_percent(hearst_mw_percent),
            params,
            opex_per_mw_monthly: 0.0,
            energy_rate_cents: None,
        }
    }
}

/// Flat result record for a Deal B calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DealBResult {
    /// HEARST's capacity pool, MW.
    pub hearst_mw: f64,
    /// Qatar's capacity pool, MW.
    pub qatar_mw: f64,
    /// HEARST pool coin yield, BTC/month.
    pub hearst_monthly_btc: f64,
    /// Qatar pool coin yield, BTC/month.
    pub qatar_monthly_btc: f64,
    /// HEARST pool coin revenue, USD/month.
    pub hearst_monthly_revenue: f64,
    /// Qatar pool coin revenue, USD/month.
    pub qatar_monthly_revenue: f64,
    /// HEARST pool costs, USD/month (OPEX-per-MW only, no electricity).
    pub hearst_monthly_costs: f64,
    /// Qatar pool costs, USD/month (OPEX-per-MW plus electricity).
    pub qatar_monthly_costs: f64,
    /// Qatar electricity cost component, USD/month.
    pub qatar_electricity_cost: f64,
    /// Illustrative HEARST resale revenue at the fixed
    /// [`DEAL_B_RESALE_RATE_CENTS`] rate, USD/month. Computed independently
    /// of the energy-rate parameter; Deal A's equivalent is configurable.
    pub hearst_resale_revenue: f64,
    /// HEARST net profit, USD/year.
    pub hearst_net_annual: f64,
    /// Qatar net profit, USD/year.
    pub qatar_net_annual: f64,
}

/// Run the Deal B megawatt-allocation.
///
/// Never errors; invalid numeric inputs degrade to zero through the
/// estimator and the coercion helpers.
pub fn calculate(inputs: &DealBInputs) -> DealBResult {
    let total_mw = finite_or_zero(inputs.total_mw);
    let split = clamp_percent(inputs.hearst_mw_percent);
    let price = finite_or_zero(inputs.params.btc_price);
    let opex_per_mw = finite_or_zero(inputs.opex_per_mw_monthly);
    let energy_rate_cents = inputs
        .energy_rate_cents
        .map(finite_or_zero)
        .unwrap_or(DEFAULT_ENERGY_RATE_CENTS);

    let hearst_mw = total_mw * split / 100.0;
    // Remainder, not a second percentage multiply: the pools must sum to
    // the total exactly.
    let qatar_mw = total_mw - hearst_mw;

    // Each pool runs the estimator independently with its own capacity.
    let hearst_monthly_btc = estimate_monthly_btc(hearst_mw, &inputs.params);
    let qatar_monthly_btc = estimate_monthly_btc(qatar_mw, &inputs.params);

    let hearst_monthly_revenue = hearst_monthly_btc * price;
    let qatar_monthly_revenue = qatar_monthly_btc * price;

    // HEARST pays no electricity under this deal.
    let hearst_monthly_costs = opex_per_mw * hearst_mw;
    let qatar_electricity_cost =
        qatar_mw * KW_PER_MW * HOURS_PER_MONTH * (energy_rate_cents / 100.0);
    let qatar_monthly_costs = opex_per_mw * qatar_mw + qatar_electricity_cost;

    // Fixed illustrative figure; deliberately not tied to energy_rate_cents.
    let hearst_resale_revenue =
        hearst_mw * KW_PER_MW * HOURS_PER_MONTH * (DEAL_B_RESALE_RATE_CENTS / 100.0);

    let hearst_net_annual = (hearst_monthly_revenue - hearst_monthly_costs) * MONTHS_PER_YEAR;
    let qatar_net_annual = (qatar_monthly_revenue - qatar_monthly_costs) * MONTHS_PER_YEAR;

    trace!(
        total_mw,
        split,
        hearst_mw,
        qatar_mw,
        "deal B allocation computed"
    );

    DealBResult {
        hearst_mw,
        qatar_mw,
        hearst_monthly_btc,
        qatar_monthly_btc,
        hearst_monthly_revenue,
        qatar_monthly_revenue,
        hearst_monthly_costs,
        qatar_monthly_costs,
        qatar_electricity_cost,
        hearst_resale_revenue,
        hearst_net_annual,
        qatar_net_annual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reference_params() -> MiningParams {
        MiningParams {
            btc_price: 100_000.0,
            network_difficulty: 100.0,
            hashrate_per_mw: 1.5,
            block_reward: 3.125,
            uptime: 90.0,
            pool_fee: 1.0,
        }
    }

    fn reference_inputs() -> DealBInputs {
        let mut inputs = DealBInputs::new(100.0, 40.0, reference_params());
        inputs.opex_per_mw_monthly = 5_000.0;
        inputs
    }

    #[test]
    fn test_mw_split_sums_to_total() {
        let result = calculate(&reference_inputs());
        assert_eq!(result.hearst_mw, 40.0);
        assert_eq!(result.qatar_mw, 60.0);
        assert_eq!(result.hearst_mw + result.qatar_mw, 100.0);
    }

    #[test]
    fn test_each_pool_yields_independently() {
        let inputs = reference_inputs();
        let result = calculate(&inputs);
        assert_eq!(
            result.hearst_monthly_btc,
            estimate_monthly_btc(40.0, &inputs.params)
        );
        assert_eq!(
            result.qatar_monthly_btc,
            estimate_monthly_btc(60.0, &inputs.params)
        );
    }

    #[test]
    fn test_hearst_pays_no_electricity() {
        let result = calculate(&reference_inputs());
        assert_eq!(result.hearst_monthly_costs, 5_000.0 * 40.0);

        // Qatar: per-MW OPEX plus electricity at the 2.5c default.
        let expected_electricity = 60.0 * 1_000.0 * 720.0 * 0.025;
        assert!((result.qatar_electricity_cost - expected_electricity).abs() < 1e-6);
        assert!(
            (result.qatar_monthly_costs - (5_000.0 * 60.0 + expected_electricity)).abs() < 1e-6
        );
    }

    #[test]
    fn test_explicit_energy_rate_overrides_default() {
        let mut inputs = reference_inputs();
        inputs.energy_rate_cents = Some(4.0);
        let result = calculate(&inputs);
        let expected_electricity = 60.0 * 1_000.0 * 720.0 * 0.04;
        assert!((result.qatar_electricity_cost - expected_electricity).abs() < 1e-6);
    }

    #[test]
    fn test_resale_revenue_uses_fixed_rate() {
        // The illustrative resale figure stays at 5.5c/kWh even when the
        // energy rate says otherwise.
        let mut inputs = reference_inputs();
        inputs.energy_rate_cents = Some(9.0);
        let result = calculate(&inputs);
        let expected = 40.0 * 1_000.0 * 720.0 * 0.055;
        assert!((result.hearst_resale_revenue - expected).abs() < 1e-6);
    }

    #[test]
    fn test_net_annual_profit() {
        let result = calculate(&reference_inputs());
        assert!(
            (result.hearst_net_annual
                - (result.hearst_monthly_revenue - result.hearst_monthly_costs) * 12.0)
                .abs()
                < 1e-6
        );
        assert!(
            (result.qatar_net_annual
                - (result.qatar_monthly_revenue - result.qatar_monthly_costs) * 12.0)
                .abs()
                < 1e-6
        );
    }

    #[test]
    fn test_zero_percent_gives_hearst_nothing() {
        let mut inputs = reference_inputs();
        inputs.hearst_mw_percent = 0.0;
        let result = calculate(&inputs);
        assert_eq!(result.hearst_mw, 0.0);
        assert_eq!(result.hearst_monthly_btc, 0.0);
        assert_eq!(result.qatar_mw, 100.0);
    }

    #[test]
    fn test_invalid_params_degrade_to_zero_yield() {
        let mut inputs = reference_inputs();
        inputs.params.hashrate_per_mw = f64::NAN;
        let result = calculate(&inputs);
        assert_eq!(result.hearst_monthly_btc, 0.0);
        assert_eq!(result.qatar_monthly_btc, 0.0);
        // Costs still accrue.
        assert!(result.qatar_monthly_costs > 0.0);
        assert!(result.qatar_net_annual < 0.0);
    }

    proptest! {
        #[test]
        fn prop_mw_split_sums_for_any_percent(
            total in 0.1f64..1_000.0,
            split in 0.0f64..=100.0,
        ) {
            let mut inputs = reference_inputs();
            inputs.total_mw = total;
            inputs.hearst_mw_percent = split;
            let result = calculate(&inputs);
            prop_assert!((result.hearst_mw + result.qatar_mw - total).abs() <= total * 1e-12);
            prop_assert!(result.hearst_mw >= 0.0);
            prop_assert!(result.qatar_mw >= 0.0);
        }

        #[test]
        fn prop_pool_yields_scale_with_split(split in 1.0f64..99.0) {
            let mut inputs = reference_inputs();
            inputs.hearst_mw_percent = split;
            let result = calculate(&inputs);
            // Yield is linear in MW, so pool yields track the capacity ratio.
            let ratio = result.hearst_monthly_btc / result.qatar_monthly_btc;
            let expected = result.hearst_mw / result.qatar_mw;
            prop_assert!((ratio - expected).abs() < 1e-9);
        }
    }
}
