//! CAPEX and OPEX helpers
//!
//! Fixed per-project cost computations feeding both deal allocators.
//! Like the estimator, these never error: non-finite inputs are resolved
//! to zero once at the top of each function.

use crate::constants::{
    DEFAULT_FIXED_COSTS_BASE, DEFAULT_FIXED_COSTS_PER_MW, DEFAULT_MAINTENANCE_PERCENT,
    HOURS_PER_MONTH, KW_PER_MW, MONTHS_PER_YEAR,
};
use crate::types::{finite_or_zero, DeploymentPhase, HardwareCosts};
use serde::{Deserialize, Serialize};

/// Assumptions behind the monthly OPEX computation, resolved to named
/// defaults at construction time rather than defaulted at each use site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpexAssumptions {
    /// Annual maintenance budget as a percentage of CAPEX.
    #[serde(default = "default_maintenance_percent")]
    pub maintenance_percent: f64,
    /// Fixed monthly costs independent of capacity, USD.
    #[serde(default = "default_fixed_costs_base")]
    pub fixed_costs_base: f64,
    /// Fixed monthly costs per allocated MW, USD.
    #[serde(default = "default_fixed_costs_per_mw")]
    pub fixed_costs_per_mw: f64,
}

impl Default for OpexAssumptions {
    fn default() -> Self {
        Self {
            maintenance_percent: DEFAULT_MAINTENANCE_PERCENT,
            fixed_costs_base: DEFAULT_FIXED_COSTS_BASE,
            fixed_costs_per_mw: DEFAULT_FIXED_COSTS_PER_MW,
        }
    }
}

fn default_maintenance_percent() -> f64 {
    DEFAULT_MAINTENANCE_PERCENT
}
fn default_fixed_costs_base() -> f64 {
    DEFAULT_FIXED_COSTS_BASE
}
fn default_fixed_costs_per_mw() -> f64 {
    DEFAULT_FIXED_COSTS_PER_MW
}

/// Breakdown of one month of operating expenditure, USD.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct OpexBreakdown {
    pub electricity: f64,
    pub maintenance: f64,
    pub fixed: f64,
    pub total: f64,
}

/// Compute total CAPEX in USD for `mw` megawatts at the given phase.
///
/// Sums the four per-MW hardware components, scales by capacity, and
/// applies the phase volume discount.
pub fn capex(mw: f64, hardware: &HardwareCosts, phase: DeploymentPhase) -> f64 {
    let mw = finite_or_zero(mw);
    let per_mw = finite_or_zero(hardware.total_per_mw());
    per_mw * mw * (1.0 - phase.capex_discount())
}

/// Compute one month of OPEX in USD for `mw` megawatts.
///
/// Electricity runs the full capacity for every hour of the month at
/// `energy_rate_cents` (US cents per kWh); maintenance is an annual
/// percentage of CAPEX spread over twelve months; fixed costs are a base
/// amount plus a per-MW charge.
pub fn opex_monthly(
    mw: f64,
    energy_rate_cents: f64,
    capex: f64,
    assumptions: &OpexAssumptions,
) -> OpexBreakdown {
    let mw = finite_or_zero(mw);
    let energy_rate_cents = finite_or_zero(energy_rate_cents);
    let capex = finite_or_zero(capex);
    let maintenance_percent = finite_or_zero(assumptions.maintenance_percent);
    let fixed_base = finite_or_zero(assumptions.fixed_costs_base);
    let fixed_per_mw = finite_or_zero(assumptions.fixed_costs_per_mw);

    let electricity = mw * KW_PER_MW * HOURS_PER_MONTH * (energy_rate_cents / 100.0);
    let maintenance = (capex * maintenance_percent / 100.0) / MONTHS_PER_YEAR;
    let fixed = fixed_base + mw * fixed_per_mw;

    OpexBreakdown {
        electricity,
        maintenance,
        fixed,
        total: electricity + maintenance + fixed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capex_phase_one_is_undiscounted() {
        let hardware = HardwareCosts {
            asic_per_mw: 600_000.0,
            infrastructure_per_mw: 150_000.0,
            cooling_per_mw: 80_000.0,
            networking_per_mw: 20_000.0,
        };
        let total = capex(25.0, &hardware, DeploymentPhase::One);
        assert_eq!(total, 850_000.0 * 25.0);
    }

    #[test]
    fn test_capex_phase_three_is_ninety_percent_of_phase_one() {
        let hardware = HardwareCosts::default();
        let phase1 = capex(100.0, &hardware, DeploymentPhase::One);
        let phase3 = capex(100.0, &hardware, DeploymentPhase::Three);
        assert!((phase3 - phase1 * 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_capex_phase_two_discount() {
        let hardware = HardwareCosts::default();
        let phase1 = capex(100.0, &hardware, DeploymentPhase::One);
        let phase2 = capex(100.0, &hardware, DeploymentPhase::Two);
        assert!((phase2 - phase1 * 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_capex_nan_inputs_coerce_to_zero() {
        let hardware = HardwareCosts {
            asic_per_mw: f64::NAN,
            infrastructure_per_mw: f64::NAN,
            cooling_per_mw: f64::NAN,
            networking_per_mw: f64::NAN,
        };
        assert_eq!(capex(25.0, &hardware, DeploymentPhase::One), 0.0);
        assert_eq!(capex(f64::NAN, &HardwareCosts::default(), DeploymentPhase::One), 0.0);
    }

    #[test]
    fn test_opex_golden_value() {
        // electricity = 25 * 1000 * 720 * 0.025 = 450,000
        // maintenance = 10,000,000 * 0.02 / 12 = 16,666.67
        // fixed = 75,000 + 25 * 1,000 = 100,000
        let breakdown = opex_monthly(25.0, 2.5, 10_000_000.0, &OpexAssumptions::default());
        assert!((breakdown.electricity - 450_000.0).abs() < 1e-6);
        assert!((breakdown.maintenance - 16_666.666666666668).abs() < 1e-6);
        assert!((breakdown.fixed - 100_000.0).abs() < 1e-6);
        assert!((breakdown.total - 566_666.6666666667).abs() < 1e-6);
    }

    #[test]
    fn test_opex_zero_capacity_still_carries_fixed_base() {
        let breakdown = opex_monthly(0.0, 2.5, 0.0, &OpexAssumptions::default());
        assert_eq!(breakdown.electricity, 0.0);
        assert_eq!(breakdown.maintenance, 0.0);
        assert_eq!(breakdown.fixed, 75_000.0);
        assert_eq!(breakdown.total, 75_000.0);
    }

    #[test]
    fn test_opex_nan_inputs_coerce_to_zero() {
        let breakdown = opex_monthly(
            f64::NAN,
            f64::NAN,
            f64::NAN,
            &OpexAssumptions {
                maintenance_percent: f64::NAN,
                fixed_costs_base: f64::NAN,
                fixed_costs_per_mw: f64::NAN,
            },
        );
        assert_eq!(breakdown.total, 0.0);
    }

    #[test]
    fn test_opex_assumptions_serde_defaults() {
        let assumptions: OpexAssumptions = serde_json::from_str("{}").unwrap();
        assert_eq!(assumptions.maintenance_percent, 2.0);
        assert_eq!(assumptions.fixed_costs_base, 75_000.0);
        assert_eq!(assumptions.fixed_costs_per_mw, 1_000.0);
    }
}
