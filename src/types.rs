//! Core domain types for the joint-venture simulator
//!
//! Parameter snapshots, deployment phases, hardware cost tables, and the
//! two contracting parties. All types are plain data with serde support;
//! calculations treat them as immutable snapshots.

use crate::{constants, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Immutable snapshot of market and hardware parameters for one
/// calculation call.
///
/// `uptime` and `pool_fee` are percentages in `[0, 100]`. Difficulty is in
/// terahash units; `hashrate_per_mw` is petahash per megawatt. Values are
/// not validated on construction: the calculators coerce non-finite or
/// out-of-range inputs to zero rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MiningParams {
    /// Bitcoin price in USD per coin.
    #[serde(default)]
    pub btc_price: f64,
    /// Network difficulty in terahash units.
    #[serde(default)]
    pub network_difficulty: f64,
    /// Fleet hashrate in petahash per allocated megawatt.
    #[serde(default)]
    pub hashrate_per_mw: f64,
    /// Block subsidy in coins per block.
    #[serde(default)]
    pub block_reward: f64,
    /// Fleet uptime percentage, 0-100.
    #[serde(default)]
    pub uptime: f64,
    /// Mining pool fee percentage, 0-100.
    #[serde(default)]
    pub pool_fee: f64,
}

impl Default for MiningParams {
    fn default() -> Self {
        Self {
            btc_price: 100_000.0,
            network_difficulty: 100.0,
            hashrate_per_mw: 1.5,
            block_reward: 3.125,
            uptime: 95.0,
            pool_fee: 1.0,
        }
    }
}

/// The two parties to the joint venture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    Hearst,
    Qatar,
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::Hearst => write!(f, "HEARST"),
            Party::Qatar => write!(f, "Qatar"),
        }
    }
}

/// The three fixed deployment phases of the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentPhase {
    One,
    Two,
    Three,
}

impl DeploymentPhase {
    /// All phases in deployment order.
    pub const ALL: [DeploymentPhase; 3] =
        [DeploymentPhase::One, DeploymentPhase::Two, DeploymentPhase::Three];

    /// Static configuration for this phase.
    pub fn config(&self) -> PhaseConfig {
        match self {
            DeploymentPhase::One => PhaseConfig {
                mw: 25.0,
                timeline: "Q1 2025",
                status: "Committed",
            },
            DeploymentPhase::Two => PhaseConfig {
                mw: 100.0,
                timeline: "Q4 2025",
                status: "Planned",
            },
            DeploymentPhase::Three => PhaseConfig {
                mw: 200.0,
                timeline: "2026",
                status: "Optional",
            },
        }
    }

    /// Allocated megawattage for this phase.
    pub fn mw(&self) -> f64 {
        self.config().mw
    }

    /// CAPEX volume discount for this phase, as a fraction.
    pub fn capex_discount(&self) -> f64 {
        constants::PHASE_CAPEX_DISCOUNTS[self.index()]
    }

    /// Zero-based phase index.
    pub fn index(&self) -> usize {
        match self {
            DeploymentPhase::One => 0,
            DeploymentPhase::Two => 1,
            DeploymentPhase::Three => 2,
        }
    }

    /// One-based phase number as shown to users.
    pub fn number(&self) -> u8 {
        self.index() as u8 + 1
    }
}

impl FromStr for DeploymentPhase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1" | "one" => Ok(DeploymentPhase::One),
            "2" | "two" => Ok(DeploymentPhase::Two),
            "3" | "three" => Ok(DeploymentPhase::Three),
            other => Err(Error::config(format!(
                "Invalid deployment phase '{}': expected 1, 2, or 3",
                other
            ))),
        }
    }
}

impl fmt::Display for DeploymentPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.config();
        write!(
            f,
            "Phase {} ({} MW, {}, {})",
            self.number(),
            config.mw,
            config.timeline,
            config.status
        )
    }
}

/// Static configuration for one deployment phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseConfig {
    /// Allocated megawattage.
    pub mw: f64,
    /// Target timeline label.
    pub timeline: &'static str,
    /// Commitment status label.
    pub status: &'static str,
}

/// Per-MW hardware cost components in USD, used to derive CAPEX.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HardwareCosts {
    #[serde(default)]
    pub asic_per_mw: f64,
    #[serde(default)]
    pub infrastructure_per_mw: f64,
    #[serde(default)]
    pub cooling_per_mw: f64,
    #[serde(default)]
    pub networking_per_mw: f64,
}

impl HardwareCosts {
    /// Sum of all per-MW components.
    pub fn total_per_mw(&self) -> f64 {
        self.asic_per_mw
            + self.infrastructure_per_mw
            + self.cooling_per_mw
            + self.networking_per_mw
    }
}

impl Default for HardwareCosts {
    fn default() -> Self {
        Self {
            asic_per_mw: constants::hardware::ASIC_PER_MW,
            infrastructure_per_mw: constants::hardware::INFRASTRUCTURE_PER_MW,
            cooling_per_mw: constants::hardware::COOLING_PER_MW,
            networking_per_mw: constants::hardware::NETWORKING_PER_MW,
        }
    }
}

/// Coerce a possibly NaN/infinite value to a finite one, defaulting to 0.
///
/// The simulator never raises on bad numeric input; it degrades to zero.
/// Resolve defaults with this once at the top of a calculation, not at
/// each use site.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Clamp a percentage into `[0, 100]`, coercing non-finite values to 0.
pub fn clamp_percent(value: f64) -> f64 {
    finite_or_zero(value).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_configs() {
        assert_eq!(DeploymentPhase::One.mw(), 25.0);
        assert_eq!(DeploymentPhase::Two.mw(), 100.0);
        assert_eq!(DeploymentPhase::Three.mw(), 200.0);

        assert_eq!(DeploymentPhase::One.capex_discount(), 0.0);
        assert_eq!(DeploymentPhase::Two.capex_discount(), 0.05);
        assert_eq!(DeploymentPhase::Three.capex_discount(), 0.10);
    }

    #[test]
    fn test_phase_parsing() {
        assert_eq!(DeploymentPhase::from_str("1").unwrap(), DeploymentPhase::One);
        assert_eq!(DeploymentPhase::from_str("two").unwrap(), DeploymentPhase::Two);
        assert_eq!(DeploymentPhase::from_str("3").unwrap(), DeploymentPhase::Three);
        assert!(DeploymentPhase::from_str("4").is_err());
        assert!(DeploymentPhase::from_str("").is_err());
    }

    #[test]
    fn test_hardware_costs_total() {
        let costs = HardwareCosts {
            asic_per_mw: 1.0,
            infrastructure_per_mw: 2.0,
            cooling_per_mw: 3.0,
            networking_per_mw: 4.0,
        };
        assert_eq!(costs.total_per_mw(), 10.0);
    }

    #[test]
    fn test_finite_or_zero() {
        assert_eq!(finite_or_zero(5.0), 5.0);
        assert_eq!(finite_or_zero(-5.0), -5.0);
        assert_eq!(finite_or_zero(f64::NAN), 0.0);
        assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
        assert_eq!(finite_or_zero(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(50.0), 50.0);
        assert_eq!(clamp_percent(-10.0), 0.0);
        assert_eq!(clamp_percent(150.0), 100.0);
        assert_eq!(clamp_percent(f64::NAN), 0.0);
    }

    #[test]
    fn test_mining_params_json_round_trip_is_exact() {
        let params = MiningParams {
            btc_price: 97_123.456789,
            network_difficulty: 101.7,
            hashrate_per_mw: 1.5000000000000002,
            block_reward: 3.125,
            uptime: 93.33333333333333,
            pool_fee: 1.25,
        };

        let json = serde_json::to_string(&params).unwrap();
        let back: MiningParams = serde_json::from_str(&json).unwrap();

        assert_eq!(params.btc_price.to_bits(), back.btc_price.to_bits());
        assert_eq!(
            params.network_difficulty.to_bits(),
            back.network_difficulty.to_bits()
        );
        assert_eq!(
            params.hashrate_per_mw.to_bits(),
            back.hashrate_per_mw.to_bits()
        );
        assert_eq!(params.block_reward.to_bits(), back.block_reward.to_bits());
        assert_eq!(params.uptime.to_bits(), back.uptime.to_bits());
        assert_eq!(params.pool_fee.to_bits(), back.pool_fee.to_bits());
    }

    #[test]
    fn test_mining_params_missing_fields_default_to_zero() {
        let params: MiningParams = serde_json::from_str(r#"{"btc_price": 50000}"#).unwrap();
        assert_eq!(params.btc_price, 50_000.0);
        assert_eq!(params.network_difficulty, 0.0);
        assert_eq!(params.uptime, 0.0);
    }
}
