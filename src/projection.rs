//! Multi-year projections
//!
//! Runs a deal allocation once per projected year, optionally compounding
//! network difficulty between years. The resulting arrays are what the
//! report layer renders, one row per year.

use crate::deal_a::{self, DealAInputs, DealAResult};
use crate::deal_b::{self, DealBInputs, DealBResult};
use crate::types::finite_or_zero;
use serde::{Deserialize, Serialize};

/// Projection settings shared by both deal models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSettings {
    /// Number of years to project. Zero produces an empty projection.
    pub years: u32,
    /// Annual network-difficulty growth percentage applied between years.
    /// 0 keeps difficulty flat, so year 1 equals the single-shot result.
    pub difficulty_growth_percent: f64,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            years: 1,
            difficulty_growth_percent: 0.0,
        }
    }
}

/// One projected year of a Deal A run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DealAYear {
    /// 1-based projection year.
    pub year: u32,
    /// Difficulty assumed for this year.
    pub network_difficulty: f64,
    #[serde(flatten)]
    pub result: DealAResult,
}

/// One projected year of a Deal B run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DealBYear {
    /// 1-based projection year.
    pub year: u32,
    /// Difficulty assumed for this year.
    pub network_difficulty: f64,
    #[serde(flatten)]
    pub result: DealBResult,
}

/// Project Deal A over multiple years.
pub fn project_deal_a(inputs: &DealAInputs, settings: &ProjectionSettings) -> Vec<DealAYear> {
    let growth = finite_or_zero(settings.difficulty_growth_percent);
    let mut yearly = Vec::with_capacity(settings.years as usize);
    let mut difficulty = inputs.params.network_difficulty;

    for year in 1..=settings.years {
        let mut year_inputs = *inputs;
        year_inputs.params.network_difficulty = difficulty;
        yearly.push(DealAYear {
            year,
            network_difficulty: difficulty,
            result: deal_a::calculate(&year_inputs),
        });
        difficulty *= 1.0 + growth / 100.0;
    }

    yearly
}

/// Project Deal B over multiple years.
pub fn project_deal_b(inputs: &DealBInputs, settings: &ProjectionSettings) -> Vec<DealBYear> {
    let growth = finite_or_zero(settings.difficulty_growth_percent);
    let mut yearly = Vec::with_capacity(settings.years as usize);
    let mut difficulty = inputs.params.network_difficulty;

    for year in 1..=settings.years {
        let mut year_inputs = *inputs;
        year_inputs.params.network_difficulty = difficulty;
        yearly.push(DealBYear {
            year,
            network_difficulty: difficulty,
            result: deal_b::calculate(&year_inputs),
        });
        difficulty *= 1.0 + growth / 100.0;
    }

    yearly
}
