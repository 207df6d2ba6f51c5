//! Calibration constants for the joint-venture simulator
//!
//! Every number that parameterizes a formula lives here under a name, so it
//! can be updated as real network conditions change without touching the
//! formula logic.

/// Approximate total Bitcoin network hashrate per unit of difficulty,
/// expressed in the same hashrate units as `MiningParams::hashrate_per_mw`
/// (petahash). This is a calibration constant fitted against observed
/// network conditions, not a physical law.
pub const NETWORK_HASHRATE_PER_DIFFICULTY: f64 = 6_000.0;

/// Expected Bitcoin blocks mined per day (one every ~10 minutes).
pub const BLOCKS_PER_DAY: f64 = 144.0;

/// Days per month used throughout the monthly projections.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Hours per month used for electricity cost and resale computations.
pub const HOURS_PER_MONTH: f64 = 720.0;

/// Kilowatts per megawatt.
pub const KW_PER_MW: f64 = 1_000.0;

/// Months per year.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// CAPEX discount per deployment phase, as a fraction. Larger phases get
/// volume pricing: phase 1 pays list, phase 2 gets 5%, phase 3 gets 10%.
pub const PHASE_CAPEX_DISCOUNTS: [f64; 3] = [0.0, 0.05, 0.10];

/// Default grid energy rate in US cents per kWh (Qatar industrial rate).
pub const DEFAULT_ENERGY_RATE_CENTS: f64 = 2.5;

/// Fixed electricity resale rate used for Deal B's illustrative HEARST
/// resale figure, in US cents per kWh. Deliberately independent of the
/// energy-rate parameter; Deal A's equivalent rate is configurable. The
/// discrepancy matches the deal sheets as negotiated and is preserved.
pub const DEAL_B_RESALE_RATE_CENTS: f64 = 5.5;

/// Default annual maintenance budget as a percentage of CAPEX.
pub const DEFAULT_MAINTENANCE_PERCENT: f64 = 2.0;

/// Default fixed monthly operating costs in USD (staffing, site, insurance).
pub const DEFAULT_FIXED_COSTS_BASE: f64 = 75_000.0;

/// Default fixed monthly operating costs per allocated MW, in USD.
pub const DEFAULT_FIXED_COSTS_PER_MW: f64 = 1_000.0;

/// Default per-MW hardware cost components in USD.
pub mod hardware {
    /// ASIC miners per MW.
    pub const ASIC_PER_MW: f64 = 600_000.0;
    /// Electrical infrastructure (transformers, switchgear) per MW.
    pub const INFRASTRUCTURE_PER_MW: f64 = 150_000.0;
    /// Cooling (immersion/hydro) per MW.
    pub const COOLING_PER_MW: f64 = 80_000.0;
    /// Networking and monitoring per MW.
    pub const NETWORKING_PER_MW: f64 = 20_000.0;
}
