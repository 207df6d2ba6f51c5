//! Deal A: revenue-share allocation
//!
//! The estimated monthly coin yield for a phase is split by a fixed
//! percentage between HEARST and Qatar. Qatar alone bears the full OPEX;
//! HEARST's OPEX is zero by contract. HEARST may additionally earn an
//! electricity-resale revenue stream from a separately allocated MW figure,
//! additive to its split revenue and outside the coin split.

use crate::constants::{HOURS_PER_MONTH, KW_PER_MW, MONTHS_PER_YEAR};
use crate::estimator::estimate_monthly_btc;
use crate::types::{clamp_percent, finite_or_zero, DeploymentPhase, MiningParams, Party};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Inputs to the Deal A allocator, constructed fresh per calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DealAInputs {
    /// Deployment phase supplying the mined megawattage.
    pub phase: DeploymentPhase,
    /// HEARST's share of the coin yield, percent 0-100. Qatar receives the
    /// remainder by construction.
    pub hearst_share_percent: f64,
    /// Market and hardware snapshot.
    pub params: MiningParams,
    /// Total monthly OPEX in USD, borne entirely by Qatar.
    pub opex_monthly: f64,
    /// Megawattage HEARST resells to the grid (secondary revenue stream).
    pub resale_mw: f64,
    /// Resale price in US cents per kWh.
    pub resale_rate_cents: f64,
    /// Project CAPEX in USD, attributed to Qatar unless an MW CAPEX
    /// override is supplied.
    pub capex: f64,
    /// Optional HEARST capital contribution in USD. Nonzero attributes the
    /// investment (and therefore ROI/breakeven) to HEARST.
    pub mw_capex_cost: f64,
}

impl DealAInputs {
    /// Create inputs with the split clamped into `[0, 100]` and no resale
    /// or investment overrides.
    pub fn new(phase: DeploymentPhase, hearst_share_percent: f64, params: MiningParams) -> Self {
        Self {
            phase,
            hearst_share_percent: clamp_percent(hearst_share_percent),
            params,
            opex_monthly: 0.0,
            resale_mw: 0.0,
            resale_rate_cents: 0.0,
            capex: 0.0,
            mw_capex_cost: 0.0,
        }
    }
}

/// Flat result record for a Deal A calculation. Pure output, no lifecycle
/// beyond the call that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DealAResult {
    /// Total estimated coin yield for the phase, BTC/month.
    pub total_monthly_btc: f64,
    /// HEARST's share of the yield, BTC/month.
    pub hearst_monthly_btc: f64,
    /// Qatar's share of the yield, BTC/month.
    pub qatar_monthly_btc: f64,
    /// HEARST coin revenue, USD/month.
    pub hearst_monthly_revenue: f64,
    /// Qatar coin revenue, USD/month.
    pub qatar_monthly_revenue: f64,
    /// HEARST electricity-resale revenue, USD/month.
    pub hearst_resale_revenue: f64,
    /// HEARST OPEX, USD/month. Zero by contract.
    pub hearst_monthly_opex: f64,
    /// Qatar OPEX, USD/month (the full project OPEX).
    pub qatar_monthly_opex: f64,
    /// HEARST net profit, USD/year.
    pub hearst_net_annual: f64,
    /// Qatar net profit, USD/year.
    pub qatar_net_annual: f64,
    /// Which party the investment is attributed to.
    pub investor: Party,
    /// Attributed investment, USD.
    pub investment: f64,
    /// Investor ROI, percent per year. Zero when there is no investment.
    pub roi_percent: f64,
    /// Months for the investor to recoup the investment; infinite when
    /// monthly profit is not positive.
    pub breakeven_months: f64,
}

/// Run the Deal A revenue-share allocation.
///
/// Never errors; invalid numeric inputs degrade to zero through the
/// estimator and the coercion helpers.
pub fn calculate(inputs: &DealAInputs) -> DealAResult {
    let share = clamp_percent(inputs.hearst_share_percent);
    let price = finite_or_zero(inputs.params.btc_price);
    let opex_monthly = finite_or_zero(inputs.opex_monthly);

    let total_monthly_btc = estimate_monthly_btc(inputs.phase.mw(), &inputs.params);
    let hearst_monthly_btc = total_monthly_btc * share / 100.0;
    // Remainder, not a second percentage multiply: the two shares must sum
    // to the total exactly.
    let qatar_monthly_btc = total_monthly_btc - hearst_monthly_btc;

    let hearst_monthly_revenue = hearst_monthly_btc * price;
    let qatar_monthly_revenue = qatar_monthly_btc * price;

    let hearst_resale_revenue = resale_revenue_monthly(
        inputs.resale_mw,
        inputs.resale_rate_cents,
        inputs.params.uptime,
    );

    // HEARST bears no OPEX under this deal.
    let hearst_monthly_opex = 0.0;
    let qatar_monthly_opex = opex_monthly;

    let hearst_net_annual = (hearst_monthly_revenue + hearst_resale_revenue) * MONTHS_PER_YEAR
        - hearst_monthly_opex * MONTHS_PER_YEAR;
    let qatar_net_annual =
        qatar_monthly_revenue * MONTHS_PER_YEAR - qatar_monthly_opex * MONTHS_PER_YEAR;

    // A nonzero MW CAPEX override shifts the investment (and ROI and
    // breakeven) from Qatar to HEARST.
    let mw_capex_cost = finite_or_zero(inputs.mw_capex_cost);
    let (investor, investment, net_annual) = if mw_capex_cost > 0.0 {
        (Party::Hearst, mw_capex_cost, hearst_net_annual)
    } else {
        (Party::Qatar, finite_or_zero(inputs.capex), qatar_net_annual)
    };

    let roi_percent = if investment > 0.0 {
        net_annual / investment * 100.0
    } else {
        0.0
    };
    let net_monthly = net_annual / MONTHS_PER_YEAR;
    let breakeven_months = if net_monthly > 0.0 && investment > 0.0 {
        investment / net_monthly
    } else {
        f64::INFINITY
    };

    trace!(
        phase = %inputs.phase,
        share,
        total_monthly_btc,
        %investor,
        "deal A allocation computed"
    );

    DealAResult {
        total_monthly_btc,
        hearst_monthly_btc,
        qatar_monthly_btc,
        hearst_monthly_revenue,
        qatar_monthly_revenue,
        hearst_resale_revenue,
        hearst_monthly_opex,
        qatar_monthly_opex,
        hearst_net_annual,
        qatar_net_annual,
        investor,
        investment,
        roi_percent,
        breakeven_months,
    }
}

/// Monthly resale revenue in USD for `mw` resold at `rate_cents` per kWh,
/// derated by the same uptime ratio as the coin yield.
fn resale_revenue_monthly(mw: f64, rate_cents: f64, uptime_percent: f64) -> f64 {
    let mw = finite_or_zero(mw);
    let rate_cents = finite_or_zero(rate_cents);
    let uptime = clamp_percent(uptime_percent);
    mw * KW_PER_MW * HOURS_PER_MONTH * (rate_cents / 100.0) * (uptime / 100.0)
}
