//! Report rendering
//!
//! Renders a multi-year projection to a plain-text table, JSON, or YAML.
//! Formatting guards non-finite values the same way the calculators coerce
//! inputs: NaN prints as 0, infinite breakeven prints as "never".

use crate::config::OutputFormat;
use crate::projection::{DealAYear, DealBYear};
use crate::Result;
use serde::Serialize;
use std::fmt::Write;

/// A rendered projection, one variant per deal model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "deal", content = "years")]
pub enum ProjectionReport {
    DealA(Vec<DealAYear>),
    DealB(Vec<DealBYear>),
}

impl ProjectionReport {
    /// Render the report in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(self)?),
            OutputFormat::Table => Ok(match self {
                ProjectionReport::DealA(years) => render_deal_a_table(years),
                ProjectionReport::DealB(years) => render_deal_b_table(years),
            }),
        }
    }
}

/// Format a USD amount with thousands separators, guarding non-finite
/// values.
pub fn format_usd(value: f64) -> String {
    if value.is_nan() {
        return "$0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "$inf" } else { "-$inf" }.to_string();
    }
    let negative = value < 0.0;
    let rounded = value.abs().round() as u64;
    let grouped = group_thousands(rounded);
    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Format a BTC amount to 4 decimal places, guarding non-finite values.
pub fn format_btc(value: f64) -> String {
    if value.is_finite() {
        format!("{:.4} BTC", value)
    } else {
        "0.0000 BTC".to_string()
    }
}

/// Format a breakeven month count; infinite means the position never pays
/// back.
pub fn format_breakeven(months: f64) -> String {
    if months.is_finite() {
        format!("{:.1} mo", months)
    } else {
        "never".to_string()
    }
}

fn group_thousands(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut groups = Vec::new();
    while value > 0 {
        groups.push((value % 1000) as u16);
        value /= 1000;
    }
    let mut out = String::new();
    for (i, group) in groups.iter().rev().enumerate() {
        if i == 0 {
            write!(out, "{}", group).unwrap();
        } else {
            write!(out, ",{:03}", group).unwrap();
        }
    }
    out
}

fn render_deal_a_table(years: &[DealAYear]) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "{:>4}  {:>12}  {:>14}  {:>14}  {:>14}  {:>14}  {:>14}  {:>10}",
        "Year",
        "Total BTC/mo",
        "HEARST rev/mo",
        "Qatar rev/mo",
        "Qatar OPEX/mo",
        "HEARST net/yr",
        "Qatar net/yr",
        "Breakeven"
    )
    .unwrap();
    for year in years {
        let r = &year.result;
        writeln!(
            out,
            "{:>4}  {:>12}  {:>14}  {:>14}  {:>14}  {:>14}  {:>14}  {:>10}",
            year.year,
            format_btc(r.total_monthly_btc),
            format_usd(r.hearst_monthly_revenue + r.hearst_resale_revenue),
            format_usd(r.qatar_monthly_revenue),
            format_usd(r.qatar_monthly_opex),
            format_usd(r.hearst_net_annual),
            format_usd(r.qatar_net_annual),
            format_breakeven(r.breakeven_months),
        )
        .unwrap();
    }
    if let Some(first) = years.first() {
        writeln!(
            out,
            "\nInvestment: {} borne by {} (ROI {:.1}%/yr)",
            format_usd(first.result.investment),
            first.result.investor,
            first.result.roi_percent
        )
        .unwrap();
    }
    out
}

fn render_deal_b_table(years: &[DealBYear]) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "{:>4}  {:>10}  {:>10}  {:>14}  {:>14}  {:>14}  {:>14}  {:>14}",
        "Year",
        "HEARST MW",
        "Qatar MW",
        "HEARST rev/mo",
        "Qatar rev/mo",
        "Qatar elec/mo",
        "HEARST net/yr",
        "Qatar net/yr"
    )
    .unwrap();
    for year in years {
        let r = &year.result;
        writeln!(
            out,
            "{:>4}  {:>10.1}  {:>10.1}  {:>14}  {:>14}  {:>14}  {:>14}  {:>14}",
            year.year,
            r.hearst_mw,
            r.qatar_mw,
            format_usd(r.hearst_monthly_revenue),
            format_usd(r.qatar_monthly_revenue),
            format_usd(r.qatar_electricity_cost),
            format_usd(r.hearst_net_annual),
            format_usd(r.qatar_net_annual),
        )
        .unwrap();
    }
    if let Some(first) = years.first() {
        writeln!(
            out,
            "\nHEARST illustrative resale revenue: {}/mo (fixed 5.5 c/kWh)",
            format_usd(first.result.hearst_resale_revenue)
        )
        .unwrap();
    }
    out
}
