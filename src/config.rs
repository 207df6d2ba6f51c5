//! Configuration management for the joint-venture simulator
//!
//! Supports configuration via command line arguments, environment
//! variables, and configuration files (YAML/JSON) with validation and
//! named defaults. CLI values take precedence over file values.

use crate::costs::OpexAssumptions;
use crate::projection::ProjectionSettings;
use crate::scenario::Scenario;
use crate::types::{DeploymentPhase, MiningParams};
use crate::{constants, Error, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// The two contractual deal models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealModel {
    /// Deal A: revenue-share split of the coin yield.
    A,
    /// Deal B: megawatt-allocation into independent capacity pools.
    B,
}

impl fmt::Display for DealModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealModel::A => write!(f, "a"),
            DealModel::B => write!(f, "b"),
        }
    }
}

/// Output formats for the rendered projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Complete configuration for the simulator
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(
    name = "mining-jv-simulator",
    version = env!("CARGO_PKG_VERSION"),
    about = "HEARST / Qatar mining joint-venture simulator",
    long_about = "Financial simulator for a two-party Bitcoin mining joint venture: \
                  BTC production estimation, CAPEX/OPEX, and revenue-share (Deal A) or \
                  MW-allocation (Deal B) profit splits over a multi-year projection"
)]
pub struct Config {
    /// Print the parsed configuration and exit
    #[arg(long)]
    #[serde(default)]
    pub print_config: bool,

    /// Configuration file path (YAML or JSON)
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Deal model to simulate
    #[arg(short = 'd', long, default_value = "a")]
    #[serde(default = "default_deal")]
    pub deal: DealModel,

    /// Deployment phase (1, 2, or 3) supplying the mined MW for Deal A
    #[arg(short = 'p', long, default_value = "1")]
    #[serde(default = "default_phase")]
    pub phase: String,

    /// Total project megawattage for Deal B
    #[arg(long, default_value = "100")]
    #[serde(default = "default_total_mw")]
    pub total_mw: f64,

    /// HEARST's split percentage (revenue share for Deal A, capacity share
    /// for Deal B)
    #[arg(short = 's', long, default_value = "30")]
    #[serde(default = "default_split")]
    pub split: f64,

    /// Bitcoin price, USD per coin
    #[arg(long, default_value = "100000")]
    #[serde(default = "default_btc_price")]
    pub btc_price: f64,

    /// Network difficulty, terahash units
    #[arg(long, default_value = "100")]
    #[serde(default = "default_difficulty")]
    pub network_difficulty: f64,

    /// Fleet hashrate, petahash per MW
    #[arg(long, default_value = "1.5")]
    #[serde(default = "default_hashrate_per_mw")]
    pub hashrate_per_mw: f64,

    /// Block reward, coins per block
    #[arg(long, default_value = "3.125")]
    #[serde(default = "default_block_reward")]
    pub block_reward: f64,

    /// Fleet uptime, percent
    #[arg(long, default_value = "95", allow_negative_numbers = true)]
    #[serde(default = "default_uptime")]
    pub uptime: f64,

    /// Mining pool fee, percent
    #[arg(long, default_value = "1")]
    #[serde(default = "default_pool_fee")]
    pub pool_fee: f64,

    /// Grid energy rate, US cents per kWh
    #[arg(long, default_value = "2.5")]
    #[serde(default = "default_energy_rate")]
    pub energy_rate_cents: f64,

    /// Deal A: HEARST electricity-resale megawattage
    #[arg(long, default_value = "0")]
    #[serde(default)]
    pub resale_mw: f64,

    /// Deal A: resale price, US cents per kWh
    #[arg(long, default_value = "5.5")]
    #[serde(default = "default_resale_rate")]
    pub resale_rate_cents: f64,

    /// Deal A: HEARST capital contribution, USD (nonzero attributes the
    /// investment to HEARST)
    #[arg(long, default_value = "0")]
    #[serde(default)]
    pub mw_capex_cost: f64,

    /// Deal B: fixed OPEX charge per MW per month, USD
    #[arg(long, default_value = "5000")]
    #[serde(default = "default_opex_per_mw")]
    pub opex_per_mw_monthly: f64,

    /// Annual maintenance budget, percent of CAPEX
    #[arg(long, default_value = "2")]
    #[serde(default = "default_maintenance_percent")]
    pub maintenance_percent: f64,

    /// Fixed monthly operating costs, USD
    #[arg(long, default_value = "75000")]
    #[serde(default = "default_fixed_costs_base")]
    pub fixed_costs_base: f64,

    /// Fixed monthly operating costs per MW, USD
    #[arg(long, default_value = "1000")]
    #[serde(default = "default_fixed_costs_per_mw")]
    pub fixed_costs_per_mw: f64,

    /// Number of years to project
    #[arg(short = 'y', long, default_value = "1")]
    #[serde(default = "default_years")]
    pub years: u32,

    /// Annual network-difficulty growth, percent
    #[arg(long, default_value = "0")]
    #[serde(default)]
    pub difficulty_growth_percent: f64,

    /// Scenario name to load before running
    #[arg(long)]
    pub scenario: Option<String>,

    /// Save the effective parameters under this scenario name and exit
    #[arg(long, value_name = "NAME")]
    pub save_scenario: Option<String>,

    /// Delete the named scenario and exit
    #[arg(long, value_name = "NAME")]
    pub delete_scenario: Option<String>,

    /// List stored scenarios and exit
    #[arg(long)]
    #[serde(default)]
    pub list_scenarios: bool,

    /// Scenario store directory
    #[arg(long, default_value = "scenarios")]
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,

    /// Output format
    #[arg(short = 'o', long, default_value = "table")]
    #[serde(default = "default_output")]
    pub output: OutputFormat,

    /// Log level
    #[arg(short = 'l', long, default_value = "info")]
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
}

impl Config {
    /// Load configuration from CLI and the optional config file
    pub async fn load() -> Result<Self> {
        let mut config = Self::parse();

        if let Some(config_file) = &config.config_file {
            let file_config = Self::load_from_file(config_file).await?;
            config = config.merge_with_file(file_config);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file
    pub async fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;

        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            serde_json::from_str(&content).map_err(Error::from)
        } else {
            // Default to YAML
            serde_yaml::from_str(&content).map_err(Error::from)
        }
    }

    /// Merge CLI config with file config (CLI takes precedence)
    fn merge_with_file(mut self, file_config: Self) -> Self {
        if self.scenario.is_none() {
            self.scenario = file_config.scenario;
        }
        if self.save_scenario.is_none() {
            self.save_scenario = file_config.save_scenario;
        }
        if self.delete_scenario.is_none() {
            self.delete_scenario = file_config.delete_scenario;
        }
        // For other fields, keep CLI values (they include defaults)
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        DeploymentPhase::from_str(&self.phase)?;

        for (name, value) in [
            ("split", self.split),
            ("uptime", self.uptime),
            ("pool-fee", self.pool_fee),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(Error::config(format!(
                    "{} must be a percentage in [0, 100], got {}",
                    name, value
                )));
            }
        }

        if self.total_mw < 0.0 || !self.total_mw.is_finite() {
            return Err(Error::config("total-mw must be a non-negative number"));
        }

        if self.years > 50 {
            return Err(Error::config("years must be at most 50"));
        }

        Ok(())
    }

    /// Get parsed deployment phase
    pub fn phase(&self) -> Result<DeploymentPhase> {
        DeploymentPhase::from_str(&self.phase)
    }

    /// Build the mining parameter snapshot, with scenario values taking
    /// precedence when a scenario is supplied.
    pub fn mining_params(&self, scenario: Option<&Scenario>) -> MiningParams {
        match scenario {
            Some(s) => s.params,
            None => MiningParams {
                btc_price: self.btc_price,
                network_difficulty: self.network_difficulty,
                hashrate_per_mw: self.hashrate_per_mw,
                block_reward: self.block_reward,
                uptime: self.uptime,
                pool_fee: self.pool_fee,
            },
        }
    }

    /// Get the OPEX assumptions
    pub fn opex_assumptions(&self) -> OpexAssumptions {
        OpexAssumptions {
            maintenance_percent: self.maintenance_percent,
            fixed_costs_base: self.fixed_costs_base,
            fixed_costs_per_mw: self.fixed_costs_per_mw,
        }
    }

    /// Get the projection settings
    pub fn projection_settings(&self) -> ProjectionSettings {
        ProjectionSettings {
            years: self.years,
            difficulty_growth_percent: self.difficulty_growth_percent,
        }
    }

    /// Resolve a numeric override: a nonzero scenario value wins over the
    /// config value. Stored zeros mean "not set" in scenario documents.
    pub fn scenario_override(config_value: f64, scenario_value: f64) -> f64 {
        if scenario_value != 0.0 {
            scenario_value
        } else {
            config_value
        }
    }
}

// Default value functions for serde
fn default_deal() -> DealModel {
    DealModel::A
}
fn default_phase() -> String {
    "1".to_string()
}
fn default_total_mw() -> f64 {
    100.0
}
fn default_split() -> f64 {
    30.0
}
fn default_btc_price() -> f64 {
    100_000.0
}
fn default_difficulty() -> f64 {
    100.0
}
fn default_hashrate_per_mw() -> f64 {
    1.5
}
fn default_block_reward() -> f64 {
    3.125
}
fn default_uptime() -> f64 {
    95.0
}
fn default_pool_fee() -> f64 {
    1.0
}
fn default_energy_rate() -> f64 {
    constants::DEFAULT_ENERGY_RATE_CENTS
}
fn default_resale_rate() -> f64 {
    constants::DEAL_B_RESALE_RATE_CENTS
}
fn default_opex_per_mw() -> f64 {
    5_000.0
}
fn default_maintenance_percent() -> f64 {
    constants::DEFAULT_MAINTENANCE_PERCENT
}
fn default_fixed_costs_base() -> f64 {
    constants::DEFAULT_FIXED_COSTS_BASE
}
fn default_fixed_costs_per_mw() -> f64 {
    constants::DEFAULT_FIXED_COSTS_PER_MW
}
fn default_years() -> u32 {
    1
}
fn default_store_dir() -> PathBuf {
    PathBuf::from("scenarios")
}
fn default_output() -> OutputFormat {
    OutputFormat::Table
}
fn default_log_level() -> LogLevel {
    LogLevel::Info
}
