//! Mining Joint-Venture Simulator - Main Application
//!
//! Loads configuration and an optional named scenario, runs the selected
//! deal model over a multi-year projection, and renders the result.

use mining_jv_simulator::{
    config::{Config, DealModel},
    costs,
    deal_a::DealAInputs,
    deal_b::DealBInputs,
    projection::{project_deal_a, project_deal_b},
    report::ProjectionReport,
    scenario::{FileStore, Scenario, ScenarioStore},
    Error, HardwareCosts, Result, APP_NAME, APP_VERSION,
};

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load and validate configuration
    let config = Config::load().await?;

    // Initialize tracing; RUST_LOG overrides the configured level
    let level: tracing::Level = config.log_level.into();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    if config.print_config {
        print_configuration(&config)?;
        return Ok(());
    }

    let store = FileStore::open(&config.store_dir).await?;

    // Handle store management commands
    if config.list_scenarios {
        for name in store.list().await? {
            println!("{}", name);
        }
        return Ok(());
    }

    if let Some(name) = &config.delete_scenario {
        if store.delete(name).await? {
            info!("deleted scenario '{}'", name);
        } else {
            return Err(Error::scenario_not_found(name.clone()));
        }
        return Ok(());
    }

    if let Some(name) = &config.save_scenario {
        let scenario = scenario_from_config(&config, name);
        store.put(&scenario).await?;
        return Ok(());
    }

    // Resolve the scenario, if one was requested
    let scenario = match &config.scenario {
        Some(name) => Some(
            store
                .get(name)
                .await?
                .ok_or_else(|| Error::scenario_not_found(name.clone()))?,
        ),
        None => None,
    };

    info!(
        "Starting {} v{}: deal {}, {} year(s)",
        APP_NAME, APP_VERSION, config.deal, config.years
    );

    let report = run_simulation(&config, scenario.as_ref())?;
    println!("{}", report.render(config.output)?);

    Ok(())
}

/// Build and run the selected deal model.
fn run_simulation(config: &Config, scenario: Option<&Scenario>) -> Result<ProjectionReport> {
    let params = config.mining_params(scenario);
    let overrides = scenario.map(|s| s.overrides).unwrap_or_default();
    let energy_rate_cents =
        Config::scenario_override(config.energy_rate_cents, overrides.energy_rate_cents);
    let settings = config.projection_settings();

    match config.deal {
        DealModel::A => {
            let phase = config.phase()?;
            let hardware = HardwareCosts::default();
            let capex = costs::capex(phase.mw(), &hardware, phase);
            let opex = costs::opex_monthly(
                phase.mw(),
                energy_rate_cents,
                capex,
                &config.opex_assumptions(),
            );

            let mut inputs = DealAInputs::new(
                phase,
                Config::scenario_override(config.split, overrides.hearst_share_percent),
                params,
            );
            inputs.opex_monthly = opex.total;
            inputs.capex = capex;
            inputs.resale_mw = Config::scenario_override(config.resale_mw, overrides.resale_mw);
            inputs.resale_rate_cents =
                Config::scenario_override(config.resale_rate_cents, overrides.resale_rate_cents);
            inputs.mw_capex_cost =
                Config::scenario_override(config.mw_capex_cost, overrides.mw_capex_cost);

            Ok(ProjectionReport::DealA(project_deal_a(&inputs, &settings)))
        }
        DealModel::B => {
            let mut inputs = DealBInputs::new(
                config.total_mw,
                Config::scenario_override(config.split, overrides.hearst_mw_percent),
                params,
            );
            inputs.opex_per_mw_monthly = Config::scenario_override(
                config.opex_per_mw_monthly,
                overrides.opex_per_mw_monthly,
            );
            inputs.energy_rate_cents = Some(energy_rate_cents);

            Ok(ProjectionReport::DealB(project_deal_b(&inputs, &settings)))
        }
    }
}

/// Capture the effective configuration as a named scenario.
fn scenario_from_config(config: &Config, name: &str) -> Scenario {
    let mut scenario = Scenario::new(name, config.mining_params(None));
    scenario.overrides.energy_rate_cents = config.energy_rate_cents;
    scenario.overrides.hearst_share_percent = config.split;
    scenario.overrides.hearst_mw_percent = config.split;
    scenario.overrides.opex_per_mw_monthly = config.opex_per_mw_monthly;
    scenario.overrides.resale_mw = config.resale_mw;
    scenario.overrides.resale_rate_cents = config.resale_rate_cents;
    scenario.overrides.mw_capex_cost = config.mw_capex_cost;
    scenario
}

/// Print current configuration
fn print_configuration(config: &Config) -> Result<()> {
    let config_yaml = serde_yaml::to_string(config)?;
    println!("{}", config_yaml);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_run_simulation_deal_a() {
        let config = Config::try_parse_from([
            "mining-jv-simulator",
            "--deal",
            "a",
            "--phase",
            "1",
            "--years",
            "3",
        ])
        .unwrap();

        let report = run_simulation(&config, None).unwrap();
        match report {
            ProjectionReport::DealA(years) => {
                assert_eq!(years.len(), 3);
                assert!(years[0].result.total_monthly_btc > 0.0);
                // Phase 1 CAPEX attributed to Qatar by default
                assert!(years[0].result.investment > 0.0);
            }
            _ => panic!("expected a Deal A report"),
        }
    }

    #[test]
    fn test_run_simulation_deal_b() {
        let config = Config::try_parse_from([
            "mining-jv-simulator",
            "--deal",
            "b",
            "--total-mw",
            "200",
            "--split",
            "40",
        ])
        .unwrap();

        let report = run_simulation(&config, None).unwrap();
        match report {
            ProjectionReport::DealB(years) => {
                assert_eq!(years.len(), 1);
                assert_eq!(years[0].result.hearst_mw, 80.0);
                assert_eq!(years[0].result.qatar_mw, 120.0);
            }
            _ => panic!("expected a Deal B report"),
        }
    }

    #[test]
    fn test_scenario_overrides_win_over_config() {
        let config =
            Config::try_parse_from(["mining-jv-simulator", "--split", "30"]).unwrap();
        let mut scenario = scenario_from_config(&config, "override-test");
        scenario.overrides.hearst_share_percent = 60.0;
        scenario.params.btc_price = 50_000.0;

        let report = run_simulation(&config, Some(&scenario)).unwrap();
        match report {
            ProjectionReport::DealA(years) => {
                let r = &years[0].result;
                assert!(
                    (r.hearst_monthly_btc - r.total_monthly_btc * 0.6).abs() < 1e-12
                );
            }
            _ => panic!("expected a Deal A report"),
        }
    }

    #[test]
    fn test_config_printing() {
        let config = Config::try_parse_from(["mining-jv-simulator"]).unwrap();
        assert!(print_configuration(&config).is_ok());
    }
}
