//! Named scenarios and the scenario store
//!
//! A scenario is a named bundle of [`MiningParams`] plus OPEX/deal
//! overrides, persisted as a JSON document. Persistence goes through the
//! [`ScenarioStore`] trait so the calculation layer never touches storage;
//! callers load a scenario, build deal inputs from it, and hand those to
//! the pure calculators.

use crate::types::MiningParams;
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Optional OPEX and deal knobs carried alongside the market parameters.
///
/// All fields are numbers defaulted to 0 when missing from the stored
/// document; a zero value means "use the caller's default" where one
/// exists.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioOverrides {
    /// Grid energy rate, US cents per kWh.
    #[serde(default)]
    pub energy_rate_cents: f64,
    /// Deal A: HEARST revenue share, percent.
    #[serde(default)]
    pub hearst_share_percent: f64,
    /// Deal B: HEARST capacity share, percent.
    #[serde(default)]
    pub hearst_mw_percent: f64,
    /// Deal B: fixed OPEX charge per MW per month, USD.
    #[serde(default)]
    pub opex_per_mw_monthly: f64,
    /// Deal A: HEARST electricity-resale megawattage.
    #[serde(default)]
    pub resale_mw: f64,
    /// Deal A: resale price, US cents per kWh.
    #[serde(default)]
    pub resale_rate_cents: f64,
    /// Deal A: HEARST capital contribution, USD.
    #[serde(default)]
    pub mw_capex_cost: f64,
}

/// A named, persisted simulation scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Opaque identity, stable across renames.
    pub id: Uuid,
    /// Human-facing name, used as the store key.
    pub name: String,
    /// When the scenario was last saved.
    pub saved_at: DateTime<Utc>,
    /// Market and hardware snapshot.
    #[serde(default)]
    pub params: MiningParams,
    /// OPEX and deal overrides.
    #[serde(default)]
    pub overrides: ScenarioOverrides,
}

impl Scenario {
    /// Create a new scenario with a fresh id and the current timestamp.
    pub fn new(name: impl Into<String>, params: MiningParams) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            saved_at: Utc::now(),
            params,
            overrides: ScenarioOverrides::default(),
        }
    }
}

/// Keyed scenario persistence.
///
/// Implementations are injected at the call site; pure calculation
/// functions never read a store.
#[async_trait]
pub trait ScenarioStore: Send + Sync {
    /// Fetch a scenario by name, `None` when absent.
    async fn get(&self, name: &str) -> Result<Option<Scenario>>;

    /// Insert or replace a scenario under its name.
    async fn put(&self, scenario: &Scenario) -> Result<()>;

    /// Delete a scenario by name, returning whether it existed.
    async fn delete(&self, name: &str) -> Result<bool>;

    /// List all stored scenario names.
    async fn list(&self) -> Result<Vec<String>>;
}

/// File-backed store keeping one JSON document per scenario in a
/// directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        // Scenario names become file stems; reject path separators rather
        // than silently escaping the store directory.
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(Error::store(format!("Invalid scenario name: '{}'", name)));
        }
        Ok(self.dir.join(format!("{}.json", name)))
    }
}

#[async_trait]
impl ScenarioStore for FileStore {
    async fn get(&self, name: &str) -> Result<Option<Scenario>> {
        let path = self.path_for(name)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let scenario = serde_json::from_str(&content)?;
                debug!(name, "loaded scenario from {}", path.display());
                Ok(Some(scenario))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, scenario: &Scenario) -> Result<()> {
        let path = self.path_for(&scenario.name)?;
        let content = serde_json::to_string_pretty(scenario)?;
        tokio::fs::write(&path, content).await?;
        info!(name = %scenario.name, "saved scenario to {}", path.display());
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        let path = self.path_for(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    scenarios: DashMap<String, Scenario>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScenarioStore for MemoryStore {
    async fn get(&self, name: &str) -> Result<Option<Scenario>> {
        Ok(self.scenarios.get(name).map(|entry| entry.value().clone()))
    }

    async fn put(&self, scenario: &Scenario) -> Result<()> {
        self.scenarios
            .insert(scenario.name.clone(), scenario.clone());
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        Ok(self.scenarios.remove(name).is_some())
    }

    async fn list(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .scenarios
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        Ok(names)
    }
}
