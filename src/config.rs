//! Layered settings: an optional file under `SWITCHYARD__` environment
//! overrides.

use crate::cascade::domain::{CascadeConfig, CascadeDomainError};
use crate::creation::{
    domain::{ArtifactKind, QualityPolicy, SecurityPolicy},
    services::CreationEngineConfig,
};
use crate::health::domain::{HealthPolicy, HealthPolicyError};
use ::config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "SWITCHYARD";

/// Errors raised while loading or converting settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The sources could not be read or deserialised.
    #[error("failed to load settings: {0}")]
    Load(#[from] ::config::ConfigError),
    /// The health section is invalid.
    #[error("invalid health settings: {0}")]
    Health(#[from] HealthPolicyError),
    /// A cascade chain is invalid.
    #[error("invalid cascade settings: {0}")]
    Cascade(#[from] CascadeDomainError),
}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SwitchyardSettings {
    /// Health monitor settings.
    pub health: HealthSettings,
    /// Router settings.
    pub routing: RoutingSettings,
    /// Cascade chain settings.
    pub cascade: CascadeSettings,
    /// Creation engine settings.
    pub creation: CreationSettings,
}

/// Health monitor settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HealthSettings {
    /// Milliseconds between probe cycles.
    pub probe_interval_ms: u64,
    /// Per-probe timeout in milliseconds.
    pub probe_timeout_ms: u64,
    /// Heartbeat age, in probe intervals, after which a component is stale.
    pub stale_multiplier: u32,
    /// Probes allowed in flight at once.
    pub max_concurrent_probes: usize,
    /// Path probed beneath each endpoint.
    pub health_path: String,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            probe_interval_ms: 10_000,
            probe_timeout_ms: 2_000,
            stale_multiplier: 3,
            max_concurrent_probes: 8,
            health_path: "health".to_owned(),
        }
    }
}

impl HealthSettings {
    /// Builds the validated probe policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Health`] when a value is zero or overflows.
    pub fn policy(&self) -> Result<HealthPolicy, ConfigError> {
        Ok(HealthPolicy::new(
            Duration::from_millis(self.probe_interval_ms),
            Duration::from_millis(self.probe_timeout_ms),
            self.stale_multiplier,
            self.max_concurrent_probes,
        )?)
    }
}

/// Router settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RoutingSettings {
    /// TCP connect timeout for forwarded calls, in milliseconds.
    pub connect_timeout_ms: u64,
    /// Deadline applied when a caller supplies none, in milliseconds.
    pub default_deadline_ms: u64,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 1_000,
            default_deadline_ms: 30_000,
        }
    }
}

impl RoutingSettings {
    /// Returns the connect timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Returns the default request budget.
    #[must_use]
    pub const fn default_deadline(&self) -> Duration {
        Duration::from_millis(self.default_deadline_ms)
    }
}

/// Cascade chain settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CascadeSettings {
    /// Candidate specs of the default chain.
    pub default_chain: Vec<String>,
    /// Candidate specs per intent category.
    pub chains: BTreeMap<String, Vec<String>>,
    /// Whether candidates known unreachable are skipped.
    pub skip_unreachable: bool,
}

impl Default for CascadeSettings {
    fn default() -> Self {
        Self {
            default_chain: Vec::new(),
            chains: BTreeMap::new(),
            skip_unreachable: true,
        }
    }
}

impl CascadeSettings {
    /// Parses every chain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Cascade`] when a spec is invalid or places
    /// the creation engine before the end of a chain.
    pub fn cascade_config(&self) -> Result<CascadeConfig, ConfigError> {
        let mut config = CascadeConfig::new(&self.default_chain)?
            .with_skip_unreachable(self.skip_unreachable);
        for (category, specs) in &self.chains {
            config = config.with_chain(category, specs)?;
        }
        Ok(config)
    }
}

/// Creation engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreationSettings {
    /// Whether AI-assist collaborators are consulted.
    pub ai_enabled: bool,
    /// Component id of the primary AI-assist collaborator.
    pub primary_ai: Option<String>,
    /// Component id of the secondary AI-assist collaborator.
    pub secondary_ai: Option<String>,
    /// Per-attempt AI generation timeout, in milliseconds.
    pub generation_timeout_ms: u64,
    /// Quality gate thresholds.
    pub quality: QualityPolicy,
    /// Security gate limits.
    pub security: SecurityPolicy,
    /// Primary artifact kind per intent category.
    pub primary_kinds: BTreeMap<String, ArtifactKind>,
}

impl Default for CreationSettings {
    fn default() -> Self {
        let engine = CreationEngineConfig::default();
        Self {
            ai_enabled: engine.ai_enabled,
            primary_ai: None,
            secondary_ai: None,
            generation_timeout_ms: 15_000,
            quality: engine.quality,
            security: engine.security,
            primary_kinds: engine.primary_kinds,
        }
    }
}

impl CreationSettings {
    /// Builds the engine configuration.
    #[must_use]
    pub fn engine_config(&self) -> CreationEngineConfig {
        CreationEngineConfig {
            ai_enabled: self.ai_enabled,
            generation_timeout: Duration::from_millis(self.generation_timeout_ms),
            quality: self.quality.clone(),
            security: self.security.clone(),
            primary_kinds: self
                .primary_kinds
                .iter()
                .map(|(category, kind)| (category.trim().to_lowercase(), *kind))
                .collect(),
        }
    }
}

/// Loads settings from `path` (when given) with environment overrides.
///
/// Overrides use the `SWITCHYARD__` prefix with `__` between path
/// segments, e.g. `SWITCHYARD__HEALTH__PROBE_INTERVAL_MS=5000`.
///
/// # Errors
///
/// Returns [`ConfigError::Load`] when the file is missing or any source
/// fails to deserialise.
pub fn load_settings(path: Option<&Path>) -> Result<SwitchyardSettings, ConfigError> {
    let mut builder = Config::builder();
    if let Some(file) = path {
        info!(path = %file.display(), "loading settings file");
        builder = builder.add_source(File::from(file).required(true));
    }
    let settings = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize::<SwitchyardSettings>()?;
    info!(
        probe_interval_ms = settings.health.probe_interval_ms,
        chains = settings.cascade.chains.len(),
        ai_enabled = settings.creation.ai_enabled,
        "settings loaded"
    );
    Ok(settings)
}
