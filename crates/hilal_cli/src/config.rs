use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hilal_rs::{
    BatchMode, CheckerSettings, ConfidenceTiers, MissingFeaturePolicy, ObservationSite,
    SearchConfig,
};
use serde::Deserialize;

/// Top-level hilal configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HilalConfig {
    /// Visibility model artifact.
    #[serde(default = "default_model")]
    pub model: PathBuf,

    /// Observation site.
    #[serde(default)]
    pub site: ObservationSite,

    /// Search settings.
    #[serde(default)]
    pub search: SearchToml,

    /// Confidence tiers for bracketing and batches.
    #[serde(default)]
    pub tiers: ConfidenceTiers,

    /// Year batch settings.
    #[serde(default)]
    pub batch: BatchToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchToml {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default)]
    pub missing_features: MissingFeaturePolicy,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct BatchToml {
    #[serde(default)]
    pub mode: BatchMode,
}

impl Default for HilalConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            site: ObservationSite::default(),
            search: SearchToml::default(),
            tiers: ConfidenceTiers::default(),
            batch: BatchToml::default(),
        }
    }
}

impl Default for SearchToml {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            missing_features: MissingFeaturePolicy::default(),
        }
    }
}

fn default_model() -> PathBuf {
    PathBuf::from("models/hilal_visibility_v1.json")
}
fn default_max_iterations() -> u32 {
    hilal_rs::SearchConfig::default().max_iterations
}

impl HilalConfig {
    /// Read a TOML file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&toml_str).context("failed to parse TOML config")?;
        Ok(config)
    }

    /// Apply command line overrides.
    pub fn with_overrides(
        mut self,
        model: Option<PathBuf>,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> Self {
        if let Some(model) = model {
            self.model = model;
        }
        if let Some(lat) = lat {
            self.site.latitude_deg = lat;
        }
        if let Some(lon) = lon {
            self.site.longitude_deg = lon;
        }
        self
    }

    /// Validated site.
    pub fn site(&self) -> Result<ObservationSite> {
        self.site
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid [site]: {e}"))?;
        Ok(self.site)
    }

    /// Checker settings derived from this config.
    pub fn checker_settings(&self) -> Result<CheckerSettings> {
        let settings = CheckerSettings {
            search: SearchConfig {
                max_iterations: self.search.max_iterations,
                site: self.site,
                missing_features: self.search.missing_features,
            },
            tiers: self.tiers,
            batch_mode: self.batch.mode,
        };
        settings
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
        Ok(settings)
    }
}
