use std::fs;
use std::path::Path;

use psd_core::errors::{ErrorInfo, PsdError};
use psd_core::ValidationPolicy;
use psd_dist::{DistributionSpec, Ensemble};
use psd_instrument::RemapOptions;
use serde::{Deserialize, Serialize};

/// YAML run description: the distributions to load and how to treat them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Distributions, in ensemble order.
    pub distributions: Vec<DistributionSpec>,
    /// Whether invalid parts abort loading or are skipped.
    #[serde(default)]
    pub policy: ValidationPolicy,
    /// Instrument response settings.
    #[serde(default)]
    pub remap: RemapOptions,
}

/// Loaded ensemble with the labels from the configuration.
#[derive(Debug, Clone)]
pub struct LoadedRun {
    /// Members that survived validation, in file order.
    pub ensemble: Ensemble,
    /// Label per member, aligned with `ensemble`.
    pub labels: Vec<Option<String>>,
    /// Remap options from the file.
    pub remap: RemapOptions,
}

fn config_error(code: &str, path: &Path, message: impl Into<String>) -> PsdError {
    PsdError::Config(ErrorInfo::new(code, message).with_context("path", path.display()))
}

impl RunConfig {
    /// Reads a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, PsdError> {
        let text = fs::read_to_string(path)
            .map_err(|err| config_error("config-read", path, err.to_string()))?;
        Self::from_yaml(&text).map_err(|err| match err {
            PsdError::Config(info) => PsdError::Config(info.with_context("path", path.display())),
            other => other,
        })
    }

    /// Parses a configuration from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, PsdError> {
        serde_yaml::from_str(text)
            .map_err(|err| PsdError::Config(ErrorInfo::new("config-parse", err.to_string())))
    }

    /// Builds every distribution under the configured policy.
    pub fn build(&self) -> Result<LoadedRun, PsdError> {
        let mut ensemble = Ensemble::new();
        let mut labels = Vec::with_capacity(self.distributions.len());
        for (idx, spec) in self.distributions.iter().enumerate() {
            let dist = spec.build(self.policy).map_err(|err| {
                PsdError::Config(
                    err.info()
                        .clone()
                        .with_context("distribution", idx),
                )
            })?;
            ensemble.push(dist);
            labels.push(spec.label.clone());
        }
        Ok(LoadedRun {
            ensemble,
            labels,
            remap: self.remap.clone(),
        })
    }
}
