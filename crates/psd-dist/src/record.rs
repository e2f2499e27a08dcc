//! Serde facing descriptions of distributions.

use psd_core::errors::{ErrorInfo, PsdError};
use psd_core::{SchemaVersion, ValidationPolicy};
use serde::{Deserialize, Serialize};

use crate::density::{DensityInput, DensityTag, DescriptorCell};
use crate::model::Distribution;
use crate::moments::moment;

/// Density as written in a configuration file: an expression string, a
/// numeric vector, a `[kind, mu, sigma]` descriptor, or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DensitySource {
    /// Expression in `x`.
    Expression(String),
    /// Vector or descriptor cells.
    Cells(Vec<DescriptorCell>),
}

impl From<DensitySource> for DensityInput {
    fn from(source: DensitySource) -> Self {
        match source {
            DensitySource::Expression(text) => DensityInput::Expression(text),
            DensitySource::Cells(cells) => {
                let numbers: Option<Vec<f64>> = cells
                    .iter()
                    .map(|cell| match cell {
                        DescriptorCell::Number(value) => Some(*value),
                        DescriptorCell::Text(_) => None,
                    })
                    .collect();
                match numbers {
                    Some(values) => DensityInput::Vector(values),
                    None => DensityInput::Descriptor(cells),
                }
            }
        }
    }
}

/// Input description of a single distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSpec {
    /// Optional label carried into reports.
    #[serde(default)]
    pub label: Option<String>,
    /// Pivot coordinates.
    pub y: Vec<f64>,
    /// Density source; absent or null means no density.
    #[serde(default)]
    pub density: Option<DensitySource>,
    /// Explicit bin edges.
    #[serde(default)]
    pub boundaries: Option<Vec<f64>>,
}

impl DistributionSpec {
    /// Builds the distribution through the construction contract.
    pub fn build(&self, policy: ValidationPolicy) -> Result<Distribution, PsdError> {
        let density = self
            .density
            .clone()
            .map(DensityInput::from)
            .unwrap_or(DensityInput::Empty);
        Distribution::with_policy(self.y.clone(), density, self.boundaries.clone(), policy)
    }
}

/// Tabulated snapshot of a distribution for JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionRecord {
    /// Record schema.
    pub schema_version: SchemaVersion,
    /// Optional label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Representation tag.
    pub tag: DensityTag,
    /// Pivot coordinates.
    pub y: Vec<f64>,
    /// Effective bin edges.
    pub boundaries: Vec<f64>,
    /// Density evaluated at the pivots.
    pub density: Vec<f64>,
    /// Expression source of an analytic density.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Family location parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mu: Option<f64>,
    /// Family scale parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sigma: Option<f64>,
    /// Zeroth moment, absent when not finite.
    pub m_0: Option<f64>,
    /// Number-mean length, absent when not finite.
    pub d_10: Option<f64>,
    /// Third moment, absent when not finite.
    pub m_3: Option<f64>,
}

impl DistributionRecord {
    /// Tabulates `dist`.
    pub fn from_distribution(dist: &Distribution, label: Option<String>) -> Result<Self, PsdError> {
        let m_0 = moment(dist, 0.0)?;
        let m_1 = moment(dist, 1.0)?;
        let m_3 = moment(dist, 3.0)?;
        Ok(Self {
            schema_version: SchemaVersion::default(),
            label,
            tag: dist.tag(),
            y: dist.y().to_vec(),
            boundaries: dist.effective_boundaries(),
            density: dist.density(),
            source: dist.density_repr().source(),
            mu: dist.mu(),
            sigma: dist.sigma(),
            m_0: finite(m_0),
            d_10: finite(m_1 / m_0),
            m_3: finite(m_3),
        })
    }

    /// Rebuilds a tabulated distribution from the record.
    pub fn to_distribution(&self) -> Result<Distribution, PsdError> {
        let density = if self.density.is_empty() {
            DensityInput::Empty
        } else {
            DensityInput::Vector(self.density.clone())
        };
        let boundaries = (!self.boundaries.is_empty()).then(|| self.boundaries.clone());
        Distribution::new(self.y.clone(), density, boundaries)
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Serialises a record to pretty JSON.
pub fn record_to_json(record: &DistributionRecord) -> Result<String, PsdError> {
    serde_json::to_string_pretty(record)
        .map_err(|err| PsdError::Serde(ErrorInfo::new("record-serialize", err.to_string())))
}

/// Restores a record from JSON.
pub fn record_from_json(json: &str) -> Result<DistributionRecord, PsdError> {
    serde_json::from_str(json)
        .map_err(|err| PsdError::Serde(ErrorInfo::new("record-deserialize", err.to_string())))
}
