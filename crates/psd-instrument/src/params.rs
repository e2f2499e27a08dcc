use serde::{Deserialize, Serialize};

use crate::channels::ChannelGrid;

fn default_shape_factor() -> f64 {
    std::f64::consts::PI / 6.0
}

/// What to do when no source mass reaches any channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegeneratePolicy {
    /// Fail with [`psd_core::PsdError::Renormalization`].
    #[default]
    Error,
    /// Return an all-zero density on the channel grid.
    Zeros,
}

/// Channel grid selection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridSpec {
    /// The embedded 300-channel table.
    #[default]
    Multisizer,
    /// Caller supplied edges.
    Custom(Vec<f64>),
}

/// Options controlling the instrument-response remap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemapOptions {
    /// Volumetric shape factor `kv`; `pi/6` for spheres.
    #[serde(default = "default_shape_factor")]
    pub shape_factor: f64,
    /// Handling of an empty channel histogram.
    #[serde(default)]
    pub on_degenerate: DegeneratePolicy,
    /// Channel grid to remap onto.
    #[serde(default)]
    pub grid: GridSpec,
}

impl Default for RemapOptions {
    fn default() -> Self {
        Self {
            shape_factor: default_shape_factor(),
            on_degenerate: DegeneratePolicy::default(),
            grid: GridSpec::default(),
        }
    }
}

impl GridSpec {
    /// Materialises the grid.
    pub fn build(&self) -> Result<ChannelGrid, psd_core::PsdError> {
        match self {
            GridSpec::Multisizer => Ok(ChannelGrid::multisizer()),
            GridSpec::Custom(edges) => ChannelGrid::new(edges.clone()),
        }
    }
}

/// Anything that can supply the scalar volumetric shape factor.
pub trait ShapeFactorSource {
    /// Returns `kv`.
    fn shape_factor(&self) -> f64;
}

impl ShapeFactorSource for f64 {
    fn shape_factor(&self) -> f64 {
        *self
    }
}

impl ShapeFactorSource for RemapOptions {
    fn shape_factor(&self) -> f64 {
        self.shape_factor
    }
}

impl<T: ShapeFactorSource + ?Sized> ShapeFactorSource for &T {
    fn shape_factor(&self) -> f64 {
        (**self).shape_factor()
    }
}
