#![doc = "Predicts how a volume-sensing particle counter would report a particle-size distribution."]
#![doc = ""]
#![doc = "The embedded channel table approximates the published instrument table geometrically; see [`channels`]."]

/// Embedded channel table and channel grids.
pub mod channels;
/// Remap options and the shape-factor seam.
pub mod params;
/// The remapping transform.
pub mod transform;

pub use channels::{ChannelGrid, CHANNEL_EDGES, CHANNEL_TABLE_REVISION, MULTISIZER_BOUNDARIES};
pub use params::{DegeneratePolicy, GridSpec, RemapOptions, ShapeFactorSource};
pub use transform::{equivalent_diameter, remap, InstrumentResponse, RemapReport};
