//! Particle-size densities over a one-dimensional characteristic length.
//!
//! A [`Distribution`] pairs pivot coordinates and bin edges with a density
//! that is either tabulated or closed-form. Moments integrate the density
//! over the bins; the codec writes and reads a constructor-shaped string.

pub mod codec;
pub mod density;
pub mod expr;
pub mod model;
pub mod moments;
pub mod record;
mod validate;

pub use codec::{
    format_significant, parse_reconstructable, to_reconstructable_string, to_summary_string,
};
pub use density::{
    ClosedForm, Density, DensityInput, DensityTag, DescriptorCell, Parametric, ParametricKind,
};
pub use model::{implicit_boundaries, Distribution};
pub use moments::{mean_size, moment, moments_of, Ensemble, Selection};
pub use record::{
    record_from_json, record_to_json, DensitySource, DistributionRecord, DistributionSpec,
};
