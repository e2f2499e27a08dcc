//! Instrument-response remap onto a fixed channel grid.
//!
//! Source bin masses are placed by equivalent spherical diameter into the
//! channel that strictly contains it. Populated channels are normalised to
//! unit sum and linearly interpolated across every channel pivot, and the
//! result is rescaled to integrate to one over the channel widths.

use psd_core::errors::{ErrorInfo, PsdError};
use psd_dist::{Distribution, Ensemble};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::channels::ChannelGrid;
use crate::params::{DegeneratePolicy, RemapOptions, ShapeFactorSource};

/// Diameter of the sphere with the same volume as a particle of length `y`:
/// `(6/π · kv · y³)^(1/3)`.
pub fn equivalent_diameter(y: f64, kv: f64) -> f64 {
    (6.0 / std::f64::consts::PI * kv * y * y * y).cbrt()
}

/// Diagnostics produced alongside a remapped distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemapReport {
    /// Source mass accumulated per channel before interpolation.
    pub raw_counts: Vec<f64>,
    /// Number of channels with a nonzero count.
    pub populated_channels: usize,
    /// Source mass whose diameter landed exactly on a channel edge.
    pub tied_mass: f64,
    /// Source mass whose diameter fell outside the grid.
    pub outside_mass: f64,
    /// Integral of the interpolated values before the final rescale.
    pub normaliser: f64,
    /// Whether the degenerate policy was applied.
    pub degenerate: bool,
}

/// Configured instrument response.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentResponse {
    grid: ChannelGrid,
    on_degenerate: DegeneratePolicy,
}

impl Default for InstrumentResponse {
    fn default() -> Self {
        Self {
            grid: ChannelGrid::multisizer(),
            on_degenerate: DegeneratePolicy::Error,
        }
    }
}

impl InstrumentResponse {
    /// Response over `grid` with the given zero-mass handling.
    pub fn new(grid: ChannelGrid, on_degenerate: DegeneratePolicy) -> Self {
        Self {
            grid,
            on_degenerate,
        }
    }

    /// Builds the response described by `opts`.
    pub fn from_options(opts: &RemapOptions) -> Result<Self, PsdError> {
        Ok(Self::new(opts.grid.build()?, opts.on_degenerate))
    }

    /// Target channel grid.
    pub fn grid(&self) -> &ChannelGrid {
        &self.grid
    }

    /// Remaps `dist`; see [`InstrumentResponse::apply_with_report`].
    pub fn apply(
        &self,
        dist: &Distribution,
        kv: impl ShapeFactorSource,
    ) -> Result<Distribution, PsdError> {
        self.apply_with_report(dist, kv).map(|(out, _)| out)
    }

    /// Remaps every member of `ensemble`, preserving order.
    pub fn apply_all(
        &self,
        ensemble: &Ensemble,
        kv: impl ShapeFactorSource,
    ) -> Result<Ensemble, PsdError> {
        let kv = kv.shape_factor();
        ensemble.iter().map(|dist| self.apply(dist, kv)).collect()
    }

    /// Remaps `dist` onto the channel grid and returns the new distribution
    /// with its diagnostics. The input is never modified.
    ///
    /// # Errors
    /// - [`PsdError::Validation`] for a non-finite or non-positive `kv`.
    /// - [`PsdError::SizeMismatch`] when density, pivots and edges disagree.
    /// - [`PsdError::Renormalization`] when nothing reaches the grid and the
    ///   policy is [`DegeneratePolicy::Error`].
    pub fn apply_with_report(
        &self,
        dist: &Distribution,
        kv: impl ShapeFactorSource,
    ) -> Result<(Distribution, RemapReport), PsdError> {
        let kv = kv.shape_factor();
        if !kv.is_finite() || kv <= 0.0 {
            return Err(PsdError::Validation(
                ErrorInfo::new("shape-factor", "shape factor must be finite and positive")
                    .with_context("kv", kv),
            ));
        }

        let density = dist.density_checked()?;
        let y = dist.y();
        let edges = dist.effective_boundaries();
        if edges.len() != y.len() + 1 {
            return Err(PsdError::SizeMismatch(
                ErrorInfo::new("remap-edges", "boundaries do not match the pivot count")
                    .with_context("edges", edges.len())
                    .with_context("pivots", y.len()),
            ));
        }

        let channels = self.grid.channels();
        let mut raw_counts = vec![0.0; channels];
        let mut tied_mass = 0.0;
        let mut outside_mass = 0.0;
        for (idx, (&pivot, &value)) in y.iter().zip(&density).enumerate() {
            let mass = value * (edges[idx + 1] - edges[idx]);
            let diameter = equivalent_diameter(pivot, kv);
            match self.grid.channel_of(diameter) {
                Some(channel) => raw_counts[channel] += mass,
                None if self.on_grid_edge(diameter) => tied_mass += mass,
                None => outside_mass += mass,
            }
        }

        let support: Vec<usize> = (0..channels).filter(|&k| raw_counts[k] != 0.0).collect();
        let total: f64 = support.iter().map(|&k| raw_counts[k]).sum();
        let xs: Vec<f64> = support.iter().map(|&k| self.grid.pivots()[k]).collect();
        let ys: Vec<f64> = support.iter().map(|&k| raw_counts[k] / total).collect();

        let mut values: Vec<f64> = self
            .grid
            .pivots()
            .iter()
            .map(|&pivot| interpolate(&xs, &ys, pivot).unwrap_or(0.0))
            .collect();
        let normaliser: f64 = values
            .iter()
            .zip(self.grid.widths())
            .map(|(value, width)| value * width)
            .sum();

        let degenerate = support.is_empty() || !normaliser.is_finite() || normaliser == 0.0;
        if degenerate {
            warn!(
                code = "remap-degenerate",
                tied_mass,
                outside_mass,
                "no source mass reached the channel grid"
            );
            match self.on_degenerate {
                DegeneratePolicy::Error => {
                    return Err(PsdError::Renormalization(
                        ErrorInfo::new(
                            "remap-zero-mass",
                            "no source mass reached the channel grid",
                        )
                        .with_context("tied_mass", tied_mass)
                        .with_context("outside_mass", outside_mass)
                        .with_hint("check the shape factor and the source size range"),
                    ))
                }
                DegeneratePolicy::Zeros => values.iter_mut().for_each(|value| *value = 0.0),
            }
        } else {
            values.iter_mut().for_each(|value| *value /= normaliser);
        }

        debug!(
            populated = support.len(),
            tied_mass, outside_mass, normaliser, "remapped distribution onto channel grid"
        );

        let remapped = Distribution::new(
            self.grid.pivots().to_vec(),
            values,
            Some(self.grid.boundaries().to_vec()),
        )?;
        let report = RemapReport {
            raw_counts,
            populated_channels: support.len(),
            tied_mass,
            outside_mass,
            normaliser,
            degenerate,
        };
        Ok((remapped, report))
    }

    fn on_grid_edge(&self, diameter: f64) -> bool {
        let edges = self.grid.boundaries();
        edges.binary_search_by(|edge| edge.total_cmp(&diameter)).is_ok()
    }
}

/// Piecewise-linear interpolation through `(xs, ys)`; `None` outside
/// `[xs[0], xs[n-1]]`.
fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> Option<f64> {
    let first = *xs.first()?;
    let last = *xs.last()?;
    if x < first || x > last {
        return None;
    }
    let upper = xs.partition_point(|&pivot| pivot < x);
    if upper < xs.len() && xs[upper] == x {
        return Some(ys[upper]);
    }
    let lower = upper - 1;
    let t = (x - xs[lower]) / (xs[upper] - xs[lower]);
    Some(ys[lower] * (1.0 - t) + ys[upper] * t)
}

/// Remaps onto the embedded grid, failing on a degenerate result.
pub fn remap(dist: &Distribution, kv: impl ShapeFactorSource) -> Result<Distribution, PsdError> {
    InstrumentResponse::default().apply(dist, kv)
}

#[cfg(test)]
mod tests {
    use super::interpolate;

    #[test]
    fn interpolation_hits_knots_and_midpoints() {
        let xs = [1.0, 2.0, 4.0];
        let ys = [0.0, 1.0, 3.0];
        assert_eq!(interpolate(&xs, &ys, 1.0), Some(0.0));
        assert_eq!(interpolate(&xs, &ys, 1.5), Some(0.5));
        assert_eq!(interpolate(&xs, &ys, 3.0), Some(2.0));
        assert_eq!(interpolate(&xs, &ys, 4.0), Some(3.0));
        assert_eq!(interpolate(&xs, &ys, 0.5), None);
        assert_eq!(interpolate(&xs, &ys, 4.5), None);
    }

    #[test]
    fn single_knot_only_covers_itself() {
        assert_eq!(interpolate(&[2.0], &[1.0], 2.0), Some(1.0));
        assert_eq!(interpolate(&[2.0], &[1.0], 2.1), None);
        assert_eq!(interpolate(&[], &[], 2.0), None);
    }
}
