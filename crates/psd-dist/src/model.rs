//! The distribution entity and its mutation invariants.

use psd_core::errors::{ErrorInfo, PsdError};
use psd_core::ValidationPolicy;
use tracing::{debug, warn};

use crate::density::{ClosedForm, Density, DensityInput, DensityTag};
use crate::validate::{check_grid, diff, midpoints};

/// Boundaries implied by a pivot grid when none were assigned.
///
/// The first edge is `0`, interior edges are midpoints of adjacent pivots and
/// the last edge extrapolates the final spacing: `1.5·y[n-1] − 0.5·y[n-2]`.
/// A single pivot extrapolates from the origin, giving `[0, 1.5·y[0]]`.
pub fn implicit_boundaries(y: &[f64]) -> Vec<f64> {
    let Some(&last) = y.last() else {
        return Vec::new();
    };
    let before_last = if y.len() >= 2 { y[y.len() - 2] } else { 0.0 };
    let mut edges = Vec::with_capacity(y.len() + 1);
    edges.push(0.0);
    edges.extend(midpoints(y));
    edges.push(1.5 * last - 0.5 * before_last);
    edges
}

/// A one-dimensional particle-size density over a characteristic length.
///
/// The shape only changes through [`set_y`](Self::set_y),
/// [`set_boundaries`](Self::set_boundaries) and
/// [`set_density`](Self::set_density). Each setter validates its input and
/// on rejection returns `Err`, logs a warning and keeps the previous value.
#[derive(Debug, Clone, Default)]
pub struct Distribution {
    y: Vec<f64>,
    boundaries: Option<Vec<f64>>,
    density: Density,
}

impl Distribution {
    /// Builds a distribution, rejecting any invalid part.
    ///
    /// `y` is assigned first, then `density`, then `boundaries`. Without
    /// explicit boundaries the implicit ones are derived from `y` and stored.
    pub fn new(
        y: Vec<f64>,
        density: impl Into<DensityInput>,
        boundaries: Option<Vec<f64>>,
    ) -> Result<Self, PsdError> {
        Self::with_policy(y, density, boundaries, ValidationPolicy::Strict)
    }

    /// Builds a distribution, letting `policy` decide whether rejected parts
    /// abort construction or are skipped.
    pub fn with_policy(
        y: Vec<f64>,
        density: impl Into<DensityInput>,
        boundaries: Option<Vec<f64>>,
        policy: ValidationPolicy,
    ) -> Result<Self, PsdError> {
        let mut dist = Self::default();
        policy.apply(dist.set_y(y))?;
        policy.apply(dist.set_density(density))?;
        match boundaries {
            Some(edges) => policy.apply(dist.set_boundaries(edges))?,
            None => {
                let edges = implicit_boundaries(&dist.y);
                if !edges.is_empty() {
                    policy.apply(dist.set_boundaries(edges))?;
                }
            }
        }
        Ok(dist)
    }

    /// Pivot coordinates.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Explicitly assigned boundaries, if any.
    pub fn boundaries(&self) -> Option<&[f64]> {
        self.boundaries.as_deref()
    }

    /// Assigned boundaries, or the implicit ones derived from the pivots.
    pub fn effective_boundaries(&self) -> Vec<f64> {
        match &self.boundaries {
            Some(edges) => edges.clone(),
            None => implicit_boundaries(&self.y),
        }
    }

    /// Stored density representation.
    pub fn density_repr(&self) -> &Density {
        &self.density
    }

    /// Representation tag used by summaries.
    pub fn tag(&self) -> DensityTag {
        self.density.tag()
    }

    /// Location parameter when the density came from a named family.
    pub fn mu(&self) -> Option<f64> {
        match &self.density {
            Density::Parametric(param) => Some(param.mu()),
            _ => None,
        }
    }

    /// Scale parameter when the density came from a named family.
    pub fn sigma(&self) -> Option<f64> {
        match &self.density {
            Density::Parametric(param) => Some(param.sigma()),
            _ => None,
        }
    }

    /// Assigns the pivots.
    ///
    /// Accepts a finite, nonnegative, nondecreasing sequence. Stored
    /// boundaries that no longer bracket the new pivot count are dropped, so
    /// the implicit boundaries apply until new ones are assigned.
    pub fn set_y(&mut self, values: Vec<f64>) -> Result<(), PsdError> {
        if let Err(err) = check_grid("y", &values) {
            warn!(field = "y", code = %err.info().code, "rejected pivot assignment: {err}");
            return Err(err);
        }
        if self
            .boundaries
            .as_ref()
            .is_some_and(|edges| edges.len() != values.len() + 1)
        {
            debug!(pivots = values.len(), "dropping boundaries stale after pivot assignment");
            self.boundaries = None;
        }
        self.y = values;
        Ok(())
    }

    /// Assigns the bin edges.
    ///
    /// Same numeric contract as [`set_y`](Self::set_y) plus at least two
    /// edges. When the edge count is not `y.len() + 1` the pivots are
    /// replaced by the midpoints of adjacent edges.
    pub fn set_boundaries(&mut self, values: Vec<f64>) -> Result<(), PsdError> {
        let checked = if values.len() < 2 {
            Err(PsdError::Validation(
                ErrorInfo::new("boundaries-too-short", "boundaries need at least two edges")
                    .with_context("field", "boundaries")
                    .with_context("len", values.len()),
            ))
        } else {
            check_grid("boundaries", &values)
        };
        if let Err(err) = checked {
            warn!(
                field = "boundaries",
                code = %err.info().code,
                "rejected boundary assignment: {err}"
            );
            return Err(err);
        }
        if values.len() - 1 != self.y.len() {
            self.y = midpoints(&values);
        }
        self.boundaries = Some(values);
        Ok(())
    }

    /// Assigns the density from a function, vector, descriptor or nothing.
    pub fn set_density(&mut self, value: impl Into<DensityInput>) -> Result<(), PsdError> {
        match value.into().resolve() {
            Ok(density) => {
                self.density = density;
                Ok(())
            }
            Err(err) => {
                warn!(field = "density", code = %err.info().code, "rejected density assignment: {err}");
                Err(err)
            }
        }
    }

    /// Density values at the current pivots, in pivot order.
    ///
    /// A tabulated density whose length differs from the pivot count is
    /// returned unchanged after a size-mismatch warning.
    pub fn density(&self) -> Vec<f64> {
        match &self.density {
            Density::Empty => Vec::new(),
            Density::Explicit(values) => {
                if values.len() != self.y.len() {
                    warn!(
                        density_len = values.len(),
                        pivots = self.y.len(),
                        "tabulated density does not match the pivot count"
                    );
                }
                values.clone()
            }
            analytic => analytic.evaluate(&self.y).unwrap_or_default(),
        }
    }

    /// Like [`density`](Self::density) but reports a size mismatch as an error.
    pub fn density_checked(&self) -> Result<Vec<f64>, PsdError> {
        if let Density::Explicit(values) = &self.density {
            if values.len() != self.y.len() {
                return Err(PsdError::SizeMismatch(
                    ErrorInfo::new(
                        "density-size",
                        "tabulated density does not match the pivot count",
                    )
                    .with_context("density_len", values.len())
                    .with_context("pivots", self.y.len()),
                ));
            }
        }
        Ok(self.density())
    }

    /// The closed-form density, if the representation is analytic.
    pub fn pivot_function(&self) -> Option<ClosedForm> {
        self.density.pivot_function()
    }

    /// Bin widths used for integration: differences of the assigned
    /// boundaries, or of `[0] ++ y` when none were assigned.
    pub fn bin_widths(&self) -> Vec<f64> {
        match &self.boundaries {
            Some(edges) => diff(edges),
            None => {
                let mut padded = Vec::with_capacity(self.y.len() + 1);
                padded.push(0.0);
                padded.extend_from_slice(&self.y);
                diff(&padded)
            }
        }
    }
}
