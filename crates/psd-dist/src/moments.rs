//! Moment integration over single distributions and ensembles.

use psd_core::errors::{ErrorInfo, PsdError};
use tracing::warn;

use crate::model::Distribution;

/// Moment of the given order: `Σ density[k]·Δ[k]·y[k]^order`.
///
/// `Δ` comes from [`Distribution::bin_widths`].
///
/// # Errors
/// [`PsdError::SizeMismatch`] when the density, widths and pivots disagree
/// in length.
pub fn moment(dist: &Distribution, order: f64) -> Result<f64, PsdError> {
    let density = dist.density_checked()?;
    let widths = dist.bin_widths();
    let y = dist.y();
    if widths.len() != y.len() {
        return Err(PsdError::SizeMismatch(
            ErrorInfo::new("moment-widths", "boundaries do not match the pivot count")
                .with_context("widths", widths.len())
                .with_context("pivots", y.len()),
        ));
    }
    Ok(density
        .iter()
        .zip(&widths)
        .zip(y)
        .map(|((f, dy), x)| f * dy * x.powf(order))
        .sum())
}

/// Number-mean characteristic length `moment(1) / moment(0)`.
pub fn mean_size(dist: &Distribution) -> Result<f64, PsdError> {
    Ok(moment(dist, 1.0)? / moment(dist, 0.0)?)
}

/// Members of a collection taking part in a batch operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Every member in collection order.
    #[default]
    All,
    /// The listed members, in the listed order. Repeats are allowed.
    Indices(Vec<usize>),
}

/// Computes `moment(order)` for the selected members of `collection`.
///
/// The output follows the selection order. A missing `order` logs a warning
/// and yields an empty vector.
///
/// # Errors
/// [`PsdError::Index`] for a selection past the end of the collection, and
/// any error raised by [`moment`].
pub fn moments_of(
    collection: &[Distribution],
    order: Option<f64>,
    selection: &Selection,
) -> Result<Vec<f64>, PsdError> {
    let Some(order) = order else {
        warn!(
            code = "moment-order-missing",
            "moment requested without an order; returning no values"
        );
        return Ok(Vec::new());
    };
    let indices: Vec<usize> = match selection {
        Selection::All => (0..collection.len()).collect(),
        Selection::Indices(indices) => indices.clone(),
    };
    indices
        .into_iter()
        .map(|idx| {
            let member = collection.get(idx).ok_or_else(|| {
                PsdError::Index(
                    ErrorInfo::new("ensemble-index", format!("no member at index {idx}"))
                        .with_context("index", idx)
                        .with_context("len", collection.len()),
                )
            })?;
            moment(member, order)
        })
        .collect()
}

/// Ordered collection of distributions: an ensemble or a time series.
#[derive(Debug, Clone, Default)]
pub struct Ensemble {
    members: Vec<Distribution>,
}

impl Ensemble {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a member.
    pub fn push(&mut self, dist: Distribution) {
        self.members.push(dist);
    }

    /// Member at `index`.
    pub fn get(&self, index: usize) -> Option<&Distribution> {
        self.members.get(index)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether there are no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in insertion order.
    pub fn members(&self) -> &[Distribution] {
        &self.members
    }

    /// Iterates members in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Distribution> {
        self.members.iter()
    }

    /// See [`moments_of`].
    pub fn moments(&self, order: Option<f64>, selection: &Selection) -> Result<Vec<f64>, PsdError> {
        moments_of(&self.members, order, selection)
    }

    /// Number-mean length of every member.
    pub fn mean_sizes(&self) -> Result<Vec<f64>, PsdError> {
        self.members.iter().map(mean_size).collect()
    }
}

impl FromIterator<Distribution> for Ensemble {
    fn from_iter<I: IntoIterator<Item = Distribution>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Distribution>> for Ensemble {
    fn from(members: Vec<Distribution>) -> Self {
        Self { members }
    }
}

impl<'a> IntoIterator for &'a Ensemble {
    type Item = &'a Distribution;
    type IntoIter = std::slice::Iter<'a, Distribution>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
