use psd_core::errors::{ErrorInfo, PsdError};

/// Checks that `values` is a finite, nonnegative, nondecreasing sequence.
pub(crate) fn check_grid(field: &str, values: &[f64]) -> Result<(), PsdError> {
    if let Some(idx) = values.iter().position(|value| !value.is_finite()) {
        return Err(grid_error(field, "grid-non-finite", "values must be finite", idx));
    }
    if let Some(idx) = values.iter().position(|value| *value < 0.0) {
        return Err(grid_error(field, "grid-negative", "values must be nonnegative", idx));
    }
    if let Some(idx) = values.windows(2).position(|pair| pair[1] < pair[0]) {
        return Err(grid_error(
            field,
            "grid-decreasing",
            "values must be nondecreasing",
            idx + 1,
        ));
    }
    Ok(())
}

fn grid_error(field: &str, code: &str, message: &str, index: usize) -> PsdError {
    PsdError::Validation(
        ErrorInfo::new(code, format!("{field}: {message}"))
            .with_context("field", field)
            .with_context("index", index),
    )
}

/// Arithmetic means of adjacent pairs.
pub(crate) fn midpoints(edges: &[f64]) -> Vec<f64> {
    edges.windows(2).map(|pair| (pair[0] + pair[1]) / 2.0).collect()
}

/// First differences.
pub(crate) fn diff(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|pair| pair[1] - pair[0]).collect()
}
