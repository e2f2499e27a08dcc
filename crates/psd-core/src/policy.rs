//! Strict and lenient handling of rejected setter input.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::PsdError;

/// Decides whether an advisory rejection propagates to the caller.
///
/// Setters always report rejections as `Err` and keep the previous value;
/// the policy only chooses what the caller does with that report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Propagate every rejection.
    Strict,
    /// Log advisory rejections and continue with the retained state.
    #[default]
    Lenient,
}

impl ValidationPolicy {
    /// Applies the policy to the outcome of a setter.
    ///
    /// Non-advisory errors propagate under both policies.
    pub fn apply(self, outcome: Result<(), PsdError>) -> Result<(), PsdError> {
        match (self, outcome) {
            (_, Ok(())) => Ok(()),
            (ValidationPolicy::Lenient, Err(err)) if err.is_advisory() => {
                debug!(code = %err.info().code, "{err}; previous value retained");
                Ok(())
            }
            (_, Err(err)) => Err(err),
        }
    }
}
