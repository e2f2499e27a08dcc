//! Structured error types shared across PSD crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`PsdError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (field names, lengths, indices).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the PSD crates.
///
/// `Validation`, `SizeMismatch` and `MissingOrder` are advisory: the object
/// that reported them keeps its last valid state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum PsdError {
    /// Setter input violated its type, shape, sign or ordering contract.
    #[error("validation rejected: {0}")]
    Validation(ErrorInfo),
    /// A tabulated density disagrees in length with its pivots.
    #[error("size mismatch: {0}")]
    SizeMismatch(ErrorInfo),
    /// A moment was requested without an order.
    #[error("missing moment order: {0}")]
    MissingOrder(ErrorInfo),
    /// The instrument response had no mass to renormalise.
    #[error("degenerate renormalization: {0}")]
    Renormalization(ErrorInfo),
    /// Reconstructable string or expression syntax errors.
    #[error("parse error: {0}")]
    Parse(ErrorInfo),
    /// Ensemble selection referenced a missing member.
    #[error("index error: {0}")]
    Index(ErrorInfo),
    /// Run configuration errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl PsdError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            PsdError::Validation(info)
            | PsdError::SizeMismatch(info)
            | PsdError::MissingOrder(info)
            | PsdError::Renormalization(info)
            | PsdError::Parse(info)
            | PsdError::Index(info)
            | PsdError::Config(info)
            | PsdError::Serde(info) => info,
        }
    }

    /// Returns `true` for the advisory families that leave state untouched.
    pub fn is_advisory(&self) -> bool {
        matches!(
            self,
            PsdError::Validation(_) | PsdError::SizeMismatch(_) | PsdError::MissingOrder(_)
        )
    }

    /// Shorthand for a [`PsdError::Validation`] error.
    pub fn validation(code: &str, message: impl Into<String>) -> Self {
        PsdError::Validation(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`PsdError::Parse`] error.
    pub fn parse(code: &str, message: impl Into<String>) -> Self {
        PsdError::Parse(ErrorInfo::new(code, message))
    }
}
