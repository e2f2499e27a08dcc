//! Density representations and the resolution of loosely typed density input.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use psd_core::errors::{ErrorInfo, PsdError};
use serde::{Deserialize, Serialize};

use crate::expr::Expr;

fn density_error(code: &str, message: impl Into<String>) -> PsdError {
    PsdError::Validation(ErrorInfo::new(code, message).with_context("field", "density"))
}

/// Formats a literal so that it can be spliced into an expression source.
pub(crate) fn literal(value: f64) -> String {
    if value.is_sign_negative() {
        format!("({value:?})")
    } else {
        format!("{value:?}")
    }
}

/// Named parametric families accepted in a density descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParametricKind {
    /// Gaussian density in the characteristic length.
    Normal,
    /// Log-normal density in the characteristic length.
    LogNormal,
}

impl FromStr for ParametricKind {
    type Err = PsdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(ParametricKind::Normal),
            "lognormal" => Ok(ParametricKind::LogNormal),
            other => Err(PsdError::Validation(
                ErrorInfo::new(
                    "density-kind",
                    format!("unsupported parametric family '{other}'"),
                )
                .with_context("field", "density")
                .with_hint("expected 'normal' or 'lognormal'"),
            )),
        }
    }
}

impl fmt::Display for ParametricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParametricKind::Normal => write!(f, "normal"),
            ParametricKind::LogNormal => write!(f, "lognormal"),
        }
    }
}

/// A density from a named family with its location and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parametric {
    kind: ParametricKind,
    mu: f64,
    sigma: f64,
}

impl Parametric {
    /// Creates a parametric density.
    ///
    /// # Errors
    /// Returns a validation error unless `mu` is finite and `sigma` is finite
    /// and strictly positive.
    pub fn new(kind: ParametricKind, mu: f64, sigma: f64) -> Result<Self, PsdError> {
        if !mu.is_finite() || !sigma.is_finite() || sigma <= 0.0 {
            return Err(PsdError::Validation(
                ErrorInfo::new(
                    "density-parameters",
                    format!("{kind} requires finite mu and positive sigma, got mu={mu}, sigma={sigma}"),
                )
                .with_context("field", "density"),
            ));
        }
        Ok(Self { kind, mu, sigma })
    }

    /// Named family.
    pub fn kind(&self) -> ParametricKind {
        self.kind
    }

    /// Location parameter.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Scale parameter, always positive.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Normal: `1/(σ√(2π))·exp(−(x−μ)²/(2σ²))`.
    /// Log-normal: `1/(xσ)·exp(−(ln x−μ)²/(2σ²))`, without the `√(2π)` factor.
    pub fn pdf(&self, x: f64) -> f64 {
        let two_var = 2.0 * self.sigma * self.sigma;
        match self.kind {
            ParametricKind::Normal => {
                let z = x - self.mu;
                (-(z * z) / two_var).exp() / (self.sigma * (2.0 * std::f64::consts::PI).sqrt())
            }
            ParametricKind::LogNormal => {
                let z = x.ln() - self.mu;
                (-(z * z) / two_var).exp() / (x * self.sigma)
            }
        }
    }

    /// Expression source equivalent to [`Parametric::pdf`] with `mu` and
    /// `sigma` written out as literals.
    pub fn source(&self) -> String {
        let mu = literal(self.mu);
        let sigma = literal(self.sigma);
        match self.kind {
            ParametricKind::Normal => {
                format!("1/({sigma}*sqrt(2*pi))*exp(-(x-{mu})^2/(2*{sigma}^2))")
            }
            ParametricKind::LogNormal => {
                format!("1/(x*{sigma})*exp(-(ln(x)-{mu})^2/(2*{sigma}^2))")
            }
        }
    }
}

/// A unary closed-form density together with its source text.
#[derive(Clone)]
pub struct ClosedForm {
    source: String,
    eval: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
}

impl ClosedForm {
    /// Parses an expression in `x`.
    pub fn parse(source: &str) -> Result<Self, PsdError> {
        let expr = Expr::parse(source)?;
        Ok(Self {
            source: source.trim().to_string(),
            eval: Arc::new(move |x| expr.eval(x)),
        })
    }

    /// Wraps a native closure. `source` is what the reconstructable string
    /// will carry for it; it should parse back to the same function.
    pub fn native<F>(source: impl Into<String>, f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self {
            source: source.into(),
            eval: Arc::new(f),
        }
    }

    /// Expression text the function was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluates the function at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        (self.eval)(x)
    }
}

impl fmt::Debug for ClosedForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosedForm")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Stored density representation.
#[derive(Debug, Clone, Default)]
pub enum Density {
    /// No density has been assigned.
    #[default]
    Empty,
    /// Tabulated values aligned index-for-index with the pivots.
    Explicit(Vec<f64>),
    /// Named family evaluated natively.
    Parametric(Parametric),
    /// Arbitrary closed-form function.
    Raw(ClosedForm),
}

/// Short tag used by summaries: `Fnc`, `Vec` or `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DensityTag {
    /// Analytic density.
    Fnc,
    /// Tabulated density.
    Vec,
    /// No density.
    Empty,
}

impl fmt::Display for DensityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DensityTag::Fnc => "Fnc",
            DensityTag::Vec => "Vec",
            DensityTag::Empty => "Empty",
        };
        f.write_str(text)
    }
}

impl Density {
    /// Representation tag.
    pub fn tag(&self) -> DensityTag {
        match self {
            Density::Empty => DensityTag::Empty,
            Density::Explicit(_) => DensityTag::Vec,
            Density::Parametric(_) | Density::Raw(_) => DensityTag::Fnc,
        }
    }

    /// Whether the density is a closed-form function.
    pub fn is_analytic(&self) -> bool {
        self.tag() == DensityTag::Fnc
    }

    /// Closed-form view of an analytic density, `None` otherwise.
    pub fn pivot_function(&self) -> Option<ClosedForm> {
        match self {
            Density::Raw(form) => Some(form.clone()),
            Density::Parametric(param) => {
                let param = *param;
                Some(ClosedForm::native(param.source(), move |x| param.pdf(x)))
            }
            Density::Empty | Density::Explicit(_) => None,
        }
    }

    /// Source text of an analytic density.
    pub fn source(&self) -> Option<String> {
        match self {
            Density::Raw(form) => Some(form.source().to_string()),
            Density::Parametric(param) => Some(param.source()),
            Density::Empty | Density::Explicit(_) => None,
        }
    }

    /// Evaluates an analytic density at every pivot. Tabulated and empty
    /// densities return `None`.
    pub fn evaluate(&self, pivots: &[f64]) -> Option<Vec<f64>> {
        match self {
            Density::Raw(form) => Some(pivots.iter().map(|&x| form.eval(x)).collect()),
            Density::Parametric(param) => Some(pivots.iter().map(|&x| param.pdf(x)).collect()),
            Density::Empty | Density::Explicit(_) => None,
        }
    }
}

/// One cell of a `(kind, mu, sigma)` descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DescriptorCell {
    /// Numeric cell.
    Number(f64),
    /// Text cell.
    Text(String),
}

/// Loosely typed input accepted by [`crate::Distribution::set_density`].
#[derive(Debug, Clone)]
pub enum DensityInput {
    /// A closed-form function.
    Function(ClosedForm),
    /// Expression source, parsed on resolution.
    Expression(String),
    /// Tabulated values.
    Vector(Vec<f64>),
    /// A `(kind, mu, sigma)` descriptor.
    Descriptor(Vec<DescriptorCell>),
    /// Clears the density.
    Empty,
}

impl DensityInput {
    /// Resolves the input into a stored representation.
    ///
    /// # Errors
    /// Returns [`PsdError::Validation`] for non-finite vectors, malformed
    /// descriptors, unsupported family names and unparsable expressions.
    pub fn resolve(self) -> Result<Density, PsdError> {
        match self {
            DensityInput::Empty => Ok(Density::Empty),
            DensityInput::Function(form) => Ok(Density::Raw(form)),
            DensityInput::Expression(source) => ClosedForm::parse(&source)
                .map(Density::Raw)
                .map_err(|err| density_error("density-expression", err.info().message.clone())),
            DensityInput::Vector(values) if values.is_empty() => Ok(Density::Empty),
            DensityInput::Vector(values) => {
                if let Some(idx) = values.iter().position(|value| !value.is_finite()) {
                    return Err(PsdError::Validation(
                        ErrorInfo::new("density-non-finite", "density values must be finite")
                            .with_context("field", "density")
                            .with_context("index", idx),
                    ));
                }
                Ok(Density::Explicit(values))
            }
            DensityInput::Descriptor(cells) => resolve_descriptor(&cells),
        }
    }
}

fn resolve_descriptor(cells: &[DescriptorCell]) -> Result<Density, PsdError> {
    let [kind, mu, sigma] = cells else {
        return Err(PsdError::Validation(
            ErrorInfo::new(
                "density-descriptor-length",
                "a parametric descriptor needs exactly (kind, mu, sigma)",
            )
            .with_context("field", "density")
            .with_context("len", cells.len()),
        ));
    };
    let kind = match kind {
        DescriptorCell::Text(name) => name.parse::<ParametricKind>()?,
        DescriptorCell::Number(_) => {
            return Err(density_error(
                "density-descriptor-kind",
                "descriptor kind must be a family name",
            ))
        }
    };
    match (mu, sigma) {
        (DescriptorCell::Number(mu), DescriptorCell::Number(sigma)) => {
            Ok(Density::Parametric(Parametric::new(kind, *mu, *sigma)?))
        }
        _ => Err(density_error(
            "density-descriptor-parameters",
            "descriptor mu and sigma must be numeric",
        )),
    }
}

impl From<Vec<f64>> for DensityInput {
    fn from(values: Vec<f64>) -> Self {
        DensityInput::Vector(values)
    }
}

impl From<&[f64]> for DensityInput {
    fn from(values: &[f64]) -> Self {
        DensityInput::Vector(values.to_vec())
    }
}

impl From<ClosedForm> for DensityInput {
    fn from(form: ClosedForm) -> Self {
        DensityInput::Function(form)
    }
}

impl From<Parametric> for DensityInput {
    fn from(param: Parametric) -> Self {
        DensityInput::Descriptor(vec![
            DescriptorCell::Text(param.kind.to_string()),
            DescriptorCell::Number(param.mu),
            DescriptorCell::Number(param.sigma),
        ])
    }
}

impl From<(&str, f64, f64)> for DensityInput {
    fn from((kind, mu, sigma): (&str, f64, f64)) -> Self {
        DensityInput::Descriptor(vec![
            DescriptorCell::Text(kind.to_string()),
            DescriptorCell::Number(mu),
            DescriptorCell::Number(sigma),
        ])
    }
}

impl From<Density> for DensityInput {
    fn from(density: Density) -> Self {
        match density {
            Density::Empty => DensityInput::Empty,
            Density::Explicit(values) => DensityInput::Vector(values),
            Density::Parametric(param) => param.into(),
            Density::Raw(form) => DensityInput::Function(form),
        }
    }
}
