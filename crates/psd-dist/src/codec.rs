//! Lossless and human readable string forms.
//!
//! The reconstructable form is
//! `Distribution(<y>,<density>,<boundaries>)` where arrays are written as
//! `[a,b,...]` with shortest round-trip float literals and an analytic
//! density is written as its expression source. `[]` in the boundary slot
//! means the boundaries were never assigned; `[]` in the density slot means
//! no density.

use psd_core::errors::{ErrorInfo, PsdError};

use crate::density::{ClosedForm, Density, DensityInput, DensityTag};
use crate::model::Distribution;
use crate::moments::moment;

const HEAD: &str = "Distribution(";

fn codec_error(code: &str, message: impl Into<String>) -> PsdError {
    PsdError::Parse(ErrorInfo::new(code, message))
}

fn array_literal(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|value| format!("{value:?}")).collect();
    format!("[{}]", items.join(","))
}

/// Writes the constructor-shaped string that [`parse_reconstructable`] reads.
pub fn to_reconstructable_string(dist: &Distribution) -> String {
    let density = match dist.density_repr() {
        Density::Empty => "[]".to_string(),
        Density::Explicit(values) => array_literal(values),
        analytic => analytic.source().unwrap_or_default(),
    };
    let boundaries = dist.boundaries().map(array_literal).unwrap_or_else(|| "[]".into());
    format!("{HEAD}{},{density},{boundaries})", array_literal(dist.y()))
}

/// `"<Tag>; d_10 = %.2g, m_3 = %.2g"`, or just `"Empty"`.
pub fn to_summary_string(dist: &Distribution) -> String {
    let tag = dist.tag();
    if tag == DensityTag::Empty {
        return tag.to_string();
    }
    let m0 = moment(dist, 0.0).unwrap_or(f64::NAN);
    let m1 = moment(dist, 1.0).unwrap_or(f64::NAN);
    let m3 = moment(dist, 3.0).unwrap_or(f64::NAN);
    format!(
        "{tag}; d_10 = {}, m_3 = {}",
        format_significant(m1 / m0, 2),
        format_significant(m3, 2)
    )
}

/// Formats `value` like C's `%.<digits>g`.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Inf" } else { "-Inf" }.into();
    }
    if value == 0.0 {
        return "0".into();
    }
    let digits = digits.max(1);
    let sci = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.abs())
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}"))
    }
}

fn trim_fraction(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text.to_string()
    }
}

/// Rebuilds a distribution from [`to_reconstructable_string`] output.
///
/// # Errors
/// [`PsdError::Parse`] for malformed text and [`PsdError::Validation`] when
/// a parsed part breaks a setter contract.
pub fn parse_reconstructable(text: &str) -> Result<Distribution, PsdError> {
    let body = text
        .trim()
        .strip_prefix(HEAD)
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| {
            codec_error(
                "codec-envelope",
                "expected text of the form Distribution(<y>,<density>,<boundaries>)",
            )
        })?;
    let parts = split_top_level(body)?;
    let [y, density, boundaries] = parts.as_slice() else {
        return Err(PsdError::Parse(
            ErrorInfo::new("codec-arity", "expected exactly three arguments")
                .with_context("found", parts.len()),
        ));
    };

    let y = parse_array(y)?;
    let density = if density.starts_with('[') {
        let values = parse_array(density)?;
        if values.is_empty() {
            DensityInput::Empty
        } else {
            DensityInput::Vector(values)
        }
    } else {
        DensityInput::Function(ClosedForm::parse(density)?)
    };
    let boundaries = parse_array(boundaries)?;

    let mut dist = Distribution::default();
    dist.set_y(y)?;
    dist.set_density(density)?;
    if !boundaries.is_empty() {
        dist.set_boundaries(boundaries)?;
    }
    Ok(dist)
}

fn split_top_level(body: &str) -> Result<Vec<&str>, PsdError> {
    let mut parts = Vec::new();
    let mut depth = 0_i32;
    let mut start = 0;
    for (idx, ch) in body.char_indices() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => {
                depth -= 1;
                if depth < 0 {
                    return Err(codec_error("codec-brackets", "unbalanced brackets"));
                }
            }
            ',' if depth == 0 => {
                parts.push(body[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(codec_error("codec-brackets", "unbalanced brackets"));
    }
    parts.push(body[start..].trim());
    Ok(parts)
}

fn parse_array(text: &str) -> Result<Vec<f64>, PsdError> {
    let inner = text
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| codec_error("codec-array", format!("expected an array literal, got '{text}'")))?;
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    inner
        .split(',')
        .map(|item| {
            let item = item.trim();
            item.parse::<f64>().map_err(|_| {
                PsdError::Parse(
                    ErrorInfo::new("codec-number", format!("invalid number '{item}'"))
                        .with_context("array", text),
                )
            })
        })
        .collect()
}
