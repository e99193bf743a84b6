//! Number formatting and memory-unit normalization.
//!
//! Table cells hold memory in canonical GB with no unit suffix; the hierarchy
//! may use any of KB/MB/GB/TB. Numbers render with no trailing zeros and no
//! decimal point when integral ("4", not "4.000").

use crate::Result;
use crate::spec::Scalar;

use anyhow::{Context, bail};

/// Render a number without decimal places when possible: integral values drop
/// the point entirely, everything else is written to 3 decimals and stripped
/// of trailing zeros.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value == value.trunc() && value.abs() < i64::MAX as f64 {
        return (value as i64).to_string();
    }
    let s = format!("{value:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Best-effort cell rendering for unit-less values. Numeric text is
/// re-formatted through `format_number`; anything else passes through
/// untouched.
pub fn clean(value: &Scalar) -> String {
    match value {
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(f) => format_number(*f),
        Scalar::Text(s) => match s.trim().parse::<f64>() {
            Ok(f) => format_number(f),
            Err(_) => s.clone(),
        },
    }
}

/// Memory magnitude in GB. Bare numbers are assumed to already be GB; strings
/// carry a "<number> <unit>" suffix (case-insensitive, unknown units taken as
/// GB). Empty input yields None; a non-numeric leading token is an error.
pub fn gb_value(value: &Scalar) -> Result<Option<f64>> {
    let text = match value {
        Scalar::Int(n) => return Ok(Some(*n as f64)),
        Scalar::Float(f) => return Ok(Some(*f)),
        Scalar::Text(s) => s.trim(),
    };
    if text.is_empty() {
        return Ok(None);
    }

    let mut parts = text.split_whitespace();
    let number = match parts.next() {
        Some(tok) => tok
            .parse::<f64>()
            .with_context(|| format!("bad memory value: {text:?}"))?,
        None => bail!("bad memory value: {text:?}"),
    };
    let factor = match parts.next().map(|u| u.to_ascii_uppercase()).as_deref() {
        Some("TB") => 1024.0,
        Some("MB") => 1.0 / 1024.0,
        Some("KB") => 1.0 / 1024.0 / 1024.0,
        // "GB", no unit at all, or an unrecognized one: already canonical.
        _ => 1.0,
    };
    Ok(Some(number * factor))
}

/// Memory value as a canonical-GB cell string ("" when absent).
pub fn to_canonical_gb(value: &Scalar) -> Result<String> {
    Ok(match gb_value(value)? {
        Some(v) => format_number(v),
        None => String::new(),
    })
}

/// Tag a bare numeric string with the canonical unit; non-numeric and empty
/// strings pass through unchanged.
pub fn add_gb_unit(value: &str) -> String {
    if !value.is_empty() && value.trim().parse::<f64>().is_ok() {
        format!("{value} GB")
    } else {
        value.to_string()
    }
}
