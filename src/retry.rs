//! Retry-strategy codec.
//!
//! Flattening collapses {strategy, operand} plus the process's memory ceiling
//! into one effective number; unflattening can only recover an "add" strategy
//! from that number. The loss is deliberate: the flat table stores the value a
//! scheduler would actually apply, not the rule that produced it.

use crate::Result;
use crate::spec::{RetryMemory, Scalar};
use crate::units;

use anyhow::bail;

/// Effective retry value for the flat table.
///
/// base = memory.max in GB (0 when the block or field is absent);
/// "exponential" multiplies the base by the operand, every other strategy adds.
pub fn effective_value(retry: &RetryMemory, mem_max: Option<&Scalar>) -> Result<String> {
    let base = match mem_max {
        Some(v) => units::gb_value(v)?.unwrap_or(0.0),
        None => 0.0,
    };
    let operand = match units::gb_value(&retry.operand)? {
        Some(v) => v,
        None => bail!("retry strategy {:?} has an empty operand", retry.strategy),
    };

    let value = if retry.strategy == "exponential" {
        base * operand
    } else {
        base + operand
    };
    Ok(units::format_number(value))
}

/// Rebuild a retry block from a table cell and the bare numeric part of the
/// reconstructed memory.max. The original strategy kind is unrecoverable, so
/// the result is always "add" with the difference as operand. Empty or
/// non-numeric inputs yield no block at all.
pub fn decode(cell: &str, base: &str) -> Option<RetryMemory> {
    if cell.is_empty() || base.is_empty() {
        return None;
    }
    let value: f64 = cell.parse().ok()?;
    let base: f64 = base.parse().ok()?;

    let operand = units::add_gb_unit(&units::format_number(value - base));
    Some(RetryMemory {
        strategy: "add".to_string(),
        operand: Scalar::Text(operand),
    })
}
