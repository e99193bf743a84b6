//! Flattener: nested hierarchy -> flat table.
//!
//! Rows are grouped attribute-major (every cpu_min row before any cpu_fraction
//! row, and so on), node types ordered by their priority key within each
//! group. The row sequence is part of the output contract.

use crate::Result;
use crate::order;
use crate::retry;
use crate::spec::{Hierarchy, ResourceSpec, Scalar};
use crate::table::{ATTRIBUTES, Table};
use crate::units;

use anyhow::Context;

pub fn flatten(hierarchy: &Hierarchy) -> Result<Table> {
    let processes = order::process_columns(hierarchy);
    let node_types = order::sorted_node_types(hierarchy)?;

    let mut headers = vec!["node_type".to_string(), "attribute".to_string()];
    headers.extend(processes.iter().cloned());

    let mut rows = Vec::with_capacity(ATTRIBUTES.len() * node_types.len());
    for attr in ATTRIBUTES {
        for node_type in &node_types {
            let Some(procs) = hierarchy.get(node_type) else {
                continue;
            };
            let mut row = Vec::with_capacity(headers.len());
            row.push(node_type.clone());
            row.push(attr.to_string());
            for process in &processes {
                let cell = match procs.get(process) {
                    Some(spec) => attribute_cell(spec, attr).with_context(|| {
                        format!("node type {node_type}, process {process}, attribute {attr}")
                    })?,
                    None => String::new(),
                };
                row.push(cell);
            }
            rows.push(row);
        }
    }

    Ok(Table { headers, rows })
}

/// Extract one table cell from a resource spec. CPU values and canonicalized
/// memory values go through the number formatter; mem_fraction is carried
/// as-is (unit-less, no rounding). Absent values become empty cells.
fn attribute_cell(spec: &ResourceSpec, attr: &str) -> Result<String> {
    let cpus = spec.cpus.as_ref();
    let memory = spec.memory.as_ref();

    Ok(match attr {
        "cpu_min" => cpus.and_then(|c| c.min.as_ref()).map(units::clean).unwrap_or_default(),
        "cpu_fraction" => cpus
            .and_then(|c| c.fraction.as_ref())
            .map(units::clean)
            .unwrap_or_default(),
        "cpu_max" => cpus.and_then(|c| c.max.as_ref()).map(units::clean).unwrap_or_default(),
        "mem_min" => match memory.and_then(|m| m.min.as_ref()) {
            Some(v) => units::to_canonical_gb(v)?,
            None => String::new(),
        },
        "mem_fraction" => memory
            .and_then(|m| m.fraction.as_ref())
            .map(raw_cell)
            .unwrap_or_default(),
        "mem_max" => match memory.and_then(|m| m.max.as_ref()) {
            Some(v) => units::to_canonical_gb(v)?,
            None => String::new(),
        },
        "retry_strategy" => match spec.retry_strategy.as_ref().and_then(|r| r.memory.as_ref()) {
            Some(rm) => retry::effective_value(rm, memory.and_then(|m| m.max.as_ref()))?,
            None => String::new(),
        },
        _ => String::new(),
    })
}

fn raw_cell(value: &Scalar) -> String {
    match value {
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Text(s) => s.clone(),
    }
}
