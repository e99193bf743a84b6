//! Unflattener: flat table -> nested hierarchy.
//!
//! Rows are grouped by node type, then applied cell by cell. Retry cells are
//! deferred to a second pass so the process's memory.max is always populated
//! before the retry operand is derived, regardless of row order in the input.
//! Blocks that end up empty are pruned, and a process with neither cpus nor
//! memory is omitted entirely.

use crate::Result;
use crate::retry;
use crate::spec::{CpuBlock, Hierarchy, MemoryBlock, ResourceSpec, RetryStrategy, Scalar};
use crate::table::Table;
use crate::units;

use indexmap::IndexMap;

pub fn unflatten(table: &Table) -> Result<Hierarchy> {
    let processes = table.processes();

    // Group rows by node type, keeping first-seen node order.
    let mut grouped: IndexMap<&str, Vec<&Vec<String>>> = IndexMap::new();
    for row in &table.rows {
        if row.len() < 2 {
            continue;
        }
        grouped.entry(row[0].as_str()).or_default().push(row);
    }

    let mut out = Hierarchy::new();
    for (node_type, node_rows) in grouped {
        let mut specs: IndexMap<String, ResourceSpec> = IndexMap::new();
        // (process, cell) pairs held back until every other row is applied.
        let mut retries: Vec<(String, String)> = Vec::new();

        for row in node_rows {
            let attr = row[1].as_str();
            let cells = processes.iter().zip(row.iter().skip(2));
            match attr {
                "cpu_min" | "cpu_fraction" | "cpu_max" => {
                    for (process, cell) in cells {
                        let spec = specs.entry(process.clone()).or_default();
                        let block = spec.cpus.get_or_insert_with(CpuBlock::default);
                        if cell.is_empty() {
                            continue;
                        }
                        let value = Some(numeric_scalar(cell));
                        match attr {
                            "cpu_min" => block.min = value,
                            "cpu_fraction" => block.fraction = value,
                            _ => block.max = value,
                        }
                    }
                }
                "mem_min" | "mem_fraction" | "mem_max" => {
                    for (process, cell) in cells {
                        let spec = specs.entry(process.clone()).or_default();
                        let block = spec.memory.get_or_insert_with(MemoryBlock::default);
                        if cell.is_empty() {
                            continue;
                        }
                        match attr {
                            // Unit-less ratio, same numeric rules as cpu cells.
                            "mem_fraction" => block.fraction = Some(numeric_scalar(cell)),
                            // Cell values are already canonical GB.
                            "mem_min" => block.min = Some(Scalar::Text(units::add_gb_unit(cell))),
                            _ => block.max = Some(Scalar::Text(units::add_gb_unit(cell))),
                        }
                    }
                }
                "retry_strategy" => {
                    for (process, cell) in cells {
                        if !cell.is_empty() {
                            retries.push((process.clone(), cell.clone()));
                        }
                    }
                }
                // Unrecognized attributes are ignored, not an error.
                _ => {}
            }
        }

        for (process, cell) in retries {
            apply_retry(&mut specs, &process, &cell);
        }

        for spec in specs.values_mut() {
            if spec.cpus.as_ref().is_some_and(CpuBlock::is_empty) {
                spec.cpus = None;
            }
            if spec.memory.as_ref().is_some_and(MemoryBlock::is_empty) {
                spec.memory = None;
            }
        }
        specs.retain(|_, spec| spec.cpus.is_some() || spec.memory.is_some());

        if !specs.is_empty() {
            out.insert(node_type.to_string(), specs);
        }
    }

    Ok(out)
}

/// Parse a table cell: integral numbers become JSON integers, other numbers
/// are rounded through the 3-decimal formatter, and non-numeric cells are kept
/// as raw text.
fn numeric_scalar(cell: &str) -> Scalar {
    match cell.parse::<f64>() {
        Ok(v) if v == v.trunc() && v.abs() < i64::MAX as f64 => Scalar::Int(v as i64),
        Ok(v) => Scalar::Float(units::format_number(v).parse().unwrap_or(v)),
        Err(_) => Scalar::Text(cell.to_string()),
    }
}

/// Attach a retry block derived from the flattened effective value. Requires
/// the process to have a memory block; its max (bare numeric part) is the
/// subtraction base, defaulting to 0 when max never appeared.
fn apply_retry(specs: &mut IndexMap<String, ResourceSpec>, process: &str, cell: &str) {
    let Some(spec) = specs.get_mut(process) else {
        return;
    };
    let Some(memory) = spec.memory.as_ref() else {
        return;
    };

    let base = match memory.max.as_ref() {
        Some(Scalar::Text(s)) => s.split_whitespace().next().unwrap_or("").to_string(),
        Some(other) => units::clean(other),
        None => "0".to_string(),
    };

    if let Some(block) = retry::decode(cell, &base) {
        spec.retry_strategy = Some(RetryStrategy {
            memory: Some(block),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::parse_tsv;
    use pretty_assertions::assert_eq;

    fn unflatten_tsv(text: &str) -> Hierarchy {
        unflatten(&parse_tsv(text).unwrap()).unwrap()
    }

    #[test]
    fn rebuilds_cpu_and_memory_blocks() {
        let h = unflatten_tsv(
            "node_type\tattribute\tp1\n\
             f1\tcpu_min\t1\n\
             f1\tcpu_max\t4\n\
             f1\tmem_fraction\t0.5\n\
             f1\tmem_max\t8\n",
        );
        let spec = &h["f1"]["p1"];
        let cpus = spec.cpus.as_ref().unwrap();
        assert_eq!(cpus.min, Some(Scalar::Int(1)));
        assert_eq!(cpus.max, Some(Scalar::Int(4)));
        let memory = spec.memory.as_ref().unwrap();
        assert_eq!(memory.fraction, Some(Scalar::Float(0.5)));
        assert_eq!(memory.max, Some(Scalar::Text("8 GB".to_string())));
    }

    #[test]
    fn retry_cell_becomes_an_add_block_against_mem_max() {
        let h = unflatten_tsv(
            "node_type\tattribute\tp1\n\
             f1\tmem_max\t8\n\
             f1\tretry_strategy\t10\n",
        );
        let retry = h["f1"]["p1"]
            .retry_strategy
            .as_ref()
            .and_then(|r| r.memory.as_ref())
            .unwrap();
        assert_eq!(retry.strategy, "add");
        assert_eq!(retry.operand, Scalar::Text("2 GB".to_string()));
    }

    #[test]
    fn retry_rows_may_precede_memory_rows() {
        let h = unflatten_tsv(
            "node_type\tattribute\tp1\n\
             f1\tretry_strategy\t10\n\
             f1\tmem_max\t8\n",
        );
        let retry = h["f1"]["p1"]
            .retry_strategy
            .as_ref()
            .and_then(|r| r.memory.as_ref())
            .unwrap();
        assert_eq!(retry.operand, Scalar::Text("2 GB".to_string()));
    }

    #[test]
    fn retry_without_any_memory_block_is_dropped() {
        let h = unflatten_tsv(
            "node_type\tattribute\tp1\n\
             f1\tcpu_min\t1\n\
             f1\tretry_strategy\t10\n",
        );
        assert_eq!(h["f1"]["p1"].retry_strategy, None);
    }

    #[test]
    fn empty_processes_are_omitted() {
        let h = unflatten_tsv(
            "node_type\tattribute\tp1\tp2\n\
             f1\tcpu_min\t1\t\n\
             f1\tmem_max\t\t\n",
        );
        assert!(h["f1"].contains_key("p1"));
        assert!(!h["f1"].contains_key("p2"));
    }

    #[test]
    fn node_with_no_surviving_processes_is_omitted() {
        let h = unflatten_tsv(
            "node_type\tattribute\tp1\n\
             f1\tcpu_min\t\n\
             f2\tcpu_min\t2\n",
        );
        assert!(!h.contains_key("f1"));
        assert!(h.contains_key("f2"));
    }

    #[test]
    fn unrecognized_attributes_are_ignored() {
        let h = unflatten_tsv(
            "node_type\tattribute\tp1\n\
             f1\tdisk_max\t500\n\
             f1\tcpu_min\t1\n",
        );
        assert_eq!(h["f1"]["p1"].cpus.as_ref().unwrap().min, Some(Scalar::Int(1)));
        assert_eq!(h["f1"]["p1"].memory, None);
    }

    #[test]
    fn non_numeric_cells_are_kept_as_text() {
        let h = unflatten_tsv(
            "node_type\tattribute\tp1\n\
             f1\tcpu_min\tburst\n",
        );
        assert_eq!(
            h["f1"]["p1"].cpus.as_ref().unwrap().min,
            Some(Scalar::Text("burst".to_string()))
        );
    }

    #[test]
    fn non_integral_cells_round_to_three_decimals() {
        let h = unflatten_tsv(
            "node_type\tattribute\tp1\n\
             f1\tcpu_fraction\t0.0625\n",
        );
        assert_eq!(
            h["f1"]["p1"].cpus.as_ref().unwrap().fraction,
            Some(Scalar::Float(0.062))
        );
    }
}
