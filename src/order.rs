//! Row and column ordering contracts for the flat table.
//!
//! Node types sort by an explicit priority key (numeric suffix ascending, then
//! "m64", then "default" last) rather than string order. Process columns follow
//! the "f72" group's own key order, with processes unknown to f72 appended
//! lexicographically.

use crate::Result;
use crate::spec::Hierarchy;

use anyhow::Context;
use std::collections::BTreeSet;

/// The node type whose process order defines the table's column order.
pub const CANONICAL_NODE_TYPE: &str = "f72";

/// Sort key for node-type rows. Derived ordering makes Numeric(_) < M64 <
/// Default, which is exactly the row order contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NodeKey {
    Numeric(u64),
    M64,
    Default,
}

/// Compute the sort key for a node-type name. Names other than "m64" and
/// "default" must carry a numeric suffix after a one-character prefix
/// ("f72" -> 72).
pub fn node_key(name: &str) -> Result<NodeKey> {
    match name {
        "default" => Ok(NodeKey::Default),
        "m64" => Ok(NodeKey::M64),
        _ => {
            let n = name
                .get(1..)
                .unwrap_or("")
                .parse::<u64>()
                .with_context(|| format!("node type {name:?} has no numeric suffix"))?;
            Ok(NodeKey::Numeric(n))
        }
    }
}

/// Node types in table row order.
pub fn sorted_node_types(hierarchy: &Hierarchy) -> Result<Vec<String>> {
    let mut keyed = hierarchy
        .keys()
        .map(|name| node_key(name).map(|key| (key, name.clone())))
        .collect::<Result<Vec<_>>>()?;
    keyed.sort();
    Ok(keyed.into_iter().map(|(_, name)| name).collect())
}

/// Process names in table column order: f72's processes first (in their JSON
/// order), then everything else lexicographically. Without an f72 group the
/// whole list is lexicographic.
pub fn process_columns(hierarchy: &Hierarchy) -> Vec<String> {
    let mut columns: Vec<String> = hierarchy
        .get(CANONICAL_NODE_TYPE)
        .map(|procs| procs.keys().cloned().collect())
        .unwrap_or_default();

    let mut rest: BTreeSet<&String> = BTreeSet::new();
    for procs in hierarchy.values() {
        for name in procs.keys() {
            if !columns.contains(name) {
                rest.insert(name);
            }
        }
    }
    columns.extend(rest.into_iter().cloned());
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::ResourceSpec;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    fn hierarchy_with(node_types: &[(&str, &[&str])]) -> Hierarchy {
        let mut h = Hierarchy::new();
        for (node, procs) in node_types {
            let mut m = IndexMap::new();
            for p in *procs {
                m.insert(p.to_string(), ResourceSpec::default());
            }
            h.insert(node.to_string(), m);
        }
        h
    }

    #[test]
    fn numeric_suffixes_sort_ascending_with_m64_and_default_last() {
        let h = hierarchy_with(&[
            ("default", &[][..]),
            ("f72", &[]),
            ("m64", &[]),
            ("f2", &[]),
        ]);
        assert_eq!(sorted_node_types(&h).unwrap(), ["f2", "f72", "m64", "default"]);
    }

    #[test]
    fn node_key_rejects_non_numeric_suffixes() {
        assert!(node_key("huge").is_err());
        assert!(node_key("f").is_err());
        assert!(node_key("m64").is_ok());
    }

    #[test]
    fn f72_defines_column_order() {
        let h = hierarchy_with(&[
            ("f72", &["zeta", "alpha"][..]),
            ("f2", &["beta", "alpha"]),
        ]);
        assert_eq!(process_columns(&h), ["zeta", "alpha", "beta"]);
    }

    #[test]
    fn columns_fall_back_to_lexicographic_without_f72() {
        let h = hierarchy_with(&[("f1", &["zeta", "alpha"][..])]);
        assert_eq!(process_columns(&h), ["alpha", "zeta"]);
    }
}
