//! Resource hierarchy (resources.json) schema.
//!
//! JSON shape:
//! {
//!   "f72": {
//!     "worker": {
//!       "cpus": { "min": 1, "fraction": 0.5, "max": 4 },
//!       "memory": { "min": "512 MB", "fraction": 0.5, "max": "8 GB" },
//!       "retry_strategy": { "memory": { "strategy": "add", "operand": "2 GB" } }
//!     },
//!     ...
//!   },
//!   ...
//! }
//!
//! Top-level keys are node types, second-level keys are process names. Key
//! order matters: the "f72" group's process order becomes the table's column
//! order, so the maps are IndexMap rather than BTreeMap.

use serde::{Deserialize, Serialize};

use indexmap::IndexMap;

/// node type -> process name -> resource spec.
pub type Hierarchy = IndexMap<String, IndexMap<String, ResourceSpec>>;

/// Per-process resource configuration. Every block is optional; absent blocks
/// are omitted from serialized output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpus: Option<CpuBlock>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryBlock>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_strategy: Option<RetryStrategy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Scalar>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraction: Option<Scalar>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Scalar>,
}

/// min/max are either bare numbers (already GB) or strings like "512 MB";
/// fraction is unit-less.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Scalar>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraction: Option<Scalar>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Scalar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryStrategy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<RetryMemory>,
}

/// Strategy stays a plain string: "exponential" multiplies, anything else adds.
/// An enum would reject unrecognized strategies at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryMemory {
    pub strategy: String,
    pub operand: Scalar,
}

/// A loosely typed JSON leaf. Keeps the int/float distinction so integral
/// values round-trip as JSON integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Numeric view of the value; Text parses best-effort.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(n) => Some(*n as f64),
            Scalar::Float(f) => Some(*f),
            Scalar::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl CpuBlock {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.fraction.is_none() && self.max.is_none()
    }
}

impl MemoryBlock {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.fraction.is_none() && self.max.is_none()
    }
}
