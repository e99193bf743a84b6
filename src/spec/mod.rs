//! Spec layer: JSON schema + in-memory structures for the resource hierarchy.
//!
//! This module is intentionally separate from table parsing and the two
//! transforms. It owns:
//! - Scalar type (loosely typed JSON leaves)
//! - Resource hierarchy shape (node type -> process -> resource spec)

pub mod resources;

pub use resources::{
    CpuBlock, Hierarchy, MemoryBlock, ResourceSpec, RetryMemory, RetryStrategy, Scalar,
};
