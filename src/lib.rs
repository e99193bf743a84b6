//! Convert resource-configuration data between a nested JSON hierarchy
//! (node type -> process -> cpu/memory/retry spec) and a flat TSV table
//! (rows keyed by node type + attribute, one column per process).
//!
//! Both directions are pure, single-pass transforms over in-memory data.

pub mod flatten;
pub mod order;
pub mod retry;
pub mod spec;
pub mod table;
pub mod unflatten;
pub mod units;

pub type Result<T> = anyhow::Result<T>;
