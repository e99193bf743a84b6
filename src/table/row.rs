/// Row attributes in emission order. Attribute-major grouping (all cpu_min
/// rows, then all cpu_fraction rows, ...) is an output-compatibility contract,
/// and mem_max rows must land before retry_strategy rows so the unflattener
/// has a base value to subtract from.
pub const ATTRIBUTES: [&str; 7] = [
    "cpu_min",
    "cpu_fraction",
    "cpu_max",
    "mem_min",
    "mem_fraction",
    "mem_max",
    "retry_strategy",
];

/// The flat form: one header row, then one row per (attribute, node type).
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Process column names (everything after node_type and attribute).
    pub fn processes(&self) -> &[String] {
        self.headers.get(2..).unwrap_or(&[])
    }
}
