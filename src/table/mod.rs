//! Flat table form: row/column shape plus the TSV wire format.

pub mod parse;
pub mod row;

pub use parse::{parse_tsv, parse_tsv_file, render_tsv};
pub use row::{ATTRIBUTES, Table};
