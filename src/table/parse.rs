use crate::Result;
use crate::table::row::Table;

use anyhow::{Context, bail};
use std::fs;

/// Parse a TSV table file: header line first, then one line per row, cells
/// separated by single tabs (an empty cell is a zero-length field).
pub fn parse_tsv_file(path: &str) -> Result<Table> {
    let text = fs::read_to_string(path).with_context(|| format!("read table file {path}"))?;
    parse_tsv(&text).with_context(|| format!("parse table file {path}"))
}

pub fn parse_tsv(text: &str) -> Result<Table> {
    let mut lines = text.lines().enumerate();

    let headers: Vec<String> = match lines.next() {
        Some((_, line)) => line.split('\t').map(str::to_string).collect(),
        None => bail!("table is empty"),
    };
    if headers.len() < 2 {
        bail!(
            "header must start with node_type and attribute columns, got {} column(s)",
            headers.len()
        );
    }

    let mut rows = Vec::new();
    for (lineno, line) in lines {
        if line.is_empty() {
            continue;
        }
        let row: Vec<String> = line.split('\t').map(str::to_string).collect();
        if row.len() < 2 {
            bail!("row at line {} has no attribute column", lineno + 1);
        }
        rows.push(row);
    }

    Ok(Table { headers, rows })
}

/// Render a table back to TSV text (trailing newline included).
pub fn render_tsv(table: &Table) -> String {
    let mut out = String::new();
    out.push_str(&table.headers.join("\t"));
    out.push('\n');
    for row in &table.rows {
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_header_and_rows_with_empty_cells() {
        let table = parse_tsv("node_type\tattribute\tp1\tp2\nf1\tcpu_min\t1\t\n").unwrap();
        assert_eq!(table.headers, ["node_type", "attribute", "p1", "p2"]);
        assert_eq!(table.processes(), ["p1", "p2"]);
        assert_eq!(table.rows, [["f1", "cpu_min", "1", ""]]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let table = parse_tsv("node_type\tattribute\tp1\n\nf1\tcpu_min\t2\n").unwrap();
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn rejects_empty_input_and_narrow_headers() {
        assert!(parse_tsv("").is_err());
        assert!(parse_tsv("node_type\n").is_err());
    }

    #[test]
    fn render_is_the_inverse_of_parse() {
        let text = "node_type\tattribute\tp1\tp2\nf1\tcpu_min\t1\t\nf1\tmem_max\t\t4\n";
        let table = parse_tsv(text).unwrap();
        assert_eq!(render_tsv(&table), text);
    }
}
