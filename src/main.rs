use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use resource_grid::{Result, flatten, spec, table, unflatten};

#[derive(Parser)]
#[command(name = "resource-grid")]
#[command(about = "Convert resource configs between nested JSON and flat TSV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten nested resource JSON into a TSV table.
    Flatten {
        /// Hierarchy JSON file.
        input: String,

        /// TSV output path; prints to stdout when omitted.
        output: Option<String>,
    },
    /// Rebuild nested resource JSON from a TSV table.
    Unflatten {
        /// TSV table file.
        input: String,

        /// JSON output path; prints to stdout when omitted.
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Flatten { input, output } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("read hierarchy file {input}"))?;
            let hierarchy: spec::Hierarchy = serde_json::from_str(&text)
                .with_context(|| format!("parse hierarchy JSON {input}"))?;

            let table = flatten::flatten(&hierarchy)?;
            write_output(&table::render_tsv(&table), output.as_deref())?;
        }
        Commands::Unflatten { input, output } => {
            let table = table::parse_tsv_file(&input)?;
            let hierarchy = unflatten::unflatten(&table)?;

            let json = pretty_json(&hierarchy)?;
            match output.as_deref() {
                Some(path) => {
                    std::fs::write(path, &json)
                        .with_context(|| format!("write output file {path}"))?;
                    println!("Wrote {path}");
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}

fn write_output(text: &str, path: Option<&str>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("write output file {path}"))?;
            println!("Wrote {path}");
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// Pretty-print with 4-space indentation (serde_json's default is 2).
fn pretty_json(hierarchy: &spec::Hierarchy) -> Result<String> {
    let mut buf = Vec::new();
    let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
    hierarchy.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}
