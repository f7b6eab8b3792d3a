use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// One top-level scope in an encoded file.
#[derive(Serialize)]
pub struct ScopeRow {
    pub index: usize,
    pub offset: u64,
    pub name: String,
    pub version: i32,
    pub length: u64,
    pub lightweight: bool,
    pub byte_order: &'static str,
}

pub fn print_scopes(rows: &[ScopeRow], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(rows).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "OFFSET", "TYPE", "VERSION", "BYTES", "ORDER"]);
            for row in rows {
                table.add_row(vec![
                    row.index.to_string(),
                    row.offset.to_string(),
                    display_name(row),
                    row.version.to_string(),
                    row.length.to_string(),
                    row.byte_order.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for row in rows {
                println!(
                    "#{} offset={} type={} version={} bytes={} order={}",
                    row.index,
                    row.offset,
                    display_name(row),
                    row.version,
                    row.length,
                    row.byte_order
                );
            }
        }
    }
}

fn display_name(row: &ScopeRow) -> String {
    if row.lightweight {
        "<lightweight>".to_string()
    } else {
        row.name.clone()
    }
}
