use crate::anchor;
use crate::copy::{CopyParams, copy_range};
use crate::formula::reference::column_index;
use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "sheet-relay-cli",
    version,
    about = "Run anchor-based range copies against local workbook files"
)]
pub struct Cli {
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Copy a range from one local workbook into another, pasting at the
    /// anchor-resolved row and saving the destination in place
    Copy {
        #[arg(long)]
        source: PathBuf,
        #[arg(long)]
        source_sheet: String,
        #[arg(long, value_name = "START:END")]
        source_range: String,
        #[arg(long)]
        dest: PathBuf,
        #[arg(long)]
        dest_sheet: String,
        #[arg(long, default_value = "B")]
        search_col: String,
        #[arg(long)]
        search_text: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset_rows: i32,
    },
    /// Show which row an anchor search would resolve to
    FindAnchor {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        sheet: String,
        #[arg(long, default_value = "B")]
        search_col: String,
        #[arg(long)]
        search_text: String,
    },
}

pub fn run_command(command: Commands) -> Result<Value> {
    match command {
        Commands::Copy {
            source,
            source_sheet,
            source_range,
            dest,
            dest_sheet,
            search_col,
            search_text,
            offset_rows,
        } => {
            let source_book = read_workbook(&source)?;
            let mut dest_book = read_workbook(&dest)?;

            let params = CopyParams {
                source_sheet,
                source_range,
                dest_sheet,
                search_col_letter: search_col,
                search_text,
                offset_rows,
            };
            let outcome = copy_range(&source_book, &mut dest_book, &params)?;

            umya_spreadsheet::writer::xlsx::write(&dest_book, &dest).map_err(|e| {
                anyhow!("failed to save destination workbook '{}': {e}", dest.display())
            })?;

            Ok(serde_json::to_value(outcome)?)
        }
        Commands::FindAnchor {
            file,
            sheet,
            search_col,
            search_text,
        } => {
            let book = read_workbook(&file)?;
            let worksheet = book
                .get_sheet_by_name(&sheet)
                .ok_or_else(|| anyhow!("sheet '{sheet}' not found"))?;
            let column = column_index(&search_col)
                .ok_or_else(|| anyhow!("invalid column letter '{search_col}'"))?;
            let row = anchor::resolve_anchor(worksheet, column, &search_text)?;
            Ok(json!({ "sheet": sheet, "row": row }))
        }
    }
}

fn read_workbook(path: &Path) -> Result<umya_spreadsheet::Spreadsheet> {
    umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|e| anyhow!("failed to open workbook '{}': {e}", path.display()))
}

pub fn emit_value(value: &Value, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{rendered}");
    Ok(())
}
