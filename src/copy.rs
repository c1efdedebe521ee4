use crate::anchor;
use crate::errors::CopyError;
use crate::formula::reference::{Delta, cell_address, column_index};
use crate::formula::rewrite;
use serde::Serialize;
use umya_spreadsheet::Spreadsheet;
use umya_spreadsheet::helper::coordinate::index_from_coordinate;

/// One copy operation: what to copy and where to paste it. The paste row is
/// resolved by anchor search in the destination sheet; the paste column is
/// the search column itself.
#[derive(Debug, Clone)]
pub struct CopyParams {
    pub source_sheet: String,
    pub source_range: String,
    pub dest_sheet: String,
    pub search_col_letter: String,
    pub search_text: String,
    pub offset_rows: i32,
}

/// Confirmation record returned to the caller. Persisting the rewritten
/// document is the transport's job, not the engine's.
#[derive(Debug, Serialize)]
pub struct CopyOutcome {
    pub paste_start: String,
    pub rows: u32,
    pub cols: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

struct RangeBounds {
    min_col: u32,
    min_row: u32,
    rows: u32,
    cols: u32,
}

fn parse_cell(range: &str, cell: &str) -> Result<(u32, u32), CopyError> {
    let (col, row, _, _) = index_from_coordinate(cell);
    match (col, row) {
        (Some(col), Some(row)) => Ok((col, row)),
        _ => Err(CopyError::MalformedRange {
            range: range.to_string(),
            reason: format!("invalid cell reference '{cell}'"),
        }),
    }
}

fn parse_range_bounds(range: &str) -> Result<RangeBounds, CopyError> {
    let Some((start, end)) = range.split_once(':') else {
        return Err(CopyError::MalformedRange {
            range: range.to_string(),
            reason: "expected 'START:END'".to_string(),
        });
    };
    let (start_col, start_row) = parse_cell(range, start)?;
    let (end_col, end_row) = parse_cell(range, end)?;
    if end_col < start_col || end_row < start_row {
        return Err(CopyError::MalformedRange {
            range: range.to_string(),
            reason: "end cell precedes start cell".to_string(),
        });
    }
    Ok(RangeBounds {
        min_col: start_col,
        min_row: start_row,
        rows: end_row - start_row + 1,
        cols: end_col - start_col + 1,
    })
}

/// Copy `params.source_range` from `source` into `dest`, shifted so its
/// top-left lands on the anchor-resolved paste origin. Values are copied
/// verbatim; formulas go through the reference rewriter; styles are
/// deep-copied; explicit source column widths overwrite destination widths.
pub fn copy_range(
    source: &Spreadsheet,
    dest: &mut Spreadsheet,
    params: &CopyParams,
) -> Result<CopyOutcome, CopyError> {
    let bounds = parse_range_bounds(&params.source_range)?;

    let paste_col = column_index(&params.search_col_letter)
        .ok_or_else(|| CopyError::InvalidSearchColumn(params.search_col_letter.clone()))?;

    let src_sheet = source
        .get_sheet_by_name(&params.source_sheet)
        .ok_or_else(|| CopyError::SheetNotFound(params.source_sheet.clone()))?;

    let anchor_row = {
        let dest_sheet = dest
            .get_sheet_by_name(&params.dest_sheet)
            .ok_or_else(|| CopyError::SheetNotFound(params.dest_sheet.clone()))?;
        anchor::resolve_anchor(dest_sheet, paste_col, &params.search_text)?
    };

    let paste_row = anchor_row as i64 + params.offset_rows as i64;
    if paste_row < 1 {
        return Err(CopyError::PasteOutOfBounds(paste_row));
    }
    let paste_row = paste_row as u32;

    let delta = Delta::new(
        paste_row as i32 - bounds.min_row as i32,
        paste_col as i32 - bounds.min_col as i32,
    );
    tracing::debug!(
        rows = bounds.rows,
        cols = bounds.cols,
        delta_rows = delta.rows,
        delta_cols = delta.cols,
        "copying range"
    );

    let dest_sheet = dest
        .get_sheet_by_name_mut(&params.dest_sheet)
        .ok_or_else(|| CopyError::SheetNotFound(params.dest_sheet.clone()))?;

    let mut volatile_cells: Vec<String> = Vec::new();

    for r in 0..bounds.rows {
        for c in 0..bounds.cols {
            let src_col = bounds.min_col + c;
            let src_row = bounds.min_row + r;
            let dest_col = paste_col + c;
            let dest_row = paste_row + r;

            let Some(src_cell) = src_sheet.get_cell((src_col, src_row)) else {
                dest_sheet.remove_cell((dest_col, dest_row));
                continue;
            };

            let mut dest_formula: Option<String> = None;
            if src_cell.is_formula() {
                let body = src_cell.get_formula().to_string();
                let body = body.strip_prefix('=').unwrap_or(&body).to_string();
                if rewrite::contains_volatile_indirection(&body) {
                    volatile_cells.push(cell_address(src_col, src_row));
                    dest_formula = Some(body);
                } else {
                    dest_formula = Some(rewrite::rewrite_formula_body(&body, delta));
                }
            }

            let src_value = src_cell.get_value().to_string();
            let src_style = src_cell.get_style().clone();

            let dest_cell = dest_sheet.get_cell_mut((dest_col, dest_row));
            dest_cell.set_style(src_style);
            dest_cell.get_cell_value_mut().remove_formula();
            if let Some(formula) = dest_formula {
                dest_cell.set_formula(formula);
                dest_cell.set_formula_result_default("");
            } else {
                dest_cell.set_value(src_value);
            }
        }
    }

    for c in 0..bounds.cols {
        let src_col = bounds.min_col + c;
        if let Some(dimension) = src_sheet.get_column_dimension_by_number(&src_col) {
            let width = *dimension.get_width();
            let dest_col = paste_col + c;
            dest_sheet
                .get_column_dimension_by_number_mut(&dest_col)
                .set_width(width);
        }
    }

    let mut warnings = Vec::new();
    if !volatile_cells.is_empty() {
        warnings.push(format!(
            "{} formula cell(s) use INDIRECT/ADDRESS and were copied without reference adjustment: {}",
            volatile_cells.len(),
            volatile_cells.join(", ")
        ));
    }

    Ok(CopyOutcome {
        paste_start: cell_address(paste_col, paste_row),
        rows: bounds.rows,
        cols: bounds.cols,
        warnings,
    })
}
