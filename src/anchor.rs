use crate::errors::CopyError;
use crate::formula::reference::column_letters;
use umya_spreadsheet::Worksheet;

/// Legacy layouts keep their anchor labels in column C.
pub const FALLBACK_COLUMN: u32 = 3;

/// Anchor comparison ignores surrounding whitespace, colons, and case, so a
/// search for `"Total:"` matches a cell containing `" total "`.
pub fn normalize_anchor_text(text: &str) -> String {
    text.trim().replace(':', "").to_lowercase()
}

/// First row (top to bottom) in `column` whose normalized text equals the
/// normalized search string. Only text cells are anchor candidates; a
/// numeric cell never matches, even when its rendering would. Duplicate
/// anchors are not disambiguated.
pub fn find_anchor_row(sheet: &Worksheet, column: u32, search_text: &str) -> Option<u32> {
    let needle = normalize_anchor_text(search_text);
    for row in 1..=sheet.get_highest_row() {
        if let Some(cell) = sheet.get_cell((column, row)) {
            if cell.get_data_type() != "s" {
                continue;
            }
            if normalize_anchor_text(&cell.get_value()) == needle {
                return Some(row);
            }
        }
    }
    None
}

/// Resolve the anchor row for a copy: the requested column first, then
/// column C as a fallback.
pub fn resolve_anchor(
    sheet: &Worksheet,
    column: u32,
    search_text: &str,
) -> Result<u32, CopyError> {
    let mut row = find_anchor_row(sheet, column, search_text);
    if row.is_none() && column != FALLBACK_COLUMN {
        row = find_anchor_row(sheet, FALLBACK_COLUMN, search_text);
    }
    row.ok_or_else(|| CopyError::AnchorNotFound {
        column: column_letters(column),
        search_text: search_text.to_string(),
    })
}
