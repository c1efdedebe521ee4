use sheet_relay::anchor::{find_anchor_row, normalize_anchor_text, resolve_anchor};
use sheet_relay::errors::CopyError;

mod support;
use support::builders::{CellVal, fill_sparse, new_book};

#[test]
fn normalization_trims_strips_colons_and_folds_case() {
    assert_eq!(normalize_anchor_text(" total "), "total");
    assert_eq!(normalize_anchor_text("Total:"), "total");
    assert_eq!(normalize_anchor_text("  Sub Total: "), "sub total");
}

#[test]
fn anchor_matches_despite_case_colons_and_whitespace() {
    let mut book = new_book();
    let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
    fill_sparse(sheet, &[("B3", " total ".into()), ("B5", "Other".into())]);

    assert_eq!(find_anchor_row(sheet, 2, "Total:"), Some(3));
}

#[test]
fn first_match_wins_for_duplicate_anchors() {
    let mut book = new_book();
    let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
    fill_sparse(sheet, &[("B4", "Total".into()), ("B9", "Total".into())]);

    assert_eq!(find_anchor_row(sheet, 2, "Total"), Some(4));
}

#[test]
fn missing_search_column_falls_back_to_column_c() {
    let mut book = new_book();
    let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
    fill_sparse(sheet, &[("C7", "Resumen".into())]);

    // Requested column D has no match; legacy column C does.
    let row = resolve_anchor(sheet, 4, "Resumen").unwrap();
    assert_eq!(row, 7);
}

#[test]
fn unmatched_anchor_is_a_typed_failure() {
    let mut book = new_book();
    let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
    fill_sparse(sheet, &[("B2", "Something".into())]);

    let err = resolve_anchor(sheet, 2, "Missing").unwrap_err();
    assert!(matches!(err, CopyError::AnchorNotFound { .. }));
    assert!(err.to_string().contains("Missing"));
}

#[test]
fn non_text_cells_do_not_match() {
    let mut book = new_book();
    let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
    fill_sparse(
        sheet,
        &[
            ("B2", CellVal::Num(42.0)),
            ("B4", CellVal::Bool(true)),
            ("B6", "42".into()),
        ],
    );

    // A numeric 42 renders as "42" but only the text cell is a candidate.
    assert_eq!(find_anchor_row(sheet, 2, "42"), Some(6));
    assert_eq!(find_anchor_row(sheet, 2, "true"), None);
}
