use thiserror::Error;

/// Failures local to a single copy operation.
///
/// Writes happen cell by cell with no rollback, so the in-memory destination
/// may be partially modified when one of these is returned. Callers must
/// discard the destination document instead of serializing it.
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("sheet '{0}' not found")]
    SheetNotFound(String),

    #[error("no cell in column {column} (or fallback column C) matches '{search_text}'")]
    AnchorNotFound { column: String, search_text: String },

    #[error("malformed range '{range}': {reason}")]
    MalformedRange { range: String, reason: String },

    #[error("invalid search column letter '{0}'")]
    InvalidSearchColumn(String),

    #[error("paste origin row {0} is above row 1")]
    PasteOutOfBounds(i64),
}
