use crate::copy::{CopyOutcome, CopyParams, copy_range};
use crate::errors::CopyError;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use tokio::task;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/copy-range", post(copy_range_handler))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

fn default_search_col() -> String {
    "B".to_string()
}

#[derive(Debug, Deserialize)]
pub struct CopyRangeRequest {
    pub source_sharing_url: String,
    pub source_sheet: String,
    pub source_range: String,
    pub dest_sharing_url: String,
    pub dest_sheet: String,
    #[serde(default = "default_search_col")]
    pub search_col_letter: String,
    pub search_text: String,
    #[serde(default)]
    pub offset_rows: i32,
}

#[derive(Debug, Serialize)]
pub struct CopyRangeResponse {
    pub status: &'static str,
    pub paste_start: String,
    pub rows: u32,
    pub cols: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Core errors map to 400 with a JSON `{error}` body; Graph failures map to
/// 502 since the fault lies upstream.
pub enum ApiError {
    BadRequest(String),
    Upstream(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Upstream(error) => (StatusCode::BAD_GATEWAY, format!("{error:#}")),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<CopyError> for ApiError {
    fn from(error: CopyError) -> Self {
        ApiError::BadRequest(error.to_string())
    }
}

async fn copy_range_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CopyRangeRequest>,
) -> Result<Json<CopyRangeResponse>, ApiError> {
    tracing::info!(
        source_sheet = %request.source_sheet,
        source_range = %request.source_range,
        dest_sheet = %request.dest_sheet,
        search_text = %request.search_text,
        "copy-range requested"
    );

    let graph = state.graph_client().await.map_err(ApiError::Upstream)?;

    let source_bytes = graph
        .download_shared_content(&request.source_sharing_url)
        .await
        .map_err(ApiError::Upstream)?;
    let dest_item = graph
        .shared_drive_item(&request.dest_sharing_url)
        .await
        .map_err(ApiError::Upstream)?;
    let dest_bytes = graph
        .download_item_content(&dest_item)
        .await
        .map_err(ApiError::Upstream)?;

    let params = CopyParams {
        source_sheet: request.source_sheet,
        source_range: request.source_range,
        dest_sheet: request.dest_sheet,
        search_col_letter: request.search_col_letter,
        search_text: request.search_text,
        offset_rows: request.offset_rows,
    };

    let (outcome, rewritten) =
        task::spawn_blocking(move || run_copy(&source_bytes, &dest_bytes, &params))
            .await
            .map_err(|e| ApiError::Upstream(anyhow::anyhow!("copy task failed: {e}")))??;

    graph
        .upload_item_content(&dest_item, rewritten)
        .await
        .map_err(ApiError::Upstream)?;

    tracing::info!(
        paste_start = %outcome.paste_start,
        rows = outcome.rows,
        cols = outcome.cols,
        "copy-range completed"
    );

    Ok(Json(CopyRangeResponse {
        status: "ok",
        paste_start: outcome.paste_start,
        rows: outcome.rows,
        cols: outcome.cols,
        warnings: outcome.warnings,
    }))
}

/// Parse both workbooks, run the engine, and serialize the destination.
/// Runs on a blocking thread; the xlsx reader/writer and the engine itself
/// perform no I/O beyond the buffers they are given.
fn run_copy(
    source_bytes: &[u8],
    dest_bytes: &[u8],
    params: &CopyParams,
) -> Result<(CopyOutcome, Vec<u8>), ApiError> {
    let source = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(source_bytes), true)
        .map_err(|e| ApiError::BadRequest(format!("failed to parse source workbook: {e}")))?;
    let mut dest = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(dest_bytes), true)
        .map_err(|e| ApiError::BadRequest(format!("failed to parse destination workbook: {e}")))?;

    let outcome = copy_range(&source, &mut dest, params)?;

    let mut out = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&dest, &mut out).map_err(|e| {
        ApiError::Upstream(anyhow::anyhow!(
            "failed to serialize destination workbook: {e}"
        ))
    })?;
    Ok((outcome, out.into_inner()))
}
