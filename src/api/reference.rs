use super::ApiError;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use inferdoc_core::reference::{lookup_error_code, ErrorCodeEntry};
use inferdoc_core::{diagnose_issue, IssueMatch};
use serde::Deserialize;

pub(super) async fn error_code(
    Path(code): Path<u16>,
) -> Result<Json<&'static ErrorCodeEntry>, ApiError> {
    lookup_error_code(code).map(Json).ok_or_else(|| {
        ApiError::new(
            StatusCode::NOT_FOUND,
            format!("No reference entry for HTTP {code}"),
        )
    })
}

#[derive(Debug, Deserialize)]
pub(super) struct IssueRequest {
    text: String,
}

pub(super) async fn issue(Json(request): Json<IssueRequest>) -> Json<IssueMatch> {
    Json(diagnose_issue(&request.text))
}
