use super::{caller_key, ApiError, ApiState};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use inferdoc_core::{Diagnostician, UserFriendlyError};
use serde_json::Value;

/// Run the full diagnostic with the caller's key
pub(super) async fn diagnose(
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let key = caller_key(&headers)?;
    let mut config = (*state.config).clone();
    config.api_key = key;

    let diagnostician = Diagnostician::new(config, state.transport.clone())
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.user_message()))?;
    let report = diagnostician.run().await;
    let view = serde_json::to_value(report.view()).map_err(|e| {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Could not serialize the report: {e}"),
        )
    })?;
    Ok(Json(view))
}
