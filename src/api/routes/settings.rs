use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use crate::api::models::ApiResponse;
use crate::api::AppState;
use crate::db::settings::RuntimeSettings;
use crate::errors::TalentError;

pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<RuntimeSettings>>, TalentError> {
    Ok(Json(ApiResponse::ok(state.db.runtime_settings()?)))
}

pub async fn update_settings(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<RuntimeSettings>>, TalentError> {
    let Json(body) = body.map_err(|e| TalentError::Validation(e.body_text()))?;
    let updated = state.db.update_runtime_settings(&body)?;
    tracing::info!(settings = ?updated, "Runtime settings updated");
    Ok(Json(ApiResponse::ok(updated)))
}
