use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use tracing::info;
use crate::api::auth::owner_id;
use crate::api::models::ApiResponse;
use crate::api::AppState;
use crate::errors::TalentError;
use crate::models::{AnalysisRequest, Report};

pub async fn analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Report>>, TalentError> {
    let owner = owner_id(&headers)?;
    let Json(request) = payload.map_err(|e| TalentError::Validation(e.body_text()))?;

    let settings = state.db.runtime_settings()?;
    let outcome = state.pipeline.run(&request, settings).await?;
    let report_id = state.db.insert_report(&owner, &outcome.report)?;

    info!(owner = %owner, report_id = %report_id, cached = outcome.cached, "Report stored");
    Ok(Json(ApiResponse::ok(outcome.report).with_report_id(report_id)))
}
