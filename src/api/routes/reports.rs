use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::HeaderMap,
    Json,
};
use crate::api::auth::owner_id;
use crate::api::models::{ApiResponse, DeletedResponse, ListQuery};
use crate::api::AppState;
use crate::errors::TalentError;
use crate::models::{ReportSummary, StoredReport};

const DEFAULT_PAGE: usize = 20;
const MAX_PAGE: usize = 100;

pub async fn list_reports(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<ReportSummary>>>, TalentError> {
    let owner = owner_id(&headers)?;
    let Query(query) = query.map_err(|e| TalentError::Validation(e.body_text()))?;
    let limit = query.limit.unwrap_or(DEFAULT_PAGE).min(MAX_PAGE);
    let offset = query.offset.unwrap_or(0);

    let reports = state.db.list_reports(&owner, limit, offset)?;
    Ok(Json(ApiResponse::ok(reports)))
}

pub async fn get_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<StoredReport>>, TalentError> {
    let owner = owner_id(&headers)?;
    match state.db.get_report(&id, &owner)? {
        Some(report) => Ok(Json(ApiResponse::ok(report))),
        None => Err(TalentError::NotFound(format!("Report {} not found", id))),
    }
}

pub async fn delete_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedResponse>>, TalentError> {
    let owner = owner_id(&headers)?;
    if state.db.delete_report(&id, &owner)? {
        Ok(Json(ApiResponse::ok(DeletedResponse { deleted: true })))
    } else {
        Err(TalentError::NotFound(format!("Report {} not found", id)))
    }
}
