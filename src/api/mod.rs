pub mod routes;
pub mod models;
pub mod errors;
pub mod auth;

use std::sync::Arc;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::config::TalentConfig;
use crate::db::Database;
use crate::errors::TalentError;
use crate::pipeline::ReportPipeline;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub pipeline: Arc<ReportPipeline>,
    /// Bearer token required on protected routes, if set.
    pub api_token: Option<String>,
}

pub async fn create_app_state(config: &TalentConfig, db_path: &str) -> Result<AppState, TalentError> {
    let db = Database::new(db_path)?;
    let pipeline = ReportPipeline::from_config(config, &db)?;
    Ok(AppState {
        db,
        pipeline: Arc::new(pipeline),
        api_token: auth::token_from_env(),
    })
}

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/analyze", post(routes::analyze::analyze))
        .route("/api/reports", get(routes::reports::list_reports))
        .route("/api/reports/:id", get(routes::reports::get_report).delete(routes::reports::delete_report))
        .route("/api/settings", get(routes::settings::get_settings).put(routes::settings::update_settings))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_token));

    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
