use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use crate::errors::TalentError;
use super::models::ApiResponse;
use super::AppState;

pub const API_TOKEN_ENV: &str = "TALENTSCOPE_API_TOKEN";
pub const OWNER_HEADER: &str = "x-user-id";
pub const ANONYMOUS_OWNER: &str = "anonymous";
const MAX_OWNER_CHARS: usize = 128;

/// Bearer-token guard. A no-op when no token is configured.
pub async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Some(expected) = state.api_token.as_deref() {
        let provided = request
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "));

        match provided {
            Some(token) if token == expected => {}
            Some(_) => return unauthorized("Invalid API token"),
            None => return unauthorized("Missing Authorization header"),
        }
    }

    next.run(request).await
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(ApiResponse::failure("UNAUTHORIZED", message))).into_response()
}

/// Caller identity from `X-User-Id`; absent or blank means anonymous.
pub fn owner_id(headers: &HeaderMap) -> Result<String, TalentError> {
    let Some(raw) = headers.get(OWNER_HEADER) else {
        return Ok(ANONYMOUS_OWNER.to_string());
    };
    let owner = raw
        .to_str()
        .map_err(|_| TalentError::Validation("X-User-Id must be visible ASCII".into()))?
        .trim();

    if owner.is_empty() {
        return Ok(ANONYMOUS_OWNER.to_string());
    }
    if owner.chars().count() > MAX_OWNER_CHARS {
        return Err(TalentError::Validation(format!("X-User-Id must be at most {} characters", MAX_OWNER_CHARS)));
    }
    Ok(owner.to_string())
}

/// Token from the environment, ignoring blank values.
pub fn token_from_env() -> Option<String> {
    std::env::var(API_TOKEN_ENV).ok().filter(|t| !t.trim().is_empty())
}
