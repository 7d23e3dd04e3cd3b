use axum::{
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::error;
use crate::errors::TalentError;
use super::models::ApiResponse;

pub fn status_for_code(code: &str) -> StatusCode {
    match code {
        "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
        "UNAUTHORIZED" => StatusCode::UNAUTHORIZED,
        "NOT_FOUND" => StatusCode::NOT_FOUND,
        "RATE_LIMITED" => StatusCode::TOO_MANY_REQUESTS,
        "ANALYSIS_FAILED" | "PROVIDER_ERROR" => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for TalentError {
    fn into_response(self) -> axum::response::Response {
        let class = self.classify();
        let status = status_for_code(class.code);

        // Server-side failures are logged in full and reported generically.
        let (code, message) = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "Request failed");
            ("INTERNAL_ERROR", "Internal server error".to_string())
        } else {
            (class.code, self.to_string())
        };

        let mut body = ApiResponse::failure(code, message);
        body.retry_after_seconds = self.retry_after_secs();

        let mut response = (status, Json(body)).into_response();
        if let Some(secs) = self.retry_after_secs() {
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_response_has_retry_after() {
        let response = TalentError::rate_limited("quota", 17).into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "17");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(TalentError::Validation("x".into()).into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(TalentError::MalformedOutput("x".into()).into_response().status(), StatusCode::BAD_GATEWAY);
        assert_eq!(TalentError::Provider("x".into()).into_response().status(), StatusCode::BAD_GATEWAY);
        assert_eq!(TalentError::NotFound("x".into()).into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(TalentError::Config("x".into()).into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
