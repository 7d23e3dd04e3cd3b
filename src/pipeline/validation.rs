use reqwest::Url;
use crate::errors::TalentError;
use crate::models::AnalysisRequest;

pub const MAX_COMPANY_NAME_CHARS: usize = 200;
const MAX_ROLE_CHARS: usize = 120;

/// Check an incoming request and return it normalized: fields trimmed, the
/// URL given a scheme when it has none, empty optional fields dropped.
pub fn validate_request(request: &AnalysisRequest) -> Result<AnalysisRequest, TalentError> {
    let company_name = request.company_name.trim();
    if company_name.is_empty() {
        return Err(TalentError::Validation("companyName is required".into()));
    }
    if company_name.chars().count() > MAX_COMPANY_NAME_CHARS {
        return Err(TalentError::Validation(format!(
            "companyName must be at most {} characters",
            MAX_COMPANY_NAME_CHARS
        )));
    }

    let company_url = normalize_url(&request.company_url)?;

    Ok(AnalysisRequest {
        company_name: company_name.to_string(),
        company_url,
        job_title: optional_field("jobTitle", request.job_title.as_deref())?,
        seniority_level: optional_field("seniorityLevel", request.seniority_level.as_deref())?,
    })
}

fn normalize_url(raw: &str) -> Result<String, TalentError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TalentError::Validation("companyUrl is required".into()));
    }

    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    let url = Url::parse(&candidate)
        .map_err(|e| TalentError::Validation(format!("companyUrl is not a valid URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TalentError::Validation("companyUrl must use http or https".into()));
    }
    match url.host_str() {
        Some(host) if host.contains('.') || host == "localhost" => Ok(url.to_string()),
        _ => Err(TalentError::Validation("companyUrl must include a domain".into())),
    }
}

fn optional_field(field: &str, value: Option<&str>) -> Result<Option<String>, TalentError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if value.chars().count() > MAX_ROLE_CHARS {
        return Err(TalentError::Validation(format!("{} must be at most {} characters", field, MAX_ROLE_CHARS)));
    }
    Ok(Some(value.to_string()))
}
