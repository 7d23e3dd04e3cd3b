use serde_json::{json, Value};
use crate::models::{AnalysisRequest, DimensionName};
use crate::research::ResearchSnippet;
use super::templates;

/// Variables available for template interpolation.
#[derive(Debug, Clone, Default)]
pub struct PromptVariables {
    pub company_name: String,
    pub company_url: String,
    pub role_focus: Option<String>,
    pub research_context: Option<String>,
    pub schema: String,
}

/// A finished prompt pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// JSON shape the analysis provider is asked to return.
pub fn analysis_schema() -> Value {
    let axes: Vec<Value> = DimensionName::ALL
        .iter()
        .map(|d| json!({"subject": d.as_str(), "score": "0-100", "benchmark": "0-100", "insight": "string"}))
        .collect();
    json!({
        "companyName": "string",
        "industry": "string",
        "summary": "string",
        "axes": axes,
        "competitors": [{"name": "string", "reason": "string", "hiringVelocity": "high | medium | low"}]
    })
}

/// JSON shape the sentiment search provider is asked to return.
pub fn sentiment_schema() -> Value {
    json!({
        "sources": [{"name": "Glassdoor", "rating": "0-5", "reviewCount": "integer", "url": "string"}],
        "categoryRatings": {"workLifeBalance": "0-5", "compensation": "0-5", "culture": "0-5", "management": "0-5", "careerGrowth": "0-5"},
        "themes": ["string"],
        "candidateExperience": {"rating": "0-5", "reviewCount": "integer", "positiveInterviewPct": "0-100", "interviewDifficulty": "0-5", "themes": ["string"]}
    })
}

/// Replace {{VARIABLE}} placeholders. None values become an empty string.
pub fn interpolate(template: &str, vars: &PromptVariables) -> String {
    let mut result = template.to_string();

    let replacements: &[(&str, &str)] = &[
        ("{{COMPANY_NAME}}", &vars.company_name),
        ("{{COMPANY_URL}}", &vars.company_url),
        ("{{SCHEMA}}", &vars.schema),
    ];
    for (placeholder, value) in replacements {
        result = result.replace(placeholder, value);
    }

    let optional_replacements: &[(&str, &Option<String>)] = &[
        ("{{ROLE_FOCUS}}", &vars.role_focus),
        ("{{RESEARCH_CONTEXT}}", &vars.research_context),
    ];
    for (placeholder, value) in optional_replacements {
        result = result.replace(placeholder, value.as_deref().unwrap_or(""));
    }

    result
}

fn role_focus(request: &AnalysisRequest) -> Option<String> {
    let title = request.job_title.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let seniority = request.seniority_level.as_deref().map(str::trim).filter(|s| !s.is_empty());
    match (title, seniority) {
        (Some(t), Some(s)) => Some(format!("Focus on how the company appeals to {} {} candidates.", s, t)),
        (Some(t), None) => Some(format!("Focus on how the company appeals to {} candidates.", t)),
        (None, Some(s)) => Some(format!("Focus on how the company appeals to {}-level candidates.", s)),
        (None, None) => None,
    }
}

fn render_snippets(snippets: &[ResearchSnippet]) -> String {
    if snippets.is_empty() {
        return "No research context was retrieved; rely on what you know and say so in insights where evidence is thin.".to_string();
    }
    snippets
        .iter()
        .map(|s| format!("[{}] {}\n{}", s.source, s.url, s.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn pretty(schema: &Value) -> String {
    serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string())
}

pub fn build_analysis_prompt(request: &AnalysisRequest, snippets: &[ResearchSnippet]) -> Prompt {
    let vars = PromptVariables {
        company_name: request.company_name.trim().to_string(),
        company_url: request.company_url.trim().to_string(),
        role_focus: role_focus(request),
        research_context: Some(render_snippets(snippets)),
        schema: pretty(&analysis_schema()),
    };
    Prompt {
        system: templates::ANALYSIS_SYSTEM.to_string(),
        user: interpolate(templates::ANALYSIS, &vars),
    }
}

pub fn build_sentiment_prompt(request: &AnalysisRequest) -> Prompt {
    let vars = PromptVariables {
        company_name: request.company_name.trim().to_string(),
        company_url: request.company_url.trim().to_string(),
        schema: pretty(&sentiment_schema()),
        ..Default::default()
    };
    Prompt {
        system: templates::SENTIMENT_SYSTEM.to_string(),
        user: interpolate(templates::SENTIMENT, &vars),
    }
}
