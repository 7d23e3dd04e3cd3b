use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use crate::models::{AnalysisRequest, CompetitorEntry, Dimension, DimensionName, Report};
use super::fields::first_str;
use super::grounding::apply_grounding;
use super::normalizer::normalize_dimensions;
use super::sentiment::VerifiedSentiment;

pub const MAX_COMPETITORS: usize = 8;

/// Everything the assembler needs. Assembly is a pure function of this.
pub struct AssemblyInput<'a> {
    pub request: &'a AnalysisRequest,
    pub payload: &'a Value,
    pub verified: &'a VerifiedSentiment,
    pub provider: &'a str,
    pub generated_at: DateTime<Utc>,
}

pub fn assemble_report(input: AssemblyInput<'_>) -> Report {
    let AssemblyInput { request, payload, verified, provider, generated_at } = input;

    let mut dimensions = normalize_dimensions(payload, &DimensionName::ALL);
    apply_grounding(&mut dimensions, verified);

    let company_name = request.company_name.trim().to_string();
    let competitors = normalize_competitors(payload.get("competitors"), &company_name);

    let industry = first_str(payload, &["industry", "sector"])
        .unwrap_or("Unknown")
        .to_string();

    let overall_score = overall_score(&dimensions);

    let summary = first_str(payload, &["summary", "executiveSummary", "overview"])
        .map(str::to_string)
        .unwrap_or_else(|| default_summary(&company_name, overall_score));

    Report {
        company_name,
        company_url: request.company_url.trim().to_string(),
        industry,
        dimensions,
        overall_score,
        competitors,
        summary,
        talent_sentiment: verified.talent.clone(),
        candidate_experience: verified.candidate.clone(),
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        provider: provider.to_string(),
    }
}

/// Rounded mean of the final dimension scores. Provider-claimed overall
/// scores are ignored so the headline always agrees with the dimensions.
pub fn overall_score(dimensions: &[Dimension]) -> u8 {
    if dimensions.is_empty() {
        return 0;
    }
    let total: u32 = dimensions.iter().map(|d| d.score as u32).sum();
    let mean = total as f64 / dimensions.len() as f64;
    mean.round().clamp(0.0, 100.0) as u8
}

/// Accepts plain names or `{name, reason, hiringVelocity}` objects.
/// Blank names, repeats (case-insensitive) and the company itself are dropped.
pub fn normalize_competitors(raw: Option<&Value>, company_name: &str) -> Vec<CompetitorEntry> {
    let Some(Value::Array(items)) = raw else {
        return Vec::new();
    };

    let own = company_name.trim().to_lowercase();
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();

    for item in items {
        let entry = match item {
            Value::String(name) => CompetitorEntry {
                name: name.trim().to_string(),
                reason: String::new(),
                hiring_velocity: None,
            },
            Value::Object(_) => {
                let Some(name) = first_str(item, &["name", "company", "competitor"]) else {
                    continue;
                };
                CompetitorEntry {
                    name: name.to_string(),
                    reason: first_str(item, &["reason", "rationale", "why"]).unwrap_or_default().to_string(),
                    hiring_velocity: first_str(item, &["hiringVelocity", "hiring_velocity", "velocity"])
                        .map(str::to_string),
                }
            }
            _ => continue,
        };

        let key = entry.name.to_lowercase();
        if key.is_empty() || key == own || seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(entry);
        if out.len() == MAX_COMPETITORS {
            break;
        }
    }

    out
}

fn default_summary(company_name: &str, overall: u8) -> String {
    format!(
        "{} scores {}/100 overall across {} employer-brand dimensions.",
        company_name,
        overall,
        DimensionName::ALL.len()
    )
}
