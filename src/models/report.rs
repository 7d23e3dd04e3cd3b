use serde::{Deserialize, Serialize};
use super::dimension::{Dimension, DimensionName};
use super::sentiment::{CandidateExperience, TalentSentiment};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorEntry {
    pub name: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hiring_velocity: Option<String>,
}

/// A finished employer-brand report. Built once by the assembler and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub company_name: String,
    pub company_url: String,
    pub industry: String,
    pub dimensions: Vec<Dimension>,
    pub overall_score: u8,
    pub competitors: Vec<CompetitorEntry>,
    pub summary: String,
    pub talent_sentiment: TalentSentiment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_experience: Option<CandidateExperience>,
    pub generated_at: String,
    pub provider: String,
}

impl Report {
    pub fn dimension(&self, name: DimensionName) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }
}

/// Body of an analysis request.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub company_url: String,
    pub job_title: Option<String>,
    pub seniority_level: Option<String>,
}

/// A report as persisted for one owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredReport {
    pub id: String,
    pub owner_id: String,
    pub company_name: String,
    pub company_url: String,
    pub provider: String,
    pub report: serde_json::Value,
    pub created_at: String,
    pub updated_at: String,
}

/// Listing row without the report blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub id: String,
    pub company_name: String,
    pub company_url: String,
    pub provider: String,
    pub created_at: String,
}
