use std::collections::BTreeMap;
use serde_json::Value;
use crate::models::{CandidateExperience, SourceRating, TalentSentiment};
use crate::models::sentiment::round_tenth;
use super::fields::{as_number, first_count, first_number, first_str, string_list};

const COUNT_KEYS: &[&str] = &["reviewCount", "review_count", "reviews", "count", "totalReviews"];

/// Verified review data gathered outside the main analysis call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerifiedSentiment {
    pub talent: TalentSentiment,
    pub candidate: Option<CandidateExperience>,
}

impl VerifiedSentiment {
    pub fn has_data(&self) -> bool {
        self.talent.is_verified() || self.candidate.as_ref().is_some_and(|c| c.is_verified())
    }
}

/// Build verified sentiment records from the search provider's JSON.
///
/// Ratings are clamped to 0-5; entries without a name or a usable rating are
/// dropped. With nothing usable the result is the zero/neutral default.
pub fn normalize_sentiment(raw: &Value) -> VerifiedSentiment {
    let sources = read_sources(raw);

    let category_ratings: BTreeMap<String, f64> = raw
        .get("categoryRatings")
        .or_else(|| raw.get("category_ratings"))
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| as_number(v).map(|r| (k.clone(), clamp_rating(r))))
                .collect()
        })
        .unwrap_or_default();

    let themes = string_list(raw.get("themes"));

    let candidate = raw
        .get("candidateExperience")
        .or_else(|| raw.get("candidate_experience"))
        .filter(|v| v.is_object())
        .map(read_candidate);

    VerifiedSentiment {
        talent: TalentSentiment::from_sources(sources, category_ratings, themes),
        candidate,
    }
}

fn read_sources(raw: &Value) -> Vec<SourceRating> {
    let items = match raw.get("sources").or_else(|| raw.get("ratings")) {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(name, v)| {
                let mut entry = v.clone();
                if let Value::Object(obj) = &mut entry {
                    obj.entry("name").or_insert_with(|| Value::String(name.clone()));
                } else {
                    entry = serde_json::json!({"name": name, "rating": v});
                }
                entry
            })
            .collect(),
        _ => Vec::new(),
    };

    items
        .iter()
        .filter_map(|item| {
            let name = first_str(item, &["name", "source", "platform"])?;
            let rating = first_number(item, &["rating", "score"])?;
            Some(SourceRating {
                name: name.to_string(),
                rating: clamp_rating(rating),
                review_count: first_count(item, COUNT_KEYS).unwrap_or(0),
                url: first_str(item, &["url", "link"]).map(str::to_string),
            })
        })
        .collect()
}

fn read_candidate(raw: &Value) -> CandidateExperience {
    CandidateExperience {
        rating: first_number(raw, &["rating", "score"]).map(clamp_rating).unwrap_or(0.0),
        review_count: first_count(raw, COUNT_KEYS).unwrap_or(0),
        positive_interview_pct: first_number(raw, &["positiveInterviewPct", "positive_interview_pct", "positiveExperiencePct"])
            .map(|p| p.round().clamp(0.0, 100.0) as u8),
        interview_difficulty: first_number(raw, &["interviewDifficulty", "interview_difficulty"]).map(clamp_rating),
        themes: string_list(raw.get("themes")),
    }
}

fn clamp_rating(r: f64) -> f64 {
    round_tenth(r.clamp(0.0, 5.0))
}
