use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Mixed,
    Negative,
    #[default]
    Neutral,
}

impl SentimentLabel {
    /// Label for an aggregated 0-5 rating. Zero means no data.
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 4.0 {
            Self::Positive
        } else if rating >= 3.0 {
            Self::Mixed
        } else if rating > 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Mixed => "mixed",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

/// A rating reported by one review site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRating {
    pub name: String,
    /// 0.0 ..= 5.0
    pub rating: f64,
    pub review_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Aggregated employee review data from verified sources.
///
/// `aggregated_score` and `total_reviews` are zero when nothing was verified,
/// never absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TalentSentiment {
    pub aggregated_score: f64,
    pub total_reviews: u64,
    pub category_ratings: BTreeMap<String, f64>,
    pub sentiment_label: SentimentLabel,
    pub themes: Vec<String>,
    pub sources: Vec<SourceRating>,
}

impl TalentSentiment {
    /// Build from per-source ratings. The aggregate is weighted by review
    /// count, falling back to a plain mean when no source reports a count.
    pub fn from_sources(
        sources: Vec<SourceRating>,
        category_ratings: BTreeMap<String, f64>,
        themes: Vec<String>,
    ) -> Self {
        let rated: Vec<&SourceRating> = sources.iter().filter(|s| s.rating > 0.0).collect();
        let total_reviews = sources.iter().fold(0u64, |acc, s| acc.saturating_add(s.review_count));

        let aggregated_score = if rated.is_empty() {
            0.0
        } else {
            let weight: f64 = rated.iter().map(|s| s.review_count as f64).sum();
            let mean = if weight > 0.0 {
                rated.iter().map(|s| s.rating * s.review_count as f64).sum::<f64>() / weight
            } else {
                rated.iter().map(|s| s.rating).sum::<f64>() / rated.len() as f64
            };
            round_tenth(mean.clamp(0.0, 5.0))
        };

        Self {
            aggregated_score,
            total_reviews,
            category_ratings,
            sentiment_label: SentimentLabel::from_rating(aggregated_score),
            themes,
            sources,
        }
    }

    pub fn is_verified(&self) -> bool {
        self.total_reviews > 0
    }
}

/// Candidate-side review data (interview process, recruiter contact).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CandidateExperience {
    /// 0.0 ..= 5.0
    pub rating: f64,
    pub review_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positive_interview_pct: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_difficulty: Option<f64>,
    pub themes: Vec<String>,
}

impl CandidateExperience {
    pub fn is_verified(&self) -> bool {
        self.review_count > 0
    }
}

pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str, rating: f64, count: u64) -> SourceRating {
        SourceRating { name: name.to_string(), rating, review_count: count, url: None }
    }

    #[test]
    fn test_weighted_aggregate() {
        let s = TalentSentiment::from_sources(
            vec![source("Glassdoor", 4.0, 300), source("Indeed", 3.0, 100)],
            BTreeMap::new(),
            vec![],
        );
        assert_eq!(s.aggregated_score, 3.8);
        assert_eq!(s.total_reviews, 400);
        assert_eq!(s.sentiment_label, SentimentLabel::Mixed);
        assert!(s.is_verified());
    }

    #[test]
    fn test_plain_mean_without_counts() {
        let s = TalentSentiment::from_sources(
            vec![source("Glassdoor", 4.2, 0), source("Indeed", 4.4, 0)],
            BTreeMap::new(),
            vec![],
        );
        assert_eq!(s.aggregated_score, 4.3);
        assert_eq!(s.total_reviews, 0);
        assert!(!s.is_verified());
    }

    #[test]
    fn test_no_sources_is_neutral_zero() {
        let s = TalentSentiment::from_sources(vec![], BTreeMap::new(), vec![]);
        assert_eq!(s.aggregated_score, 0.0);
        assert_eq!(s.total_reviews, 0);
        assert_eq!(s.sentiment_label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_default_serializes_zeroes_not_nulls() {
        let json = serde_json::to_value(TalentSentiment::default()).unwrap();
        assert_eq!(json["aggregatedScore"], 0.0);
        assert_eq!(json["totalReviews"], 0);
        assert_eq!(json["sentimentLabel"], "neutral");
    }

    #[test]
    fn test_label_thresholds() {
        assert_eq!(SentimentLabel::from_rating(4.0), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_rating(3.9), SentimentLabel::Mixed);
        assert_eq!(SentimentLabel::from_rating(2.1), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_rating(0.0), SentimentLabel::Neutral);
    }
}
