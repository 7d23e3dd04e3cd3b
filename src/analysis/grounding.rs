use tracing::info;
use crate::models::{clamp_score, CandidateExperience, Dimension, DimensionName, TalentSentiment};
use super::sentiment::VerifiedSentiment;

const MAX_THEMES_IN_INSIGHT: usize = 3;

/// Replace generated claims with verified review data where it exists.
///
/// Employee Experience is rewritten from `TalentSentiment` when it has
/// reviews; Candidate Experience from `CandidateExperience` likewise.
/// Dimensions without verified data keep the provider's value.
pub fn apply_grounding(dimensions: &mut [Dimension], verified: &VerifiedSentiment) {
    for dim in dimensions.iter_mut() {
        match dim.name {
            DimensionName::EmployeeExperience if verified.talent.is_verified() => {
                ground_employee_experience(dim, &verified.talent);
            }
            DimensionName::CandidateExperience => {
                if let Some(candidate) = verified.candidate.as_ref().filter(|c| c.is_verified()) {
                    ground_candidate_experience(dim, candidate);
                }
            }
            _ => {}
        }
    }
}

pub fn ground_employee_experience(dim: &mut Dimension, sentiment: &TalentSentiment) {
    let score = clamp_score(sentiment.aggregated_score * 20.0).unwrap_or(0);
    info!(previous = dim.score, grounded = score, reviews = sentiment.total_reviews, "Grounding Employee Experience");

    let mut insight = format!(
        "Verified employee sentiment is {}: rated {:.1}/5 across {} reviews",
        sentiment.sentiment_label.as_str(),
        sentiment.aggregated_score,
        sentiment.total_reviews,
    );
    if !sentiment.sources.is_empty() {
        let sources: Vec<String> = sentiment
            .sources
            .iter()
            .map(|s| format!("{} {:.1}", s.name, s.rating))
            .collect();
        insight.push_str(&format!(" ({})", sources.join(", ")));
    }
    insight.push('.');
    push_themes(&mut insight, &sentiment.themes);

    dim.score = score;
    dim.insight = insight;
}

pub fn ground_candidate_experience(dim: &mut Dimension, candidate: &CandidateExperience) {
    let score = clamp_score(candidate.rating * 20.0).unwrap_or(0);
    info!(previous = dim.score, grounded = score, reviews = candidate.review_count, "Grounding Candidate Experience");

    let mut insight = format!(
        "Candidates rate the hiring process {:.1}/5 across {} interview reviews",
        candidate.rating, candidate.review_count,
    );
    if let Some(pct) = candidate.positive_interview_pct {
        insight.push_str(&format!(", {}% describing a positive experience", pct));
    }
    insight.push('.');
    if let Some(difficulty) = candidate.interview_difficulty {
        insight.push_str(&format!(" Interview difficulty averages {:.1}/5.", difficulty));
    }
    push_themes(&mut insight, &candidate.themes);

    dim.score = score;
    dim.insight = insight;
}

fn push_themes(insight: &mut String, themes: &[String]) {
    if themes.is_empty() {
        return;
    }
    let shown: Vec<&str> = themes.iter().take(MAX_THEMES_IN_INSIGHT).map(String::as_str).collect();
    insight.push_str(&format!(" Recurring themes: {}.", shown.join("; ")));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use crate::models::SourceRating;
    use crate::analysis::normalizer::normalize_dimensions;
    use serde_json::json;

    fn dims() -> Vec<Dimension> {
        normalize_dimensions(
            &json!({"axes": [
                {"subject": "Employee Experience", "score": 95, "insight": "Employees love it here"},
                {"subject": "Candidate Experience", "score": 90, "insight": "Smooth hiring"}
            ]}),
            &DimensionName::ALL,
        )
    }

    fn verified_talent(rating: f64, count: u64) -> TalentSentiment {
        TalentSentiment::from_sources(
            vec![SourceRating { name: "Glassdoor".into(), rating, review_count: count, url: None }],
            BTreeMap::new(),
            vec!["flexible hours".into()],
        )
    }

    fn get(dims: &[Dimension], name: DimensionName) -> &Dimension {
        dims.iter().find(|d| d.name == name).unwrap()
    }

    #[test]
    fn test_verified_sentiment_overrides_employee_experience() {
        let mut d = dims();
        let verified = VerifiedSentiment { talent: verified_talent(3.2, 410), candidate: None };
        apply_grounding(&mut d, &verified);

        let ee = get(&d, DimensionName::EmployeeExperience);
        assert_eq!(ee.score, 64);
        assert!(ee.insight.contains("410 reviews"));
        assert!(ee.insight.contains("Glassdoor 3.2"));
        assert!(ee.insight.contains("flexible hours"));
        assert!(!ee.insight.contains("Employees love it here"));
        // candidate side untouched without candidate data
        assert_eq!(get(&d, DimensionName::CandidateExperience).score, 90);
    }

    #[test]
    fn test_no_verified_data_leaves_dimensions_untouched() {
        let mut d = dims();
        let before = d.clone();
        apply_grounding(&mut d, &VerifiedSentiment::default());
        assert_eq!(d, before);
    }

    #[test]
    fn test_zero_reviews_is_not_verified() {
        let mut d = dims();
        let verified = VerifiedSentiment { talent: verified_talent(4.9, 0), candidate: None };
        apply_grounding(&mut d, &verified);
        assert_eq!(get(&d, DimensionName::EmployeeExperience).score, 95);
    }

    #[test]
    fn test_candidate_experience_override() {
        let mut d = dims();
        let verified = VerifiedSentiment {
            talent: TalentSentiment::default(),
            candidate: Some(CandidateExperience {
                rating: 2.5,
                review_count: 80,
                positive_interview_pct: Some(40),
                interview_difficulty: Some(3.5),
                themes: vec![],
            }),
        };
        apply_grounding(&mut d, &verified);
        let ce = get(&d, DimensionName::CandidateExperience);
        assert_eq!(ce.score, 50);
        assert!(ce.insight.contains("40% describing a positive experience"));
        assert_eq!(get(&d, DimensionName::EmployeeExperience).score, 95);
    }
}
