use serde_json::Value;
use tracing::debug;
use crate::models::{clamp_score, Dimension, DimensionName};
use super::fields::{as_number, first_number, first_str};

/// Score given to a dimension the provider said nothing about.
pub const NEUTRAL_SCORE: u8 = 50;

const NAME_KEYS: &[&str] = &["subject", "name", "dimension", "axis", "label"];
const SCORE_KEYS: &[&str] = &["score", "value", "rating"];
const INSIGHT_KEYS: &[&str] = &["insight", "analysis", "summary", "description", "rationale"];
const BENCHMARK_KEYS: &[&str] = &["benchmark", "industryBenchmark", "industry_benchmark", "industryAverage"];

/// A dimension entry as found in provider output, before defaults apply.
#[derive(Debug, Default)]
struct RawDimension<'a> {
    score: Option<f64>,
    benchmark: Option<f64>,
    insight: Option<&'a str>,
}

pub fn pending_insight(name: DimensionName) -> String {
    format!("{} analysis pending: not enough public signal was found to score this dimension.", name)
}

/// Map arbitrary provider output onto exactly one `Dimension` per expected name.
///
/// Total over any JSON value: missing or unreadable entries become neutral
/// defaults, out-of-range scores are clamped into 0..=100.
pub fn normalize_dimensions(raw: &Value, expected: &[DimensionName]) -> Vec<Dimension> {
    let found = collect_raw_dimensions(raw);

    expected
        .iter()
        .map(|&name| {
            // Each field comes from the first entry that carries a usable value.
            let entries = || found.iter().filter(move |(n, _)| *n == name).map(|(_, d)| d);
            let score = entries().find_map(|d| d.score.and_then(clamp_score));
            let benchmark = entries().find_map(|d| d.benchmark.and_then(clamp_score));
            let insight = entries().find_map(|d| d.insight);

            if score.is_none() {
                debug!(dimension = %name, "Dimension missing from provider output, using neutral default");
            }

            Dimension {
                name,
                score: score.unwrap_or(NEUTRAL_SCORE),
                benchmark: benchmark.unwrap_or_else(|| name.default_benchmark()),
                insight: insight.map(str::to_string).unwrap_or_else(|| pending_insight(name)),
            }
        })
        .collect()
}

/// Gather recognised entries from every supported shape, in document order.
fn collect_raw_dimensions(raw: &Value) -> Vec<(DimensionName, RawDimension<'_>)> {
    let mut found = Vec::new();

    for key in ["axes", "dimensions", "scorecard"] {
        match raw.get(key) {
            Some(Value::Array(items)) => {
                for item in items {
                    if let Some(name) = first_str(item, NAME_KEYS).and_then(DimensionName::from_label) {
                        found.push((name, read_entry(item)));
                    }
                }
            }
            Some(Value::Object(map)) => {
                for (label, item) in map {
                    if let Some(name) = DimensionName::from_label(label) {
                        found.push((name, read_entry(item)));
                    }
                }
            }
            _ => {}
        }
    }

    if let Some(Value::Object(scores)) = raw.get("scores") {
        for (label, value) in scores {
            if let Some(name) = DimensionName::from_label(label) {
                found.push((name, RawDimension { score: as_number(value), ..Default::default() }));
            }
        }
    }

    found
}

fn read_entry(item: &Value) -> RawDimension<'_> {
    if item.is_object() {
        RawDimension {
            score: first_number(item, SCORE_KEYS),
            benchmark: first_number(item, BENCHMARK_KEYS),
            insight: first_str(item, INSIGHT_KEYS),
        }
    } else {
        RawDimension { score: as_number(item), ..Default::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn score_of(dims: &[Dimension], name: DimensionName) -> u8 {
        dims.iter().find(|d| d.name == name).unwrap().score
    }

    #[test]
    fn test_axes_score_is_clamped() {
        let raw = json!({"axes": [{"subject": "Search", "score": 130}]});
        let dims = normalize_dimensions(&raw, &DimensionName::ALL);
        assert_eq!(score_of(&dims, DimensionName::Search), 100);
    }

    #[test]
    fn test_negative_score_clamped_to_zero() {
        let raw = json!({"dimensions": [{"name": "Social Media", "score": -20, "insight": "Quiet"}]});
        let dims = normalize_dimensions(&raw, &DimensionName::ALL);
        assert_eq!(score_of(&dims, DimensionName::SocialMedia), 0);
    }

    #[test]
    fn test_every_expected_name_exactly_once() {
        let raw = json!({"axes": [
            {"subject": "Search", "score": 80},
            {"subject": "search", "score": 10},
            {"subject": "Unknown Axis", "score": 99}
        ]});
        let dims = normalize_dimensions(&raw, &DimensionName::ALL);
        assert_eq!(dims.len(), DimensionName::ALL.len());
        for name in DimensionName::ALL {
            assert_eq!(dims.iter().filter(|d| d.name == name).count(), 1);
        }
        // first occurrence wins
        assert_eq!(score_of(&dims, DimensionName::Search), 80);
    }

    #[test]
    fn test_score_taken_from_later_entry_when_first_has_none() {
        let raw = json!({
            "axes": [{"subject": "Search", "insight": "Visible on Google"}],
            "scores": {"Search": 80}
        });
        let dims = normalize_dimensions(&raw, &[DimensionName::Search]);
        assert_eq!(dims[0].score, 80);
        assert_eq!(dims[0].insight, "Visible on Google");
    }

    #[test]
    fn test_missing_dimensions_get_defaults() {
        let dims = normalize_dimensions(&json!({}), &DimensionName::ALL);
        for d in &dims {
            assert_eq!(d.score, NEUTRAL_SCORE);
            assert_eq!(d.benchmark, d.name.default_benchmark());
            assert_eq!(d.insight, pending_insight(d.name));
        }
    }

    #[test]
    fn test_non_object_input_is_total() {
        for raw in [json!(null), json!(42), json!("text"), json!([1, 2])] {
            let dims = normalize_dimensions(&raw, &DimensionName::ALL);
            assert_eq!(dims.len(), 6);
        }
    }

    #[test]
    fn test_object_map_and_string_scores() {
        let raw = json!({
            "dimensions": {
                "Employee Experience": {"score": "72", "insight": "Good reviews", "benchmark": 140},
                "EVP": 64
            }
        });
        let dims = normalize_dimensions(&raw, &DimensionName::ALL);
        let ee = dims.iter().find(|d| d.name == DimensionName::EmployeeExperience).unwrap();
        assert_eq!(ee.score, 72);
        assert_eq!(ee.benchmark, 100);
        assert_eq!(ee.insight, "Good reviews");
        assert_eq!(score_of(&dims, DimensionName::EmployerValueProposition), 64);
    }

    #[test]
    fn test_scores_map() {
        let raw = json!({"scores": {"careers_site": 91.4, "social": "n/a"}});
        let dims = normalize_dimensions(&raw, &DimensionName::ALL);
        assert_eq!(score_of(&dims, DimensionName::CareersSite), 91);
        assert_eq!(score_of(&dims, DimensionName::SocialMedia), NEUTRAL_SCORE);
    }

    #[test]
    fn test_blank_insight_gets_placeholder() {
        let raw = json!({"axes": [{"subject": "Search", "score": 60, "insight": "   "}]});
        let dims = normalize_dimensions(&raw, &[DimensionName::Search]);
        assert_eq!(dims[0].insight, pending_insight(DimensionName::Search));
        assert_eq!(dims[0].score, 60);
    }

    #[test]
    fn test_output_follows_expected_order() {
        let expected = [DimensionName::CandidateExperience, DimensionName::Search];
        let dims = normalize_dimensions(&json!({}), &expected);
        assert_eq!(dims.iter().map(|d| d.name).collect::<Vec<_>>(), expected.to_vec());
    }
}
