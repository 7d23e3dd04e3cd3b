use serde::{Deserialize, Serialize};

/// One axis of the employer-brand scorecard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DimensionName {
    #[serde(rename = "Search")]
    Search,
    #[serde(rename = "Social Media")]
    SocialMedia,
    #[serde(rename = "Careers Site")]
    CareersSite,
    #[serde(rename = "Employee Experience")]
    EmployeeExperience,
    #[serde(rename = "Candidate Experience")]
    CandidateExperience,
    #[serde(rename = "Employer Value Proposition")]
    EmployerValueProposition,
}

impl DimensionName {
    /// Every dimension, in the order a finished report lists them.
    pub const ALL: [DimensionName; 6] = [
        DimensionName::Search,
        DimensionName::SocialMedia,
        DimensionName::CareersSite,
        DimensionName::EmployeeExperience,
        DimensionName::CandidateExperience,
        DimensionName::EmployerValueProposition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::SocialMedia => "Social Media",
            Self::CareersSite => "Careers Site",
            Self::EmployeeExperience => "Employee Experience",
            Self::CandidateExperience => "Candidate Experience",
            Self::EmployerValueProposition => "Employer Value Proposition",
        }
    }

    /// Industry-median benchmark used when the provider does not supply one.
    pub fn default_benchmark(&self) -> u8 {
        match self {
            Self::Search => 65,
            Self::SocialMedia => 60,
            Self::CareersSite => 62,
            Self::EmployeeExperience => 68,
            Self::CandidateExperience => 64,
            Self::EmployerValueProposition => 58,
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Search => &["search", "searchvisibility", "seo", "searchpresence"],
            Self::SocialMedia => &["socialmedia", "social", "socialpresence"],
            Self::CareersSite => &["careerssite", "careersite", "careerspage", "careers"],
            Self::EmployeeExperience => &["employeeexperience", "employeesentiment", "employeereviews"],
            Self::CandidateExperience => &["candidateexperience", "interviewexperience", "hiringprocess"],
            Self::EmployerValueProposition => &["employervalueproposition", "evp", "valueproposition"],
        }
    }

    /// Resolve a free-form label ("employee_experience", "EVP", "Social") to a dimension.
    pub fn from_label(label: &str) -> Option<Self> {
        let key = label_key(label);
        if key.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|d| d.aliases().contains(&key.as_str()))
    }
}

impl std::fmt::Display for DimensionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase, alphanumeric-only form of a label; "&" counts as "and".
fn label_key(label: &str) -> String {
    label
        .replace('&', "and")
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: DimensionName,
    /// Always within 0..=100.
    pub score: u8,
    pub benchmark: u8,
    pub insight: String,
}

/// Clamp an arbitrary score into 0..=100, rounding to the nearest integer.
/// Non-finite values have no meaningful score.
pub fn clamp_score(raw: f64) -> Option<u8> {
    if !raw.is_finite() {
        return None;
    }
    Some(raw.round().clamp(0.0, 100.0) as u8)
}
