pub struct ProviderInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub env_var: &'static str,
    pub models: &'static [ModelInfo],
}

pub struct ModelInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub recommended: bool,
}

pub static PROVIDERS: &[ProviderInfo] = &[
    ProviderInfo {
        id: "gemini",
        name: "Google Gemini",
        env_var: "GEMINI_API_KEY",
        models: &[
            ModelInfo { id: "gemini-2.5-flash", label: "Gemini 2.5 Flash", recommended: true },
            ModelInfo { id: "gemini-2.5-pro", label: "Gemini 2.5 Pro", recommended: false },
        ],
    },
    ProviderInfo {
        id: "perplexity",
        name: "Perplexity",
        env_var: "PERPLEXITY_API_KEY",
        models: &[
            ModelInfo { id: "sonar-pro", label: "Sonar Pro", recommended: true },
            ModelInfo { id: "sonar", label: "Sonar", recommended: false },
        ],
    },
];

pub fn get_provider(id: &str) -> Option<&'static ProviderInfo> {
    PROVIDERS.iter().find(|p| p.id == id)
}

pub fn get_default_model(provider_id: &str) -> Option<&'static str> {
    let provider = get_provider(provider_id)?;
    provider.models.iter()
        .find(|m| m.recommended)
        .or_else(|| provider.models.first())
        .map(|m| m.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_models() {
        assert_eq!(get_default_model("gemini"), Some("gemini-2.5-flash"));
        assert_eq!(get_default_model("perplexity"), Some("sonar-pro"));
        assert_eq!(get_default_model("openai"), None);
    }

    #[test]
    fn test_env_vars() {
        assert_eq!(get_provider("gemini").unwrap().env_var, "GEMINI_API_KEY");
        assert_eq!(get_provider("perplexity").unwrap().name, "Perplexity");
    }
}
