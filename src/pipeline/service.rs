use std::sync::Arc;
use std::time::{Duration, Instant};
use chrono::Utc;
use tracing::{info, warn};
use crate::analysis::{assemble_report, parse_provider_json, AssemblyInput, VerifiedSentiment};
use crate::cache::ReportCache;
use crate::config::credentials::{redact_credentials, resolve_api_key};
use crate::config::{ProviderConfig, TalentConfig};
use crate::db::settings::RuntimeSettings;
use crate::db::Database;
use crate::errors::TalentError;
use crate::llm::{provider_from_config, CallFailure, FallbackCaller, LLMProvider};
use crate::models::{AnalysisRequest, Report};
use crate::prompts::build_analysis_prompt;
use crate::research::{ResearchSnippet, ResearchSource, SentimentResearcher, SentimentSource, WebResearcher};
use super::validation::validate_request;

/// A finished analysis and whether it came from the cache.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub report: Report,
    pub cached: bool,
}

/// Runs one request through research, the provider call, parsing and
/// assembly. Holds no per-request state.
pub struct ReportPipeline {
    caller: FallbackCaller,
    research: Option<Arc<dyn ResearchSource>>,
    sentiment: Option<Arc<dyn SentimentSource>>,
    cache: Option<ReportCache>,
    secrets: Vec<String>,
}

impl ReportPipeline {
    pub fn new(caller: FallbackCaller) -> Self {
        Self { caller, research: None, sentiment: None, cache: None, secrets: Vec::new() }
    }

    pub fn with_research(mut self, research: Arc<dyn ResearchSource>) -> Self {
        self.research = Some(research);
        self
    }

    pub fn with_sentiment(mut self, sentiment: Arc<dyn SentimentSource>) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    pub fn with_cache(mut self, cache: ReportCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Values scrubbed from any error message leaving the pipeline.
    pub fn with_secrets(mut self, secrets: Vec<String>) -> Self {
        self.secrets = secrets;
        self
    }

    /// Wire providers, research, sentiment and cache from configuration.
    /// Only the primary provider is mandatory; optional parts that cannot be
    /// built are logged and left out.
    pub fn from_config(config: &TalentConfig, db: &Database) -> Result<Self, TalentError> {
        let providers = config.providers();
        let timeout = Duration::from_secs(providers.timeout_secs);

        let primary = provider_from_config(&providers.primary, timeout)?;
        let secondary = providers.secondary.as_ref().and_then(|cfg| optional_provider(cfg, timeout, "secondary"));
        let caller = FallbackCaller::new(primary, secondary, providers.fallback_policy);

        let secrets = std::iter::once(&providers.primary)
            .chain(providers.secondary.iter())
            .chain(providers.sentiment.iter())
            .map(|cfg| resolve_api_key(&cfg.provider, cfg.api_key.as_deref()))
            .filter(|k| !k.is_empty())
            .collect();

        let mut pipeline = Self::new(caller).with_secrets(secrets);

        let research = config.research();
        if research.enabled {
            pipeline = pipeline.with_research(Arc::new(WebResearcher::new(&research)?));
        }

        if let Some(provider) = providers.sentiment.as_ref().and_then(|cfg| optional_provider(cfg, timeout, "sentiment")) {
            pipeline = pipeline.with_sentiment(Arc::new(SentimentResearcher::new(provider)));
        }

        let cache = config.cache();
        if cache.enabled {
            pipeline = pipeline.with_cache(ReportCache::from_config(&cache, db));
        }

        info!(
            primary = pipeline.caller.primary().provider_name(),
            secondary = pipeline.caller.secondary().map(|s| s.provider_name()).unwrap_or("none"),
            research = pipeline.research.is_some(),
            sentiment = pipeline.sentiment.is_some(),
            cache = pipeline.cache.is_some(),
            "Report pipeline ready"
        );
        Ok(pipeline)
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisOutcome, TalentError> {
        self.run(request, RuntimeSettings::default()).await
    }

    pub async fn run(&self, request: &AnalysisRequest, settings: RuntimeSettings) -> Result<AnalysisOutcome, TalentError> {
        let request = validate_request(request)?;
        let started = Instant::now();

        let cache = self.cache.as_ref().filter(|_| settings.cache_enabled);
        if let Some(report) = cache.and_then(|c| c.get(&request)) {
            info!(company = %request.company_name, "Serving cached report");
            return Ok(AnalysisOutcome { report, cached: true });
        }

        let snippets = self.gather_research(&request, settings).await;
        let prompt = build_analysis_prompt(&request, &snippets);

        let outcome = self
            .caller
            .call(&prompt.user, Some(&prompt.system))
            .await
            .map_err(|failure| self.redacted(failure))?;
        let payload = parse_provider_json(&outcome.response.content)?;

        let verified = self.verified_sentiment(&request, settings).await;
        let provider = outcome.provider_label();

        let report = assemble_report(AssemblyInput {
            request: &request,
            payload: &payload,
            verified: &verified,
            provider: &provider,
            generated_at: Utc::now(),
        });

        if let Some(cache) = cache {
            cache.put(&request, &report);
        }

        info!(
            company = %request.company_name,
            provider = %provider,
            overall = report.overall_score,
            grounded = verified.has_data(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Report assembled"
        );
        Ok(AnalysisOutcome { report, cached: false })
    }

    async fn gather_research(&self, request: &AnalysisRequest, settings: RuntimeSettings) -> Vec<ResearchSnippet> {
        match &self.research {
            Some(research) if settings.research_enabled => research.gather(&request.company_url).await,
            _ => Vec::new(),
        }
    }

    async fn verified_sentiment(&self, request: &AnalysisRequest, settings: RuntimeSettings) -> VerifiedSentiment {
        let Some(source) = self.sentiment.as_ref().filter(|_| settings.sentiment_enabled) else {
            return VerifiedSentiment::default();
        };
        match source.verified_sentiment(request).await {
            Ok(verified) => verified,
            Err(e) => {
                warn!(company = %request.company_name, error = %self.redact(&e.to_string()), "Sentiment research failed, continuing without it");
                VerifiedSentiment::default()
            }
        }
    }

    fn redact(&self, text: &str) -> String {
        let secrets: Vec<&str> = self.secrets.iter().map(String::as_str).collect();
        redact_credentials(text, &secrets)
    }

    fn redacted(&self, failure: CallFailure) -> TalentError {
        match failure {
            CallFailure::RateLimited { retry_after_secs, message } => CallFailure::RateLimited {
                retry_after_secs,
                message: self.redact(&message),
            },
            CallFailure::Unrecoverable { message } => CallFailure::Unrecoverable { message: self.redact(&message) },
        }
        .into()
    }
}

fn optional_provider(cfg: &ProviderConfig, timeout: Duration, role: &str) -> Option<Arc<dyn LLMProvider>> {
    match provider_from_config(cfg, timeout) {
        Ok(provider) => Some(provider),
        Err(e) => {
            warn!(role, provider = %cfg.provider, error = %e, "Optional provider unavailable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use async_trait::async_trait;
    use crate::cache::MemoryStore;
    use crate::llm::{FallbackPolicy, LLMResponse};
    use crate::models::DimensionName;

    struct Scripted {
        name: &'static str,
        result: Result<&'static str, fn() -> TalentError>,
        calls: AtomicU32,
    }

    impl Scripted {
        fn ok(name: &'static str, content: &'static str) -> Arc<Self> {
            Arc::new(Self { name, result: Ok(content), calls: AtomicU32::new(0) })
        }

        fn failing(name: &'static str, err: fn() -> TalentError) -> Arc<Self> {
            Arc::new(Self { name, result: Err(err), calls: AtomicU32::new(0) })
        }
    }

    #[async_trait]
    impl LLMProvider for Scripted {
        async fn complete(&self, _prompt: &str, _system: Option<&str>) -> Result<LLMResponse, TalentError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.result {
                Ok(content) => Ok(LLMResponse {
                    content: content.to_string(),
                    input_tokens: None,
                    output_tokens: None,
                    model: "test".into(),
                    citations: vec![],
                }),
                Err(make) => Err(make()),
            }
        }
        fn provider_name(&self) -> &str { self.name }
        fn model_name(&self) -> &str { "test" }
    }

    struct FixedSentiment(Result<VerifiedSentiment, fn() -> TalentError>);

    #[async_trait]
    impl SentimentSource for FixedSentiment {
        async fn verified_sentiment(&self, _request: &AnalysisRequest) -> Result<VerifiedSentiment, TalentError> {
            match &self.0 {
                Ok(v) => Ok(v.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    const PAYLOAD: &str = r#"```json
{"industry":"Retail","axes":[{"subject":"Search","score":130}],"competitors":["Foo"],"overallScore":150}
```"#;

    fn request() -> AnalysisRequest {
        AnalysisRequest { company_name: "Acme".into(), company_url: "acme.com".into(), ..Default::default() }
    }

    fn single(provider: Arc<Scripted>) -> FallbackCaller {
        FallbackCaller::new(provider, None, FallbackPolicy::AnyError)
    }

    #[tokio::test]
    async fn test_end_to_end_assembly() {
        let pipeline = ReportPipeline::new(single(Scripted::ok("gemini", PAYLOAD)));
        let outcome = pipeline.analyze(&request()).await.unwrap();
        let report = outcome.report;

        assert!(!outcome.cached);
        assert_eq!(report.company_url, "https://acme.com/");
        assert_eq!(report.industry, "Retail");
        assert_eq!(report.dimensions.len(), 6);
        assert_eq!(report.dimension(DimensionName::Search).unwrap().score, 100);
        assert!(report.overall_score <= 100);
        assert_eq!(report.competitors.len(), 1);
        assert_eq!(report.provider, "gemini");
    }

    #[tokio::test]
    async fn test_validation_happens_before_any_call() {
        let provider = Scripted::ok("gemini", PAYLOAD);
        let pipeline = ReportPipeline::new(single(provider.clone()));
        let bad = AnalysisRequest { company_name: " ".into(), company_url: "acme.com".into(), ..Default::default() };

        assert!(matches!(pipeline.analyze(&bad).await, Err(TalentError::Validation(_))));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_output() {
        let pipeline = ReportPipeline::new(single(Scripted::ok("gemini", "I cannot help with that.")));
        let err = pipeline.analyze(&request()).await.unwrap_err();
        assert_eq!(err.classify().code, "ANALYSIS_FAILED");
    }

    #[tokio::test]
    async fn test_fallback_label_on_report() {
        let caller = FallbackCaller::new(
            Scripted::failing("gemini", || TalentError::Network("reset".into())),
            Some(Scripted::ok("perplexity", PAYLOAD)),
            FallbackPolicy::AnyError,
        );
        let report = ReportPipeline::new(caller).analyze(&request()).await.unwrap().report;
        assert_eq!(report.provider, "perplexity (fallback)");
    }

    #[tokio::test]
    async fn test_rate_limit_surfaces_retry_after() {
        let pipeline = ReportPipeline::new(single(Scripted::failing("gemini", || TalentError::rate_limited("quota", 42))));
        let err = pipeline.analyze(&request()).await.unwrap_err();
        assert_eq!(err.retry_after_secs(), Some(42));
    }

    #[tokio::test]
    async fn test_secrets_redacted_from_failures() {
        let pipeline = ReportPipeline::new(single(Scripted::failing("gemini", || {
            TalentError::Provider("bad key sk-secret-123".into())
        })))
        .with_secrets(vec!["sk-secret-123".into()]);
        let err = pipeline.analyze(&request()).await.unwrap_err();
        assert!(!err.to_string().contains("sk-secret-123"));
        assert!(err.to_string().contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn test_sentiment_grounds_employee_experience() {
        let mut verified = VerifiedSentiment::default();
        verified.talent.aggregated_score = 4.0;
        verified.talent.total_reviews = 120;
        let pipeline = ReportPipeline::new(single(Scripted::ok("gemini", PAYLOAD)))
            .with_sentiment(Arc::new(FixedSentiment(Ok(verified))));

        let report = pipeline.analyze(&request()).await.unwrap().report;
        assert_eq!(report.dimension(DimensionName::EmployeeExperience).unwrap().score, 80);
        assert_eq!(report.talent_sentiment.total_reviews, 120);
    }

    #[tokio::test]
    async fn test_sentiment_failure_is_not_fatal() {
        let pipeline = ReportPipeline::new(single(Scripted::ok("gemini", PAYLOAD)))
            .with_sentiment(Arc::new(FixedSentiment(Err(|| TalentError::Network("timeout".into())))));
        let report = pipeline.analyze(&request()).await.unwrap().report;
        assert_eq!(report.talent_sentiment.total_reviews, 0);
    }

    #[tokio::test]
    async fn test_disabled_sentiment_setting_skips_source() {
        let mut verified = VerifiedSentiment::default();
        verified.talent.aggregated_score = 4.0;
        verified.talent.total_reviews = 120;
        let pipeline = ReportPipeline::new(single(Scripted::ok("gemini", PAYLOAD)))
            .with_sentiment(Arc::new(FixedSentiment(Ok(verified))));
        let settings = RuntimeSettings { sentiment_enabled: false, ..RuntimeSettings::default() };

        let report = pipeline.run(&request(), settings).await.unwrap().report;
        assert_eq!(report.talent_sentiment.total_reviews, 0);
    }

    #[tokio::test]
    async fn test_second_request_served_from_cache() {
        let provider = Scripted::ok("gemini", PAYLOAD);
        let pipeline = ReportPipeline::new(single(provider.clone()))
            .with_cache(ReportCache::new(Arc::new(MemoryStore::new()), 3600));

        let first = pipeline.analyze(&request()).await.unwrap();
        let second = pipeline.analyze(&request()).await.unwrap();
        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(first.report, second.report);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        let bypass = RuntimeSettings { cache_enabled: false, ..RuntimeSettings::default() };
        assert!(!pipeline.run(&request(), bypass).await.unwrap().cached);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }
}
