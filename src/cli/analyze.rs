use crate::cli::commands::AnalyzeArgs;
use crate::config::{ProviderConfig, TalentConfig};
use crate::db::settings::RuntimeSettings;
use crate::db::Database;
use crate::errors::TalentError;
use crate::models::{AnalysisRequest, Report};
use crate::pipeline::ReportPipeline;
use crate::utils::formatting::{format_duration, score_bar};
use crate::config::types::CacheBackendKind;
use tracing::info;

pub async fn handle_analyze(args: AnalyzeArgs, mut config: TalentConfig) -> Result<(), TalentError> {
    apply_overrides(&args, &mut config);

    let server = config.server();
    let needs_file_db = args.save || (config.cache().enabled && config.cache().backend == CacheBackendKind::Database);
    let db = if needs_file_db { Database::new(&server.db)? } else { Database::in_memory()? };

    let pipeline = ReportPipeline::from_config(&config, &db)?;
    let request = AnalysisRequest {
        company_name: args.company.clone(),
        company_url: args.url.clone(),
        job_title: args.job_title.clone(),
        seniority_level: args.seniority.clone(),
    };
    let settings = RuntimeSettings {
        research_enabled: !args.no_research,
        sentiment_enabled: !args.no_sentiment,
        cache_enabled: !args.no_cache,
    };

    let started = std::time::Instant::now();
    let outcome = pipeline.run(&request, settings).await?;
    let elapsed = format_duration(started.elapsed().as_millis() as u64);

    let report_id = if args.save {
        let id = db.insert_report(&args.owner, &outcome.report)?;
        info!(report_id = %id, owner = %args.owner, "Report saved");
        Some(id)
    } else {
        None
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
    } else {
        print!("{}", render_report(&outcome.report));
        println!();
        println!("Completed in {}{}", elapsed, if outcome.cached { " (cached)" } else { "" });
        if let Some(id) = report_id {
            println!("Saved as {}", id);
        }
    }
    Ok(())
}

fn apply_overrides(args: &AnalyzeArgs, config: &mut TalentConfig) {
    if args.provider.is_none() && args.model.is_none() {
        return;
    }
    let mut providers = config.providers();
    if let Some(provider) = &args.provider {
        if *provider != providers.primary.provider {
            providers.primary = ProviderConfig::named(provider);
        }
    }
    if let Some(model) = &args.model {
        providers.primary.model = Some(model.clone());
    }
    // An override may collide with the configured secondary.
    if providers.secondary.as_ref().is_some_and(|s| s.provider == providers.primary.provider) {
        providers.secondary = None;
    }
    config.providers = Some(providers);
}

/// Plain-text scorecard for terminal output.
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} ({})\n", report.company_name, report.company_url));
    out.push_str(&format!("Industry: {}\n", report.industry));
    out.push_str(&format!("Overall:  {:>3}/100  {}\n\n", report.overall_score, score_bar(report.overall_score, 20)));

    let width = report.dimensions.iter().map(|d| d.name.as_str().len()).max().unwrap_or(0);
    for dim in &report.dimensions {
        out.push_str(&format!(
            "{:<width$}  {:>3}  {}  (benchmark {})\n",
            dim.name.as_str(),
            dim.score,
            score_bar(dim.score, 20),
            dim.benchmark,
            width = width,
        ));
    }

    let sentiment = &report.talent_sentiment;
    if sentiment.total_reviews > 0 {
        out.push_str(&format!(
            "\nEmployee sentiment: {:.1}/5 from {} reviews ({})\n",
            sentiment.aggregated_score,
            sentiment.total_reviews,
            sentiment.sentiment_label.as_str()
        ));
    }

    if !report.competitors.is_empty() {
        out.push_str("\nTalent competitors:\n");
        for c in &report.competitors {
            out.push_str(&format!("  - {}: {}\n", c.name, c.reason));
        }
    }

    out.push_str(&format!("\n{}\n", report.summary));
    out.push_str(&format!("\nProvider: {}  Generated: {}\n", report.provider, report.generated_at));
    out
}
