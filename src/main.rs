use clap::Parser;
use talentscope::cli::{self, Cli, Commands};
use talentscope::errors::TalentError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let exit_code = match &e {
            TalentError::Config(_) => 2,
            TalentError::Validation(_) => 3,
            TalentError::RateLimit { .. } => 4,
            TalentError::Provider(_) | TalentError::Network(_) | TalentError::Authentication(_) => 5,
            TalentError::MalformedOutput(_) => 6,
            TalentError::NotFound(_) => 7,
            _ => 1,
        };
        std::process::exit(exit_code);
    }
}

fn init_logging(cli: &Cli) {
    let log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.log_json {
        builder.json().init();
    } else {
        builder.with_ansi(!cli.no_color).init();
    }
}

async fn run(cli: Cli) -> Result<(), TalentError> {
    if let Commands::Validate(args) = &cli.command {
        return handle_validate(&args.config).await;
    }

    let config = cli::load(cli.config.as_deref()).await?;
    match cli.command {
        Commands::Serve(args) => cli::serve::handle_serve(args, config).await,
        Commands::Analyze(args) => cli::analyze::handle_analyze(args, config).await,
        Commands::Reports(args) => cli::reports::handle_reports(args, config).await,
        Commands::Validate(_) => Ok(()),
    }
}

async fn handle_validate(path: &str) -> Result<(), TalentError> {
    let config = talentscope::config::parse_config(std::path::Path::new(path)).await?;
    let providers = config.providers();
    println!("Configuration is valid: {}", path);
    println!(
        "  primary: {}  secondary: {}  fallback: {:?}",
        providers.primary.provider,
        providers.secondary.as_ref().map(|s| s.provider.as_str()).unwrap_or("none"),
        providers.fallback_policy
    );
    println!("  cache: {} ({})", if config.cache().enabled { "on" } else { "off" }, config.cache().backend);
    Ok(())
}
