use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "talentscope", version = crate::VERSION, about = "Employer brand and talent intelligence reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP REST API server
    Serve(ServeArgs),
    /// Analyze one company and print the report
    Analyze(AnalyzeArgs),
    /// Inspect or delete stored reports
    Reports(ReportsArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port [default: config or 8080]
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address [default: config or 0.0.0.0]
    #[arg(long)]
    pub host: Option<String>,

    /// SQLite database path [default: config or ./data/talentscope.db]
    #[arg(long)]
    pub db: Option<String>,
}

#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// Company name
    pub company: String,

    /// Company website
    #[arg(short, long)]
    pub url: String,

    /// Role to focus the analysis on
    #[arg(long)]
    pub job_title: Option<String>,

    /// Seniority level for the role focus
    #[arg(long)]
    pub seniority: Option<String>,

    /// Override the primary provider: gemini, perplexity
    #[arg(long)]
    pub provider: Option<String>,

    /// Override the primary provider's model
    #[arg(long)]
    pub model: Option<String>,

    /// Skip website research
    #[arg(long)]
    pub no_research: bool,

    /// Skip verified review research
    #[arg(long)]
    pub no_sentiment: bool,

    /// Ignore cached reports
    #[arg(long)]
    pub no_cache: bool,

    /// Store the report in the database
    #[arg(long)]
    pub save: bool,

    /// Owner recorded with --save
    #[arg(long, default_value = "anonymous")]
    pub owner: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ReportsArgs {
    #[command(subcommand)]
    pub action: ReportsAction,

    /// SQLite database path [default: config or ./data/talentscope.db]
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Report owner
    #[arg(long, default_value = "anonymous", global = true)]
    pub owner: String,
}

#[derive(Subcommand, Clone)]
pub enum ReportsAction {
    /// List stored reports, newest first
    List {
        #[arg(long, default_value = "20")]
        limit: usize,
        #[arg(long, default_value = "0")]
        offset: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one stored report as JSON
    Show { id: String },
    /// Delete a stored report
    Delete { id: String },
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
