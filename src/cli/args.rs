use crate::cluster::ClusterStrategy;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fieldnorm", version, about = "Normalise and cluster free-text survey answers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    #[command(flatten)]
    pub engine: EngineArgs,
    /// Log at debug level (overridden by `RUST_LOG`)
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// Rules file (defaults to ./fieldnorm.toml when present)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
    /// Clustering similarity threshold in [0, 1]
    #[arg(long, global = true)]
    pub threshold: Option<f64>,
    /// Clustering strategy
    #[arg(long, value_enum, global = true)]
    pub strategy: Option<StrategyArg>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate per-field statistics for a document collection
    Summary {
        /// JSON array, JSON-lines file, or directory of *.json documents
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,
        /// Append college and subject merge details (markdown only)
        #[arg(long)]
        details: bool,
    },
    /// Normalise one field and print the mapping
    Normalise {
        input: PathBuf,
        /// Dotted field path, e.g. responses.about_user.study_field
        #[arg(long)]
        field: String,
        /// Category tag selecting cleaning and synonym rules
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Print per-document update payloads as JSON
    Payloads { input: PathBuf },
    /// List the configured categories
    Rules,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Markdown,
    Terminal,
    Json,
}

impl OutputFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Terminal => "terminal",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Connected,
    Greedy,
}

impl From<StrategyArg> for ClusterStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Connected => Self::Connected,
            StrategyArg::Greedy => Self::Greedy,
        }
    }
}
