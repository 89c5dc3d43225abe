use crate::strategy::BatchConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Command-line arguments for the split-balance tool
#[derive(Parser, Debug)]
#[command(name = "split-balance")]
#[command(about = "Compute who owes whom in a shared-expense group", long_about = None)]
pub struct CliArgs {
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        global = true,
        help = "Log verbosity on stderr (RUST_LOG takes precedence)"
    )]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Per-participant balances of a group snapshot
    Balances(BalancesArgs),

    /// Settle/get-back summary of a pairwise balance export
    Summary(SummaryArgs),

    /// Format an amount as Indian Rupees
    Format(FormatArgs),
}

#[derive(Args, Debug)]
pub struct BalancesArgs {
    #[arg(
        value_name = "SNAPSHOT",
        help = "JSON file with \"participants\" and \"expenses\" arrays"
    )]
    pub input_file: PathBuf,

    #[arg(long = "format", value_name = "FORMAT", default_value = "csv")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[arg(
        value_name = "RECORDS",
        help = "CSV file with subject,other,other_name,amount columns"
    )]
    pub input_file: PathBuf,

    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Aggregation strategy: 'sync' for single-threaded or 'async' for batched"
    )]
    pub strategy: StrategyType,

    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of records per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Worker threads for batch aggregation (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    #[arg(long = "format", value_name = "FORMAT", default_value = "csv")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct FormatArgs {
    #[arg(value_name = "AMOUNT", allow_negative_numbers = true)]
    pub amount: Decimal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl SummaryArgs {
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }
}
