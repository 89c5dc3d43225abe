//! Split Balance CLI
//!
//! Command-line interface over the balance engine.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- balances group.json > balances.csv
//! cargo run -- balances --format json group.json
//! cargo run -- summary balances.csv
//! cargo run -- summary --strategy sync balances.csv
//! cargo run -- summary --strategy async --batch-size 2000 --max-concurrent 8 --format json balances.csv
//! cargo run -- format -- -1234.5
//! ```
//!
//! Results go to stdout; logs go to stderr (`--log-level`, or `RUST_LOG`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, file not readable, malformed snapshot, output failure)

use split_balance_engine::cli::{self, BalancesArgs, Command, LogLevel, OutputFormat, SummaryArgs};
use split_balance_engine::core::{compute_participant_balances, format_currency};
use split_balance_engine::io::{read_group_snapshot, write_balances_csv, write_balances_json};
use split_balance_engine::strategy;
use split_balance_engine::types::BalanceError;
use std::io::Write;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(log_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level.as_filter()))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_balances(args: &BalancesArgs, output: &mut dyn Write) -> Result<(), BalanceError> {
    let snapshot = read_group_snapshot(&args.input_file)?;

    let balances =
        compute_participant_balances(&snapshot.participants, snapshot.expenses.as_deref());

    info!(
        participants = balances.balances.len(),
        total_get_back = %format_currency(balances.total_get_back),
        total_settle = %format_currency(balances.total_settle),
        "Computed participant balances"
    );

    match args.format {
        OutputFormat::Csv => write_balances_csv(&balances, output),
        OutputFormat::Json => write_balances_json(&balances, output),
    }
}

fn run_summary(args: &SummaryArgs, output: &mut dyn Write) -> Result<(), BalanceError> {
    let config = if matches!(args.strategy, cli::StrategyType::Async) {
        Some(args.to_batch_config())
    } else {
        None
    };
    let strategy = strategy::create_strategy(args.strategy, config);

    strategy.process(&args.input_file, output, args.format)
}

fn main() {
    let args = cli::parse_args();
    init_tracing(args.log_level);

    let mut output = std::io::stdout();
    let result = match &args.command {
        Command::Balances(balances) => run_balances(balances, &mut output),
        Command::Summary(summary) => run_summary(summary, &mut output),
        Command::Format(format) => {
            writeln!(output, "{}", format_currency(format.amount)).map_err(BalanceError::from)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
