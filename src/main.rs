//! Monthly Balances CLI
//!
//! Reads a ledger CSV (`customerID,MM/DD/YYYY,amount`, no header) and writes
//! one `customerID,month/year,min,max,ending` row per customer-month.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.csv balances.csv
//! cargo run -- transactions.csv --balance-mode carry-forward > balances.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug`, `info` or `warn` to control logging verbosity
//! - `BALANCE_MODE`: `reset` (default) or `carry-forward`

use clap::Parser;
use log::info;
use monthly_balances::{
    build_rows, parse_transactions, read_records, write_report, AggregatorConfig, BalanceMode,
    EngineError, LedgerStore, Result,
};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "monthly-balances", version)]
#[command(about = "Compute per-month min, max and ending balances for each customer")]
struct Cli {
    /// Input ledger CSV
    input: PathBuf,

    /// Output CSV; stdout when omitted
    output: Option<PathBuf>,

    /// How balances cross month boundaries
    #[arg(long, env = "BALANCE_MODE", default_value_t = BalanceMode::Reset)]
    balance_mode: BalanceMode,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    let file = File::open(&cli.input).map_err(|source| EngineError::OpenInput {
        path: cli.input.clone(),
        source,
    })?;
    let records = read_records(BufReader::new(file))?;
    let row_count = records.len();

    let transactions = parse_transactions(records);
    info!(
        "Parsed {} of {} rows from {}",
        transactions.len(),
        row_count,
        cli.input.display()
    );

    let config = AggregatorConfig::new(cli.balance_mode);
    let store = LedgerStore::aggregate(transactions, &config);
    let rows = build_rows(&store);

    match &cli.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| EngineError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            write_report(&rows, BufWriter::new(file))?;
        }
        None => write_report(&rows, io::stdout().lock())?,
    }

    info!("Wrote {} rows for {} customers", rows.len(), store.len());

    Ok(())
}
