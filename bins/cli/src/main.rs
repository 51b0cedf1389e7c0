//! gncledger command line
//!
//! Imports a GnuCash XML file and prints the account list, the monthly
//! total-assets report or an account register.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use gncledger_core::Book;
use gncledger_core::reports::{self, AccountSummary, BalanceReport, RegisterLine};
use gncledger_shared::AppConfig;
use gncledger_shared::config::LoggingConfig;

#[derive(Parser, Debug)]
#[command(name = "gncledger")]
#[command(about = "Read a GnuCash XML book and print balances or reports")]
struct Cli {
    /// Uncompressed GnuCash XML file (overrides `book.path`)
    #[arg(long, short = 'f')]
    file: Option<PathBuf>,

    /// Report to print
    #[arg(long, value_enum, default_value_t = Report::Balances)]
    report: Report,

    /// Account path for the register report, e.g. `/Assets/Checking`
    #[arg(long)]
    account: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Report {
    /// Every account with its balance
    Balances,
    /// Monthly cumulative balance of asset accounts
    Totalassets,
    /// Flows of one account with a running balance
    Register,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let path = cli
        .file
        .clone()
        .or_else(|| config.book.path.as_ref().map(PathBuf::from))
        .context("No input file: pass --file or set book.path")?;

    let started = Instant::now();
    let book = gncledger_core::import_from_path(&path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    info!(
        path = %path.display(),
        accounts = book.accounts().len(),
        transactions = book.transactions().len(),
        elapsed_ms = started.elapsed().as_millis(),
        "loaded book"
    );

    match cli.report {
        Report::Balances => print_balances(&reports::account_summaries(&book), cli.json),
        Report::Totalassets => {
            let types = reports::parse_account_types(config.report.asset_types.as_slice())?;
            print_monthly(&reports::total_assets(&book, &types), cli.json)
        }
        Report::Register => {
            let Some(name) = cli.account.as_deref() else {
                bail!("--report register needs --account");
            };
            print_register(&book, name, cli.json)
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_balances(summaries: &[AccountSummary], json: bool) -> Result<()> {
    if json {
        return print_json(summaries);
    }
    for s in summaries {
        println!(
            "{:<10} {:<48} {:>14} {}",
            s.account_type.as_str(),
            s.name,
            s.balance,
            s.unit
        );
    }
    Ok(())
}

fn print_monthly(report: &BalanceReport, json: bool) -> Result<()> {
    if json {
        return print_json(report);
    }
    print!("{report}");
    Ok(())
}

fn print_register(book: &Book, name: &str, json: bool) -> Result<()> {
    let lines: Vec<RegisterLine> = reports::register_by_name(book, name)?;
    if json {
        return print_json(&lines);
    }
    for line in &lines {
        println!(
            "{} {:<6} {:<40} {:>14} {:>14} {}",
            line.date.format("%Y-%m-%d"),
            line.number,
            line.description,
            line.amount,
            line.balance,
            if line.reconciled { 'R' } else { ' ' }
        );
    }
    Ok(())
}
