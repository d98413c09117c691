mod amount;
mod chart;
mod cli;
mod config;
mod error;
mod prompt;
mod record;
mod report;
mod store;
mod validate;

use anyhow::Context;
use clap::Parser;
use std::{io, path::PathBuf};

use crate::cli::App;
use crate::config::{StoreConfig, DEFAULT_FILE};
use crate::prompt::Prompter;
use crate::store::RecordStore;

/// Personal income and expense ledger kept in a CSV file.
#[derive(Parser, Debug)]
#[clap(version, about)]
struct Args {
    /// Ledger file
    #[clap(short, long, default_value = DEFAULT_FILE)]
    file: PathBuf,
    /// Where "view" writes its chart
    #[clap(short, long, default_value = "transactions.svg")]
    chart: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let store = RecordStore::new(StoreConfig::new(&args.file));
    let stdin = io::stdin();
    let prompter = Prompter::new(stdin.lock(), io::stdout());

    App::new(store, prompter, args.chart)
        .run()
        .with_context(|| format!("ledger {}", args.file.display()))
}
