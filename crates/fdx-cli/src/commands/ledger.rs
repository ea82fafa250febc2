//! Ledger command - inspect saved document history.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use fdx_core::ledger::{total_amount, ApprovalStatus, JsonFileStore, RecordStore};

use super::{ledger_path, load_config};

/// Arguments for the ledger command.
#[derive(Args)]
pub struct LedgerArgs {
    /// Ledger file (default: from configuration)
    #[arg(long, global = true)]
    ledger: Option<PathBuf>,

    #[command(subcommand)]
    command: LedgerCommand,
}

#[derive(Subcommand)]
enum LedgerCommand {
    /// Show every document saved under a reference
    Show {
        /// External reference id
        reference: String,
    },

    /// Total of approved amounts under a reference
    Total {
        /// External reference id
        reference: String,
    },

    /// List references with saved documents
    List,
}

pub async fn run(args: LedgerArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = JsonFileStore::open(ledger_path(args.ledger.as_deref(), &config))?;

    match args.command {
        LedgerCommand::Show { reference } => {
            let history = store.history(&reference);
            if history.is_empty() {
                eprintln!(
                    "{} No documents saved under {}",
                    style("ℹ").blue(),
                    reference
                );
            }
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        LedgerCommand::Total { reference } => {
            println!("{}", total_amount(&store.history(&reference)));
        }
        LedgerCommand::List => {
            let references = store.references();
            if references.is_empty() {
                println!("Ledger {} is empty.", store.path().display());
            }
            for reference in references {
                let history = store.history(&reference);
                let drafts = history
                    .iter()
                    .filter(|e| e.status == ApprovalStatus::Draft)
                    .count();
                println!(
                    "{}  {} documents ({} drafts)  total ${}",
                    style(&reference).bold(),
                    history.len(),
                    drafts,
                    total_amount(&history)
                );
            }
        }
    }

    Ok(())
}
