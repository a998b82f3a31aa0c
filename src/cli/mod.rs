//! Command-line parsing for the `atome` binary.
//!
//! Argument parsing stays here; `app` dispatches and the page and math live
//! in their own modules.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{PRINCIPAL_DEFAULT, TERM_DEFAULT};
use crate::logging::DEFAULT_LOG_FILE;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "atome", version, about = "Atome Banque loan simulator and application page")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive page: calculator, loan types and application form.
    Tui(TuiArgs),
    /// Print the repayment summary for one amount and duration.
    Quote(QuoteArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    /// Read backend credentials from this file instead of `./.env`.
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Where to write the log.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

#[derive(Debug, Parser, Clone)]
pub struct QuoteArgs {
    /// Amount to borrow, in euros (1000-100000, multiple of 1000).
    #[arg(short = 'a', long, default_value_t = PRINCIPAL_DEFAULT)]
    pub amount: u32,

    /// Duration in months (6-120, multiple of 6).
    #[arg(short = 'm', long, default_value_t = TERM_DEFAULT)]
    pub months: u32,
}
