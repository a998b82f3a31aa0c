//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that
//! parses arguments, sets up logging and hands over to the page or to the
//! quote printer.

use clap::Parser;

use crate::cli::{Command, QuoteArgs, TuiArgs};
use crate::domain::{
    LoanQuote, PRINCIPAL_MAX, PRINCIPAL_MIN, PRINCIPAL_STEP, TERM_MAX, TERM_MIN, TERM_STEP,
};
use crate::error::AppError;

/// Entry point for the `atome` binary.
pub fn run() -> Result<(), AppError> {
    // `atome` and `atome --env-file x` mean `atome tui ...`; clap needs the
    // subcommand spelled out, so argv is rewritten first.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Quote(args) => handle_quote(args),
    }
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    crate::logging::init_file(&args.log_file)?;
    crate::tui::run(args)
}

fn handle_quote(args: QuoteArgs) -> Result<(), AppError> {
    crate::logging::init_stderr();
    let quote = quote_from_args(&args)?;
    tracing::debug!(principal = quote.principal, term = quote.term_months, "quote");
    println!("{}", crate::report::format_quote_summary(&quote));
    Ok(())
}

/// Check the arguments against the calculator's slider positions.
pub fn quote_from_args(args: &QuoteArgs) -> Result<LoanQuote, AppError> {
    let amount_ok = (PRINCIPAL_MIN..=PRINCIPAL_MAX).contains(&args.amount)
        && args.amount % PRINCIPAL_STEP == 0;
    if !amount_ok {
        return Err(AppError::config(format!(
            "--amount must be between {PRINCIPAL_MIN} and {PRINCIPAL_MAX} in steps of {PRINCIPAL_STEP}, got {}.",
            args.amount
        )));
    }
    let months_ok = (TERM_MIN..=TERM_MAX).contains(&args.months) && args.months % TERM_STEP == 0;
    if !months_ok {
        return Err(AppError::config(format!(
            "--months must be between {TERM_MIN} and {TERM_MAX} in steps of {TERM_STEP}, got {}.",
            args.months
        )));
    }
    Ok(LoanQuote::new(f64::from(args.amount), args.months))
}

/// Rewrite argv so `atome` defaults to `atome tui`.
///
/// Rules:
/// - `atome`                       -> `atome tui`
/// - `atome --log-file x ...`      -> `atome tui --log-file x ...`
/// - `atome --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "quote");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
