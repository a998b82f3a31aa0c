//! Domain types used throughout the page.
//!
//! This module defines:
//!
//! - the calculator bounds and the fixed rate
//! - quotes and their derived amortization (`LoanQuote`, `Amortization`)
//! - the prefill payload (`Prefill`)
//! - the outbound records (`LeadSubmission`, `LoanEmail`)

pub mod types;

pub use types::*;
