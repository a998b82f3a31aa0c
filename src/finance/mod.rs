//! Loan arithmetic: fixed-rate amortization.

pub mod amortization;

pub use amortization::*;
