//! Reporting utilities: money formatting and quote summaries.

pub mod format;

pub use format::*;
