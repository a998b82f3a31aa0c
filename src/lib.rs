//! `atome-loans` library crate.
//!
//! The binary (`atome`) is a thin wrapper around this library so that:
//!
//! - the amortization math and the page state are testable without a terminal
//! - the backend calls can be exercised against in-memory fakes
//! - the terminal page only maps keys and draws widgets

pub mod app;
pub mod backend;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod finance;
pub mod logging;
pub mod page;
pub mod report;
pub mod tui;
