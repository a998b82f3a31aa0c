//! Page state, independent of how it is drawn.
//!
//! - `calculator`: the two sliders and their live quote
//! - `form`: lead form fields, reducer, validation, submit status
//! - `toast`: transient notifications
//! - `shell`: owns the above and wires the selection/prefill signals

pub mod calculator;
pub mod form;
pub mod shell;
pub mod toast;

pub use calculator::{CalcField, CalculatorPanel};
pub use form::{FormField, FormFields, FormUpdate, LeadForm, SubmitStatus, ValidationError};
pub use shell::PageShell;
pub use toast::{Toast, ToastVariant, Toaster};
