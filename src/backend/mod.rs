//! Lead submission against the hosted backend.
//!
//! A submission is two sequential calls:
//!
//! 1. insert the record into `loan_submissions` (fatal on failure)
//! 2. invoke `send-loan-email` (best effort; logged, never shown to the visitor)
//!
//! Each call is attempted exactly once. There is no retry and no timeout at
//! this layer.

use thiserror::Error;

use crate::domain::{LeadSubmission, LoanEmail};

pub mod supabase;
pub mod worker;

pub use supabase::SupabaseClient;
pub use worker::spawn_submission;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} answered with status {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
}

/// Insert-only access to the record store.
pub trait RecordStore {
    fn insert_lead(&self, record: &LeadSubmission) -> Result<(), BackendError>;
}

/// The remote function that e-mails the sales team.
pub trait NotificationDispatcher {
    fn send_loan_email(&self, payload: &LoanEmail) -> Result<(), BackendError>;
}

/// Everything the page needs from a backend, shareable with the worker thread.
pub trait LeadBackend: RecordStore + NotificationDispatcher + Send + Sync {}

impl<T: RecordStore + NotificationDispatcher + Send + Sync> LeadBackend for T {}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Erreur lors de la sauvegarde en base de données")]
    Persistence(#[source] BackendError),
}

/// What happened after the record was stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub email_sent: bool,
}

/// Persist the lead, then ask for the notification e-mail.
pub fn submit_lead<B>(backend: &B, submission: &LeadSubmission) -> Result<SubmitReceipt, SubmitError>
where
    B: RecordStore + NotificationDispatcher + ?Sized,
{
    if let Err(err) = backend.insert_lead(submission) {
        tracing::error!(error = %err, "failed to store lead");
        return Err(SubmitError::Persistence(err));
    }
    tracing::info!(loan_type = %submission.loan_type, amount = submission.amount, "lead stored");

    let email_sent = match backend.send_loan_email(&submission.email_payload()) {
        Ok(()) => {
            tracing::info!("notification e-mail dispatched");
            true
        }
        Err(err) => {
            // The lead is stored, so the visitor still gets a success toast.
            tracing::warn!(
                error = %err,
                lead_email = %submission.email,
                "notification e-mail failed; lead needs manual follow-up"
            );
            false
        }
    };

    Ok(SubmitReceipt { email_sent })
}

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::Mutex;

    use super::*;

    /// In-memory backend that records every call.
    #[derive(Debug, Default)]
    pub struct FakeBackend {
        pub fail_insert: bool,
        pub fail_email: bool,
        pub inserted: Mutex<Vec<LeadSubmission>>,
        pub emails: Mutex<Vec<LoanEmail>>,
    }

    impl FakeBackend {
        pub fn insert_count(&self) -> usize {
            self.inserted.lock().map(|v| v.len()).unwrap_or(0)
        }

        pub fn email_count(&self) -> usize {
            self.emails.lock().map(|v| v.len()).unwrap_or(0)
        }
    }

    fn rejected(endpoint: &str) -> BackendError {
        BackendError::Status {
            endpoint: endpoint.to_string(),
            status: 500,
            body: "boom".to_string(),
        }
    }

    impl RecordStore for FakeBackend {
        fn insert_lead(&self, record: &LeadSubmission) -> Result<(), BackendError> {
            if self.fail_insert {
                return Err(rejected("loan_submissions"));
            }
            self.inserted.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    impl NotificationDispatcher for FakeBackend {
        fn send_loan_email(&self, payload: &LoanEmail) -> Result<(), BackendError> {
            // Recorded even on failure so tests can tell "not attempted" from "failed".
            self.emails.lock().unwrap().push(payload.clone());
            if self.fail_email {
                return Err(rejected("send-loan-email"));
            }
            Ok(())
        }
    }
}
