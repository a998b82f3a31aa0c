//! Runs a submission off the UI thread.
//!
//! The HTTP calls block, so they go to a dedicated thread and the outcome
//! comes back over a channel the event loop polls. If the thread dies before
//! sending, the receiver sees a disconnect and the page reports a generic
//! error.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, channel};
use std::thread;

use crate::backend::{LeadBackend, SubmitError, SubmitReceipt, submit_lead};
use crate::domain::LeadSubmission;

pub type SubmitOutcome = Result<SubmitReceipt, SubmitError>;

pub fn spawn_submission(
    backend: Arc<dyn LeadBackend>,
    submission: LeadSubmission,
) -> Receiver<SubmitOutcome> {
    let (tx, rx) = channel();
    let spawned = thread::Builder::new()
        .name("lead-submit".to_string())
        .spawn(move || {
            let outcome = submit_lead(backend.as_ref(), &submission);
            let _ = tx.send(outcome);
        });
    if let Err(err) = spawned {
        // `tx` went down with the closure, so the caller sees a disconnect.
        tracing::error!(error = %err, "failed to spawn submission worker");
    }
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::FakeBackend;

    #[test]
    fn worker_reports_outcome() {
        let backend = Arc::new(FakeBackend::default());
        let lead = LeadSubmission::new("A", "a@b.c", 2_000.0, "Prêt Personnel", 12);
        let rx = spawn_submission(backend.clone(), lead);
        let outcome = rx.recv().unwrap();
        assert_eq!(outcome.unwrap(), SubmitReceipt { email_sent: true });
        assert_eq!(backend.insert_count(), 1);
    }

    #[test]
    fn worker_forwards_persistence_error() {
        let backend = Arc::new(FakeBackend {
            fail_insert: true,
            ..FakeBackend::default()
        });
        let lead = LeadSubmission::new("A", "a@b.c", 2_000.0, "Prêt Personnel", 12);
        let rx = spawn_submission(backend.clone(), lead);
        assert!(rx.recv().unwrap().is_err());
        assert_eq!(backend.email_count(), 0);
    }
}
