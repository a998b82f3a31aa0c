//! Page-level state: the wiring between calculator, catalogue and form.
//!
//! The catalogue and the calculator each hold the sending half of their own
//! channel. `pump` drains both receivers and feeds every message through the
//! form's single reducer, so the two sources can never clobber each other's
//! fields. The channels live exactly as long as the shell.

use std::sync::mpsc::{Receiver, channel};

use crate::backend::{SubmitError, SubmitReceipt};
use crate::catalog::LoanTypeCatalog;
use crate::domain::{LeadSubmission, Prefill};
use crate::page::calculator::CalculatorPanel;
use crate::page::form::{FormUpdate, LeadForm};
use crate::page::toast::{Toast, Toaster};

pub const FALLBACK_ERROR: &str =
    "Une erreur est survenue lors de l'enregistrement de votre demande.";

#[derive(Debug)]
pub struct PageShell {
    pub calculator: CalculatorPanel,
    pub catalog: LoanTypeCatalog,
    pub form: LeadForm,
    pub toaster: Toaster,
    selected_loan_type: Option<String>,
    prefill: Option<Prefill>,
    selection_rx: Receiver<String>,
    prefill_rx: Receiver<Prefill>,
    scroll_to_form: bool,
}

impl Default for PageShell {
    fn default() -> Self {
        Self::new()
    }
}

impl PageShell {
    pub fn new() -> Self {
        let (selection_tx, selection_rx) = channel();
        let (prefill_tx, prefill_rx) = channel();
        Self {
            calculator: CalculatorPanel::new(prefill_tx),
            catalog: LoanTypeCatalog::new(selection_tx),
            form: LeadForm::new(),
            toaster: Toaster::new(),
            selected_loan_type: None,
            prefill: None,
            selection_rx,
            prefill_rx,
            scroll_to_form: false,
        }
    }

    pub fn selected_loan_type(&self) -> Option<&str> {
        self.selected_loan_type.as_deref()
    }

    pub fn last_prefill(&self) -> Option<Prefill> {
        self.prefill
    }

    /// Merge pending selection and prefill signals into the form.
    ///
    /// A selection is merged only when the title differs from the previous
    /// one, so re-selecting a card keeps whatever the visitor picked since.
    ///
    /// Returns how many signals were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;

        while let Ok(title) = self.selection_rx.try_recv() {
            if title.is_empty() || self.selected_loan_type.as_deref() == Some(title.as_str()) {
                continue;
            }
            tracing::debug!(loan_type = %title, "merging selection into form");
            self.selected_loan_type = Some(title.clone());
            self.form.reduce(FormUpdate::LoanTypeSelected(title));
            applied += 1;
        }

        while let Ok(prefill) = self.prefill_rx.try_recv() {
            tracing::debug!(
                principal = prefill.principal,
                term = prefill.term_months,
                "merging prefill into form"
            );
            self.prefill = Some(prefill);
            self.form.reduce(FormUpdate::Prefilled(prefill));
            self.toaster.push(Toast::info(
                "Données appliquées",
                "Le formulaire a été pré-rempli avec les données du simulateur.",
            ));
            self.scroll_to_form = true;
            applied += 1;
        }

        applied
    }

    /// Returns true once after each prefill.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_form)
    }

    /// Validate the form and, if it passes, mark it as submitting.
    ///
    /// On a validation failure the matching toast is shown and `None` is
    /// returned: no external call must be made.
    pub fn request_submit(&mut self) -> Option<LeadSubmission> {
        match self.form.begin_submit() {
            Ok(submission) => {
                tracing::info!(loan_type = %submission.loan_type, "submission started");
                Some(submission)
            }
            Err(err) => {
                tracing::info!("submission rejected locally: {err}");
                let (title, description) = err.toast_text();
                self.toaster.push(Toast::destructive(title, description));
                None
            }
        }
    }

    /// Report the outcome of a submission started with `request_submit`.
    ///
    /// `None` means the attempt ended without a result (the worker died).
    pub fn complete_submit(&mut self, outcome: Option<Result<SubmitReceipt, SubmitError>>) {
        match outcome {
            Some(Ok(receipt)) => {
                self.form.finish_submit(true);
                if !receipt.email_sent {
                    tracing::info!("lead stored without notification e-mail");
                }
                self.toaster.push(Toast::info(
                    "Demande envoyée avec succès !",
                    "Votre dossier a été transmis à l'équipe Atome Banque.",
                ));
            }
            Some(Err(err)) => {
                self.form.finish_submit(false);
                let message = err.to_string();
                let description = if message.trim().is_empty() {
                    FALLBACK_ERROR.to_string()
                } else {
                    message
                };
                self.toaster.push(Toast::destructive("Erreur", description));
            }
            None => {
                self.form.finish_submit(false);
                tracing::error!("submission ended without a result");
                self.toaster.push(Toast::destructive("Erreur", FALLBACK_ERROR));
            }
        }
    }

    /// Toast for header entries that lead nowhere yet.
    pub fn navigation_stub(&mut self, item: &str) {
        tracing::debug!(item, "navigation stub");
        self.toaster.push(Toast::info(
            "Navigation",
            "🚧 Cette fonctionnalité n'est pas encore implémentée.",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;
    use crate::catalog::LOAN_TYPES;
    use crate::page::form::{FormField, SubmitStatus};
    use crate::page::toast::ToastVariant;

    fn fill_contact(shell: &mut PageShell) {
        shell
            .form
            .reduce(FormUpdate::Edit(FormField::Name, "Jean Dupont".into()));
        shell
            .form
            .reduce(FormUpdate::Edit(FormField::Email, "jean@example.com".into()));
    }

    #[test]
    fn applying_default_quote_prefills_form() {
        let mut shell = PageShell::new();
        shell.calculator.apply_to_form();
        assert_eq!(shell.pump(), 1);
        assert_eq!(shell.form.fields().amount, "10000");
        assert_eq!(shell.form.fields().duration, "24");
        assert_eq!(
            shell.last_prefill(),
            Some(Prefill {
                principal: 10_000,
                term_months: 24
            })
        );
        assert_eq!(
            shell.toaster.latest().map(|t| t.title.as_str()),
            Some("Données appliquées")
        );
        assert!(shell.take_scroll_request());
        assert!(!shell.take_scroll_request());
    }

    #[test]
    fn selection_sets_exact_title() {
        let mut shell = PageShell::new();
        shell.catalog.select(&LOAN_TYPES[3]);
        shell.pump();
        assert_eq!(shell.form.fields().loan_type, "Crédit immobilier");
        assert_eq!(shell.selected_loan_type(), Some("Crédit immobilier"));
        assert!(!shell.take_scroll_request());
    }

    #[test]
    fn reselecting_same_title_keeps_manual_choice() {
        let mut shell = PageShell::new();
        shell.catalog.select(&LOAN_TYPES[2]);
        assert_eq!(shell.pump(), 1);
        shell
            .form
            .reduce(FormUpdate::Edit(FormField::LoanType, "Prêt Personnel".into()));

        shell.catalog.select(&LOAN_TYPES[2]);
        assert_eq!(shell.pump(), 0);
        assert_eq!(shell.form.fields().loan_type, "Prêt Personnel");

        shell.catalog.select(&LOAN_TYPES[3]);
        assert_eq!(shell.pump(), 1);
        assert_eq!(shell.form.fields().loan_type, "Crédit immobilier");
    }

    #[test]
    fn signals_do_not_clobber_each_other() {
        let mut shell = PageShell::new();
        fill_contact(&mut shell);
        shell.catalog.select(&LOAN_TYPES[2]);
        shell.calculator.apply_to_form();
        shell.pump();

        let fields = shell.form.fields();
        assert_eq!(fields.name, "Jean Dupont");
        assert_eq!(fields.loan_type, "Crédit auto");
        assert_eq!(fields.amount, "10000");
    }

    #[test]
    fn missing_field_blocks_submission() {
        let mut shell = PageShell::new();
        fill_contact(&mut shell);
        shell.calculator.apply_to_form();
        shell.pump();

        assert!(shell.request_submit().is_none());
        assert_eq!(shell.form.status(), SubmitStatus::Idle);
        let toast = shell.toaster.latest().unwrap();
        assert_eq!(toast.title, "Champs manquants");
        assert_eq!(toast.variant, ToastVariant::Destructive);
    }

    #[test]
    fn persistence_failure_keeps_fields() {
        let mut shell = PageShell::new();
        fill_contact(&mut shell);
        shell.catalog.select(&LOAN_TYPES[0]);
        shell.calculator.apply_to_form();
        shell.pump();

        assert!(shell.request_submit().is_some());
        let err = SubmitError::Persistence(BackendError::Status {
            endpoint: "loan_submissions".into(),
            status: 500,
            body: String::new(),
        });
        shell.complete_submit(Some(Err(err)));

        assert_eq!(shell.form.status(), SubmitStatus::Idle);
        assert_eq!(shell.form.fields().name, "Jean Dupont");
        let toast = shell.toaster.latest().unwrap();
        assert_eq!(toast.title, "Erreur");
        assert_eq!(toast.description, "Erreur lors de la sauvegarde en base de données");
    }

    #[test]
    fn success_resets_fields_even_without_email() {
        let mut shell = PageShell::new();
        fill_contact(&mut shell);
        shell.catalog.select(&LOAN_TYPES[0]);
        shell.calculator.apply_to_form();
        shell.pump();

        shell.request_submit().unwrap();
        shell.complete_submit(Some(Ok(SubmitReceipt { email_sent: false })));

        assert_eq!(shell.form.status(), SubmitStatus::Idle);
        assert!(shell.form.fields().name.is_empty());
        assert!(shell.form.fields().loan_type.is_empty());
        assert_eq!(
            shell.toaster.latest().map(|t| t.title.as_str()),
            Some("Demande envoyée avec succès !")
        );
    }

    #[test]
    fn lost_worker_uses_fallback_message() {
        let mut shell = PageShell::new();
        fill_contact(&mut shell);
        shell.catalog.select(&LOAN_TYPES[0]);
        shell.calculator.apply_to_form();
        shell.pump();

        shell.request_submit().unwrap();
        shell.complete_submit(None);
        assert_eq!(shell.form.status(), SubmitStatus::Idle);
        assert_eq!(
            shell.toaster.latest().map(|t| t.description.as_str()),
            Some(FALLBACK_ERROR)
        );
    }
}
