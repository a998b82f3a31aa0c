//! Lead form state, reducer and validation.
//!
//! All five fields are kept as the raw strings the visitor typed (or that a
//! prefill/selection wrote). Parsing happens only in `validate`, so a
//! prefilled amount or duration is a suggestion the visitor can overwrite,
//! and whatever is there at submit time is checked again.

use thiserror::Error;

use crate::catalog::{LOAN_TYPES, position_of_title};
use crate::domain::{
    DURATION_CHOICES, LeadSubmission, PRINCIPAL_MAX, PRINCIPAL_MIN, Prefill, TERM_MAX, TERM_MIN,
};
use crate::report::format_grouped;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Amount,
    Duration,
    LoanType,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Email,
        FormField::Amount,
        FormField::Duration,
        FormField::LoanType,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Nom complet",
            FormField::Email => "Email",
            FormField::Amount => "Montant souhaité (€)",
            FormField::Duration => "Durée (mois)",
            FormField::LoanType => "Type de prêt",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Name => "Jean Dupont",
            FormField::Email => "jean.dupont@email.com",
            FormField::Amount => "10000",
            FormField::Duration => "Sélectionnez la durée",
            FormField::LoanType => "Sélectionnez le type de prêt",
        }
    }

    /// Whether typed characters go into this field. The other two are pickers.
    pub fn accepts_text(self) -> bool {
        matches!(self, FormField::Name | FormField::Email | FormField::Amount)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub amount: String,
    pub duration: String,
    pub loan_type: String,
}

impl FormFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Amount => &self.amount,
            FormField::Duration => &self.duration,
            FormField::LoanType => &self.loan_type,
        }
    }

    fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Amount => &mut self.amount,
            FormField::Duration => &mut self.duration,
            FormField::LoanType => &mut self.loan_type,
        }
    }
}

/// Partial updates merged into the form by `LeadForm::reduce`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormUpdate {
    /// The visitor replaced a field's value.
    Edit(FormField, String),
    /// A catalogue card was selected.
    LoanTypeSelected(String),
    /// The calculator's quote was applied.
    Prefilled(Prefill),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing fields: {0:?}")]
    MissingFields(Vec<FormField>),
    #[error("'{0}' is not an e-mail address")]
    InvalidEmail(String),
    #[error("amount '{0}' is not between {min} and {max}", min = PRINCIPAL_MIN, max = PRINCIPAL_MAX)]
    InvalidAmount(String),
    #[error("duration '{0}' is not between {min} and {max} months", min = TERM_MIN, max = TERM_MAX)]
    InvalidDuration(String),
    #[error("a submission is already in progress")]
    AlreadySubmitting,
}

impl ValidationError {
    /// Toast title and description shown to the visitor.
    pub fn toast_text(&self) -> (&'static str, String) {
        match self {
            ValidationError::MissingFields(_) => (
                "Champs manquants",
                "Veuillez remplir tous les champs du formulaire.".to_string(),
            ),
            ValidationError::InvalidEmail(_) => (
                "Email invalide",
                "Veuillez saisir une adresse email valide.".to_string(),
            ),
            ValidationError::InvalidAmount(_) => (
                "Montant invalide",
                format!(
                    "Le montant doit être compris entre {} € et {} €.",
                    format_grouped(PRINCIPAL_MIN),
                    format_grouped(PRINCIPAL_MAX)
                ),
            ),
            ValidationError::InvalidDuration(_) => (
                "Durée invalide",
                format!("La durée doit être comprise entre {TERM_MIN} et {TERM_MAX} mois."),
            ),
            ValidationError::AlreadySubmitting => (
                "Envoi en cours",
                "Votre demande est déjà en cours d'envoi.".to_string(),
            ),
        }
    }
}

#[derive(Debug)]
pub struct LeadForm {
    fields: FormFields,
    status: SubmitStatus,
}

impl Default for LeadForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadForm {
    pub fn new() -> Self {
        Self {
            fields: FormFields::default(),
            status: SubmitStatus::Idle,
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// Merge one update. Fields the update does not mention are left alone.
    pub fn reduce(&mut self, update: FormUpdate) {
        match update {
            FormUpdate::Edit(field, value) => {
                *self.fields.get_mut(field) = value;
            }
            FormUpdate::LoanTypeSelected(title) => {
                if !title.is_empty() {
                    self.fields.loan_type = title;
                }
            }
            FormUpdate::Prefilled(prefill) => {
                self.fields.amount = prefill.principal.to_string();
                self.fields.duration = prefill.term_months.to_string();
            }
        }
    }

    pub fn push_char(&mut self, field: FormField, c: char) {
        if !field.accepts_text() {
            return;
        }
        if field == FormField::Amount && !(c.is_ascii_digit() || c == '.' || c == ',') {
            return;
        }
        let mut value = self.fields.get(field).to_string();
        value.push(c);
        self.reduce(FormUpdate::Edit(field, value));
    }

    pub fn pop_char(&mut self, field: FormField) {
        let mut value = self.fields.get(field).to_string();
        value.pop();
        self.reduce(FormUpdate::Edit(field, value));
    }

    /// Step a picker field through its choices.
    pub fn cycle(&mut self, field: FormField, forward: bool) {
        match field {
            FormField::Duration => {
                let current = self.fields.duration.trim().parse::<u32>().ok();
                let next = cycle_duration(current, forward);
                self.reduce(FormUpdate::Edit(field, next.to_string()));
            }
            FormField::LoanType => {
                let len = LOAN_TYPES.len();
                let next = match position_of_title(&self.fields.loan_type) {
                    Some(i) if forward => (i + 1) % len,
                    Some(i) => (i + len - 1) % len,
                    None if forward => 0,
                    None => len - 1,
                };
                self.reduce(FormUpdate::Edit(field, LOAN_TYPES[next].title.to_string()));
            }
            _ => {}
        }
    }

    /// Check every field and build the record that would be sent.
    pub fn validate(&self) -> Result<LeadSubmission, ValidationError> {
        let missing: Vec<FormField> = FormField::ALL
            .into_iter()
            .filter(|f| self.fields.get(*f).trim().is_empty())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let email = self.fields.email.trim();
        if !looks_like_email(email) {
            return Err(ValidationError::InvalidEmail(email.to_string()));
        }
        let amount = parse_amount(&self.fields.amount)
            .ok_or_else(|| ValidationError::InvalidAmount(self.fields.amount.clone()))?;
        let duration = parse_duration(&self.fields.duration)
            .ok_or_else(|| ValidationError::InvalidDuration(self.fields.duration.clone()))?;

        Ok(LeadSubmission::new(
            self.fields.name.trim(),
            email,
            amount,
            self.fields.loan_type.trim(),
            duration,
        ))
    }

    /// Validate and enter `Submitting`. Nothing changes on error.
    pub fn begin_submit(&mut self) -> Result<LeadSubmission, ValidationError> {
        if self.is_submitting() {
            return Err(ValidationError::AlreadySubmitting);
        }
        let submission = self.validate()?;
        self.status = SubmitStatus::Submitting;
        Ok(submission)
    }

    /// Back to `Idle`; clears the fields only when the lead was stored.
    pub fn finish_submit(&mut self, stored: bool) {
        self.status = SubmitStatus::Idle;
        if stored {
            self.fields = FormFields::default();
        }
    }
}

/// `local@domain`: one `@`, both sides non-empty, no whitespace.
fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    let value = raw.trim().replace(',', ".").parse::<f64>().ok()?;
    let in_range = value.is_finite()
        && value >= f64::from(PRINCIPAL_MIN)
        && value <= f64::from(PRINCIPAL_MAX);
    in_range.then_some(value)
}

fn parse_duration(raw: &str) -> Option<u32> {
    let value = raw.trim().parse::<u32>().ok()?;
    (TERM_MIN..=TERM_MAX).contains(&value).then_some(value)
}

fn cycle_duration(current: Option<u32>, forward: bool) -> u32 {
    let first = DURATION_CHOICES[0];
    let last = DURATION_CHOICES[DURATION_CHOICES.len() - 1];
    match current {
        None => {
            if forward {
                first
            } else {
                last
            }
        }
        Some(value) if forward => DURATION_CHOICES
            .iter()
            .copied()
            .find(|c| *c > value)
            .unwrap_or(first),
        Some(value) => DURATION_CHOICES
            .iter()
            .rev()
            .copied()
            .find(|c| *c < value)
            .unwrap_or(last),
    }
}
