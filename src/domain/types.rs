//! Shared domain types.
//!
//! Amounts are plain `f64` euros. Values sent to the backend are rounded to
//! cents when the record is built; everything upstream keeps full precision.

use serde::{Deserialize, Serialize};

use crate::finance::amortize;

/// Fixed annual rate offered on every product, in percent.
pub const FIXED_ANNUAL_RATE_PERCENT: f64 = 2.0;

pub const PRINCIPAL_MIN: u32 = 1_000;
pub const PRINCIPAL_MAX: u32 = 100_000;
pub const PRINCIPAL_STEP: u32 = 1_000;
pub const PRINCIPAL_DEFAULT: u32 = 10_000;

pub const TERM_MIN: u32 = 6;
pub const TERM_MAX: u32 = 120;
pub const TERM_STEP: u32 = 6;
pub const TERM_DEFAULT: u32 = 24;

/// Durations offered by the form's duration picker.
pub const DURATION_CHOICES: [u32; 8] = [6, 12, 24, 36, 48, 60, 84, 120];

/// Monthly payment and total interest for one quote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amortization {
    pub monthly_payment: f64,
    pub total_interest: f64,
}

impl Amortization {
    pub const ZERO: Amortization = Amortization {
        monthly_payment: 0.0,
        total_interest: 0.0,
    };
}

/// A calculator quote: principal and term at the fixed rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanQuote {
    pub principal: f64,
    pub term_months: u32,
    pub annual_rate_percent: f64,
}

impl LoanQuote {
    pub fn new(principal: f64, term_months: u32) -> Self {
        Self {
            principal,
            term_months,
            annual_rate_percent: FIXED_ANNUAL_RATE_PERCENT,
        }
    }

    pub fn amortization(&self) -> Amortization {
        amortize(self.principal, self.term_months, self.annual_rate_percent)
    }

    /// Principal plus interest over the whole term.
    pub fn total_repaid(&self) -> f64 {
        self.principal + self.amortization().total_interest
    }
}

/// Payload of the calculator's "apply to form" action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefill {
    pub principal: u32,
    pub term_months: u32,
}

/// Row inserted into the `loan_submissions` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    pub amount: f64,
    pub loan_type: String,
    pub duration: u32,
    pub monthly_payment: f64,
    pub total_amount: f64,
}

impl LeadSubmission {
    /// Build the record, deriving payment and total from the fixed-rate quote.
    pub fn new(name: &str, email: &str, amount: f64, loan_type: &str, duration: u32) -> Self {
        let quote = LoanQuote::new(amount, duration);
        let monthly = quote.amortization().monthly_payment;
        let total = monthly * f64::from(duration);
        Self {
            name: name.to_string(),
            email: email.to_string(),
            amount,
            loan_type: loan_type.to_string(),
            duration,
            monthly_payment: round_cents(monthly),
            total_amount: round_cents(total),
        }
    }

    /// Payload for the `send-loan-email` function.
    pub fn email_payload(&self) -> LoanEmail {
        LoanEmail {
            name: self.name.clone(),
            email: self.email.clone(),
            loan_type: self.loan_type.clone(),
            amount: self.amount,
            duration: self.duration,
            monthly_payment: format!("{:.2}", self.monthly_payment),
            total_amount: format!("{:.2}", self.total_amount),
        }
    }
}

/// Body of the notification e-mail request. Money fields travel as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanEmail {
    pub name: String,
    pub email: String,
    pub loan_type: String,
    pub amount: f64,
    pub duration: u32,
    pub monthly_payment: String,
    pub total_amount: String,
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_rounds_money_to_cents() {
        let lead = LeadSubmission::new("Jean Dupont", "jean@example.com", 10_000.0, "Crédit auto", 24);
        assert_eq!(lead.monthly_payment, 425.40);
        assert_eq!(lead.total_amount, 10_209.66);
        assert_eq!(lead.duration, 24);
    }

    #[test]
    fn record_uses_snake_case_columns() {
        let lead = LeadSubmission::new("A", "a@b.c", 1_000.0, "Prêt Personnel", 6);
        let json = serde_json::to_value(&lead).unwrap();
        for key in ["name", "email", "amount", "loan_type", "duration", "monthly_payment", "total_amount"] {
            assert!(json.get(key).is_some(), "missing column {key}");
        }
    }

    #[test]
    fn email_payload_formats_money_as_strings() {
        let lead = LeadSubmission::new("A", "a@b.c", 10_000.0, "Crédit immobilier", 24);
        let payload = serde_json::to_value(lead.email_payload()).unwrap();
        assert_eq!(payload["loanType"], "Crédit immobilier");
        assert_eq!(payload["monthlyPayment"], "425.40");
        assert_eq!(payload["totalAmount"], "10209.66");
        assert_eq!(payload["duration"], 24);
    }

    #[test]
    fn total_repaid_adds_interest() {
        let quote = LoanQuote::new(10_000.0, 24);
        assert!((quote.total_repaid() - 10_209.66).abs() < 0.01);
    }
}
