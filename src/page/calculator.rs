//! Calculator panel state.

use std::sync::mpsc::Sender;

use crate::domain::{
    Amortization, LoanQuote, Prefill, PRINCIPAL_DEFAULT, PRINCIPAL_MAX, PRINCIPAL_MIN,
    PRINCIPAL_STEP, TERM_DEFAULT, TERM_MAX, TERM_MIN, TERM_STEP,
};

/// Which slider has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcField {
    Amount,
    Duration,
}

impl CalcField {
    pub fn toggle(self) -> Self {
        match self {
            CalcField::Amount => CalcField::Duration,
            CalcField::Duration => CalcField::Amount,
        }
    }
}

/// Two sliders and the quote they produce.
///
/// The amortization is recomputed on every adjustment; there is nothing to
/// debounce since the sliders move in discrete steps.
#[derive(Debug)]
pub struct CalculatorPanel {
    principal: u32,
    term_months: u32,
    active: CalcField,
    quote: LoanQuote,
    amortization: Amortization,
    prefill_tx: Sender<Prefill>,
}

impl CalculatorPanel {
    pub fn new(prefill_tx: Sender<Prefill>) -> Self {
        let quote = LoanQuote::new(f64::from(PRINCIPAL_DEFAULT), TERM_DEFAULT);
        Self {
            principal: PRINCIPAL_DEFAULT,
            term_months: TERM_DEFAULT,
            active: CalcField::Amount,
            quote,
            amortization: quote.amortization(),
            prefill_tx,
        }
    }

    pub fn principal(&self) -> u32 {
        self.principal
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    pub fn active(&self) -> CalcField {
        self.active
    }

    pub fn quote(&self) -> &LoanQuote {
        &self.quote
    }

    pub fn amortization(&self) -> Amortization {
        self.amortization
    }

    pub fn focus(&mut self, field: CalcField) {
        self.active = field;
    }

    pub fn toggle_focus(&mut self) {
        self.active = self.active.toggle();
    }

    /// Move the focused slider by `steps` notches.
    pub fn nudge(&mut self, steps: i32) {
        match self.active {
            CalcField::Amount => {
                let next = step_clamped(self.principal, steps, PRINCIPAL_STEP, PRINCIPAL_MIN, PRINCIPAL_MAX);
                self.set_principal(next);
            }
            CalcField::Duration => {
                let next = step_clamped(self.term_months, steps, TERM_STEP, TERM_MIN, TERM_MAX);
                self.set_term_months(next);
            }
        }
    }

    pub fn set_principal(&mut self, principal: u32) {
        self.principal = principal.clamp(PRINCIPAL_MIN, PRINCIPAL_MAX);
        self.recompute();
    }

    pub fn set_term_months(&mut self, term_months: u32) {
        self.term_months = term_months.clamp(TERM_MIN, TERM_MAX);
        self.recompute();
    }

    /// Send the current sliders to the form.
    pub fn apply_to_form(&self) -> Prefill {
        let prefill = Prefill {
            principal: self.principal,
            term_months: self.term_months,
        };
        tracing::debug!(principal = prefill.principal, term = prefill.term_months, "apply quote to form");
        let _ = self.prefill_tx.send(prefill);
        prefill
    }

    fn recompute(&mut self) {
        self.quote = LoanQuote::new(f64::from(self.principal), self.term_months);
        self.amortization = self.quote.amortization();
    }
}

fn step_clamped(value: u32, steps: i32, step: u32, min: u32, max: u32) -> u32 {
    let delta = i64::from(steps) * i64::from(step);
    let next = (i64::from(value) + delta).clamp(i64::from(min), i64::from(max));
    // Clamped into [min, max], both of which are u32.
    u32::try_from(next).unwrap_or(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    #[test]
    fn defaults_and_preview() {
        let (tx, _rx) = channel();
        let panel = CalculatorPanel::new(tx);
        assert_eq!(panel.principal(), 10_000);
        assert_eq!(panel.term_months(), 24);
        assert!((panel.amortization().monthly_payment - 425.40).abs() < 0.01);
    }

    #[test]
    fn nudging_recomputes_and_clamps() {
        let (tx, _rx) = channel();
        let mut panel = CalculatorPanel::new(tx);
        let before = panel.amortization();
        panel.nudge(1);
        assert_eq!(panel.principal(), 11_000);
        assert!(panel.amortization().monthly_payment > before.monthly_payment);

        panel.nudge(-500);
        assert_eq!(panel.principal(), PRINCIPAL_MIN);

        panel.toggle_focus();
        panel.nudge(100);
        assert_eq!(panel.term_months(), TERM_MAX);
        panel.nudge(-1);
        assert_eq!(panel.term_months(), 114);
    }

    #[test]
    fn apply_emits_current_sliders() {
        let (tx, rx) = channel();
        let mut panel = CalculatorPanel::new(tx);
        panel.focus(CalcField::Duration);
        panel.nudge(2);
        panel.apply_to_form();
        assert_eq!(
            rx.try_recv().unwrap(),
            Prefill {
                principal: 10_000,
                term_months: 36
            }
        );
    }
}
