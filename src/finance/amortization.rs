//! Fixed-rate amortization.
//!
//! A fixed-rate loan is repaid with a constant monthly payment:
//!
//! ```text
//! r = annual_rate_percent / 100 / 12
//! payment = P · r · (1 + r)^n / ((1 + r)^n − 1)
//! interest = payment · n − P
//! ```
//!
//! The calculator panel and the lead form both go through `amortize`, so the
//! preview and the persisted record can never disagree.

use crate::domain::Amortization;

/// Monthly payment and total interest for `principal` over `term_months`.
///
/// Returns `Amortization::ZERO` when the rate is zero or the formula is not
/// finite (e.g. a zero-month term), so callers never see NaN or ∞.
/// No rounding happens here.
pub fn amortize(principal: f64, term_months: u32, annual_rate_percent: f64) -> Amortization {
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    if monthly_rate == 0.0 || principal.is_nan() || principal <= 0.0 {
        return Amortization::ZERO;
    }

    let n = f64::from(term_months);
    let growth = (1.0 + monthly_rate).powf(n);
    let monthly_payment = principal * monthly_rate * growth / (growth - 1.0);
    let total_interest = monthly_payment * n - principal;

    if !monthly_payment.is_finite() || !total_interest.is_finite() {
        return Amortization::ZERO;
    }

    Amortization {
        monthly_payment,
        total_interest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        FIXED_ANNUAL_RATE_PERCENT, PRINCIPAL_MAX, PRINCIPAL_MIN, PRINCIPAL_STEP, TERM_MAX, TERM_MIN,
        TERM_STEP,
    };

    #[test]
    fn default_quote_matches_hand_computation() {
        let a = amortize(10_000.0, 24, 2.0);
        assert!((a.monthly_payment - 425.4026).abs() < 1e-3, "got {}", a.monthly_payment);
        assert!((a.total_interest - 209.6632).abs() < 1e-3, "got {}", a.total_interest);
    }

    #[test]
    fn every_slider_position_yields_positive_finite_payment() {
        for principal in (PRINCIPAL_MIN..=PRINCIPAL_MAX).step_by(PRINCIPAL_STEP as usize) {
            for term in (TERM_MIN..=TERM_MAX).step_by(TERM_STEP as usize) {
                let a = amortize(f64::from(principal), term, FIXED_ANNUAL_RATE_PERCENT);
                assert!(a.monthly_payment.is_finite() && a.monthly_payment > 0.0);
                assert!(
                    a.monthly_payment * f64::from(term) - f64::from(principal) >= 0.0,
                    "negative interest for {principal} over {term}"
                );
            }
        }
    }

    #[test]
    fn zero_term_degrades_to_zero() {
        assert_eq!(amortize(10_000.0, 0, 2.0), Amortization::ZERO);
    }

    #[test]
    fn zero_rate_degrades_to_zero() {
        assert_eq!(amortize(10_000.0, 24, 0.0), Amortization::ZERO);
    }

    #[test]
    fn non_positive_principal_degrades_to_zero() {
        assert_eq!(amortize(0.0, 24, 2.0), Amortization::ZERO);
        assert_eq!(amortize(f64::NAN, 24, 2.0), Amortization::ZERO);
    }

    #[test]
    fn recomputation_is_stable() {
        let first = amortize(37_000.0, 54, 2.0);
        let second = amortize(37_000.0, 54, 2.0);
        assert_eq!(first, second);
    }

    #[test]
    fn single_month_repays_principal_plus_one_month_of_interest() {
        let a = amortize(12_000.0, 1, 2.0);
        assert!((a.monthly_payment - 12_020.0).abs() < 1e-6);
        assert!((a.total_interest - 20.0).abs() < 1e-6);
    }
}
