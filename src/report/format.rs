//! Text formatting for amounts and quotes.
//!
//! Display strings follow French conventions (`10 000 €`, `425,40 €`). The
//! backend payloads use plain `{:.2}` and never go through this module.
//! Keeping the formatting here means the page, the `quote` command and the
//! footer disclosure all print the same numbers.

use crate::domain::{FIXED_ANNUAL_RATE_PERCENT, LoanQuote, PRINCIPAL_DEFAULT, TERM_DEFAULT};

/// Integer with a space every three digits: `100000` → `100 000`.
pub fn format_grouped(value: u32) -> String {
    group_digits(&value.to_string())
}

/// Euro amount with two decimals and a decimal comma: `10209.66` → `10 209,66 €`.
pub fn format_eur(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{},{frac_part} €", group_digits(int_part))
}

/// Whole euros: `10000` → `10 000 €`.
pub fn format_eur_whole(value: u32) -> String {
    format!("{} €", format_grouped(value))
}

pub fn format_rate(percent: f64) -> String {
    if percent.fract() == 0.0 {
        format!("{percent:.0} %")
    } else {
        format!("{percent:.2} %").replace('.', ",")
    }
}

/// Multi-line summary used by `atome quote`.
pub fn format_quote_summary(quote: &LoanQuote) -> String {
    let a = quote.amortization();
    let mut out = String::new();
    out.push_str("=== Atome Banque - Résumé de votre simulation ===\n");
    out.push_str(&format!("Montant emprunté   : {}\n", format_eur(quote.principal)));
    out.push_str(&format!("Durée              : {} mois\n", quote.term_months));
    out.push_str(&format!(
        "Taux fixe          : {}\n",
        format_rate(quote.annual_rate_percent)
    ));
    out.push_str(&format!("Mensualité         : {}\n", format_eur(a.monthly_payment)));
    out.push_str(&format!("Coût des intérêts  : {}\n", format_eur(a.total_interest)));
    out.push_str(&format!("Total à rembourser : {}", format_eur(quote.total_repaid())));
    out
}

/// Representative-example disclosure printed in the footer.
///
/// Computed from the same amortization as the calculator so the legal text
/// cannot drift from the numbers the page shows.
pub fn representative_example() -> String {
    let quote = LoanQuote::new(f64::from(PRINCIPAL_DEFAULT), TERM_DEFAULT);
    let a = quote.amortization();
    let rate = format_rate(FIXED_ANNUAL_RATE_PERCENT);
    format!(
        "Exemple : pour {} sur {} mois à {rate}, TAEG fixe de {rate}, \
         mensualités de {}, coût total du crédit {}.",
        format_eur_whole(PRINCIPAL_DEFAULT),
        TERM_DEFAULT,
        format_eur(a.monthly_payment),
        format_eur(a.total_interest),
    )
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1_000), "1 000");
        assert_eq!(format_grouped(100_000), "100 000");
        assert_eq!(format_grouped(1_234_567), "1 234 567");
    }

    #[test]
    fn euro_amounts() {
        assert_eq!(format_eur(425.4026), "425,40 €");
        assert_eq!(format_eur(10_209.663), "10 209,66 €");
        assert_eq!(format_eur(-12.5), "-12,50 €");
        assert_eq!(format_eur(f64::NAN), "0,00 €");
        assert_eq!(format_eur_whole(10_000), "10 000 €");
    }

    #[test]
    fn rates() {
        assert_eq!(format_rate(2.0), "2 %");
        assert_eq!(format_rate(1.5), "1,50 %");
    }

    #[test]
    fn summary_lists_the_derived_values() {
        let summary = format_quote_summary(&LoanQuote::new(10_000.0, 24));
        assert!(summary.contains("Mensualité         : 425,40 €"));
        assert!(summary.contains("Coût des intérêts  : 209,66 €"));
        assert!(summary.contains("Total à rembourser : 10 209,66 €"));
    }

    #[test]
    fn footer_example_uses_computed_figures() {
        let text = representative_example();
        assert!(text.contains("pour 10 000 € sur 24 mois à 2 %"));
        assert!(text.contains("mensualités de 425,40 €"));
        assert!(text.contains("coût total du crédit 209,66 €"));
    }
}
