//! Loan type catalogue.
//!
//! The four products are static. Selecting one emits its display title on the
//! page's selection channel; the form stores that title verbatim, so the
//! title is the value that ends up in `loan_submissions.loan_type`.

use std::sync::mpsc::Sender;

/// One product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanTypeOption {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Accent color as a `#rrggbb` hex string.
    pub display_color: &'static str,
}

pub const LOAN_TYPES: [LoanTypeOption; 4] = [
    LoanTypeOption {
        id: "personal",
        title: "Prêt Personnel",
        description: "Pour vos projets personnels",
        display_color: "#3b82f6",
    },
    LoanTypeOption {
        id: "consumer",
        title: "Crédit à la consommation",
        description: "Financement de vos achats",
        display_color: "#22c55e",
    },
    LoanTypeOption {
        id: "auto",
        title: "Crédit auto",
        description: "Achat de votre véhicule",
        display_color: "#f97316",
    },
    LoanTypeOption {
        id: "mortgage",
        title: "Crédit immobilier",
        description: "Financement de votre bien",
        display_color: "#a855f7",
    },
];

pub fn find_by_id(id: &str) -> Option<&'static LoanTypeOption> {
    LOAN_TYPES.iter().find(|o| o.id == id)
}

/// Position of `title` in the catalogue, if it is one of ours.
pub fn position_of_title(title: &str) -> Option<usize> {
    LOAN_TYPES.iter().position(|o| o.title == title)
}

/// Catalogue cards plus the highlighted index.
#[derive(Debug)]
pub struct LoanTypeCatalog {
    cursor: usize,
    selection_tx: Sender<String>,
}

impl LoanTypeCatalog {
    pub fn new(selection_tx: Sender<String>) -> Self {
        Self {
            cursor: 0,
            selection_tx,
        }
    }

    pub fn options(&self) -> &'static [LoanTypeOption] {
        &LOAN_TYPES
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn highlighted(&self) -> &'static LoanTypeOption {
        &LOAN_TYPES[self.cursor]
    }

    pub fn next(&mut self) {
        self.cursor = (self.cursor + 1) % LOAN_TYPES.len();
    }

    pub fn prev(&mut self) {
        self.cursor = (self.cursor + LOAN_TYPES.len() - 1) % LOAN_TYPES.len();
    }

    /// Emit the highlighted option's title.
    pub fn select_highlighted(&self) {
        self.select(self.highlighted());
    }

    pub fn select(&self, option: &LoanTypeOption) {
        tracing::debug!(loan_type = option.id, "loan type selected");
        // The receiver lives in the page shell; a closed channel means the page is gone.
        let _ = self.selection_tx.send(option.title.to_string());
    }
}
