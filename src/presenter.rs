use serde::Serialize;

use crate::fmt::{money, Currency};
use crate::store::ExpenseStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentedRow {
    /// 1-based position in the list.
    pub index: usize,
    pub id: u64,
    /// Plain decimal, e.g. `25000` or `50.00`.
    pub value: String,
    /// Currency-formatted, e.g. `₹25,000`.
    pub amount: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub currency: String,
    pub rows: Vec<PresentedRow>,
    pub total_value: String,
    pub total: String,
}

impl Presentation {
    pub fn has_dates(&self) -> bool {
        self.rows.iter().any(|r| r.date.is_some())
    }
}

/// Build the numbered list and total footer for the current store contents.
pub fn present(store: &ExpenseStore, currency: Currency) -> Presentation {
    let rows = store
        .records()
        .iter()
        .enumerate()
        .map(|(i, r)| PresentedRow {
            index: i + 1,
            id: r.id,
            value: r.amount.to_string(),
            amount: money(r.amount, currency),
            description: r.description.clone(),
            date: r.date.clone(),
        })
        .collect();
    let total = store.total();
    Presentation {
        currency: currency.key().to_string(),
        rows,
        total_value: total.to_string(),
        total: money(total, currency),
    }
}
