use tracing::{debug, info};

use crate::error::{Result, TallyError};
use crate::parser::{parse_text, LineFormat};
use crate::store::ExpenseStore;

/// Session state behind the Add Expenses / Clear All actions: the pending input,
/// the stored expenses and the banner error from the last add.
pub struct ExpenseTracker {
    input: String,
    store: ExpenseStore,
    format: LineFormat,
    error: Option<TallyError>,
}

impl ExpenseTracker {
    pub fn new(format: LineFormat) -> Self {
        Self {
            input: String::new(),
            store: ExpenseStore::new(),
            format,
            error: None,
        }
    }

    pub fn format(&self) -> LineFormat {
        self.format
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    pub fn error(&self) -> Option<&TallyError> {
        self.error.as_ref()
    }

    /// Parse the pending input and append what matched.
    ///
    /// An empty batch leaves the store and the input untouched and sets the
    /// error banner. Otherwise the input is consumed and the banner cleared.
    pub fn add(&mut self) -> Result<usize> {
        let batch = parse_text(&self.input, self.format);
        if batch.is_empty() {
            debug!(format = %self.format, "submitted text produced no expenses");
            self.error = Some(TallyError::NoValidExpenses);
            return Err(TallyError::NoValidExpenses);
        }

        let added = self.store.append(batch).len();
        info!(added, total = %self.store.total(), "added expenses");
        self.input.clear();
        self.error = None;
        Ok(added)
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.input.clear();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_add_appends_matched_lines_in_order() {
        let mut t = ExpenseTracker::new(LineFormat::Strict);
        t.set_input("25,000/- CASH 29/08/2024\ngarbage\n*1,200/- TAXI 01/01/2024*");
        assert_eq!(t.add().unwrap(), 2);
        assert!(t.input().is_empty());
        assert!(t.error().is_none());

        let descs: Vec<&str> = t.store().records().iter().map(|r| r.description.as_str()).collect();
        assert_eq!(descs, vec!["CASH", "TAXI"]);
        assert_eq!(t.store().total(), Decimal::from(26200));
    }

    #[test]
    fn test_add_with_no_matches_keeps_state_and_sets_error() {
        let mut t = ExpenseTracker::new(LineFormat::Strict);
        t.set_input("100/- MILK 05/05/2024");
        t.add().unwrap();

        t.set_input("Groceries 50.00\nnothing useful");
        assert!(matches!(t.add(), Err(TallyError::NoValidExpenses)));
        assert!(matches!(t.error(), Some(TallyError::NoValidExpenses)));
        assert_eq!(t.store().len(), 1);
        assert_eq!(t.input(), "Groceries 50.00\nnothing useful");
    }

    #[test]
    fn test_successful_add_clears_error() {
        let mut t = ExpenseTracker::new(LineFormat::Loose);
        t.set_input("no numbers");
        assert!(t.add().is_err());
        t.set_input("Groceries 50.00");
        assert_eq!(t.add().unwrap(), 1);
        assert!(t.error().is_none());
    }

    #[test]
    fn test_add_increases_total_by_batch_sum() {
        let mut t = ExpenseTracker::new(LineFormat::Loose);
        t.set_input("Coffee 3.50\nBagel 2.25");
        t.add().unwrap();
        let before = t.store().total();

        t.set_input("Room 4 rent 1200\nBus 1.75");
        t.add().unwrap();
        assert_eq!(t.store().total() - before, Decimal::new(120175, 2));
    }

    #[test]
    fn test_clear_resets_everything_and_is_idempotent() {
        let mut t = ExpenseTracker::new(LineFormat::Loose);
        t.set_input("Coffee 3.50");
        t.add().unwrap();
        t.set_input("no numbers");
        let _ = t.add();

        t.clear();
        assert!(t.store().is_empty());
        assert!(t.input().is_empty());
        assert!(t.error().is_none());

        t.clear();
        assert!(t.store().is_empty());
        assert!(t.input().is_empty());
        assert!(t.error().is_none());
    }
}
