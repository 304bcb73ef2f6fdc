use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::{ExpenseRecord, ParsedExpense};

/// Append-only, in-memory list of expenses for one session.
#[derive(Debug, Default)]
pub struct ExpenseStore {
    records: Vec<ExpenseRecord>,
    /// Last id handed out. Survives `clear` so ids are never reused.
    last_id: u64,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parsed batch in order and return the newly stored records.
    pub fn append(&mut self, batch: Vec<ParsedExpense>) -> &[ExpenseRecord] {
        let start = self.records.len();
        for parsed in batch {
            self.last_id += 1;
            self.records.push(ExpenseRecord {
                id: self.last_id,
                amount: parsed.amount,
                description: parsed.description,
                date: parsed.date,
            });
        }
        debug!(
            added = self.records.len() - start,
            stored = self.records.len(),
            "appended batch"
        );
        &self.records[start..]
    }

    pub fn clear(&mut self) {
        if !self.records.is_empty() {
            debug!(discarded = self.records.len(), "cleared store");
        }
        self.records.clear();
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact sum of every stored amount. Recomputed on each call.
    /// Saturates at `Decimal::MAX` instead of overflowing.
    pub fn total(&self) -> Decimal {
        self.records
            .iter()
            .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.amount))
            .unwrap_or_else(|| {
                warn!(stored = self.records.len(), "total exceeds the decimal range");
                Decimal::MAX
            })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn parsed(amount: &str, description: &str) -> ParsedExpense {
        ParsedExpense {
            amount: Decimal::from_str(amount).unwrap(),
            description: description.to_string(),
            date: None,
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let mut store = ExpenseStore::new();
        store.append(vec![parsed("10", "a"), parsed("20", "b")]);
        let added = store.append(vec![parsed("30", "c")]);
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].description, "c");

        let descs: Vec<&str> = store.records().iter().map(|r| r.description.as_str()).collect();
        assert_eq!(descs, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ids_unique_within_batch_and_across_clear() {
        let mut store = ExpenseStore::new();
        store.append(vec![parsed("1", "a"), parsed("2", "b"), parsed("3", "c")]);
        let first: Vec<u64> = store.records().iter().map(|r| r.id).collect();
        assert_eq!(first, vec![1, 2, 3]);

        store.clear();
        store.append(vec![parsed("4", "d")]);
        assert_eq!(store.records()[0].id, 4);
    }

    #[test]
    fn test_total_is_exact() {
        let mut store = ExpenseStore::new();
        assert_eq!(store.total(), Decimal::ZERO);
        store.append(vec![parsed("0.10", "a"), parsed("0.20", "b")]);
        assert_eq!(store.total(), Decimal::from_str("0.30").unwrap());

        let before = store.total();
        store.append(vec![parsed("25000", "c"), parsed("1200", "d")]);
        assert_eq!(store.total() - before, Decimal::from(26200));
    }

    #[test]
    fn test_total_saturates_instead_of_overflowing() {
        let mut store = ExpenseStore::new();
        let huge = ParsedExpense {
            amount: Decimal::MAX,
            description: "huge".to_string(),
            date: None,
        };
        store.append(vec![huge.clone(), huge]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.total(), Decimal::MAX);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut store = ExpenseStore::new();
        store.append(vec![parsed("5", "a")]);
        store.clear();
        assert!(store.is_empty());
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.total(), Decimal::ZERO);
    }
}
