use rust_decimal::Decimal;

/// One expense held by the session store.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub id: u64,
    pub amount: Decimal,
    pub description: String,
    pub date: Option<String>,
}

/// Intermediate representation from the line parser before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExpense {
    pub amount: Decimal,
    pub description: String,
    pub date: Option<String>,
}
