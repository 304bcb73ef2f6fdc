use colored::Colorize;
use comfy_table::{Cell, Table};

use super::{read_source, truncate, Overrides};
use crate::error::{Result, TallyError};
use crate::fmt::money;
use crate::parser::{diagnose_text, LineOutcome};

pub fn run(file: Option<&str>, overrides: &Overrides) -> Result<()> {
    let (format, currency) = overrides.resolve()?;
    let text = read_source(file.unwrap_or("-"))?;
    let diagnostics = diagnose_text(&text, format);

    let mut table = Table::new();
    table.set_header(vec!["Line", "Status", "Detail"]);
    for d in &diagnostics {
        let (status, detail) = match &d.outcome {
            LineOutcome::Accepted {
                expense,
                questionable_date,
            } => {
                let mut detail = format!(
                    "{}  {}",
                    money(expense.amount, currency),
                    expense.description
                );
                if let Some(date) = &expense.date {
                    detail.push_str(&format!("  {date}"));
                }
                if *questionable_date {
                    detail.push_str("  (not a calendar date)");
                }
                ("ok".green(), detail)
            }
            LineOutcome::Rejected(reason) => {
                ("skipped".red(), format!("{reason}: {}", truncate(&d.text, 48)))
            }
        };
        table.add_row(vec![Cell::new(d.line_no), Cell::new(status), Cell::new(detail)]);
    }

    let accepted = diagnostics.iter().filter(|d| d.is_accepted()).count();
    println!("Line check ({} format)\n{table}", format.key());
    println!("{accepted} accepted, {} skipped", diagnostics.len() - accepted);

    if accepted == 0 {
        return Err(TallyError::NoValidExpenses);
    }
    Ok(())
}
