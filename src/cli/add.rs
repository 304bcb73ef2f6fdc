use colored::Colorize;
use tracing::debug;

use super::output::{self, OutputKind};
use super::{read_source, source_label, Overrides};
use crate::error::{Result, TallyError};
use crate::presenter::present;
use crate::tracker::ExpenseTracker;

/// Submit each source as one batch to a single session, then print the list.
pub fn run(files: &[String], output: &str, overrides: &Overrides) -> Result<()> {
    let kind = OutputKind::from_key(output)?;
    let (format, currency) = overrides.resolve()?;

    let sources: Vec<&str> = if files.is_empty() {
        vec!["-"]
    } else {
        files.iter().map(String::as_str).collect()
    };

    let mut tracker = ExpenseTracker::new(format);
    for source in &sources {
        tracker.set_input(read_source(source)?);
        match tracker.add() {
            Ok(added) => debug!(source = source_label(source), added, "batch added"),
            Err(TallyError::NoValidExpenses) if sources.len() > 1 => {
                eprintln!(
                    "{} {}: {}",
                    "Skipped".yellow(),
                    source_label(source),
                    TallyError::NoValidExpenses
                );
            }
            Err(e) => return Err(e),
        }
    }

    if tracker.store().is_empty() {
        return Err(TallyError::NoValidExpenses);
    }
    output::print(&present(tracker.store(), currency), kind)
}
