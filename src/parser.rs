use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::models::ParsedExpense;

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// `<amount>/- <description> <DD/MM/YYYY>`
static STRICT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\d,]+)/- (.+) (\d{2}/\d{2}/\d{4})$").expect("strict line pattern")
});

/// Integers or decimals, with optional comma grouping (`1,200` or `1,20,000`).
static NUMBER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+(?:,\d+)+(?:\.\d+)?|\d+(?:\.\d+)?").expect("number token pattern")
});

/// Emphasis markers a pasted strict line may be wrapped in.
const MARKERS: &[char] = &['*', '_'];

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Convert an amount token to a decimal, dropping grouping commas.
/// Returns `None` for anything that is not a finite non-negative number.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let s = raw.trim().replace(',', "");
    if s.is_empty() {
        return None;
    }
    let value = Decimal::from_str(&s).ok()?;
    if value.is_sign_negative() {
        return None;
    }
    Some(value)
}

fn strip_markers(line: &str) -> &str {
    let line = line.trim();
    let line = line.strip_prefix(MARKERS).unwrap_or(line);
    let line = line.strip_suffix(MARKERS).unwrap_or(line);
    line.trim()
}

fn is_calendar_date_dmy(raw: &str) -> bool {
    chrono::NaiveDate::parse_from_str(raw, "%d/%m/%Y").is_ok()
}

// ---------------------------------------------------------------------------
// Line formats: enum dispatch, one active per session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormat {
    Strict,
    Loose,
}

impl LineFormat {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Loose => "loose",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Strict => "Amount, description and date",
            Self::Loose => "Free text ending in an amount",
        }
    }

    pub fn example(&self) -> &'static str {
        match self {
            Self::Strict => "25,000/- CASH 29/08/2024",
            Self::Loose => "Room 4 rent 1200",
        }
    }

    /// Parse one line. Lines that do not fit the format yield `None`.
    pub fn parse_line(&self, line: &str) -> Option<ParsedExpense> {
        match self.diagnose_line(line) {
            LineOutcome::Accepted { expense, .. } => Some(expense),
            LineOutcome::Rejected(_) => None,
        }
    }

    pub fn diagnose_line(&self, line: &str) -> LineOutcome {
        match self {
            Self::Strict => diagnose_strict(line),
            Self::Loose => diagnose_loose(line),
        }
    }
}

impl fmt::Display for LineFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

pub const ALL_FORMATS: &[LineFormat] = &[LineFormat::Strict, LineFormat::Loose];

pub fn get_by_key(key: &str) -> Option<LineFormat> {
    let key = key.trim().to_lowercase();
    ALL_FORMATS.iter().find(|f| f.key() == key).copied()
}

fn diagnose_strict(line: &str) -> LineOutcome {
    let Some(caps) = STRICT_LINE.captures(strip_markers(line)) else {
        return LineOutcome::Rejected(RejectReason::NoMatch);
    };
    let Some(amount) = parse_amount(&caps[1]) else {
        return LineOutcome::Rejected(RejectReason::BadAmount);
    };
    let date = caps[3].to_string();
    LineOutcome::Accepted {
        questionable_date: !is_calendar_date_dmy(&date),
        expense: ParsedExpense {
            amount,
            description: caps[2].trim().to_string(),
            date: Some(date),
        },
    }
}

fn diagnose_loose(line: &str) -> LineOutcome {
    // Rightmost number wins: "Room 4 rent 1200" is 1200, not 4.
    let Some(token) = NUMBER_TOKEN.find_iter(line).last() else {
        return LineOutcome::Rejected(RejectReason::NoMatch);
    };
    let Some(amount) = parse_amount(token.as_str()) else {
        return LineOutcome::Rejected(RejectReason::BadAmount);
    };
    LineOutcome::Accepted {
        questionable_date: false,
        expense: ParsedExpense {
            amount,
            description: line[..token.start()].trim().to_string(),
            date: None,
        },
    }
}

// ---------------------------------------------------------------------------
// Batch parsing
// ---------------------------------------------------------------------------

/// Parse a block of text into expenses, in line order. Unmatched lines are dropped.
pub fn parse_text(text: &str, format: LineFormat) -> Vec<ParsedExpense> {
    text.split('\n')
        .filter_map(|line| format.parse_line(line))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NoMatch,
    BadAmount,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatch => f.write_str("does not match the line format"),
            Self::BadAmount => f.write_str("amount is not a usable number"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Accepted {
        expense: ParsedExpense,
        /// The date matched `DD/MM/YYYY` but is not a real calendar day.
        questionable_date: bool,
    },
    Rejected(RejectReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineDiagnostic {
    /// 1-based line number within the submitted text.
    pub line_no: usize,
    pub text: String,
    pub outcome: LineOutcome,
}

impl LineDiagnostic {
    pub fn is_accepted(&self) -> bool {
        matches!(self.outcome, LineOutcome::Accepted { .. })
    }
}

/// Per-line report for a block of text. Blank lines are skipped but still counted.
pub fn diagnose_text(text: &str, format: LineFormat) -> Vec<LineDiagnostic> {
    text.split('\n')
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| LineDiagnostic {
            line_no: i + 1,
            text: line.trim_end_matches('\r').to_string(),
            outcome: format.diagnose_line(line),
        })
        .collect()
}
