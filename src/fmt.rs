use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

/// Display currency. Decides the symbol, the digit grouping and how many
/// fraction digits are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    /// ₹ with Indian grouping (`₹1,23,456`); up to three fraction digits, only when non-zero.
    Rupee,
    /// $ with Western grouping, always two decimals (`$123,456.00`).
    Dollar,
}

impl Currency {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Rupee => "rupee",
            Self::Dollar => "dollar",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Rupee => "\u{20b9}",
            Self::Dollar => "$",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

pub const ALL_CURRENCIES: &[Currency] = &[Currency::Rupee, Currency::Dollar];

pub fn currency_by_key(key: &str) -> Option<Currency> {
    let key = key.trim().to_lowercase();
    ALL_CURRENCIES.iter().find(|c| c.key() == key).copied()
}

/// Format an amount in the given currency: `₹25,000`, `₹1,23,456.5`, `$1,234.56`.
pub fn money(val: Decimal, currency: Currency) -> String {
    let negative = val.is_sign_negative() && !val.is_zero();
    let (int_part, dec_part) = match currency {
        Currency::Rupee => {
            let s = round_half_up(val.abs(), 3).normalize().to_string();
            match s.split_once('.') {
                Some((i, d)) => (group_indian(i), Some(d.to_string())),
                None => (group_indian(&s), None),
            }
        }
        Currency::Dollar => {
            let s = round_half_up(val.abs(), 2).to_string();
            let (i, d) = s.split_once('.').unwrap_or((s.as_str(), ""));
            (group_western(i), Some(format!("{d:0<2}")))
        }
    };

    let sign = if negative { "-" } else { "" };
    let symbol = currency.symbol();
    match dec_part {
        Some(d) => format!("{sign}{symbol}{int_part}.{d}"),
        None => format!("{sign}{symbol}{int_part}"),
    }
}

/// Midpoints round away from zero: 0.125 -> 0.13 at two places.
fn round_half_up(val: Decimal, dp: u32) -> Decimal {
    val.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// 1234567 -> 1,234,567
fn group_western(digits: &str) -> String {
    let mut with_commas = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    with_commas.chars().rev().collect()
}

/// 1234567 -> 12,34,567
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut with_commas = String::new();
    for (i, c) in head.chars().rev().enumerate() {
        if i > 0 && i % 2 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let head: String = with_commas.chars().rev().collect();
    format!("{head},{tail}")
}
