use std::io::Write;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::{Result, TallyError};
use crate::presenter::Presentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Table,
    Csv,
    Json,
}

impl OutputKind {
    pub fn from_key(key: &str) -> Result<Self> {
        match key.trim().to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(TallyError::UnknownOutput(key.to_string())),
        }
    }
}

pub fn expense_table(p: &Presentation) -> Table {
    let dates = p.has_dates();
    let mut header = vec!["#", "Amount", "Description"];
    if dates {
        header.push("Date");
    }

    let mut table = Table::new();
    table.set_header(header);
    for row in &p.rows {
        let mut cells = vec![
            Cell::new(format!("{}.", row.index)),
            Cell::new(&row.amount),
            Cell::new(&row.description),
        ];
        if dates {
            cells.push(Cell::new(row.date.as_deref().unwrap_or("")));
        }
        table.add_row(cells);
    }
    table
}

pub fn write_csv<W: Write>(p: &Presentation, out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["index", "id", "amount", "description", "date"])?;
    for row in &p.rows {
        wtr.write_record([
            row.index.to_string(),
            row.id.to_string(),
            row.value.clone(),
            row.description.clone(),
            row.date.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print(p: &Presentation, kind: OutputKind) -> Result<()> {
    match kind {
        OutputKind::Table => {
            println!("Expenses\n{}", expense_table(p));
            println!("{} {}", "Total:".bold(), p.total.as_str().bold());
        }
        OutputKind::Csv => write_csv(p, std::io::stdout().lock())?,
        OutputKind::Json => println!("{}", serde_json::to_string_pretty(p)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fmt::Currency;
    use crate::parser::{parse_text, LineFormat};
    use crate::presenter::present;
    use crate::store::ExpenseStore;

    fn presentation(text: &str, format: LineFormat, currency: Currency) -> Presentation {
        let mut store = ExpenseStore::new();
        store.append(parse_text(text, format));
        present(&store, currency)
    }

    #[test]
    fn test_output_kind_from_key() {
        assert_eq!(OutputKind::from_key("CSV").unwrap(), OutputKind::Csv);
        assert!(matches!(OutputKind::from_key("xml"), Err(TallyError::UnknownOutput(_))));
    }

    #[test]
    fn test_table_includes_dates_only_when_present() {
        let strict = presentation("25,000/- CASH 29/08/2024", LineFormat::Strict, Currency::Rupee);
        let rendered = expense_table(&strict).to_string();
        assert!(rendered.contains("Date"));
        assert!(rendered.contains("29/08/2024"));

        let loose = presentation("Groceries 50.00", LineFormat::Loose, Currency::Dollar);
        let rendered = expense_table(&loose).to_string();
        assert!(!rendered.contains("Date"));
        assert!(rendered.contains("$50.00"));
    }

    #[test]
    fn test_write_csv() {
        let p = presentation(
            "Groceries 50.00\nRoom 4 rent 1200",
            LineFormat::Loose,
            Currency::Dollar,
        );
        let mut buf = Vec::new();
        write_csv(&p, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "index,id,amount,description,date");
        assert_eq!(lines[1], "1,1,50.00,Groceries,");
        assert_eq!(lines[2], "2,2,1200,Room 4 rent,");
    }
}
