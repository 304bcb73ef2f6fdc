use comfy_table::{Cell, Table};

use crate::parser::ALL_FORMATS;
use crate::settings::load_settings;

pub fn list() {
    let current = load_settings().format;
    let mut table = Table::new();
    table.set_header(vec!["Key", "Format", "Example", "Default"]);
    for f in ALL_FORMATS {
        table.add_row(vec![
            Cell::new(f.key()),
            Cell::new(f.name()),
            Cell::new(f.example()),
            Cell::new(if f.key() == current { "*" } else { "" }),
        ]);
    }
    println!("Line formats\n{table}");
}
