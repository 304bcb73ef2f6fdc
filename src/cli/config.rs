use super::{resolve_currency, resolve_format, Overrides};
use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path, Settings};

pub fn run(overrides: &Overrides) -> Result<()> {
    let mut settings = load_settings();
    if overrides.is_empty() {
        print_settings(&settings);
        return Ok(());
    }

    if let Some(key) = &overrides.format {
        settings.format = resolve_format(key)?.key().to_string();
    }
    if let Some(key) = &overrides.currency {
        settings.currency = resolve_currency(key)?.key().to_string();
    }
    save_settings(&settings)?;
    println!("Saved settings.");
    print_settings(&settings);
    Ok(())
}

fn print_settings(settings: &Settings) {
    println!("Settings:   {}", settings_path().display());
    println!("Format:     {}", settings.format);
    println!("Currency:   {}", settings.currency);
}
