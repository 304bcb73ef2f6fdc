mod cli;
mod error;
mod fmt;
mod logging;
mod models;
mod parser;
mod presenter;
mod settings;
mod store;
mod tracker;
mod tui;

use clap::Parser;
use tracing::debug;

use cli::{Cli, Commands, Overrides};

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.log_level, cli.command.is_none());
    debug!("Log level set to {}", cli.log_level.to_string().to_lowercase());

    let overrides = Overrides::from_cli(&cli);
    let result = match &cli.command {
        None => cli::interactive::run(&overrides),
        Some(Commands::Add { files, output }) => cli::add::run(files, output, &overrides),
        Some(Commands::Check { file }) => cli::check::run(file.as_deref(), &overrides),
        Some(Commands::Config) => cli::config::run(&overrides),
        Some(Commands::Formats) => {
            cli::formats::list();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
