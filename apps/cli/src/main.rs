//! campusevents CLI — newsletter event scraper and importer.
//!
//! Extracts events from the Connections newsletter, resolves each event's
//! location to a known campus building, and loads the results into the
//! events store.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
