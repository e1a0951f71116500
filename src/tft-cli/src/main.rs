mod cli;
mod commands;
mod config;
mod file_io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tft=info,tft_meta=info,tft_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Hash { names } => {
            commands::hash::handle(&names)?;
        }

        Commands::Refine {
            input,
            output,
            section,
            compact,
        } => {
            commands::refine::handle(&input, output.as_deref(), section, compact)?;
        }

        Commands::Store { input, db } => {
            commands::store::handle(&input, db)?;
        }

        Commands::Configure { db, show } => {
            commands::configure::handle(db, show)?;
        }
    }

    Ok(())
}
