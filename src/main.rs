use anyhow::{Context, Result};
use bookshelf::{
    cli::{commands::handler_for, Cli, LogLevel, Shell},
    config::ConfigLoader,
    Bookshelf,
};
use clap::Parser;
use std::io;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn initialize_tracing(log_level: Option<LogLevel>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level.to_filter_directive()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr) // stdout is reserved for command output
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.log_level);

    let mut config = ConfigLoader::new()
        .with_explicit_path(cli.config.clone())
        .load()
        .context("Failed to load configuration")?;
    if let Some(snapshot) = cli.snapshot {
        config.snapshot_path = snapshot;
    }

    let mut shelf = Bookshelf::from_config(&config);
    let modifies_state = cli.command.as_ref().is_some_and(|c| c.modifies_state());

    match cli.command.and_then(handler_for) {
        None => {
            let mut snapshot_unreadable = false;
            if config.load_on_start {
                match shelf.load_state() {
                    Ok(true) => info!("System data restored from saved state"),
                    Ok(false) => info!("No saved state found, starting fresh"),
                    // A broken snapshot must not block an interactive session
                    Err(e) => {
                        error!(error = %e, "Failed to restore saved state");
                        eprintln!("Error loading data: {}. Starting with a fresh system.", e);
                        snapshot_unreadable = true;
                    }
                }
            }
            let stdin = io::stdin();
            let mut shell =
                Shell::new(&mut shelf, stdin.lock(), io::stdout(), config.autosave_on_exit);
            if snapshot_unreadable {
                shell = shell.with_unreadable_snapshot();
            }
            shell.run()?;
        }
        Some(handler) => {
            if config.load_on_start {
                shelf
                    .load_state()
                    .context("Failed to restore saved state")?;
            }
            let mut stdout = io::stdout();
            info!(command = handler.name(), "Running command");
            handler.execute(&mut shelf, &mut stdout)?;
            if modifies_state {
                shelf.save_state().context("Failed to save state")?;
            }
        }
    }

    shelf
        .dispatcher()
        .drain(config.notifications.shutdown_grace())
        .await;

    Ok(())
}
