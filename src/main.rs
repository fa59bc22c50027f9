//! quote-ledger - A terminal quote builder
//!
//! This is the main entry point for the quote-ledger application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod error;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::error::ImportKind;
use crate::tui::Tui;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::Event;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "quote-ledger.log";

/// Build customer quotes from a product catalog in the terminal
#[derive(Debug, Parser)]
#[command(name = "quote-ledger", version, about)]
struct Cli {
    /// Directory holding config, quote history, outbox and log
    #[arg(long, env = "QUOTE_LEDGER_HOME")]
    home: Option<PathBuf>,

    /// Items CSV (sku, description, price) to import on startup
    #[arg(long, value_name = "CSV")]
    items: Option<PathBuf>,

    /// Customers CSV (name, phone, status, salesRep) to import on startup
    #[arg(long, value_name = "CSV")]
    customers: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let home = match cli.home {
        Some(home) => home,
        None => Config::default_home().context("Could not determine a home directory, pass --home")?,
    };
    fs::create_dir_all(&home)
        .with_context(|| format!("Failed to create {}", home.display()))?;

    // The terminal belongs to the UI, so logs go to a file
    if let Err(e) = init_logging(&home) {
        eprintln!("Logging disabled: {:#}", e);
    }
    info!(home = %home.display(), "starting quote-ledger");

    // Create app state
    let config = Config::load(&home);
    if !Config::exists(&home) {
        // Leave a config behind for the user to edit
        if let Err(e) = config.save(&home) {
            warn!(error = %e, "could not write default config");
        }
    }
    let mut app = App::new(config, &home);
    if let Some(path) = &cli.items {
        app.import_csv(ImportKind::Items, path);
    }
    if let Some(path) = &cli.customers {
        app.import_csv(ImportKind::Customers, path);
    }

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;
    app.shutdown();

    // Handle any errors
    if let Err(err) = result {
        error!(error = %err, "exiting after error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    info!("bye");
    Ok(())
}

fn init_logging(home: &Path) -> Result<()> {
    let path = home.join(LOG_FILE);
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let filter = EnvFilter::try_from_env("QUOTE_LEDGER_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                error!(error = %e, "draw failed");
            }
        })?;

        // Poll for events
        let action = match tui.next_event()? {
            Some(Event::Key(key)) => app.handle_key_event(key)?,
            Some(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            Some(_) => None,
            None => Some(Action::Tick),
        };

        // Action might produce a follow-up action
        let mut current_action = action;
        while let Some(a) = current_action {
            current_action = app.update(a)?;
        }
    }

    Ok(())
}
