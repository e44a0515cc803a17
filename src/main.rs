//! Bakfiets - Main entry point
//!
//! Loads the catalogue, then either runs the interactive wizard or one of the
//! headless commands.

use std::io::stdout;
use std::sync::Arc;

use anyhow::Context;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, error, info};

use bakfiets::app::App;
use bakfiets::catalogue::Catalogue;
use bakfiets::cli::{Cli, Commands};
use bakfiets::config::AppConfig;
use bakfiets::error::BakfietsError;
use bakfiets::logging;
use bakfiets::quote::{QuoteRequest, quote};

/// Main application entry point
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let config = AppConfig::from_cli(&cli).context("Invalid command line")?;

    // Initialize logging first
    logging::init_tracing(&config).context("Failed to initialize logging")?;
    info!("Bakfiets starting up");
    debug!("Configuration: {:?}", config);

    // The catalogue must load before any UI is shown
    let catalogue = match Catalogue::load_from_file(&config.catalogue_path) {
        Ok(catalogue) => Arc::new(catalogue),
        Err(e) => {
            error!("Failed to load catalogue: {}", e);
            eprintln!("✗ Failed to load catalogue: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Validate) => {
            println!(
                "✓ Catalogue is valid: {} brands, {} models, {} options",
                catalogue.brands.len(),
                catalogue.model_count(),
                catalogue.option_count()
            );
            for line in catalogue.summary_lines() {
                println!("{}", line);
            }
        }
        Some(Commands::Quote {
            brand,
            model,
            options,
            start,
            end,
        }) => {
            let request = QuoteRequest {
                brand,
                model,
                options,
                start,
                end,
            };
            match quote(&catalogue, &request) {
                Ok(breakdown) => println!("{}", breakdown),
                Err(e) => {
                    error!("Quote failed: {}", e);
                    eprintln!("✗ {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            info!("No command specified, launching wizard");
            run_wizard(catalogue).context("Wizard terminated with an error")?;
        }
    }

    Ok(())
}

/// Run the interactive wizard
fn run_wizard(catalogue: Arc<Catalogue>) -> Result<(), BakfietsError> {
    debug!("Initializing terminal for TUI mode");

    // Initialize terminal
    enable_raw_mode()
        .map_err(|e| BakfietsError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    if let Err(e) = crossterm::execute!(stdout(), EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(BakfietsError::terminal(format!(
            "Failed to enter alternate screen: {}",
            e
        )));
    }

    // Create and run application
    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(|e| BakfietsError::terminal(format!("Failed to create terminal: {}", e)))
        .and_then(|mut terminal| {
            let mut app = App::new(catalogue);
            let result = app.run(&mut terminal);
            let _ = terminal.show_cursor();
            result
        });

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), LeaveAlternateScreen);

    if let Err(ref e) = result {
        error!("Wizard failed: {}", e);
    }
    result
}
