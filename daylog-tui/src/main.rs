mod api;
mod app;
mod bootstrap;
mod calendar;
mod cli;
mod commands;
mod config;
mod logging;
mod runtime;
mod types;
mod ui;

use anyhow::{Context, Result};
use api::{ApiClient, DevBackend};
use app::App;
use calendar::CalendarDate;
use clap::Parser;
use cli::{Cli, Commands};
use crate::config::DaylogConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env.daylog
    dotenvy::from_filename(".env.daylog").ok();

    let cli = Cli::parse();
    let cfg = DaylogConfig::load()?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            logging::init_file(&cfg.log_path()?, &cfg.log_level)?;
            let client = ApiClient::new(&cfg.api_url)
                .with_context(|| format!("Invalid api_url in config: {}", cfg.api_url))?;
            info!(api_url = %client.base_url(), "starting daylog");
            run_tui(client, cfg.api_url.clone()).await
        }
        Commands::Dev { fail_writes } => {
            logging::init_file(&cfg.log_path()?, &cfg.log_level)?;
            let backend = DevBackend::seeded(CalendarDate::today());
            backend.set_fail_writes(fail_writes);
            let client = ApiClient::dev(backend)?;
            info!("starting daylog in dev mode");
            run_tui(client, "dev (in-memory)").await
        }
        Commands::ConfigPath => {
            let path = DaylogConfig::config_path()?;
            if !path.exists() {
                DaylogConfig::default().save()?;
                eprintln!("Created default config.");
            }
            println!("{}", path.display());
            Ok(())
        }
        Commands::Export { year } => {
            logging::init_stderr(&cfg.log_level)?;
            let client = ApiClient::new(&cfg.api_url)?;
            let mut stdout = io::stdout().lock();
            commands::export_days(&client, year, &mut stdout).await?;
            Ok(())
        }
        Commands::Import { file } => {
            logging::init_stderr(&cfg.log_level)?;
            let client = ApiClient::new(&cfg.api_url)?;
            let records = commands::read_import_file(&file)?;
            let summary = commands::import_days(&client, &records).await;
            println!(
                "Imported {} records: {} created, {} updated, {} failed",
                records.len(),
                summary.created,
                summary.updated,
                summary.failed
            );
            if summary.failed > 0 {
                anyhow::bail!("{} records could not be imported", summary.failed);
            }
            Ok(())
        }
    }
}

async fn run_tui(client: ApiClient, source_label: impl Into<String>) -> Result<()> {
    let mut app = App::new(CalendarDate::today(), source_label);
    bootstrap::initialize_app_state(&mut app, &client).await;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, &client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "terminal UI stopped");
    }
    res
}
