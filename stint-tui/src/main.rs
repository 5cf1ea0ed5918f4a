mod api;
mod app;
mod bootstrap;
mod cli;
mod config;
mod login;
mod runtime;
mod session_store;
mod time_utils;
mod ui;

use anyhow::{Context, Result};
use api::Backend;
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::StintConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use stint_client::ApiClient;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = StintConfig::load()?;

    match cli.command {
        Commands::Run => {
            let backend = remote_backend(&config).await?;
            run_tui(backend).await
        }
        Commands::Dev => run_tui(Backend::dev()).await,
        Commands::Login => login::run_login(&config).await,
        Commands::Register => login::run_register(&config).await,
        Commands::Logout => {
            session_store::clear_session()?;
            println!("Logged out.");
            Ok(())
        }
        Commands::Ping => login::run_ping(&config).await,
        Commands::ConfigPath => {
            let path = StintConfig::config_path()?;
            if !path.exists() {
                config.save()?;
            }
            println!("{}", path.display());
            Ok(())
        }
    }
}

async fn remote_backend(config: &StintConfig) -> Result<Backend> {
    let token = session_store::load_session()?
        .context("Not logged in. Run `stint login` first.")?;
    let mut client = ApiClient::with_token(&config.api_url, &token)?;
    client
        .fetch_csrf_token()
        .await
        .context("Failed to reach the API. Is the server running?")?;
    Ok(Backend::remote(client))
}

async fn run_tui(mut backend: Backend) -> Result<()> {
    let mut app = App::new();
    bootstrap::initialize_app_state(&mut app, &mut backend).await;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend_term = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_term)?;

    let res = runtime::run_app(&mut terminal, &mut app, &mut backend).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
