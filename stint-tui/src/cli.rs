use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "stint")]
#[command(about = "Terminal client for Stint time tracking")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against a real API server
    Run,
    /// Run in dev mode with local in-memory data
    Dev,
    /// Sign in and save the session token
    Login,
    /// Create a new account
    Register,
    /// Remove the local session token
    Logout,
    /// Check that the API server is reachable
    Ping,
    /// Print config path and create default file if missing
    ConfigPath,
}
