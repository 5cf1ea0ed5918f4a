use anyhow::{Context, Result};
use std::io::Write;

use crate::config::StintConfig;
use crate::session_store;
use stint_client::{ApiClient, ApiError};

/// Interactive sign-in: prompt for credentials, POST /api/login, persist the
/// returned bearer token. The server's `message` is printed verbatim.
pub async fn run_login(config: &StintConfig) -> Result<()> {
    let username = prompt("Username: ")?;
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;

    let mut client = ApiClient::new(&config.api_url)?;
    client
        .fetch_csrf_token()
        .await
        .context("Failed to reach the API. Is the server running?")?;

    let response = client.login(&username, &password).await?;
    println!("{}", response.message);

    match response.token {
        Some(token) => {
            session_store::save_session(&token)?;
            println!("Session saved.");
            Ok(())
        }
        None => anyhow::bail!("Login did not return a token"),
    }
}

/// Interactive sign-up: mismatched confirmation is rejected before any
/// request is made.
pub async fn run_register(config: &StintConfig) -> Result<()> {
    let username = prompt("Username: ")?;
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;
    let confirm =
        rpassword::prompt_password("Confirm password: ").context("Failed to read password")?;

    if password != confirm {
        anyhow::bail!("Passwords do not match.");
    }

    let mut client = ApiClient::new(&config.api_url)?;
    client
        .fetch_csrf_token()
        .await
        .context("Failed to reach the API. Is the server running?")?;

    let message = client.register(&username, &password).await?;
    println!("{}", message);
    Ok(())
}

/// Health check: GET /api/ping and print the server's message. Failures are
/// masked with a static line rather than a raw transport error.
pub async fn run_ping(config: &StintConfig) -> Result<()> {
    let client = ApiClient::new(&config.api_url)?;
    println!("{}", ping_report(client.ping().await));
    Ok(())
}

fn ping_report(result: Result<String, ApiError>) -> String {
    match result {
        Ok(message) => format!("backend response : {message}"),
        Err(_) => "Error while connecting to the API".to_string(),
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_report_prints_server_message() {
        assert_eq!(
            ping_report(Ok("pong".to_string())),
            "backend response : pong"
        );
    }

    #[test]
    fn ping_report_masks_failures() {
        assert_eq!(
            ping_report(Err(ApiError::Response("connection refused".to_string()))),
            "Error while connecting to the API"
        );
        assert_eq!(
            ping_report(Err(ApiError::Unauthorized)),
            "Error while connecting to the API"
        );
    }
}
