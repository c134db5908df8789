use anyhow::{Context, Result};
use std::env;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CUSTOMERS_URL: &str = "http://localhost:9000";
const DEFAULT_CUSTOMERS_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AccountsConfig {
    pub host: String,
    pub port: u16,
    /// Base URL of the downstream customers lookup service.
    pub customers_base_url: String,
    pub customers_timeout_seconds: u64,
}

pub fn load_accounts_config() -> Result<AccountsConfig> {
    let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = parse_port(env::var("PORT").ok()).context("PORT must be a valid port number")?;
    let customers_base_url = env::var("CUSTOMERS_SERVICE_URL")
        .map(|value| normalize_base_url(&value))
        .unwrap_or_else(|_| DEFAULT_CUSTOMERS_URL.to_string());
    let customers_timeout_seconds = parse_timeout(env::var("CUSTOMERS_TIMEOUT_SECONDS").ok())
        .context("CUSTOMERS_TIMEOUT_SECONDS must be a positive integer")?;

    Ok(AccountsConfig {
        host,
        port,
        customers_base_url,
        customers_timeout_seconds,
    })
}

fn parse_port(value: Option<String>) -> Result<u16> {
    match value {
        Some(raw) => raw.trim().parse::<u16>().map_err(anyhow::Error::from),
        None => Ok(DEFAULT_PORT),
    }
}

fn parse_timeout(value: Option<String>) -> Result<u64> {
    match value {
        Some(raw) => {
            let secs = raw.trim().parse::<u64>()?;
            anyhow::ensure!(secs > 0, "timeout of zero seconds is not usable");
            Ok(secs)
        }
        None => Ok(DEFAULT_CUSTOMERS_TIMEOUT_SECONDS),
    }
}

fn normalize_base_url(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}
