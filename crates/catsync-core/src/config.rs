use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_SYNC_SCHEDULE: &str = "0 57 15 * * *";
const DEFAULT_USER_AGENT: &str = "catsync/0.1 (catalog-sync)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`
/// lookup instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let shopify_shop = require("SHOPIFY_SHOP")?;
    if shopify_shop.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPIFY_SHOP".to_string(),
            reason: "shop domain must not be empty".to_string(),
        });
    }
    let shopify_api_key = require("SHOPIFY_API_KEY")?;
    let shopify_api_secret = require("SHOPIFY_API_SECRET")?;
    let shopify_access_token = require("SHOPIFY_ACCESS_TOKEN")?;

    let db_host = require("DB_HOST")?;
    let db_port = parse_value::<u16>("DB_PORT", &require("DB_PORT")?)?;
    let db_user = require("DB_USER")?;
    // An empty password is valid for trust-authenticated local databases.
    let db_password = require("DB_PASSWORD")?;
    let db_name = require("DB_NAME")?;

    let env = parse_environment(&or_default("CATSYNC_ENV", "development"))?;
    let bind_addr = parse_value(
        "CATSYNC_BIND_ADDR",
        &or_default("CATSYNC_BIND_ADDR", "0.0.0.0:4000"),
    )?;
    let log_level = or_default("CATSYNC_LOG_LEVEL", "info");
    let sync_schedule = or_default("CATSYNC_SYNC_SCHEDULE", DEFAULT_SYNC_SCHEDULE);
    let shopify_api_version = or_default("CATSYNC_SHOPIFY_API_VERSION", "2024-10");
    let request_timeout_secs = parse_value(
        "CATSYNC_REQUEST_TIMEOUT_SECS",
        &or_default("CATSYNC_REQUEST_TIMEOUT_SECS", "30"),
    )?;
    let user_agent = or_default("CATSYNC_USER_AGENT", DEFAULT_USER_AGENT);
    let db_max_connections = parse_value(
        "CATSYNC_DB_MAX_CONNECTIONS",
        &or_default("CATSYNC_DB_MAX_CONNECTIONS", "5"),
    )?;
    let db_acquire_timeout_secs = parse_value(
        "CATSYNC_DB_ACQUIRE_TIMEOUT_SECS",
        &or_default("CATSYNC_DB_ACQUIRE_TIMEOUT_SECS", "10"),
    )?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        sync_schedule,
        shopify_shop,
        shopify_api_key,
        shopify_api_secret,
        shopify_access_token,
        shopify_api_version,
        request_timeout_secs,
        user_agent,
        db_host,
        db_port,
        db_user,
        db_password,
        db_name,
        db_max_connections,
        db_acquire_timeout_secs,
    })
}

fn parse_value<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CATSYNC_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
