use crate::app_config::{AppConfig, Environment, ProxySettings, DEFAULT_USER_AGENTS};
use crate::ConfigError;

const DEFAULT_PROXY_PORTS: &str = "10001,10002,10003,10004,10005,10006,10007";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
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
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// config that fetches directly (no proxy) with the built-in user agents.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("ASIN_ENV", "development"));

    let bind_addr = or_default("ASIN_BIND_ADDR", "0.0.0.0:8000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("ASIN_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("ASIN_LOG_LEVEL", "info");

    let product_base_url = or_default("ASIN_PRODUCT_BASE_URL", "https://www.amazon.com")
        .trim_end_matches('/')
        .to_string();
    if !product_base_url.starts_with("http://") && !product_base_url.starts_with("https://") {
        return Err(invalid(
            "ASIN_PRODUCT_BASE_URL",
            "must start with http:// or https://".to_string(),
        ));
    }

    let request_timeout_secs = parse_u64("ASIN_REQUEST_TIMEOUT_SECS", "15")?;
    let browser_timeout_secs = parse_u64("ASIN_BROWSER_TIMEOUT_SECS", "120")?;
    let browser_max_scrolls = parse_u32("ASIN_BROWSER_MAX_SCROLLS", "30")?;
    if browser_max_scrolls == 0 {
        return Err(invalid(
            "ASIN_BROWSER_MAX_SCROLLS",
            "must be at least 1".to_string(),
        ));
    }

    let proxy = match lookup("ASIN_PROXY_HOST") {
        Ok(host) if !host.trim().is_empty() => {
            let ports = parse_ports(&or_default("ASIN_PROXY_PORTS", DEFAULT_PROXY_PORTS))
                .map_err(|reason| invalid("ASIN_PROXY_PORTS", reason))?;
            Some(ProxySettings {
                host: host.trim().to_string(),
                ports,
                username: lookup("ASIN_PROXY_USERNAME").ok(),
                password: lookup("ASIN_PROXY_PASSWORD").ok(),
            })
        }
        _ => None,
    };

    let user_agents = match lookup("ASIN_USER_AGENTS") {
        Ok(raw) => {
            let agents: Vec<String> = raw
                .split('|')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
                .collect();
            if agents.is_empty() {
                return Err(invalid(
                    "ASIN_USER_AGENTS",
                    "must list at least one user agent".to_string(),
                ));
            }
            agents
        }
        Err(_) => DEFAULT_USER_AGENTS.iter().map(|s| (*s).to_string()).collect(),
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        product_base_url,
        request_timeout_secs,
        browser_timeout_secs,
        browser_max_scrolls,
        proxy,
        user_agents,
    })
}

/// Parses a comma-separated port list. Empty lists are rejected.
fn parse_ports(raw: &str) -> Result<Vec<u16>, String> {
    let ports = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u16>().map_err(|e| format!("\"{s}\": {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    if ports.is_empty() {
        return Err("must list at least one port".to_string());
    }
    Ok(ports)
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
