use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Largest page size the commerce API accepts for `per_page`.
const MAX_VARIATIONS_PAGE_SIZE: u32 = 100;

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
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    // Only the server and `--direct` CLI reads talk to the commerce API.
    let commerce_base_url = lookup("SHOPFRONT_COMMERCE_BASE_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(|raw| validate_http_url("SHOPFRONT_COMMERCE_BASE_URL", &raw))
        .transpose()?;

    let env = parse_environment(&or_default("SHOPFRONT_ENV", "development"))?;

    let bind_addr = parse("SHOPFRONT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SHOPFRONT_LOG_LEVEL", "info");

    let commerce_consumer_key = lookup("SHOPFRONT_COMMERCE_CONSUMER_KEY")
        .ok()
        .filter(|s| !s.is_empty());
    let commerce_consumer_secret = lookup("SHOPFRONT_COMMERCE_CONSUMER_SECRET")
        .ok()
        .filter(|s| !s.is_empty());
    if commerce_consumer_key.is_some() != commerce_consumer_secret.is_some() {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPFRONT_COMMERCE_CONSUMER_SECRET".to_string(),
            reason: "consumer key and secret must be set together".to_string(),
        });
    }

    let storefront_url = validate_http_url(
        "SHOPFRONT_STOREFRONT_URL",
        &or_default("SHOPFRONT_STOREFRONT_URL", "http://127.0.0.1:3000"),
    )?;

    let http_timeout_secs = parse_u64("SHOPFRONT_HTTP_TIMEOUT_SECS", "30")?;
    let http_user_agent = or_default("SHOPFRONT_HTTP_USER_AGENT", "shopfront/0.1 (storefront)");
    let http_max_retries = parse_u32("SHOPFRONT_HTTP_MAX_RETRIES", "3")?;
    let http_retry_backoff_base_secs = parse_u64("SHOPFRONT_HTTP_RETRY_BACKOFF_BASE_SECS", "1")?;

    let variations_page_size = parse_u32("SHOPFRONT_VARIATIONS_PAGE_SIZE", "100")?;
    if variations_page_size == 0 || variations_page_size > MAX_VARIATIONS_PAGE_SIZE {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPFRONT_VARIATIONS_PAGE_SIZE".to_string(),
            reason: format!("must be between 1 and {MAX_VARIATIONS_PAGE_SIZE}"),
        });
    }

    let api_rate_limit_max_requests = parse_u32("SHOPFRONT_API_RATE_LIMIT_MAX_REQUESTS", "600")?;
    let api_rate_limit_window_secs = parse_u64("SHOPFRONT_API_RATE_LIMIT_WINDOW_SECS", "60")?;
    if api_rate_limit_max_requests == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPFRONT_API_RATE_LIMIT_MAX_REQUESTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if api_rate_limit_window_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPFRONT_API_RATE_LIMIT_WINDOW_SECS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        commerce_base_url,
        commerce_consumer_key,
        commerce_consumer_secret,
        storefront_url,
        http_timeout_secs,
        http_user_agent,
        http_max_retries,
        http_retry_backoff_base_secs,
        variations_page_size,
        api_rate_limit_max_requests,
        api_rate_limit_window_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPFRONT_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

/// Accepts `http://` / `https://` URLs and strips any trailing slash.
fn validate_http_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));

    match host {
        Some(h) if !h.is_empty() => Ok(trimmed.to_string()),
        _ => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("\"{raw}\" is not an http(s) URL"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
