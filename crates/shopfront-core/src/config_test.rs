use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with the commerce API origin set, as the server needs.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("SHOPFRONT_COMMERCE_BASE_URL", "https://shop.example.com");
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SHOPFRONT_ENV"));
}

#[test]
fn build_app_config_loads_storefront_only_environment() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("SHOPFRONT_STOREFRONT_URL", "https://store.example.com");
    let cfg = build_app_config(lookup_from_map(&map)).expect("storefront-only env loads");
    assert!(cfg.commerce_base_url.is_none());
    assert_eq!(cfg.storefront_url, "https://store.example.com");
}

#[test]
fn require_commerce_base_url_reports_missing_var() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let result = cfg.require_commerce_base_url();
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SHOPFRONT_COMMERCE_BASE_URL"),
        "expected MissingEnvVar(SHOPFRONT_COMMERCE_BASE_URL), got: {result:?}"
    );
}

#[test]
fn empty_commerce_base_url_counts_as_unset() {
    let mut map = full_env();
    map.insert("SHOPFRONT_COMMERCE_BASE_URL", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.commerce_base_url.is_none());
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    let mut map = full_env();
    map.insert("SHOPFRONT_COMMERCE_BASE_URL", "ftp://shop.example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPFRONT_COMMERCE_BASE_URL"),
        "expected InvalidEnvVar(SHOPFRONT_COMMERCE_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_strips_trailing_slash_from_base_url() {
    let mut map = full_env();
    map.insert("SHOPFRONT_COMMERCE_BASE_URL", "https://shop.example.com/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.commerce_base_url.as_deref(), Some("https://shop.example.com"));
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = full_env();
    map.insert("SHOPFRONT_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPFRONT_BIND_ADDR"),
        "expected InvalidEnvVar(SHOPFRONT_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_applies_defaults() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(
        cfg.require_commerce_base_url().unwrap(),
        "https://shop.example.com"
    );
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.commerce_consumer_key.is_none());
    assert!(cfg.commerce_consumer_secret.is_none());
    assert_eq!(cfg.storefront_url, "http://127.0.0.1:3000");
    assert_eq!(cfg.http_timeout_secs, 30);
    assert_eq!(cfg.http_user_agent, "shopfront/0.1 (storefront)");
    assert_eq!(cfg.http_max_retries, 3);
    assert_eq!(cfg.http_retry_backoff_base_secs, 1);
    assert_eq!(cfg.variations_page_size, 100);
    assert_eq!(cfg.api_rate_limit_max_requests, 600);
    assert_eq!(cfg.api_rate_limit_window_secs, 60);
}

#[test]
fn build_app_config_reads_consumer_credentials() {
    let mut map = full_env();
    map.insert("SHOPFRONT_COMMERCE_CONSUMER_KEY", "ck_test");
    map.insert("SHOPFRONT_COMMERCE_CONSUMER_SECRET", "cs_test");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.commerce_consumer_key.as_deref(), Some("ck_test"));
    assert_eq!(cfg.commerce_consumer_secret.as_deref(), Some("cs_test"));
}

#[test]
fn build_app_config_rejects_key_without_secret() {
    let mut map = full_env();
    map.insert("SHOPFRONT_COMMERCE_CONSUMER_KEY", "ck_test");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPFRONT_COMMERCE_CONSUMER_SECRET"),
        "expected InvalidEnvVar(SHOPFRONT_COMMERCE_CONSUMER_SECRET), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_credentials() {
    let mut map = full_env();
    map.insert("SHOPFRONT_COMMERCE_CONSUMER_KEY", "ck_live_secret_value");
    map.insert("SHOPFRONT_COMMERCE_CONSUMER_SECRET", "cs_live_secret_value");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("ck_live_secret_value"));
    assert!(!debug.contains("cs_live_secret_value"));
    assert!(debug.contains("[redacted]"));
}

#[test]
fn http_timeout_secs_override() {
    let mut map = full_env();
    map.insert("SHOPFRONT_HTTP_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.http_timeout_secs, 60);
}

#[test]
fn http_timeout_secs_invalid() {
    let mut map = full_env();
    map.insert("SHOPFRONT_HTTP_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPFRONT_HTTP_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SHOPFRONT_HTTP_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn http_max_retries_override() {
    let mut map = full_env();
    map.insert("SHOPFRONT_HTTP_MAX_RETRIES", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.http_max_retries, 0);
}

#[test]
fn variations_page_size_zero_is_rejected() {
    let mut map = full_env();
    map.insert("SHOPFRONT_VARIATIONS_PAGE_SIZE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPFRONT_VARIATIONS_PAGE_SIZE"),
        "expected InvalidEnvVar(SHOPFRONT_VARIATIONS_PAGE_SIZE), got: {result:?}"
    );
}

#[test]
fn variations_page_size_above_api_limit_is_rejected() {
    let mut map = full_env();
    map.insert("SHOPFRONT_VARIATIONS_PAGE_SIZE", "101");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn storefront_url_override() {
    let mut map = full_env();
    map.insert("SHOPFRONT_STOREFRONT_URL", "https://store.example.com/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.storefront_url, "https://store.example.com");
}

#[test]
fn api_rate_limit_override() {
    let mut map = full_env();
    map.insert("SHOPFRONT_API_RATE_LIMIT_MAX_REQUESTS", "20");
    map.insert("SHOPFRONT_API_RATE_LIMIT_WINDOW_SECS", "10");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_rate_limit_max_requests, 20);
    assert_eq!(cfg.api_rate_limit_window_secs, 10);
}

#[test]
fn api_rate_limit_zero_window_is_rejected() {
    let mut map = full_env();
    map.insert("SHOPFRONT_API_RATE_LIMIT_WINDOW_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPFRONT_API_RATE_LIMIT_WINDOW_SECS"),
        "expected InvalidEnvVar(SHOPFRONT_API_RATE_LIMIT_WINDOW_SECS), got: {result:?}"
    );
}
