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

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("LEADMAP_NEARBY_CITIES_URL", "http://localhost:5000/api");
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
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "LEADMAP_ENV"));
}

#[test]
fn build_app_config_fails_without_nearby_cities_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "LEADMAP_NEARBY_CITIES_URL"),
        "expected MissingEnvVar(LEADMAP_NEARBY_CITIES_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_url_as_missing() {
    let mut map = HashMap::new();
    map.insert("LEADMAP_NEARBY_CITIES_URL", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.nearby_cities_url, "http://localhost:5000/api");
    assert!(cfg.api_token.is_none());
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "leadmap/0.1 (area-recommendations)");
    assert!(cfg.engine_config_path.is_none());
}

#[test]
fn request_timeout_secs_override() {
    let mut map = full_env();
    map.insert("LEADMAP_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 60);
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = full_env();
    map.insert("LEADMAP_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADMAP_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(LEADMAP_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_zero_rejected() {
    let mut map = full_env();
    map.insert("LEADMAP_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADMAP_REQUEST_TIMEOUT_SECS"
    ));
}

#[test]
fn engine_config_path_is_read_when_set() {
    let mut map = full_env();
    map.insert("LEADMAP_ENGINE_CONFIG_PATH", "./config/engine.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.engine_config_path.as_deref(),
        Some(std::path::Path::new("./config/engine.yaml"))
    );
}

#[test]
fn debug_output_redacts_api_token() {
    let mut map = full_env();
    map.insert("LEADMAP_API_TOKEN", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn log_level_is_shared_with_app_config() {
    let mut map = full_env();
    map.insert("LEADMAP_LOG_LEVEL", "leadmap_geo=debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "leadmap_geo=debug");
    assert_eq!(log_level_with(lookup_from_map(&map)), cfg.log_level);
}

#[test]
fn log_level_defaults_without_required_vars() {
    let map = HashMap::new();
    assert_eq!(log_level_with(lookup_from_map(&map)), "info");

    let mut blank = HashMap::new();
    blank.insert("LEADMAP_LOG_LEVEL", "  ");
    assert_eq!(log_level_with(lookup_from_map(&blank)), "info");
}
