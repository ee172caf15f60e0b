//! Configuration module unit tests

use chatrelay::config::settings::{load_dotenv_files, Settings, DEFAULT_BASE_URL};
use std::collections::HashMap;
use std::env;
use std::fs;

/// Build settings from a fixed set of variables
fn settings_from(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_settings_creation_with_valid_env() {
    let settings = settings_from(&[
        ("OPENAI_API_KEY", "sk-test-key-12345678901234567890"),
        ("HOST", "127.0.0.1"),
        ("PORT", "8080"),
        ("OPENAI_BASE_URL", "http://localhost:4010/v1"),
        ("UPSTREAM_TIMEOUT", "15"),
        ("MAX_REQUEST_SIZE", "2048"),
        ("RUST_LOG", "warn"),
        ("LOG_FORMAT", "json"),
    ])
    .unwrap();

    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.bind_address(), "127.0.0.1:8080");
    assert_eq!(
        settings.openai.api_key.as_ref().map(|k| k.expose()),
        Some("sk-test-key-12345678901234567890")
    );
    assert_eq!(settings.openai.base_url, "http://localhost:4010/v1");
    assert_eq!(settings.openai.timeout, 15);
    assert_eq!(settings.request.max_request_size, 2048);
    assert_eq!(settings.logging.level, "warn");
    assert_eq!(settings.logging.format, "json");
}

#[test]
fn test_settings_defaults() {
    let settings = settings_from(&[]).unwrap();

    assert_eq!(settings.bind_address(), "0.0.0.0:5000");
    assert_eq!(settings.openai.base_url, DEFAULT_BASE_URL);
    assert_eq!(settings.chat_completions_url(), "https://api.openai.com/v1/chat/completions");
    assert_eq!(settings.openai.timeout, 60);
    assert_eq!(settings.logging.format, "text");
    assert_eq!(settings.security.allowed_origins, vec!["*".to_string()]);
}

#[test]
fn test_missing_api_key_is_not_a_startup_error() {
    let settings = settings_from(&[("PORT", "8080")]).unwrap();
    assert!(!settings.has_api_key());
}

#[test]
fn test_settings_validation_invalid_port() {
    let error = settings_from(&[("PORT", "0")]).unwrap_err();
    assert!(error.to_string().contains("Port number cannot be 0"));

    let error = settings_from(&[("PORT", "not-a-port")]).unwrap_err();
    assert!(error.to_string().contains("Invalid port number"));
}

#[test]
fn test_settings_validation_invalid_base_url() {
    let error = settings_from(&[("OPENAI_BASE_URL", "ftp://example.com")]).unwrap_err();
    assert!(error.to_string().contains("base URL"));
}

#[test]
fn test_settings_validation_zero_timeout() {
    assert!(settings_from(&[("UPSTREAM_TIMEOUT", "0")]).is_err());
    assert!(settings_from(&[("UPSTREAM_TIMEOUT", "soon")]).is_err());
}

#[test]
fn test_settings_validation_invalid_log_format() {
    let error = settings_from(&[("LOG_FORMAT", "xml")]).unwrap_err();
    assert!(error.to_string().contains("Invalid log format"));
}

#[test]
fn test_allowed_origins_list() {
    let settings = settings_from(&[("ALLOWED_ORIGINS", "https://a.example.com, https://b.example.com,")]).unwrap();

    assert!(!settings.allows_any_origin());
    assert_eq!(
        settings.security.allowed_origins,
        vec!["https://a.example.com".to_string(), "https://b.example.com".to_string()]
    );

    assert!(settings_from(&[("ALLOWED_ORIGINS", " , ")]).is_err());
}

#[test]
fn test_dotenv_files_priority() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(".env.local"),
        "CHATRELAY_TEST_DOTENV_SHARED=local\n",
    )
    .unwrap();
    fs::write(
        dir.path().join(".env"),
        "CHATRELAY_TEST_DOTENV_SHARED=env\nCHATRELAY_TEST_DOTENV_ONLY_ENV=env\n",
    )
    .unwrap();

    let loaded = load_dotenv_files(dir.path()).unwrap();
    assert_eq!(loaded.len(), 2);

    assert_eq!(env::var("CHATRELAY_TEST_DOTENV_SHARED").unwrap(), "local");
    assert_eq!(env::var("CHATRELAY_TEST_DOTENV_ONLY_ENV").unwrap(), "env");
}

#[test]
fn test_dotenv_does_not_override_environment() {
    env::set_var("CHATRELAY_TEST_DOTENV_PRESET", "process");

    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".env"), "CHATRELAY_TEST_DOTENV_PRESET=file\n").unwrap();

    load_dotenv_files(dir.path()).unwrap();

    assert_eq!(env::var("CHATRELAY_TEST_DOTENV_PRESET").unwrap(), "process");
}

#[test]
fn test_missing_dotenv_files_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_dotenv_files(dir.path()).unwrap().is_empty());
}
