// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Environment-based configuration tests for saltant-sdk.

use std::env;
use std::time::Duration;

use saltant_sdk::{AuthScheme, Client, ClientConfig, SdkError};
use serial_test::serial;

const VARS: [&str; 6] = [
    "SALTANT_API_URL",
    "SALTANT_AUTH_TOKEN",
    "SALTANT_AUTH_SCHEME",
    "SALTANT_REQUEST_TIMEOUT_SECS",
    "SALTANT_POLL_INTERVAL_MS",
    "SALTANT_TEST_AUTHENTICATION",
];

fn clear_env() {
    // SAFETY: Tests are marked #[serial] to run sequentially, avoiding env var races
    unsafe {
        for var in VARS {
            env::remove_var(var);
        }
    }
}

fn set_env(key: &str, value: &str) {
    // SAFETY: Tests are marked #[serial] to run sequentially, avoiding env var races
    unsafe {
        env::set_var(key, value);
    }
}

#[test]
#[serial]
fn test_missing_url_is_config_error() {
    clear_env();
    set_env("SALTANT_AUTH_TOKEN", "secret");

    let err = ClientConfig::from_env().unwrap_err();
    assert!(matches!(err, SdkError::Config(ref msg) if msg.contains("SALTANT_API_URL")));
}

#[test]
#[serial]
fn test_missing_token_is_config_error() {
    clear_env();
    set_env("SALTANT_API_URL", "http://localhost:8000/api/");

    let err = ClientConfig::from_env().unwrap_err();
    assert!(matches!(err, SdkError::Config(ref msg) if msg.contains("SALTANT_AUTH_TOKEN")));
}

#[test]
#[serial]
fn test_client_from_env_fails_before_network() {
    clear_env();
    // Nothing listens here; a network attempt would surface as a connection error.
    set_env("SALTANT_API_URL", "http://127.0.0.1:9/api/");

    let err = Client::from_env().unwrap_err();
    assert!(matches!(err, SdkError::Config(_)));
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    set_env("SALTANT_API_URL", "https://jobs.example.com/api/");
    set_env("SALTANT_AUTH_TOKEN", "secret");

    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.base_api_url, "https://jobs.example.com/api/");
    assert_eq!(config.auth_token, "secret");
    assert_eq!(config.auth_scheme, AuthScheme::Token);
    assert_eq!(config.request_timeout, Duration::from_secs(90));
    assert_eq!(config.poll_interval, Duration::from_secs(5));
    assert!(config.test_if_authenticated);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    set_env("SALTANT_API_URL", "https://jobs.example.com/api");
    set_env("SALTANT_AUTH_TOKEN", "jwt-access");
    set_env("SALTANT_AUTH_SCHEME", "bearer");
    set_env("SALTANT_REQUEST_TIMEOUT_SECS", "10");
    set_env("SALTANT_POLL_INTERVAL_MS", "750");
    set_env("SALTANT_TEST_AUTHENTICATION", "false");

    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.authorization(), "Bearer jwt-access");
    assert_eq!(config.request_timeout, Duration::from_secs(10));
    assert_eq!(config.poll_interval, Duration::from_millis(750));
    assert!(!config.test_if_authenticated);
    clear_env();
}

#[test]
#[serial]
fn test_from_env_invalid_values() {
    clear_env();
    set_env("SALTANT_API_URL", "https://jobs.example.com/api/");
    set_env("SALTANT_AUTH_TOKEN", "secret");
    set_env("SALTANT_REQUEST_TIMEOUT_SECS", "soon");

    let err = ClientConfig::from_env().unwrap_err();
    assert!(matches!(err, SdkError::Config(ref msg) if msg.contains("SALTANT_REQUEST_TIMEOUT_SECS")));

    clear_env();
    set_env("SALTANT_API_URL", "ftp://jobs.example.com/api/");
    set_env("SALTANT_AUTH_TOKEN", "secret");
    assert!(matches!(
        ClientConfig::from_env().unwrap_err(),
        SdkError::Config(_)
    ));
    clear_env();
}
