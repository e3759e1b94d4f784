//! Integration tests for fieldguard-config

use fieldguard_config::*;
use std::env;
use std::fs;

#[test]
fn test_from_env_overrides() {
    unsafe {
        env::set_var("FGTEST_ENV_DELIVERABILITY_ENABLED", "true");
        env::set_var("FGTEST_ENV_DELIVERABILITY_TIMEOUT_MS", "750");
        env::set_var("FGTEST_ENV_DELIVERABILITY_ADDRESS_FALLBACK", "off");
    }

    let config = FieldguardConfig::from_env("FGTEST_ENV").unwrap();
    assert!(config.deliverability.enabled);
    assert_eq!(config.deliverability.timeout_ms, 750);
    assert!(!config.deliverability.address_fallback);

    unsafe {
        env::remove_var("FGTEST_ENV_DELIVERABILITY_ENABLED");
        env::remove_var("FGTEST_ENV_DELIVERABILITY_TIMEOUT_MS");
        env::remove_var("FGTEST_ENV_DELIVERABILITY_ADDRESS_FALLBACK");
    }
}

#[test]
fn test_from_env_rejects_garbage() {
    unsafe {
        env::set_var("FGTEST_BAD_DELIVERABILITY_TIMEOUT_MS", "soon");
    }

    let result = FieldguardConfig::from_env("FGTEST_BAD");
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

    unsafe {
        env::remove_var("FGTEST_BAD_DELIVERABILITY_TIMEOUT_MS");
    }
}

#[test]
fn test_from_toml_file() {
    let path = env::temp_dir().join(format!("fieldguard-config-{}.toml", std::process::id()));
    fs::write(
        &path,
        "[deliverability]\nenabled = true\ntimeout_ms = 1200\n",
    )
    .unwrap();

    let config = FieldguardConfig::from_file(&path).unwrap();
    assert!(config.deliverability.enabled);
    assert_eq!(config.deliverability.timeout_ms, 1200);

    fs::remove_file(&path).ok();
}

#[test]
fn test_from_missing_file() {
    let result = FieldguardConfig::from_file("/nonexistent/fieldguard/settings.toml");
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn test_load_dotenv_explicit_path() {
    let path = env::temp_dir().join(format!("fieldguard-{}.env", std::process::id()));
    fs::write(&path, "FGTEST_DOT_DELIVERABILITY_TIMEOUT_MS=900\n").unwrap();

    let config = FieldguardConfig::load_dotenv(Some(&path), "FGTEST_DOT").unwrap();
    assert_eq!(config.deliverability.timeout_ms, 900);

    fs::remove_file(&path).ok();
    unsafe {
        env::remove_var("FGTEST_DOT_DELIVERABILITY_TIMEOUT_MS");
    }
}
