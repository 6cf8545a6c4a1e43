//! Integration tests for configuration loading and validation

#![allow(clippy::expect_used, clippy::unwrap_used)]

use memory_packets::config::{LoggingConfig, PacketConfig, MAX_PAYLOAD_SIZE};
use memory_packets::{Endianness, Framing, Packet, PacketError};
use std::sync::Mutex;
use tracing::Level;

/// Serializes tests that touch process-wide environment variables
static ENV_LOCK: Mutex<()> = Mutex::new(());

const ENV_VARS: [&str; 4] = [
    "MEMORY_PACKETS_ENDIANNESS",
    "MEMORY_PACKETS_INITIAL_CAPACITY",
    "MEMORY_PACKETS_MAX_PAYLOAD_SIZE",
    "MEMORY_PACKETS_LOG_LEVEL",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

#[test]
fn test_default_config_validates() {
    let config = PacketConfig::default();
    let errors = config.validate();
    assert!(
        errors.is_empty(),
        "Default config should be valid, but got errors: {:?}",
        errors
    );
    assert!(config.validate_strict().is_ok());
}

#[test]
fn test_zero_max_payload_size() {
    let config = PacketConfig::default_with_overrides(|c| c.max_payload_size = 0);
    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("cannot be 0")));
}

#[test]
fn test_max_payload_size_beyond_u32() {
    let config =
        PacketConfig::default_with_overrides(|c| c.max_payload_size = u32::MAX as usize + 1);
    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("too large")));
}

#[test]
fn test_initial_capacity_above_max() {
    let config = PacketConfig::default_with_overrides(|c| {
        c.max_payload_size = 1024;
        c.initial_capacity = 4096;
    });
    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("Initial capacity")));
}

#[test]
fn test_empty_app_name() {
    let mut config = PacketConfig::default();
    config.logging.app_name = String::new();
    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("cannot be empty")));
}

#[test]
fn test_long_app_name() {
    let logging = LoggingConfig {
        app_name: "x".repeat(65),
        ..LoggingConfig::default()
    };
    assert!(logging.validate().iter().any(|e| e.contains("too long")));
}

#[test]
fn test_validate_strict_reports_all_errors() {
    let config = PacketConfig::default_with_overrides(|c| {
        c.max_payload_size = 0;
        c.logging.app_name = String::new();
    });
    match config.validate_strict() {
        Err(PacketError::ConfigError(msg)) => {
            assert!(msg.contains("Max payload size"));
            assert!(msg.contains("Application name"));
        }
        other => panic!("Unexpected result: {other:?}"),
    }
}

#[test]
fn test_from_toml() {
    let config = PacketConfig::from_toml(
        r#"
        endianness = "big"
        initial_capacity = 64
        max_payload_size = 2048

        [logging]
        app_name = "reader"
        log_level = "debug"
        log_to_console = true
        json_format = true
        "#,
    )
    .expect("valid TOML");

    assert_eq!(config.endianness, Endianness::Big);
    assert_eq!(config.initial_capacity, 64);
    assert_eq!(config.max_payload_size, 2048);
    assert_eq!(config.logging.app_name, "reader");
    assert_eq!(config.logging.log_level, Level::DEBUG);
    assert!(config.logging.json_format);
}

#[test]
fn test_from_toml_uses_defaults_for_missing_keys() {
    let config = PacketConfig::from_toml("endianness = \"little\"").expect("valid TOML");
    assert_eq!(config.endianness, Endianness::Little);
    assert_eq!(config.max_payload_size, MAX_PAYLOAD_SIZE);
    assert_eq!(config.logging.log_level, Level::INFO);
}

#[test]
fn test_from_toml_rejects_bad_values() {
    assert!(matches!(
        PacketConfig::from_toml("endianness = \"middle\""),
        Err(PacketError::ConfigError(_))
    ));
    assert!(PacketConfig::from_toml("[logging]\napp_name = \"a\"\nlog_level = \"loud\"\nlog_to_console = true\njson_format = false").is_err());
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("packets.toml");

    let config = PacketConfig::default_with_overrides(|c| {
        c.endianness = Endianness::Big;
        c.initial_capacity = 32;
    });
    config.save_to_file(&path).expect("save");

    let loaded = PacketConfig::from_file(&path).expect("load");
    assert_eq!(loaded.endianness, Endianness::Big);
    assert_eq!(loaded.initial_capacity, 32);
}

#[test]
fn test_missing_file() {
    let result = PacketConfig::from_file("/definitely/not/here.toml");
    assert!(matches!(result, Err(PacketError::ConfigError(_))));
}

#[test]
fn test_example_config_parses() {
    let text = PacketConfig::example_config();
    assert!(text.contains("endianness"));
    assert!(PacketConfig::from_toml(&text).is_ok());
}

#[test]
fn test_from_env_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let config = PacketConfig::from_env().expect("from_env never fails");
    assert_eq!(config.endianness, Endianness::default());
    assert_eq!(config.max_payload_size, MAX_PAYLOAD_SIZE);
    assert!(config.validate().is_empty());
}

#[test]
fn test_from_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    std::env::set_var("MEMORY_PACKETS_ENDIANNESS", "big");
    std::env::set_var("MEMORY_PACKETS_INITIAL_CAPACITY", "64");
    std::env::set_var("MEMORY_PACKETS_MAX_PAYLOAD_SIZE", "not-a-number");
    std::env::set_var("MEMORY_PACKETS_LOG_LEVEL", "debug");

    let config = PacketConfig::from_env().expect("from_env never fails");
    clear_env();

    assert_eq!(config.endianness, Endianness::Big);
    assert_eq!(config.initial_capacity, 64);
    // Unparsable values fall back to the default
    assert_eq!(config.max_payload_size, MAX_PAYLOAD_SIZE);
    assert_eq!(config.logging.log_level, Level::DEBUG);
}

#[test]
fn test_packet_with_config() {
    let config = PacketConfig::default_with_overrides(|c| c.endianness = Endianness::Big);
    let mut packet = Packet::with_config(Framing::LengthPrefixed, &config);
    assert_eq!(packet.position(), 4);
    assert_eq!(packet.endianness(), Endianness::Big);

    packet.write_u16(0x0102);
    packet.write_length();
    assert_eq!(packet.as_bytes(), &[0, 0, 0, 2, 1, 2]);
}
