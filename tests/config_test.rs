//! Tests for configuration loading and overrides.

use std::io::Write;
use std::time::Duration;

use chesshub::ServerConfig;

#[test]
fn test_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 3000);
    assert_eq!(config.send_timeout(), Duration::from_millis(2_000));
    assert_eq!(*config.channel_capacity(), 32);
    assert!(config.tokens().is_empty());
    assert!(config.matches().is_empty());
}

#[test]
fn test_from_file_with_partial_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
port = 4040
send_timeout_ms = 500

[[tokens]]
token = "tok-alice"
identity = "alice"

[[matches]]
id = 1
name = "weekly club game"
white = "alice"
"#
    )
    .unwrap();

    let config = ServerConfig::from_file(file.path()).unwrap();
    // Overridden fields take; everything else keeps its default.
    assert_eq!(*config.port(), 4040);
    assert_eq!(config.send_timeout(), Duration::from_millis(500));
    assert_eq!(config.host(), "127.0.0.1");

    assert_eq!(config.tokens().len(), 1);
    assert_eq!(config.tokens()[0].identity(), "alice");

    assert_eq!(config.matches().len(), 1);
    let seed = &config.matches()[0];
    assert_eq!(*seed.id(), 1);
    assert_eq!(seed.white().as_deref(), Some("alice"));
    assert_eq!(seed.black(), &None);
}

#[test]
fn test_from_file_missing_path_errors() {
    let err = ServerConfig::from_file("/nonexistent/chesshub.toml").unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn test_from_file_rejects_bad_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "port = \"not a number\"").unwrap();
    let err = ServerConfig::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("failed to parse config"));
}

#[test]
fn test_cli_overrides_replace_host_and_port() {
    let mut config = ServerConfig::default();
    config.apply_overrides(Some("0.0.0.0".to_string()), Some(9000));
    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(*config.port(), 9000);

    // Absent flags leave the config alone.
    config.apply_overrides(None, None);
    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(*config.port(), 9000);
}
