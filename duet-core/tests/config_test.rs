//! Tests for service configuration loading

use duet_core::config::{ConfigError, DuetConfig};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

#[test]
fn test_config_default() {
    let config = DuetConfig::default();
    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.storage.data_dir, PathBuf::from("./data"));
    assert_eq!(config.voices.catalog_path, PathBuf::from("data/voices.json"));
    assert_eq!(config.generator.program, "podcastfy-bridge");
    assert_eq!(config.generator.timeout_secs, 0);
    assert_eq!(config.logging.level, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_from_json() {
    let config = DuetConfig::from_str(r#"{"server": {"port": 9000}}"#).unwrap();
    assert_eq!(config.server.port, 9000);
    // Omitted sections keep their defaults
    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert_eq!(config.generator.program, "podcastfy-bridge");
}

#[test]
fn test_config_from_toml() {
    let content = r#"
[generator]
program = "/usr/local/bin/podcast-gen"
args = ["--quiet"]
timeout_secs = 600

[logging]
json = true
"#;
    let config = DuetConfig::from_str(content).unwrap();
    assert_eq!(config.generator.program, "/usr/local/bin/podcast-gen");
    assert_eq!(config.generator.args, vec!["--quiet".to_string()]);
    assert_eq!(config.generator.timeout_secs, 600);
    assert!(config.logging.json);
}

#[test]
fn test_config_from_yaml() {
    let content = "storage:\n  data_dir: /var/lib/duet\nvoices:\n  catalog_path: /etc/duet/voices.json\n";
    let config = DuetConfig::from_str(content).unwrap();
    assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/duet"));
    assert_eq!(config.voices.catalog_path, PathBuf::from("/etc/duet/voices.json"));
}

#[test]
fn test_config_unknown_format() {
    let result = DuetConfig::from_str("server = [unclosed");
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server]\nport = 8123").unwrap();

    let config = DuetConfig::from_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.server.port, 8123);
}

#[test]
fn test_config_from_file_rejects_traversal() {
    let result = DuetConfig::from_file("../../etc/passwd");
    assert!(matches!(result, Err(ConfigError::IoError(_))));
}

#[test]
fn test_config_from_missing_file() {
    let result = DuetConfig::from_file("definitely-not-here.toml");
    assert!(matches!(result, Err(ConfigError::IoError(_))));
}

#[test]
fn test_apply_env_overrides() {
    let vars: HashMap<&str, &str> = [
        ("DUET_HOST", "127.0.0.1"),
        ("DUET_PORT", "8088"),
        ("DUET_DATA_DIR", "/srv/duet"),
        ("DUET_GENERATOR", "gen"),
        ("DUET_GENERATOR_TIMEOUT", "30"),
        ("DUET_LOG_LEVEL", "debug"),
    ]
    .into_iter()
    .collect();

    let mut config = DuetConfig::default();
    config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(config.server.bind_address, "127.0.0.1");
    assert_eq!(config.server.port, 8088);
    assert_eq!(config.storage.data_dir, PathBuf::from("/srv/duet"));
    assert_eq!(config.generator.program, "gen");
    assert_eq!(config.generator.timeout_secs, 30);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_apply_env_ignores_unparseable_port() {
    let mut config = DuetConfig::default();
    config.apply_env(|key| (key == "DUET_PORT").then(|| "not-a-port".to_string()));
    assert_eq!(config.server.port, 8000);
}

#[test]
fn test_config_validation() {
    let mut config = DuetConfig::default();
    config.server.port = 0;
    assert!(config.validate().is_err());

    let mut config = DuetConfig::default();
    config.generator.program = "   ".to_string();
    assert!(config.validate().is_err());

    let mut config = DuetConfig::default();
    config.storage.data_dir = PathBuf::new();
    assert!(config.validate().is_err());
}
