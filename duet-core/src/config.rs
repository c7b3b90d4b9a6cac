// Service configuration for Duet

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Artifact storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Root directory; transcripts and audio live underneath it
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

/// Voice catalog configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoicesConfig {
    pub catalog_path: PathBuf,
}

impl Default for VoicesConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("data/voices.json"),
        }
    }
}

/// External generation program configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Executable invoked for every generation call
    pub program: String,
    /// Extra arguments passed before the call payload is written to stdin
    pub args: Vec<String>,
    /// Per-call deadline in seconds, 0 disables it
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            program: "podcastfy-bridge".to_string(),
            args: Vec::new(),
            timeout_secs: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete Duet configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuetConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub voices: VoicesConfig,
    pub generator: GeneratorConfig,
    pub logging: LoggingConfig,
}

impl DuetConfig {
    /// Load configuration from file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        if path.contains("..") || path.contains("//") || path.contains("\\\\") {
            return Err(ConfigError::IoError(format!(
                "Path traversal detected: '{}'",
                path
            )));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path, e)))?;
        Self::from_str(&content)
    }

    /// Load configuration from string (JSON, then TOML, then YAML)
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        if let Ok(config) = serde_json::from_str::<DuetConfig>(content) {
            return Ok(config);
        }

        if let Ok(config) = toml::from_str::<DuetConfig>(content) {
            return Ok(config);
        }

        if let Ok(config) = serde_yaml::from_str::<DuetConfig>(content) {
            return Ok(config);
        }

        Err(ConfigError::ParseError("Unknown format".to_string()))
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Override fields from `DUET_*` variables resolved through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("DUET_HOST") {
            self.server.bind_address = host;
        }

        if let Some(port) = lookup("DUET_PORT") {
            if let Ok(p) = port.parse::<u16>() {
                self.server.port = p;
            }
        }

        if let Some(data_dir) = lookup("DUET_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(data_dir);
        }

        if let Some(voices) = lookup("DUET_VOICES_FILE") {
            self.voices.catalog_path = PathBuf::from(voices);
        }

        if let Some(program) = lookup("DUET_GENERATOR") {
            self.generator.program = program;
        }

        if let Some(timeout) = lookup("DUET_GENERATOR_TIMEOUT") {
            if let Ok(t) = timeout.parse::<u64>() {
                self.generator.timeout_secs = t;
            }
        }

        if let Some(level) = lookup("DUET_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port cannot be 0".to_string()
            ));
        }

        if self.server.bind_address.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.bind_address cannot be empty".to_string()
            ));
        }

        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "storage.data_dir cannot be empty".to_string()
            ));
        }

        if self.generator.program.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "generator.program cannot be empty".to_string()
            ));
        }

        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::Configuration(err.to_string())
    }
}
