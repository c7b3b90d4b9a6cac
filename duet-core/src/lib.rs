pub mod error;
pub mod config;

pub use error::{Error, ErrorClass, Result};
pub use config::{
    ConfigError, DuetConfig, GeneratorConfig, LoggingConfig, ServerConfig, StorageConfig,
    VoicesConfig,
};
