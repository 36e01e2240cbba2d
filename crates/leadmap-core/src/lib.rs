pub mod app_config;
pub mod config;
pub mod engine_config;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, log_level_from_env};
pub use engine_config::{load_engine_config, EngineConfig};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read engine config {path}: {source}")]
    EngineFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse engine config: {0}")]
    EngineFileParse(#[from] serde_yaml::Error),

    #[error("engine config validation failed: {0}")]
    Validation(String),
}
