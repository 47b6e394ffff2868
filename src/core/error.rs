//! Startup-time configuration errors
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use thiserror::Error;

/// Fatal errors raised while building the configuration or the command registry.
///
/// None of these can happen once the dispatcher is running.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{alias}` is already registered to `{existing}`, cannot register it for `{incoming}`")]
    DuplicateRegistration {
        alias: String,
        existing: String,
        incoming: String,
    },

    #[error("command `{command}` declares an unusable alias {alias:?}")]
    InvalidAlias { command: String, alias: String },

    #[error("command prefix must not be empty")]
    EmptyPrefix,

    #[error("missing required setting {0}")]
    MissingSetting(&'static str),

    #[error("invalid value {value:?} for {key}")]
    InvalidSetting { key: &'static str, value: String },

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
