//! # Core Module
//!
//! Configuration, startup errors and message utilities shared by the bot.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add response module with message splitting
//! - 1.0.0: Initial creation with config and error modules

pub mod config;
pub mod error;
pub mod response;

pub use config::{Config, FileConfig};
pub use error::ConfigError;
pub use response::{split_message, truncate_for_field, FIELD_LIMIT, MESSAGE_LIMIT};
