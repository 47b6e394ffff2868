// Core layer - configuration, startup errors, message utilities
pub mod core;

// Platform layer - message events and the serenity adapter
pub mod platform;

// Application layer
pub mod commands;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::core::{Config, ConfigError};

pub use commands::{
    create_builtin_commands, Command, Dispatch, Dispatcher, InvocationContext, InvocationPool,
    LogFaultReporter, Permission, Registry,
};
pub use platform::{MessageEvent, SerenityMessage};
