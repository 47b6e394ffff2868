//! Built-in command implementations
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add EchoCommand
//! - 1.0.0: PingCommand, HelpCommand, SetStatusCommand

pub mod staff;
pub mod utility;

use std::sync::Arc;

use super::handler::Command;
use crate::core::Config;

/// Create all built-in commands
///
/// Staff commands take their permission from the configured staff role and owner.
pub fn create_builtin_commands(config: &Config) -> Vec<Arc<dyn Command>> {
    let staff = config.staff_permission();
    vec![
        Arc::new(utility::PingCommand),
        Arc::new(utility::HelpCommand),
        Arc::new(staff::EchoCommand::new(staff.clone())),
        Arc::new(staff::SetStatusCommand::new(staff)),
    ]
}
