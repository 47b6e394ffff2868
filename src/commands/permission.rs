//! Command permission requirements
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add `Any` for staff-or-owner requirements
//! - 1.0.0: None, Role and User requirements

use serenity::model::id::{RoleId, UserId};

use super::context::InvocationContext;
use crate::platform::MessageEvent;

/// What an invoking identity must hold to run a command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Permission {
    /// Always satisfied
    #[default]
    None,
    /// Author holds this role in the originating guild
    Role(RoleId),
    /// Author is exactly this user
    User(UserId),
    /// At least one of the inner requirements is satisfied; empty is never satisfied
    Any(Vec<Permission>),
}

impl Permission {
    /// Evaluate the requirement for an invocation
    pub fn is_satisfied(&self, ctx: &InvocationContext) -> bool {
        self.allows(ctx.event())
    }

    /// Evaluate the requirement against the originating event
    pub fn allows(&self, event: &dyn MessageEvent) -> bool {
        match self {
            Permission::None => true,
            Permission::Role(role) => event
                .author_roles()
                .is_some_and(|roles| roles.contains(role)),
            Permission::User(user) => event.author().id == *user,
            Permission::Any(options) => options.iter().any(|p| p.allows(event)),
        }
    }
}
