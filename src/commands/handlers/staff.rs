//! Staff command handlers
//!
//! Handles: echo, setstatus
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Missing-argument warnings sent as embeds
//! - 1.0.0: echo, setstatus

use anyhow::Result;
use async_trait::async_trait;
use log::info;

use crate::commands::context::InvocationContext;
use crate::commands::handler::Command;
use crate::commands::permission::Permission;

const NOT_ENOUGH_ARGS: &str = "Not enough arguments supplied";

/// Handler for `echo`: repeats its arguments into the channel
pub struct EchoCommand {
    permission: Permission,
}

impl EchoCommand {
    pub fn new(permission: Permission) -> Self {
        Self { permission }
    }
}

#[async_trait]
impl Command for EchoCommand {
    fn name(&self) -> &str {
        "echo"
    }

    fn aliases(&self) -> &[&str] {
        &["say"]
    }

    fn description(&self) -> &str {
        "Repeat a message as the bot"
    }

    fn usage(&self) -> &str {
        "echo <message>"
    }

    fn category(&self) -> &str {
        "Staff"
    }

    fn permission(&self) -> Permission {
        self.permission.clone()
    }

    async fn invoke(&self, ctx: &InvocationContext) -> Result<()> {
        if ctx.args().is_empty() {
            return ctx.warn(NOT_ENOUGH_ARGS).await;
        }
        ctx.reply(&ctx.joined_args()).await
    }
}

/// Handler for `setstatus`: updates the bot's activity
pub struct SetStatusCommand {
    permission: Permission,
}

impl SetStatusCommand {
    pub fn new(permission: Permission) -> Self {
        Self { permission }
    }
}

#[async_trait]
impl Command for SetStatusCommand {
    fn name(&self) -> &str {
        "setstatus"
    }

    fn aliases(&self) -> &[&str] {
        &["status", "updatestatus"]
    }

    fn description(&self) -> &str {
        "Update the bot's current status"
    }

    fn usage(&self) -> &str {
        "setstatus <status>"
    }

    fn category(&self) -> &str {
        "Staff"
    }

    fn permission(&self) -> Permission {
        self.permission.clone()
    }

    async fn invoke(&self, ctx: &InvocationContext) -> Result<()> {
        if ctx.args().is_empty() {
            return ctx.warn(NOT_ENOUGH_ARGS).await;
        }

        let status = ctx.joined_args();
        ctx.event().set_activity(&status).await?;
        info!(
            "[{}] Status set to '{status}' by {}",
            ctx.request_id(),
            ctx.author().id
        );
        ctx.react('✅').await
    }
}
