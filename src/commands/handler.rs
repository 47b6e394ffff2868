//! Prefix command trait
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation for prefix command dispatch

use anyhow::Result;
use async_trait::async_trait;

use super::context::InvocationContext;
use super::permission::Permission;

/// A registered prefix command
///
/// Each command implements this trait and is registered once with a
/// [`Registry`](super::registry::Registry). The same instance is invoked
/// concurrently for unrelated messages, so implementations must be stateless
/// or synchronize internally.
///
/// # Example
///
/// ```ignore
/// pub struct PingCommand;
///
/// #[async_trait]
/// impl Command for PingCommand {
///     fn name(&self) -> &str {
///         "ping"
///     }
///
///     fn description(&self) -> &str {
///         "Check that the bot is responding"
///     }
///
///     async fn invoke(&self, ctx: &InvocationContext) -> Result<()> {
///         ctx.reply("Pong!").await
///     }
/// }
/// ```
#[async_trait]
pub trait Command: Send + Sync {
    /// Canonical name, matched case-insensitively
    fn name(&self) -> &str;

    /// Additional names the command answers to
    ///
    /// The canonical name is always an alias of itself and does not need to be listed.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    fn description(&self) -> &str;

    /// Usage line shown by `help`, without the prefix
    fn usage(&self) -> &str {
        self.name()
    }

    /// Grouping shown by `help`
    fn category(&self) -> &str {
        "General"
    }

    /// Requirement checked for every invocation
    fn permission(&self) -> Permission {
        Permission::None
    }

    /// Run the command
    ///
    /// Errors are reported by the dispatcher and never shown to the author.
    async fn invoke(&self, ctx: &InvocationContext) -> Result<()>;
}
