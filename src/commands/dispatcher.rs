//! # Prefix Command Dispatcher
//!
//! Turns inbound messages into authorized command invocations. Every message
//! is a dispatch candidate and passes through the same gates in order:
//!
//! 1. source policy (own messages, other bots, ignored users)
//! 2. prefix match
//! 3. parse into a command word and arguments
//! 4. alias resolution
//! 5. command lookup
//! 6. context construction
//! 7. permission check
//! 8. submission to the invocation pool
//!
//! A message that fails a gate is dropped without any reply. Unknown commands
//! and denied commands are indistinguishable to the author.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Ignored user list in the default source policy
//! - 1.1.0: Report pool overload as a dispatch rejection
//! - 1.0.0: Initial pipeline

use log::{debug, info, warn};
use serenity::model::id::UserId;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use super::context::InvocationContext;
use super::parser::parse;
use super::pool::{InvocationHandle, InvocationPool};
use super::registry::Registry;
use crate::platform::MessageEvent;

/// Decides which authors may trigger commands at all
pub trait SourcePolicy: Send + Sync {
    fn is_valid(&self, event: &dyn MessageEvent) -> bool;
}

/// Ignores the bot itself, other bots and an explicit list of users
#[derive(Debug, Clone, Default)]
pub struct DefaultSourcePolicy {
    ignored: HashSet<UserId>,
}

impl DefaultSourcePolicy {
    pub fn new(ignored: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            ignored: ignored.into_iter().collect(),
        }
    }
}

impl SourcePolicy for DefaultSourcePolicy {
    fn is_valid(&self, event: &dyn MessageEvent) -> bool {
        let author = event.author();
        !event.is_own_message() && !author.bot && !self.ignored.contains(&author.id)
    }
}

/// Why a message did not produce an invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    InvalidSource,
    NoPrefix,
    NoCommand,
    UnknownCommand,
    MissingCommand,
    Unauthorized,
    Overloaded,
}

/// Terminal state of one dispatch
#[derive(Debug)]
pub enum Dispatch {
    Rejected(Rejection),
    Submitted(InvocationHandle),
}

impl Dispatch {
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Dispatch::Rejected(reason) => Some(*reason),
            Dispatch::Submitted(_) => None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, Dispatch::Submitted(_))
    }

    /// Wait for the invocation, if one was started
    pub async fn join(self) {
        if let Dispatch::Submitted(handle) = self {
            handle.join().await;
        }
    }
}

/// Drives messages through the dispatch pipeline
///
/// Cheap to clone; clones share the registry and the pool.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
    pool: InvocationPool,
    policy: Arc<dyn SourcePolicy>,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>, pool: InvocationPool) -> Self {
        Self::with_policy(registry, pool, Arc::new(DefaultSourcePolicy::default()))
    }

    pub fn with_policy(
        registry: Arc<Registry>,
        pool: InvocationPool,
        policy: Arc<dyn SourcePolicy>,
    ) -> Self {
        Self {
            registry,
            pool,
            policy,
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Run one message through the pipeline
    ///
    /// Does no I/O and never waits for the invocation; must be called from
    /// within a tokio runtime.
    pub fn dispatch(&self, event: Arc<dyn MessageEvent>) -> Dispatch {
        if !self.policy.is_valid(event.as_ref()) {
            return Dispatch::Rejected(Rejection::InvalidSource);
        }

        if !self.registry.has_prefix(event.content()) {
            return Dispatch::Rejected(Rejection::NoPrefix);
        }

        let request_id = Uuid::new_v4();
        let author_id = event.author().id;

        let Some(parsed) = parse(event.content(), self.registry.prefix()) else {
            debug!("[{request_id}] 🔍 Prefix without command word from {author_id}");
            return Dispatch::Rejected(Rejection::NoCommand);
        };

        let Some(canonical) = self.registry.resolve_alias(&parsed.command) else {
            debug!(
                "[{request_id}] ❓ Unknown command `{}` from {author_id}",
                parsed.command
            );
            return Dispatch::Rejected(Rejection::UnknownCommand);
        };

        let Some(command) = self.registry.lookup(canonical) else {
            warn!("[{request_id}] Alias `{}` resolved to unregistered `{canonical}`", parsed.command);
            return Dispatch::Rejected(Rejection::MissingCommand);
        };

        let ctx = InvocationContext::new(
            request_id,
            command,
            parsed.command,
            parsed.args,
            event,
            Arc::clone(&self.registry),
        );

        if !ctx.command().permission().is_satisfied(&ctx) {
            debug!(
                "[{request_id}] 🚫 {author_id} lacks permission for `{}`",
                ctx.name()
            );
            return Dispatch::Rejected(Rejection::Unauthorized);
        }

        let guild = ctx
            .event()
            .guild_id()
            .map_or_else(|| "DM".to_string(), |id| id.to_string());
        info!(
            "[{}] 🎯 Dispatching `{}` | Args: {} | User: {} | Guild: {} | Channel: {}",
            request_id,
            ctx.name(),
            ctx.args().len(),
            author_id,
            guild,
            ctx.channel_id()
        );

        match self.pool.submit(ctx) {
            Ok(handle) => Dispatch::Submitted(handle),
            Err(e) => {
                warn!("[{request_id}] Dropping invocation: {e}");
                Dispatch::Rejected(Rejection::Overloaded)
            }
        }
    }
}
