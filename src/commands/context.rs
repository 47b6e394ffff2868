//! Per-invocation context
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use serenity::model::id::ChannelId;
use std::sync::Arc;
use uuid::Uuid;

use super::handler::Command;
use super::registry::Registry;
use crate::platform::{Author, MessageEvent};

/// Everything a command needs to handle one message
///
/// Built by the dispatcher after a command has been resolved and moved into
/// the invocation task. Commands that spawn their own background work must
/// clone what they need out of it.
pub struct InvocationContext {
    request_id: Uuid,
    command: Arc<dyn Command>,
    name: String,
    invoked_as: String,
    args: Vec<String>,
    event: Arc<dyn MessageEvent>,
    registry: Arc<Registry>,
}

impl InvocationContext {
    pub fn new(
        request_id: Uuid,
        command: Arc<dyn Command>,
        invoked_as: String,
        args: Vec<String>,
        event: Arc<dyn MessageEvent>,
        registry: Arc<Registry>,
    ) -> Self {
        let name = command.name().to_lowercase();
        Self {
            request_id,
            command,
            name,
            invoked_as,
            args,
            event,
            registry,
        }
    }

    /// Request ID used to correlate log lines for this message
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn command(&self) -> &Arc<dyn Command> {
        &self.command
    }

    /// Canonical (lower-cased) command name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The word the author actually typed, as typed
    pub fn invoked_as(&self) -> &str {
        &self.invoked_as
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Arguments joined back into free text with single spaces
    pub fn joined_args(&self) -> String {
        self.args.join(" ")
    }

    pub fn event(&self) -> &dyn MessageEvent {
        self.event.as_ref()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn author(&self) -> &Author {
        self.event.author()
    }

    pub fn channel_id(&self) -> ChannelId {
        self.event.channel_id()
    }

    pub async fn reply(&self, content: &str) -> Result<()> {
        self.event.reply(content).await
    }

    pub async fn warn(&self, text: &str) -> Result<()> {
        self.event.warn(text).await
    }

    pub async fn react(&self, emoji: char) -> Result<()> {
        self.event.react(emoji).await
    }
}

impl std::fmt::Debug for InvocationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvocationContext")
            .field("request_id", &self.request_id)
            .field("name", &self.name)
            .field("invoked_as", &self.invoked_as)
            .field("args", &self.args)
            .field("author", self.event.author())
            .finish()
    }
}
