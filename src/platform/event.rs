//! Inbound message event seam
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Warning replies
//! - 1.0.0: Initial event trait

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};

/// Identity of a message author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: UserId,
    pub name: String,
    pub bot: bool,
}

/// A message-created event as seen by the dispatcher.
///
/// The accessor methods are synchronous and must not perform I/O: the
/// dispatcher calls them on the event-delivery path. The async methods are
/// only called from inside command invocations.
#[async_trait]
pub trait MessageEvent: Send + Sync {
    /// Raw message text
    fn content(&self) -> &str;

    fn author(&self) -> &Author;

    /// Whether the message was sent by this bot
    fn is_own_message(&self) -> bool;

    /// Guild the message was posted in, `None` for direct messages
    fn guild_id(&self) -> Option<GuildId>;

    fn channel_id(&self) -> ChannelId;

    /// The author's roles in the originating guild, if they can be resolved
    fn author_roles(&self) -> Option<&[RoleId]>;

    /// Send a message to the originating channel
    async fn reply(&self, content: &str) -> Result<()>;

    /// Send a highlighted warning to the originating channel
    async fn warn(&self, text: &str) -> Result<()>;

    /// React to the originating message
    async fn react(&self, emoji: char) -> Result<()>;

    /// Update the bot's displayed activity
    async fn set_activity(&self, activity: &str) -> Result<()>;
}
