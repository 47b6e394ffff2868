//! Gateway message events backed by serenity
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Warnings are sent as yellow embeds
//! - 1.0.0: Initial serenity adapter

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Activity;
use serenity::model::id::{ChannelId, GuildId, RoleId};
use serenity::prelude::Context;

use super::event::{Author, MessageEvent};
use crate::core::{split_message, truncate_for_field};

/// Accent color of warning embeds
const WARNING_COLOR: u32 = 0xF1C40F;

/// A gateway message together with the serenity context it arrived on
pub struct SerenityMessage {
    ctx: Context,
    msg: Message,
    author: Author,
    own: bool,
}

impl SerenityMessage {
    pub fn new(ctx: Context, msg: Message) -> Self {
        let author = Author {
            id: msg.author.id,
            name: msg.author.name.clone(),
            bot: msg.author.bot,
        };
        let own = msg.author.id == ctx.cache.current_user_id();
        Self {
            ctx,
            msg,
            author,
            own,
        }
    }
}

#[async_trait]
impl MessageEvent for SerenityMessage {
    fn content(&self) -> &str {
        &self.msg.content
    }

    fn author(&self) -> &Author {
        &self.author
    }

    fn is_own_message(&self) -> bool {
        self.own
    }

    fn guild_id(&self) -> Option<GuildId> {
        self.msg.guild_id
    }

    fn channel_id(&self) -> ChannelId {
        self.msg.channel_id
    }

    fn author_roles(&self) -> Option<&[RoleId]> {
        // Gateway guild messages carry the partial member; DMs do not.
        self.msg.guild_id?;
        self.msg.member.as_ref().map(|m| m.roles.as_slice())
    }

    async fn reply(&self, content: &str) -> Result<()> {
        for part in split_message(content) {
            if part.trim().is_empty() {
                continue;
            }
            self.msg.channel_id.say(&self.ctx.http, part).await?;
        }
        Ok(())
    }

    async fn warn(&self, text: &str) -> Result<()> {
        self.msg
            .channel_id
            .send_message(&self.ctx.http, |m| {
                m.embed(|e| {
                    e.color(WARNING_COLOR)
                        .field("⚠️ WARNING", truncate_for_field(text), false)
                })
            })
            .await?;
        Ok(())
    }

    async fn react(&self, emoji: char) -> Result<()> {
        self.msg.react(&self.ctx.http, emoji).await?;
        Ok(())
    }

    async fn set_activity(&self, activity: &str) -> Result<()> {
        self.ctx.set_activity(Activity::playing(activity)).await;
        Ok(())
    }
}
