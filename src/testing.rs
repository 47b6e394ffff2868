//! Test doubles for events, commands and fault reporting

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::commands::{Command, FaultReporter, InvocationContext, InvocationFault, Permission};
use crate::platform::{Author, MessageEvent};

/// A recording event: replies, warnings, reactions and activity updates are kept for inspection
pub struct MockEvent {
    content: String,
    author: Author,
    own: bool,
    guild_id: Option<GuildId>,
    channel_id: ChannelId,
    roles: Option<Vec<RoleId>>,
    pub replies: Mutex<Vec<String>>,
    pub warnings: Mutex<Vec<String>>,
    pub reactions: Mutex<Vec<char>>,
    pub activity: Mutex<Option<String>>,
}

impl MockEvent {
    /// A guild message from a member with no roles
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
            author: Author {
                id: UserId(1),
                name: "member".to_string(),
                bot: false,
            },
            own: false,
            guild_id: Some(GuildId(100)),
            channel_id: ChannelId(200),
            roles: Some(Vec::new()),
            replies: Mutex::new(Vec::new()),
            warnings: Mutex::new(Vec::new()),
            reactions: Mutex::new(Vec::new()),
            activity: Mutex::new(None),
        }
    }

    pub fn from_user(mut self, id: u64) -> Self {
        self.author.id = UserId(id);
        self
    }

    pub fn from_bot(mut self) -> Self {
        self.author.bot = true;
        self
    }

    pub fn own(mut self) -> Self {
        self.own = true;
        self.author.bot = true;
        self
    }

    pub fn with_roles(mut self, roles: &[u64]) -> Self {
        self.roles = Some(roles.iter().copied().map(RoleId).collect());
        self
    }

    pub fn in_channel(mut self, id: u64) -> Self {
        self.channel_id = ChannelId(id);
        self
    }

    /// A direct message: no guild, no resolvable roles
    pub fn direct(mut self) -> Self {
        self.guild_id = None;
        self.roles = None;
        self
    }

    pub fn replies(&self) -> Vec<String> {
        self.replies.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn reactions(&self) -> Vec<char> {
        self.reactions.lock().unwrap().clone()
    }

    pub fn activity(&self) -> Option<String> {
        self.activity.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageEvent for MockEvent {
    fn content(&self) -> &str {
        &self.content
    }

    fn author(&self) -> &Author {
        &self.author
    }

    fn is_own_message(&self) -> bool {
        self.own
    }

    fn guild_id(&self) -> Option<GuildId> {
        self.guild_id
    }

    fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    fn author_roles(&self) -> Option<&[RoleId]> {
        self.roles.as_deref()
    }

    async fn reply(&self, content: &str) -> Result<()> {
        self.replies.lock().unwrap().push(content.to_string());
        Ok(())
    }

    async fn warn(&self, text: &str) -> Result<()> {
        self.warnings.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn react(&self, emoji: char) -> Result<()> {
        self.reactions.lock().unwrap().push(emoji);
        Ok(())
    }

    async fn set_activity(&self, activity: &str) -> Result<()> {
        *self.activity.lock().unwrap() = Some(activity.to_string());
        Ok(())
    }
}

/// What a [`ScriptedCommand`] saw when it was invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seen {
    pub name: String,
    pub invoked_as: String,
    pub args: Vec<String>,
    pub author: UserId,
    pub channel: ChannelId,
}

/// How a [`ScriptedCommand`] behaves once it has recorded the invocation
#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    Succeed,
    Fail,
    Panic,
    Hang(Duration),
    /// Blocks the worker thread; abort cannot interrupt it
    Block(Duration),
}

/// A command that counts invocations and forwards what it saw on a channel
pub struct ScriptedCommand {
    name: &'static str,
    aliases: &'static [&'static str],
    permission: Permission,
    behavior: Behavior,
    calls: AtomicUsize,
    seen: mpsc::UnboundedSender<Seen>,
}

impl ScriptedCommand {
    pub fn new(
        name: &'static str,
        aliases: &'static [&'static str],
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<Seen>) {
        Self::build(name, aliases, Permission::None, Behavior::Succeed)
    }

    pub fn build(
        name: &'static str,
        aliases: &'static [&'static str],
        permission: Permission,
        behavior: Behavior,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<Seen>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scripted = Arc::new(Self {
            name,
            aliases,
            permission,
            behavior,
            calls: AtomicUsize::new(0),
            seen: tx,
        });
        (scripted, rx)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Command for ScriptedCommand {
    fn name(&self) -> &str {
        self.name
    }

    fn aliases(&self) -> &[&str] {
        self.aliases
    }

    fn description(&self) -> &str {
        "scripted test command"
    }

    fn permission(&self) -> Permission {
        self.permission.clone()
    }

    async fn invoke(&self, ctx: &InvocationContext) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.seen.send(Seen {
            name: ctx.name().to_string(),
            invoked_as: ctx.invoked_as().to_string(),
            args: ctx.args().to_vec(),
            author: ctx.author().id,
            channel: ctx.channel_id(),
        });

        match self.behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Fail => Err(anyhow::anyhow!("scripted failure")),
            Behavior::Panic => panic!("scripted panic"),
            Behavior::Hang(duration) => {
                tokio::time::sleep(duration).await;
                Ok(())
            }
            Behavior::Block(duration) => {
                std::thread::sleep(duration);
                Ok(())
            }
        }
    }
}

/// Collects reported faults as their display text
#[derive(Default)]
pub struct RecordingReporter {
    faults: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn faults(&self) -> Vec<String> {
        self.faults.lock().unwrap().clone()
    }
}

impl FaultReporter for RecordingReporter {
    fn report(&self, fault: &InvocationFault) {
        self.faults.lock().unwrap().push(fault.to_string());
    }
}
