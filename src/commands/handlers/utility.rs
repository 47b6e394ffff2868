//! Utility command handlers
//!
//! Handles: ping, help
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: `help <command>` shows usage and aliases for a single command
//! - 1.0.0: Initial ping and help commands

use anyhow::Result;
use async_trait::async_trait;
use log::info;

use crate::commands::context::InvocationContext;
use crate::commands::handler::Command;
use crate::commands::registry::Registry;

/// Handler for `ping`
pub struct PingCommand;

#[async_trait]
impl Command for PingCommand {
    fn name(&self) -> &str {
        "ping"
    }

    fn description(&self) -> &str {
        "Check that the bot is responding"
    }

    async fn invoke(&self, ctx: &InvocationContext) -> Result<()> {
        ctx.reply("Pong!").await?;
        info!("[{}] Ping command completed for user {}", ctx.request_id(), ctx.author().id);
        Ok(())
    }
}

/// Handler for `help`
pub struct HelpCommand;

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn aliases(&self) -> &[&str] {
        &["commands"]
    }

    fn description(&self) -> &str {
        "List commands, or show how to use one"
    }

    fn usage(&self) -> &str {
        "help [command]"
    }

    async fn invoke(&self, ctx: &InvocationContext) -> Result<()> {
        let registry = ctx.registry();
        let text = match ctx.args().first() {
            Some(word) => match command_help(registry, word) {
                Some(text) => text,
                // Unknown names get the same silence as unknown commands.
                None => return Ok(()),
            },
            None => overview(registry),
        };
        ctx.reply(&text).await
    }
}

fn overview(registry: &Registry) -> String {
    let prefix = registry.prefix();
    let mut text = String::from("**Available Commands:**\n");
    for (category, commands) in registry.categories() {
        text.push_str(&format!("\n**{category}**\n"));
        for command in commands {
            text.push_str(&format!(
                "`{prefix}{}` - {}\n",
                command.usage(),
                command.description()
            ));
        }
    }
    text
}

fn command_help(registry: &Registry, word: &str) -> Option<String> {
    let name = registry.resolve_alias(word)?;
    let command = registry.lookup(name)?;
    let prefix = registry.prefix();

    let mut text = format!(
        "`{prefix}{}` - {}\nCategory: {}",
        command.usage(),
        command.description(),
        command.category()
    );
    let aliases: Vec<&str> = registry
        .aliases_of(name)
        .into_iter()
        .filter(|a| *a != name)
        .collect();
    if !aliases.is_empty() {
        text.push_str(&format!("\nAliases: {}", aliases.join(", ")));
    }
    Some(text)
}
