use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;

use herald::commands::{
    create_builtin_commands, DefaultSourcePolicy, Dispatcher, InvocationPool, LogFaultReporter,
    Registry,
};
use herald::core::Config;
use herald::platform::SerenityMessage;

struct Handler {
    dispatcher: Dispatcher,
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        let event = Arc::new(SerenityMessage::new(ctx, msg));
        // Rejections are logged by the dispatcher; submitted invocations run on the pool.
        self.dispatcher.dispatch(event);
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        if let Some(shard) = ready.shard {
            info!("⚡ Shard: {}/{}", shard[0] + 1, shard[1]);
        }

        let registry = self.dispatcher.registry();
        info!(
            "⌨️ {} commands available with prefix '{}'",
            registry.len(),
            registry.prefix()
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting command bot...");

    // Registration errors abort startup before the gateway connects.
    let mut registry = Registry::new(config.command_prefix.clone())?;
    registry.register_all(create_builtin_commands(&config))?;
    for command in registry.commands() {
        info!("   - {}{} ({})", config.command_prefix, command.name(), command.category());
    }

    let pool = InvocationPool::new(config.pool_config(), Arc::new(LogFaultReporter));
    let policy = DefaultSourcePolicy::new(config.ignored_user_ids.iter().copied());
    let dispatcher = Dispatcher::with_policy(Arc::new(registry), pool, Arc::new(policy));

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(Handler { dispatcher })
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");
    info!("Gateway intents: {intents:?}");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
