//! Signal command bot - Main entry point.

use anyhow::Context;
use command_bot::commands::default_handlers;
use command_bot::config::Config;
use command_bot::error::AppResult;
use command_bot::gate::CommandGate;
use command_bot::logging::init_logging;
use command_bot::moderation::ModerationFilter;
use command_bot::registry::{CommandId, CommandRegistry};
use command_bot::scheduler::ReminderScheduler;
use command_bot::signal::SignalPlatform;
use command_bot::{Dispatcher, DispatcherConfig};
use cooldown_store::CooldownTracker;
use lookup_client::LookupClient;
use signal_client::{MessageReceiver, SignalClient};
use std::sync::Arc;
use tokio::signal;
use tokio_stream::StreamExt;
use tracing::{debug, error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.log)?;

    info!("Starting Signal command bot...");

    // Policy checks are fatal before anything connects
    let gate = CommandGate::new(&config.commands)?;
    let moderation = ModerationFilter::new(&config.moderation.banned_terms)?;
    if !moderation.is_active() {
        info!("Auto-moderation off, no banned terms configured");
    }

    // Initialize clients
    let lookup = Arc::new(
        LookupClient::new(config.lookup.endpoints(), config.lookup.timeout)
            .context("Failed to create lookup client")?,
    );

    let signal_client = SignalClient::new(&config.signal.service_url, &config.signal.phone_number)
        .context("Failed to create Signal client")?;

    if !signal_client.health_check().await {
        error!("Signal API not reachable at {}", config.signal.service_url);
        return Err(anyhow::anyhow!("Signal API not reachable").into());
    }
    info!("Signal API healthy");

    let platform = Arc::new(SignalPlatform::new(
        signal_client.clone(),
        config.bot.moderators.iter().cloned(),
    ));
    let scheduler = ReminderScheduler::new(platform.clone());

    let cooldowns = CooldownTracker::<CommandId>::new(config.cooldown.window);
    let sweeper = cooldowns.spawn_sweeper(config.cooldown.sweep_interval);

    let mut registry = CommandRegistry::new();
    for handler in default_handlers(lookup) {
        registry.register(handler);
    }
    info!("Registered {} command handlers", registry.len());

    let dispatcher = Arc::new(Dispatcher::new(
        DispatcherConfig {
            prefix: config.bot.prefix.clone(),
            bot_id: platform.bot_id().to_string(),
        },
        platform.clone(),
        registry,
        gate,
        moderation,
        cooldowns,
        scheduler.clone(),
    ));

    info!(
        "Bot is online as {} (prefix \"{}\")",
        platform.bot_id(),
        dispatcher.prefix()
    );

    // Start message receiver
    let receiver = MessageReceiver::new(signal_client, config.signal.poll_interval);
    let mut stream = Box::pin(receiver.stream());

    // Main message loop
    loop {
        tokio::select! {
            Some(message) = stream.next() => {
                let inbound = platform.inbound(&message);
                let dispatcher = Arc::clone(&dispatcher);
                tokio::spawn(async move {
                    let outcome = dispatcher.on_message(inbound).await;
                    debug!("Dispatch finished: {:?}", outcome);
                });
            }
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Shutting down...");
    sweeper.abort();
    scheduler.shutdown();
    Ok(())
}
