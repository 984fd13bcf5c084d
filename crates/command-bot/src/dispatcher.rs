//! Routes inbound text to command handlers under the moderation,
//! enablement and cooldown policies.

use crate::gate::CommandGate;
use crate::moderation::ModerationFilter;
use crate::platform::{Embed, InboundMessage, Platform, Reply};
use crate::registry::{CommandContext, CommandId, CommandInfo, CommandRegistry};
use crate::scheduler::ReminderScheduler;
use cooldown_store::CooldownTracker;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Orange, used for moderation warnings.
const WARNING_COLOUR: u32 = 0xFFA500;

/// Which gate ended a dispatch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Own message, no prefix, or a bare prefix.
    Ignored,
    /// Intercepted by auto-moderation.
    Moderated { term: String },
    /// No handler registered under this name.
    Unknown(String),
    Disabled(CommandId),
    CoolingDown {
        command: CommandId,
        remaining_secs: u64,
    },
    /// Handler returned an error or panicked.
    Failed(CommandId),
    Completed(CommandId),
}

/// Static dispatcher settings.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Invocation prefix, matched case-insensitively.
    pub prefix: String,
    /// The bot's own identity; messages from it are ignored.
    pub bot_id: String,
}

pub struct Dispatcher {
    config: DispatcherConfig,
    platform: Arc<dyn Platform>,
    registry: CommandRegistry,
    gate: CommandGate,
    moderation: ModerationFilter,
    cooldowns: CooldownTracker<CommandId>,
    scheduler: ReminderScheduler,
    catalogue: Arc<Vec<&'static CommandInfo>>,
    started_at: Instant,
}

impl Dispatcher {
    pub fn new(
        config: DispatcherConfig,
        platform: Arc<dyn Platform>,
        registry: CommandRegistry,
        gate: CommandGate,
        moderation: ModerationFilter,
        cooldowns: CooldownTracker<CommandId>,
        scheduler: ReminderScheduler,
    ) -> Self {
        let catalogue = registry
            .commands()
            .into_iter()
            .filter(|id| gate.is_enabled(*id))
            .map(CommandId::info)
            .collect();

        Self {
            config,
            platform,
            registry,
            gate,
            moderation,
            cooldowns,
            scheduler,
            catalogue: Arc::new(catalogue),
            started_at: Instant::now(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.config.prefix
    }

    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }

    /// Run one inbound message through the full dispatch cycle.
    ///
    /// Never fails: every problem ends as a reply, a log line, or both.
    pub async fn on_message(&self, message: InboundMessage) -> DispatchOutcome {
        if message.author == self.config.bot_id {
            return DispatchOutcome::Ignored;
        }

        if let Some(term) = self.moderation.check(&message.text) {
            self.moderate(&message, &term).await;
            return DispatchOutcome::Moderated { term };
        }

        let Some((name, args)) = parse_command(&self.config.prefix, &message.text) else {
            return DispatchOutcome::Ignored;
        };

        info!("Command received: {} from {}", name, message.author);

        let Some((id, handler)) = self.registry.get(&name) else {
            self.send_error(
                &message.conversation,
                format!(
                    "Unknown command: {}. Use {}help to see available commands.",
                    name, self.config.prefix
                ),
            )
            .await;
            return DispatchOutcome::Unknown(name);
        };

        if !self.gate.is_enabled(id) {
            self.send_error(&message.conversation, "This command is disabled.")
                .await;
            return DispatchOutcome::Disabled(id);
        }

        let permit = match self.cooldowns.try_acquire(id, &message.author, Instant::now()) {
            Ok(permit) => permit,
            Err(cooldown) => {
                let remaining_secs = cooldown.remaining_secs();
                debug!("{} is {} for {}", id, cooldown, message.author);
                self.send_error(
                    &message.conversation,
                    format!(
                        "Please wait {} more second(s) before reusing the `{}` command.",
                        remaining_secs, id
                    ),
                )
                .await;
                return DispatchOutcome::CoolingDown {
                    command: id,
                    remaining_secs,
                };
            }
        };

        let conversation = message.conversation.clone();
        let ctx = CommandContext {
            message,
            platform: Arc::clone(&self.platform),
            prefix: self.config.prefix.clone(),
            catalogue: Arc::clone(&self.catalogue),
            started_at: self.started_at,
            scheduler: self.scheduler.clone(),
            bot_id: self.config.bot_id.clone(),
        };

        match AssertUnwindSafe(handler.execute(&ctx, &args))
            .catch_unwind()
            .await
        {
            Ok(Ok(())) => {
                permit.commit(Instant::now());
                DispatchOutcome::Completed(id)
            }
            Ok(Err(e)) => {
                error!("Error executing command {}: {}", id, e);
                self.send_generic_error(&conversation).await;
                DispatchOutcome::Failed(id)
            }
            Err(panic) => {
                error!("Command {} panicked: {}", id, panic_message(&*panic));
                self.send_generic_error(&conversation).await;
                DispatchOutcome::Failed(id)
            }
        }
    }

    async fn moderate(&self, message: &InboundMessage, term: &str) {
        if let Err(e) = self.platform.delete(&message.reference).await {
            error!(
                "Failed to delete message from {} containing banned term: {}",
                message.author, e
            );
            return;
        }

        info!("Deleted message from {} containing \"{}\"", message.author, term);
        let warning = Embed::new("Banned Term", WARNING_COLOUR).description(format!(
            "{}, your message contains a banned term: {}",
            message.display_name(),
            term
        ));
        if let Err(e) = self.platform.send(&message.conversation, warning.into()).await {
            warn!("Failed to post moderation warning: {}", e);
        }
    }

    async fn send_generic_error(&self, conversation: &str) {
        self.send_error(conversation, "An error occurred while executing the command.")
            .await;
    }

    async fn send_error(&self, conversation: &str, message: impl Into<String>) {
        if let Err(e) = self.platform.send(conversation, Reply::error(message)).await {
            error!("Failed to send reply: {}", e);
        }
    }
}

/// Split prefixed text into a lower-cased command name and its arguments.
///
/// Returns `None` when the text does not start with `prefix` or nothing
/// follows it.
pub fn parse_command(prefix: &str, text: &str) -> Option<(String, Vec<String>)> {
    let head = text.get(..prefix.len())?;
    if head.to_lowercase() != prefix.to_lowercase() {
        return None;
    }

    let mut tokens = text[prefix.len()..].split_whitespace();
    let name = tokens.next()?.to_lowercase();
    let args = tokens.map(String::from).collect();
    Some((name, args))
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
