//! Command identities, the handler trait and the registry that maps names
//! to handlers.

use crate::error::CommandError;
use crate::platform::{InboundMessage, Platform, Reply};
use crate::scheduler::ReminderScheduler;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::warn;

/// Static description of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandInfo {
    /// Invocation name, lower-case.
    pub name: &'static str,
    /// Usage line without the prefix.
    pub usage: &'static str,
    pub description: &'static str,
    /// Enablement when configuration says nothing.
    pub default_enabled: bool,
}

/// Every command the bot knows, in help order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandId {
    Help,
    Roll,
    Ping,
    Uptime,
    Words,
    Who,
    UserInfo,
    ServerInfo,
    RandomPlayer,
    Prediction,
    EightBall,
    Fortune,
    Ascii,
    Timer,
    CancelTimer,
    Joke,
    Fact,
    Quote,
    Today,
    Crypto,
    Kick,
}

impl CommandId {
    pub const ALL: &'static [CommandId] = &[
        CommandId::Help,
        CommandId::Roll,
        CommandId::Ping,
        CommandId::Uptime,
        CommandId::Words,
        CommandId::Who,
        CommandId::UserInfo,
        CommandId::ServerInfo,
        CommandId::RandomPlayer,
        CommandId::Prediction,
        CommandId::EightBall,
        CommandId::Fortune,
        CommandId::Ascii,
        CommandId::Timer,
        CommandId::CancelTimer,
        CommandId::Joke,
        CommandId::Fact,
        CommandId::Quote,
        CommandId::Today,
        CommandId::Crypto,
        CommandId::Kick,
    ];

    /// Static descriptor for this command.
    pub fn info(self) -> &'static CommandInfo {
        match self {
            CommandId::Help => &CommandInfo {
                name: "help",
                usage: "help",
                description: "Show this list of commands.",
                default_enabled: true,
            },
            CommandId::Roll => &CommandInfo {
                name: "roll",
                usage: "roll [min-max]",
                description: "Roll a random number between min and max.",
                default_enabled: true,
            },
            CommandId::Ping => &CommandInfo {
                name: "ping",
                usage: "ping",
                description: "Check the bot's latency.",
                default_enabled: true,
            },
            CommandId::Uptime => &CommandInfo {
                name: "uptime",
                usage: "uptime",
                description: "Find out how long the bot has been online.",
                default_enabled: true,
            },
            CommandId::Words => &CommandInfo {
                name: "words",
                usage: "words [text]",
                description: "Count the number of words in a text.",
                default_enabled: true,
            },
            CommandId::Who => &CommandInfo {
                name: "who",
                usage: "who [name]",
                description: "Describe a person with a random adjective.",
                default_enabled: true,
            },
            CommandId::UserInfo => &CommandInfo {
                name: "userinfo",
                usage: "userinfo [member]",
                description: "Get information about a user.",
                default_enabled: true,
            },
            CommandId::ServerInfo => &CommandInfo {
                name: "serverinfo",
                usage: "serverinfo",
                description: "Get information about this group.",
                default_enabled: true,
            },
            CommandId::RandomPlayer => &CommandInfo {
                name: "random_player",
                usage: "random_player",
                description: "Choose a random member of this group.",
                default_enabled: true,
            },
            CommandId::Prediction => &CommandInfo {
                name: "prediction",
                usage: "prediction",
                description: "Get a random prediction.",
                default_enabled: true,
            },
            CommandId::EightBall => &CommandInfo {
                name: "8ball",
                usage: "8ball",
                description: "Get a Yes/No answer.",
                default_enabled: true,
            },
            CommandId::Fortune => &CommandInfo {
                name: "fortune",
                usage: "fortune",
                description: "Get your fortune for today.",
                default_enabled: true,
            },
            CommandId::Ascii => &CommandInfo {
                name: "ascii",
                usage: "ascii <text>",
                description: "Convert text to ASCII art.",
                default_enabled: true,
            },
            CommandId::Timer => &CommandInfo {
                name: "timer",
                usage: "timer <seconds>",
                description: "Set a timer.",
                default_enabled: true,
            },
            CommandId::CancelTimer => &CommandInfo {
                name: "canceltimer",
                usage: "canceltimer",
                description: "Cancel your pending timers.",
                default_enabled: true,
            },
            CommandId::Joke => &CommandInfo {
                name: "joke",
                usage: "joke",
                description: "Get a random joke.",
                default_enabled: true,
            },
            CommandId::Fact => &CommandInfo {
                name: "fact",
                usage: "fact",
                description: "Get a random fact.",
                default_enabled: true,
            },
            CommandId::Quote => &CommandInfo {
                name: "quote",
                usage: "quote",
                description: "Get an inspirational quote.",
                default_enabled: true,
            },
            CommandId::Today => &CommandInfo {
                name: "today",
                usage: "today",
                description: "Find out what happened today in history.",
                default_enabled: true,
            },
            CommandId::Crypto => &CommandInfo {
                name: "crypto",
                usage: "crypto [coin]",
                description: "Get the current price of a cryptocurrency (default: bitcoin).",
                default_enabled: true,
            },
            CommandId::Kick => &CommandInfo {
                name: "kick",
                usage: "kick <member>",
                description: "Remove a member from this group.",
                default_enabled: true,
            },
        }
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Resolve a lower-cased command name.
    pub fn from_name(name: &str) -> Option<Self> {
        CommandId::ALL.iter().copied().find(|id| id.name() == name)
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a handler can see and do while running.
pub struct CommandContext {
    pub message: InboundMessage,
    pub platform: Arc<dyn Platform>,
    /// Invocation prefix, for help and usage text.
    pub prefix: String,
    /// Enabled, registered commands in display order.
    pub catalogue: Arc<Vec<&'static CommandInfo>>,
    /// When the bot started.
    pub started_at: Instant,
    pub scheduler: ReminderScheduler,
    /// The bot's own identity.
    pub bot_id: String,
}

impl CommandContext {
    /// Reply in the originating conversation.
    pub async fn reply(&self, reply: impl Into<Reply>) -> Result<(), CommandError> {
        self.platform
            .send(&self.message.conversation, reply.into())
            .await?;
        Ok(())
    }

    /// Error-styled reply in the originating conversation.
    pub async fn reply_error(&self, message: impl Into<String>) -> Result<(), CommandError> {
        self.reply(Reply::error(message)).await
    }
}

/// A single bot command.
///
/// Validation and permission problems are answered by the handler itself;
/// an `Err` means the command broke and the dispatcher reports it.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    fn id(&self) -> CommandId;

    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<(), CommandError>;
}

/// Name → handler mapping.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: HashMap<CommandId, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any earlier one for the same command.
    pub fn register(&mut self, handler: Arc<dyn CommandHandler>) {
        let id = handler.id();
        if self.handlers.insert(id, handler).is_some() {
            warn!("Replaced handler for command {}", id);
        }
    }

    /// Look up a handler by lower-cased name.
    pub fn get(&self, name: &str) -> Option<(CommandId, Arc<dyn CommandHandler>)> {
        let id = CommandId::from_name(name)?;
        self.handlers
            .get(&id)
            .map(|handler| (id, Arc::clone(handler)))
    }

    /// Registered commands in declaration order.
    pub fn commands(&self) -> Vec<CommandId> {
        let mut ids: Vec<_> = self.handlers.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
