//! Messaging-platform boundary: inbound events, outbound replies and the
//! operations the dispatcher and commands need from the platform.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Red, used for error replies.
pub const ERROR_COLOUR: u32 = 0xFF0000;

/// Errors surfaced by a platform binding.
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Signal error: {0}")]
    Signal(#[from] signal_client::SignalError),

    #[error("{0}")]
    Other(String),
}

/// Privileged actions a sender may be allowed to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    KickMembers,
}

/// Platform reference to a delivered message, enough to delete it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef {
    /// Conversation the message was posted in.
    pub conversation: String,
    /// Author of the message.
    pub author: String,
    /// Platform timestamp identifying the message.
    pub timestamp: i64,
}

/// A text message delivered to the bot.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Stable author identity; the cooldown key.
    pub author: String,
    /// Human-readable author name, if the platform supplies one.
    pub author_name: Option<String>,
    /// Raw message text.
    pub text: String,
    /// Where replies go.
    pub conversation: String,
    /// Group the message was posted in; `None` for direct messages.
    pub group: Option<String>,
    /// What the sender is allowed to do.
    pub capabilities: HashSet<Capability>,
    /// When the sender sent the message.
    pub sent_at: DateTime<Utc>,
    /// Handle for deleting the message.
    pub reference: MessageRef,
}

impl InboundMessage {
    /// A direct message from `author` sent just now.
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        let author = author.into();
        let sent_at = Utc::now();
        Self {
            reference: MessageRef {
                conversation: author.clone(),
                author: author.clone(),
                timestamp: sent_at.timestamp_millis(),
            },
            conversation: author.clone(),
            author,
            author_name: None,
            text: text.into(),
            group: None,
            capabilities: HashSet::new(),
            sent_at,
        }
    }

    /// Move the message into a group conversation.
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        let group = group.into();
        self.conversation = group.clone();
        self.reference.conversation = group.clone();
        self.group = Some(group);
        self
    }

    pub fn with_author_name(mut self, name: impl Into<String>) -> Self {
        self.author_name = Some(name.into());
        self
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    pub fn with_sent_at(mut self, sent_at: DateTime<Utc>) -> Self {
        self.sent_at = sent_at;
        self.reference.timestamp = sent_at.timestamp_millis();
        self
    }

    /// Name to address the author by.
    pub fn display_name(&self) -> &str {
        self.author_name.as_deref().unwrap_or(&self.author)
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// Name and membership of a group conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupInfo {
    pub name: String,
    pub description: Option<String>,
    /// Member identities, the bot included.
    pub members: Vec<String>,
    pub admins: Vec<String>,
}

/// Structured reply with a title, body and optional fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<(String, String)>,
    pub colour: u32,
}

impl Embed {
    pub fn new(title: impl Into<String>, colour: u32) -> Self {
        Self {
            title: title.into(),
            description: None,
            fields: Vec::new(),
            colour,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

impl fmt::Display for Embed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "**{}**", self.title)?;
        if let Some(description) = &self.description {
            write!(f, "\n{}", description)?;
        }
        for (name, value) in &self.fields {
            write!(f, "\n{}: {}", name, value)?;
        }
        Ok(())
    }
}

/// Outbound reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Embed(Embed),
}

impl Reply {
    /// Error-styled reply.
    pub fn error(message: impl Into<String>) -> Self {
        Reply::Embed(Embed::new("Error", ERROR_COLOUR).description(message))
    }

    /// Whether this is an error-styled reply.
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Embed(embed) if embed.title == "Error")
    }

    /// Plain-text rendering for platforms without rich formatting.
    pub fn render(&self) -> String {
        match self {
            Reply::Text(text) => text.clone(),
            Reply::Embed(embed) => embed.to_string(),
        }
    }
}

impl From<String> for Reply {
    fn from(text: String) -> Self {
        Reply::Text(text)
    }
}

impl From<&str> for Reply {
    fn from(text: &str) -> Self {
        Reply::Text(text.to_string())
    }
}

impl From<Embed> for Reply {
    fn from(embed: Embed) -> Self {
        Reply::Embed(embed)
    }
}

/// Operations the bot needs from the messaging platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Platform: Send + Sync {
    /// Post a reply into a conversation.
    async fn send(&self, conversation: &str, reply: Reply) -> Result<(), PlatformError>;

    /// Delete a delivered message.
    async fn delete(&self, message: &MessageRef) -> Result<(), PlatformError>;

    /// Remove `member` from `group`.
    async fn remove_member(&self, group: &str, member: &str) -> Result<(), PlatformError>;

    /// Look up a group's name and members.
    async fn group_info(&self, group: &str) -> Result<GroupInfo, PlatformError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_message_defaults() {
        let msg = InboundMessage::new("+1555", "!ping");
        assert_eq!(msg.conversation, "+1555");
        assert_eq!(msg.reference.conversation, "+1555");
        assert!(msg.group.is_none());
        assert_eq!(msg.display_name(), "+1555");
        assert!(!msg.has_capability(Capability::KickMembers));
    }

    #[test]
    fn test_group_message_replies_to_group() {
        let msg = InboundMessage::new("+1555", "!ping")
            .in_group("group-1")
            .with_author_name("Alice")
            .with_capability(Capability::KickMembers);

        assert_eq!(msg.conversation, "group-1");
        assert_eq!(msg.reference.conversation, "group-1");
        assert_eq!(msg.reference.author, "+1555");
        assert_eq!(msg.display_name(), "Alice");
        assert!(msg.has_capability(Capability::KickMembers));
    }

    #[test]
    fn test_error_reply() {
        let reply = Reply::error("This command is disabled.");
        assert!(reply.is_error());
        assert_eq!(reply.render(), "**Error**\nThis command is disabled.");
        assert!(!Reply::from("Error").is_error());
    }

    #[test]
    fn test_embed_render_with_fields() {
        let embed = Embed::new("Crypto Price: Bitcoin", 0xFFD700)
            .description("Current price: $1 USD")
            .field("Source", "CoinGecko");

        assert_eq!(
            Reply::from(embed).render(),
            "**Crypto Price: Bitcoin**\nCurrent price: $1 USD\nSource: CoinGecko"
        );
    }
}
