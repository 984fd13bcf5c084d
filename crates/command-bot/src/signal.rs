//! Signal binding of the platform boundary.

use crate::platform::{
    Capability, GroupInfo, InboundMessage, MessageRef, Platform, PlatformError, Reply,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use signal_client::{BotMessage, SignalClient};
use std::collections::HashSet;
use tracing::debug;

/// [`Platform`] over the signal-cli REST API.
///
/// Signal has no rich embeds, so structured replies are rendered as text.
/// Kick rights come from the configured moderator numbers.
pub struct SignalPlatform {
    client: SignalClient,
    moderators: HashSet<String>,
}

impl SignalPlatform {
    pub fn new(client: SignalClient, moderators: impl IntoIterator<Item = String>) -> Self {
        Self {
            client,
            moderators: moderators.into_iter().collect(),
        }
    }

    /// The bot's own number.
    pub fn bot_id(&self) -> &str {
        self.client.phone_number()
    }

    /// Map a received Signal message onto the platform-neutral form.
    pub fn inbound(&self, message: &BotMessage) -> InboundMessage {
        let conversation = message.reply_target().to_string();
        let mut capabilities = HashSet::new();
        if self.moderators.contains(&message.source) {
            capabilities.insert(Capability::KickMembers);
        }

        InboundMessage {
            author: message.source.clone(),
            author_name: message
                .source_name
                .clone()
                .filter(|name| !name.is_empty()),
            text: message.text.clone(),
            conversation: conversation.clone(),
            group: message.group_id.clone(),
            capabilities,
            sent_at: DateTime::<Utc>::from_timestamp_millis(message.timestamp)
                .unwrap_or_else(Utc::now),
            reference: MessageRef {
                conversation,
                author: message.source.clone(),
                timestamp: message.timestamp,
            },
        }
    }
}

#[async_trait]
impl Platform for SignalPlatform {
    async fn send(&self, conversation: &str, reply: Reply) -> Result<(), PlatformError> {
        self.client.send(conversation, &reply.render()).await?;
        Ok(())
    }

    /// Remote delete. signal-cli only retracts messages the bot itself sent
    /// and can acknowledge a request for someone else's message without
    /// retracting it, so success does not guarantee the message is gone.
    async fn delete(&self, message: &MessageRef) -> Result<(), PlatformError> {
        debug!("Deleting message {} in {}", message.timestamp, message.conversation);
        self.client
            .remote_delete(&message.conversation, message.timestamp)
            .await?;
        Ok(())
    }

    async fn remove_member(&self, group: &str, member: &str) -> Result<(), PlatformError> {
        self.client.remove_group_member(group, member).await?;
        Ok(())
    }

    async fn group_info(&self, group: &str) -> Result<GroupInfo, PlatformError> {
        let details = self.client.group(group).await?;
        Ok(GroupInfo {
            name: details.name,
            description: Some(details.description).filter(|d| !d.is_empty()),
            members: details.members,
            admins: details.admins,
        })
    }
}
