//! Signal HTTP client.

use crate::error::SignalError;
use crate::types::*;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use urlencoding::encode;

/// Signal CLI REST API client bound to one account.
#[derive(Clone)]
pub struct SignalClient {
    client: Client,
    base_url: String,
    phone_number: String,
}

impl SignalClient {
    /// Create a new Signal client.
    pub fn new(
        base_url: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Result<Self, SignalError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            phone_number: phone_number.into(),
        })
    }

    /// Get the configured phone number.
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Check if the Signal API is healthy.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(format!("{}/v1/health", self.base_url))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Receive pending messages.
    #[instrument(skip(self))]
    pub async fn receive(&self) -> Result<Vec<IncomingMessage>, SignalError> {
        let encoded_number = encode(&self.phone_number);
        let response = self
            .client
            .get(format!("{}/v1/receive/{}", self.base_url, encoded_number))
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(SignalError::Api(msg));
        }

        let messages: Vec<IncomingMessage> = response.json().await?;
        debug!("Received {} messages", messages.len());
        Ok(messages)
    }

    /// Send a message to a recipient (phone number or group ID).
    #[instrument(skip(self, message))]
    pub async fn send(&self, recipient: &str, message: &str) -> Result<(), SignalError> {
        let request = SendMessageRequest {
            message: message.to_string(),
            number: self.phone_number.clone(),
            recipients: vec![recipient.to_string()],
        };

        let response = self
            .client
            .post(format!("{}/v2/send", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            warn!("Send failed: {}", msg);
            return Err(SignalError::SendFailed(msg));
        }

        debug!("Sent message to {}", recipient);
        Ok(())
    }

    /// Reply to a message (handles both direct and group messages).
    pub async fn reply(&self, original: &BotMessage, message: &str) -> Result<(), SignalError> {
        self.send(original.reply_target(), message).await
    }

    /// Delete a previously sent message for everyone in the conversation.
    #[instrument(skip(self))]
    pub async fn remote_delete(&self, recipient: &str, timestamp: i64) -> Result<(), SignalError> {
        let encoded_number = encode(&self.phone_number);
        let request = RemoteDeleteRequest {
            recipient: recipient.to_string(),
            timestamp,
        };

        let response = self
            .client
            .delete(format!("{}/v1/remote-delete/{}", self.base_url, encoded_number))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            warn!("Remote delete failed: {}", msg);
            return Err(SignalError::DeleteFailed(msg));
        }

        debug!("Deleted message {} in {}", timestamp, recipient);
        Ok(())
    }

    /// Fetch name and membership of a group the account belongs to.
    #[instrument(skip(self))]
    pub async fn group(&self, group_id: &str) -> Result<GroupDetails, SignalError> {
        let encoded_number = encode(&self.phone_number);
        let encoded_group = encode(group_id);
        let response = self
            .client
            .get(format!(
                "{}/v1/groups/{}/{}",
                self.base_url, encoded_number, encoded_group
            ))
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(SignalError::Api(msg));
        }

        let group: GroupDetails = response.json().await?;
        debug!("Group {} has {} members", group_id, group.members.len());
        Ok(group)
    }

    /// Remove `member` from a group the account administers.
    #[instrument(skip(self))]
    pub async fn remove_group_member(
        &self,
        group_id: &str,
        member: &str,
    ) -> Result<(), SignalError> {
        let encoded_number = encode(&self.phone_number);
        let encoded_group = encode(group_id);
        let request = GroupMembersRequest {
            members: vec![member.to_string()],
        };

        let response = self
            .client
            .delete(format!(
                "{}/v1/groups/{}/{}/members",
                self.base_url, encoded_number, encoded_group
            ))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            warn!("Group member removal failed: {}", msg);
            return Err(SignalError::GroupUpdateFailed(msg));
        }

        debug!("Removed {} from {}", member, group_id);
        Ok(())
    }
}
