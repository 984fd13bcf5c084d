//! Signal API types.

use serde::{Deserialize, Serialize};

/// Incoming Signal message.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub envelope: Envelope,
    pub account: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub source: String,
    #[serde(rename = "sourceNumber")]
    pub source_number: Option<String>,
    #[serde(rename = "sourceName")]
    pub source_name: Option<String>,
    pub timestamp: i64,
    #[serde(rename = "dataMessage")]
    pub data_message: Option<DataMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataMessage {
    pub message: Option<String>,
    pub timestamp: i64,
    #[serde(rename = "groupInfo")]
    pub group_info: Option<GroupInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupInfo {
    #[serde(rename = "groupId")]
    pub group_id: String,
}

/// Outgoing message request.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub message: String,
    pub number: String,
    pub recipients: Vec<String>,
}

/// Send message response.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageResponse {
    pub timestamp: Option<String>,
}

/// Remote delete ("delete for everyone") request.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteDeleteRequest {
    pub recipient: String,
    pub timestamp: i64,
}

/// Group membership change request.
#[derive(Debug, Clone, Serialize)]
pub struct GroupMembersRequest {
    pub members: Vec<String>,
}

/// Group details as returned by `GET /v1/groups/{number}/{group}`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GroupDetails {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub admins: Vec<String>,
}

/// Parsed message for bot processing.
#[derive(Debug, Clone)]
pub struct BotMessage {
    /// The phone number that sent the message.
    pub source: String,
    /// Profile name of the sender, if known.
    pub source_name: Option<String>,
    /// The message text.
    pub text: String,
    /// Message timestamp. Signal identifies messages by author and timestamp.
    pub timestamp: i64,
    /// Whether this is a group message.
    pub is_group: bool,
    /// Group ID if this is a group message.
    pub group_id: Option<String>,
    /// The bot's phone number that received this message.
    pub receiving_account: String,
}

impl BotMessage {
    /// Extract bot message from incoming envelope.
    ///
    /// Receipts, typing indicators and attachment-only messages carry no
    /// text and yield `None`.
    pub fn from_incoming(msg: &IncomingMessage) -> Option<Self> {
        let data = msg.envelope.data_message.as_ref()?;
        let text = data.message.clone()?;
        let source = msg
            .envelope
            .source_number
            .clone()
            .unwrap_or_else(|| msg.envelope.source.clone());

        Some(Self {
            source,
            source_name: msg.envelope.source_name.clone(),
            text,
            timestamp: msg.envelope.timestamp,
            is_group: data.group_info.is_some(),
            group_id: data.group_info.as_ref().map(|g| g.group_id.clone()),
            receiving_account: msg.account.clone(),
        })
    }

    /// Get the reply target (group ID or source number).
    pub fn reply_target(&self) -> &str {
        self.group_id.as_deref().unwrap_or(&self.source)
    }

    /// Display name of the sender, falling back to the phone number.
    pub fn display_name(&self) -> &str {
        self.source_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.source)
    }
}
