use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of ids given to optimistic entries before the backend assigns one
pub const PENDING_ID_PREFIX: &str = "pending:";

/// Which side of the conversation wrote the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
        }
    }
}

/// Delivery status reported by the backend.
///
/// The backend vocabulary is open ended, so unknown values are kept verbatim
/// in `Other` and simply render without a glyph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageStatus {
    /// Local only: submitted, waiting for the realtime echo
    Pending,
    Sent,
    Delivered,
    Read,
    Other(String),
}

impl MessageStatus {
    pub fn as_str(&self) -> &str {
        match self {
            MessageStatus::Pending => "pending",
            MessageStatus::Sent => "sent",
            MessageStatus::Delivered => "delivered",
            MessageStatus::Read => "read",
            MessageStatus::Other(s) => s,
        }
    }

    /// Tick mark shown next to outbound messages
    pub fn glyph(&self) -> Option<StatusGlyph> {
        match self {
            MessageStatus::Pending => Some(StatusGlyph {
                symbol: "🕓",
                modifier: "pending",
            }),
            MessageStatus::Sent => Some(StatusGlyph {
                symbol: "✓",
                modifier: "sent",
            }),
            MessageStatus::Delivered => Some(StatusGlyph {
                symbol: "✓✓",
                modifier: "delivered",
            }),
            MessageStatus::Read => Some(StatusGlyph {
                symbol: "✓✓",
                modifier: "read",
            }),
            MessageStatus::Other(_) => None,
        }
    }
}

impl From<String> for MessageStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => MessageStatus::Pending,
            "sent" => MessageStatus::Sent,
            "delivered" => MessageStatus::Delivered,
            "read" => MessageStatus::Read,
            _ => MessageStatus::Other(value),
        }
    }
}

impl From<MessageStatus> for String {
    fn from(status: MessageStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Symbol plus BEM modifier (`c-bubble__status--{modifier}`) for a status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusGlyph {
    pub symbol: &'static str,
    pub modifier: &'static str,
}

/// A single message of a conversation, as served by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub message_id: String,
    pub conversation_id: String,
    pub sender_wa_id: String,
    pub recipient_wa_id: String,
    #[serde(default)]
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub direction: Direction,
    pub status: MessageStatus,
    /// Correlation id echoed back for messages this client submitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_message_id: Option<String>,
}

impl Message {
    pub fn is_outbound(&self) -> bool {
        self.direction == Direction::Outbound
    }

    pub fn is_pending(&self) -> bool {
        self.status == MessageStatus::Pending
    }

    /// Status glyph to render, outbound messages only
    pub fn status_glyph(&self) -> Option<StatusGlyph> {
        if self.is_outbound() {
            self.status.glyph()
        } else {
            None
        }
    }
}

/// Body of `POST /messages`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    pub conversation_id: String,
    pub recipient_wa_id: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_message_id: Option<String>,
}

impl OutboundMessage {
    /// Local placeholder shown until the backend echoes the real record
    pub fn to_pending(&self, business_wa_id: &str, now: DateTime<Utc>) -> Message {
        let client_id = self.client_message_id.clone().unwrap_or_default();
        Message {
            message_id: format!("{}{}", PENDING_ID_PREFIX, client_id),
            conversation_id: self.conversation_id.clone(),
            sender_wa_id: business_wa_id.to_string(),
            recipient_wa_id: self.recipient_wa_id.clone(),
            body: self.body.clone(),
            timestamp: now,
            direction: Direction::Outbound,
            status: MessageStatus::Pending,
            client_message_id: self.client_message_id.clone(),
        }
    }
}
