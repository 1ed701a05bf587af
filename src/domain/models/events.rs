//! Payloads pushed by the realtime channel

use serde::{Deserialize, Serialize};

use super::message::{Message, MessageStatus};

/// Named events of the push channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RealtimeEventKind {
    MessageUpdate,
    StatusUpdate,
    /// Not on the wire: the transport came back after an error
    Reconnected,
}

impl RealtimeEventKind {
    /// Event names the server emits
    pub const WIRE: [RealtimeEventKind; 2] = [
        RealtimeEventKind::MessageUpdate,
        RealtimeEventKind::StatusUpdate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RealtimeEventKind::MessageUpdate => "messageUpdate",
            RealtimeEventKind::StatusUpdate => "statusUpdate",
            RealtimeEventKind::Reconnected => "reconnected",
        }
    }

    pub fn from_wire(name: &str) -> Option<Self> {
        Self::WIRE.into_iter().find(|kind| kind.as_str() == name)
    }
}

/// `messageUpdate`: the full message plus what is needed to create a
/// conversation entry the client has never seen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageUpdate {
    #[serde(flatten)]
    pub message: Message,
    #[serde(default)]
    pub sender_name: Option<String>,
}

/// `statusUpdate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub message_id: String,
    pub status: MessageStatus,
    pub conversation_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RealtimeEvent {
    MessageUpdate(MessageUpdate),
    StatusUpdate(StatusUpdate),
    Reconnected,
}

impl RealtimeEvent {
    pub fn kind(&self) -> RealtimeEventKind {
        match self {
            RealtimeEvent::MessageUpdate(_) => RealtimeEventKind::MessageUpdate,
            RealtimeEvent::StatusUpdate(_) => RealtimeEventKind::StatusUpdate,
            RealtimeEvent::Reconnected => RealtimeEventKind::Reconnected,
        }
    }

    /// Conversation the event refers to, if any
    pub fn conversation_id(&self) -> Option<&str> {
        match self {
            RealtimeEvent::MessageUpdate(update) => Some(&update.message.conversation_id),
            RealtimeEvent::StatusUpdate(update) => Some(&update.conversation_id),
            RealtimeEvent::Reconnected => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Direction;

    #[test]
    fn test_kind_names() {
        assert_eq!(
            RealtimeEventKind::from_wire("messageUpdate"),
            Some(RealtimeEventKind::MessageUpdate)
        );
        assert_eq!(
            RealtimeEventKind::from_wire("statusUpdate"),
            Some(RealtimeEventKind::StatusUpdate)
        );
        assert_eq!(RealtimeEventKind::from_wire("reconnected"), None);
        assert_eq!(RealtimeEventKind::from_wire("typing"), None);
    }

    #[test]
    fn test_message_update_flattens_message() {
        let json = r#"{
            "messageId": "wamid.1",
            "conversationId": "c9",
            "senderWaId": "919999999999",
            "recipientWaId": "918329446654",
            "body": "is the shop open?",
            "timestamp": "2024-03-05T08:30:00Z",
            "direction": "inbound",
            "status": "delivered",
            "senderName": "Asha"
        }"#;
        let update: MessageUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(update.message.conversation_id, "c9");
        assert_eq!(update.message.direction, Direction::Inbound);
        assert_eq!(update.sender_name.as_deref(), Some("Asha"));
    }

    #[test]
    fn test_status_update_payload() {
        let update: StatusUpdate = serde_json::from_str(
            r#"{"messageId":"m1","status":"read","conversationId":"c1"}"#,
        )
        .unwrap();
        assert_eq!(update.status, MessageStatus::Read);
        assert_eq!(
            RealtimeEvent::StatusUpdate(update).conversation_id(),
            Some("c1")
        );
    }
}
