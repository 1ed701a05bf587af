use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::events::MessageUpdate;
use super::message::{Direction, MessageStatus};

/// A thread between the business number and one external participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub conversation_id: String,
    pub other_participant_wa_id: String,
    #[serde(default)]
    pub other_participant_name: Option<String>,
    #[serde(default)]
    pub last_message: String,
    #[serde(default)]
    pub last_message_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_message_direction: Option<Direction>,
    #[serde(default)]
    pub last_message_status: Option<MessageStatus>,
}

impl Conversation {
    /// Build an entry for a conversation first seen through the realtime channel
    pub fn from_message_update(update: &MessageUpdate, business_wa_id: &str) -> Self {
        let message = &update.message;
        let other_participant_wa_id = if message.sender_wa_id == business_wa_id {
            message.recipient_wa_id.clone()
        } else {
            message.sender_wa_id.clone()
        };

        let mut conversation = Self {
            conversation_id: message.conversation_id.clone(),
            other_participant_wa_id,
            other_participant_name: update.sender_name.clone(),
            last_message: String::new(),
            last_message_timestamp: None,
            last_message_direction: None,
            last_message_status: None,
        };
        conversation.apply_preview(update);
        conversation
    }

    /// Overwrite the preview fields from the newest message
    pub fn apply_preview(&mut self, update: &MessageUpdate) {
        let message = &update.message;
        self.last_message = message.body.clone();
        self.last_message_timestamp = Some(message.timestamp);
        self.last_message_direction = Some(message.direction);
        self.last_message_status = Some(message.status.clone());
    }

    pub fn is_last_outbound(&self) -> bool {
        self.last_message_direction == Some(Direction::Outbound)
    }

    /// Name if known, raw WhatsApp id otherwise
    pub fn display_name(&self) -> &str {
        self.other_participant_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.other_participant_wa_id)
    }

    /// First letter of the name, `?` when there is no name
    pub fn avatar_initial(&self) -> String {
        self.other_participant_name
            .as_deref()
            .and_then(|name| name.trim().chars().next())
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }

    pub fn preview_line(&self) -> String {
        if self.is_last_outbound() {
            format!("You: {}", self.last_message)
        } else {
            self.last_message.clone()
        }
    }

    /// Case-insensitive match on name, number or preview text
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.other_participant_wa_id.contains(&query)
            || self
                .other_participant_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&query))
            || self.last_message.to_lowercase().contains(&query)
    }
}

/// Inbox order: newest activity first, then by id; undated entries sink to the bottom
pub fn newest_first(a: &Conversation, b: &Conversation) -> Ordering {
    match (a.last_message_timestamp, b.last_message_timestamp) {
        (Some(ta), Some(tb)) => tb.cmp(&ta),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.conversation_id.cmp(&b.conversation_id))
}
