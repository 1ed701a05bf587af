//! Message list of the open conversation

use std::collections::HashSet;

use crate::domain::models::{Message, StatusUpdate};

/// Identifies one message load; responses carrying an old ticket are dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub conversation_id: String,
    epoch: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatThread {
    conversation_id: Option<String>,
    epoch: u64,
    messages: Vec<Message>,
}

impl ChatThread {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Switch to another conversation (or none), discarding the current list
    pub fn open(&mut self, conversation_id: Option<String>) -> Option<LoadTicket> {
        self.messages.clear();
        self.conversation_id = conversation_id;
        self.next_ticket()
    }

    /// Re-fetch the open conversation without clearing what is shown
    pub fn reload(&mut self) -> Option<LoadTicket> {
        self.next_ticket()
    }

    fn next_ticket(&mut self) -> Option<LoadTicket> {
        self.epoch += 1;
        self.conversation_id.clone().map(|conversation_id| LoadTicket {
            conversation_id,
            epoch: self.epoch,
        })
    }

    /// Install a fetch result, merged with anything realtime delivered meanwhile.
    ///
    /// Returns `false` when the ticket is stale.
    pub fn accept_loaded(&mut self, ticket: &LoadTicket, loaded: Vec<Message>) -> bool {
        if ticket.epoch != self.epoch
            || self.conversation_id.as_deref() != Some(ticket.conversation_id.as_str())
        {
            return false;
        }

        let mut local = std::mem::take(&mut self.messages);
        let shown: HashSet<String> = local.iter().map(|m| m.message_id.clone()).collect();
        let mut seen = HashSet::new();

        for message in loaded {
            if message.conversation_id == ticket.conversation_id
                && seen.insert(message.message_id.clone())
            {
                self.messages.push(message);
            }
        }
        self.sort();

        // Stored copies of our own sends replace their placeholders, oldest first
        for stored in self.messages.iter().filter(|m| !shown.contains(&m.message_id)) {
            if let Some(index) = find_pending(&local, stored) {
                local.remove(index);
            }
        }

        for message in local {
            if seen.insert(message.message_id.clone()) {
                self.messages.push(message);
            }
        }

        self.sort();
        true
    }

    /// `messageUpdate` for the open conversation; duplicates are ignored
    pub fn apply_message_update(&mut self, message: &Message) -> bool {
        if self.conversation_id.as_deref() != Some(message.conversation_id.as_str()) {
            return false;
        }
        if self.messages.iter().any(|m| m.message_id == message.message_id) {
            return false;
        }

        if let Some(index) = find_pending(&self.messages, message) {
            self.messages.remove(index);
        }

        self.messages.push(message.clone());
        self.sort();
        true
    }

    /// `statusUpdate`: overwrite the status of one message
    pub fn apply_status_update(&mut self, update: &StatusUpdate) -> bool {
        if self.conversation_id.as_deref() != Some(update.conversation_id.as_str()) {
            return false;
        }
        match self
            .messages
            .iter_mut()
            .find(|m| m.message_id == update.message_id)
        {
            Some(message) => {
                message.status = update.status.clone();
                true
            }
            None => false,
        }
    }

    /// Show a submitted message before the backend echoes it
    pub fn add_pending(&mut self, message: Message) -> bool {
        if self.conversation_id.as_deref() != Some(message.conversation_id.as_str())
            || self.messages.iter().any(|m| m.message_id == message.message_id)
        {
            return false;
        }
        self.messages.push(message);
        self.sort();
        true
    }

    /// Drop the placeholder of a submission that failed
    pub fn discard_pending(&mut self, client_message_id: &str) -> Option<Message> {
        let index = self.messages.iter().position(|m| {
            m.is_pending() && m.client_message_id.as_deref() == Some(client_message_id)
        })?;
        Some(self.messages.remove(index))
    }

    fn sort(&mut self) {
        self.messages.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.message_id.cmp(&b.message_id))
        });
    }
}

/// Placeholder an echo replaces: same correlation id, or when the backend
/// did not echo one, the oldest pending outbound entry with the same body
fn find_pending(messages: &[Message], echo: &Message) -> Option<usize> {
    if !echo.is_outbound() {
        return None;
    }
    match echo.client_message_id.as_deref() {
        Some(client_id) => messages
            .iter()
            .position(|m| m.is_pending() && m.client_message_id.as_deref() == Some(client_id)),
        None => messages
            .iter()
            .position(|m| m.is_pending() && m.body == echo.body),
    }
}
