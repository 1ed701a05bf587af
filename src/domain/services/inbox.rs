//! Conversation list state owned by the root controller
//!
//! Keeps the list sorted newest first and unique by conversation id no matter
//! how fetch responses and realtime events interleave.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::domain::models::{newest_first, Conversation, MessageUpdate, StatusUpdate};

/// Issued when a conversation fetch starts; only the latest ticket may land
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    epoch: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Inbox {
    business_wa_id: String,
    conversations: Vec<Conversation>,
    selected_id: Option<String>,
    /// Narrow viewports show either the list or the chat, never both
    show_chat_on_mobile: bool,
    fetch_epoch: u64,
    /// Conversations changed by realtime events while a fetch was in flight
    touched_since_fetch: HashSet<String>,
}

impl Inbox {
    pub fn new(business_wa_id: impl Into<String>) -> Self {
        Self {
            business_wa_id: business_wa_id.into(),
            conversations: Vec::new(),
            selected_id: None,
            show_chat_on_mobile: false,
            fetch_epoch: 0,
            touched_since_fetch: HashSet::new(),
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn business_wa_id(&self) -> &str {
        &self.business_wa_id
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected(&self) -> Option<&Conversation> {
        let id = self.selected_id.as_deref()?;
        self.find(id)
    }

    pub fn show_chat_on_mobile(&self) -> bool {
        self.show_chat_on_mobile
    }

    /// The chat pane needs both a selection and the mobile toggle
    pub fn chat_visible_on_mobile(&self) -> bool {
        self.show_chat_on_mobile && self.selected_id.is_some()
    }

    pub fn list_visible_on_mobile(&self) -> bool {
        !self.show_chat_on_mobile
    }

    pub fn find(&self, conversation_id: &str) -> Option<&Conversation> {
        self.conversations
            .iter()
            .find(|c| c.conversation_id == conversation_id)
    }

    /// Conversations matching the search box, in inbox order
    pub fn filtered(&self, query: &str) -> Vec<Conversation> {
        self.conversations
            .iter()
            .filter(|c| c.matches_query(query))
            .cloned()
            .collect()
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_epoch += 1;
        self.touched_since_fetch.clear();
        FetchTicket {
            epoch: self.fetch_epoch,
        }
    }

    /// Replace the list with a fetch result.
    ///
    /// Returns `false` (and changes nothing) when a newer fetch was started in
    /// the meantime. Previews updated by realtime after the server built its
    /// response are kept, as are conversations the response does not know yet.
    pub fn accept_fetched(&mut self, ticket: FetchTicket, mut fetched: Vec<Conversation>) -> bool {
        if ticket.epoch != self.fetch_epoch {
            return false;
        }

        fetched.sort_by(newest_first);
        let mut seen = HashSet::with_capacity(fetched.len());
        let mut merged = Vec::with_capacity(fetched.len());

        for mut conversation in fetched {
            if !seen.insert(conversation.conversation_id.clone()) {
                continue;
            }
            if let Some(local) = self.find(&conversation.conversation_id) {
                if is_newer(local.last_message_timestamp, conversation.last_message_timestamp) {
                    conversation.last_message = local.last_message.clone();
                    conversation.last_message_timestamp = local.last_message_timestamp;
                    conversation.last_message_direction = local.last_message_direction;
                    conversation.last_message_status = local.last_message_status.clone();
                } else if self.touched_since_fetch.contains(&conversation.conversation_id)
                    && !is_newer(conversation.last_message_timestamp, local.last_message_timestamp)
                {
                    // Same message, status moved on after the server answered
                    conversation.last_message_status = local.last_message_status.clone();
                }
            }
            merged.push(conversation);
        }

        for local in &self.conversations {
            if self.touched_since_fetch.contains(&local.conversation_id)
                && !seen.contains(&local.conversation_id)
            {
                merged.push(local.clone());
            }
        }

        merged.sort_by(newest_first);
        self.conversations = merged;
        self.touched_since_fetch.clear();

        let selection_gone = self
            .selected_id
            .as_deref()
            .is_some_and(|id| self.find(id).is_none());
        if selection_gone {
            self.clear_selection();
        }
        true
    }

    /// `messageUpdate`: refresh the preview, creating the entry if needed
    pub fn apply_message_update(&mut self, update: &MessageUpdate) {
        let conversation_id = &update.message.conversation_id;

        match self
            .conversations
            .iter_mut()
            .find(|c| &c.conversation_id == conversation_id)
        {
            Some(existing) => existing.apply_preview(update),
            None => {
                let created = Conversation::from_message_update(update, &self.business_wa_id);
                self.conversations.insert(0, created);
            }
        }

        self.touched_since_fetch.insert(conversation_id.clone());
        self.conversations.sort_by(newest_first);
    }

    /// `statusUpdate`: only previews of messages the business sent carry a status
    pub fn apply_status_update(&mut self, update: &StatusUpdate) -> bool {
        let Some(conversation) = self
            .conversations
            .iter_mut()
            .find(|c| c.conversation_id == update.conversation_id && c.is_last_outbound())
        else {
            return false;
        };

        conversation.last_message_status = Some(update.status.clone());
        self.touched_since_fetch.insert(update.conversation_id.clone());
        true
    }

    /// Select a conversation and switch narrow viewports to the chat pane
    pub fn select(&mut self, conversation_id: &str) -> bool {
        if self.find(conversation_id).is_none() {
            return false;
        }
        self.selected_id = Some(conversation_id.to_string());
        self.show_chat_on_mobile = true;
        true
    }

    /// Mobile back button
    pub fn back(&mut self) {
        self.clear_selection();
    }

    fn clear_selection(&mut self) {
        self.selected_id = None;
        self.show_chat_on_mobile = false;
    }
}

fn is_newer(local: Option<DateTime<Utc>>, fetched: Option<DateTime<Utc>>) -> bool {
    match (local, fetched) {
        (Some(l), Some(f)) => l > f,
        (Some(_), None) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Direction, Message, MessageStatus};

    const BUSINESS: &str = "918329446654";

    fn conv(id: &str, ts: &str, direction: Direction) -> Conversation {
        Conversation {
            conversation_id: id.to_string(),
            other_participant_wa_id: format!("91{}", id),
            other_participant_name: None,
            last_message: format!("last in {}", id),
            last_message_timestamp: Some(ts.parse().unwrap()),
            last_message_direction: Some(direction),
            last_message_status: Some(MessageStatus::Delivered),
        }
    }

    fn message_update(conversation_id: &str, message_id: &str, ts: &str, outbound: bool) -> MessageUpdate {
        let (sender, recipient) = if outbound {
            (BUSINESS.to_string(), "919999999999".to_string())
        } else {
            ("919999999999".to_string(), BUSINESS.to_string())
        };
        MessageUpdate {
            message: Message {
                message_id: message_id.to_string(),
                conversation_id: conversation_id.to_string(),
                sender_wa_id: sender,
                recipient_wa_id: recipient,
                body: format!("body of {}", message_id),
                timestamp: ts.parse().unwrap(),
                direction: if outbound { Direction::Outbound } else { Direction::Inbound },
                status: MessageStatus::Sent,
                client_message_id: None,
            },
            sender_name: None,
        }
    }

    fn status(conversation_id: &str, status: MessageStatus) -> StatusUpdate {
        StatusUpdate {
            message_id: "m1".to_string(),
            status,
            conversation_id: conversation_id.to_string(),
        }
    }

    fn ids(inbox: &Inbox) -> Vec<&str> {
        inbox
            .conversations()
            .iter()
            .map(|c| c.conversation_id.as_str())
            .collect()
    }

    fn loaded(conversations: Vec<Conversation>) -> Inbox {
        let mut inbox = Inbox::new(BUSINESS);
        let ticket = inbox.begin_fetch();
        assert!(inbox.accept_fetched(ticket, conversations));
        inbox
    }

    fn assert_sorted_and_unique(inbox: &Inbox) {
        let list = inbox.conversations();
        for pair in list.windows(2) {
            assert_ne!(newest_first(&pair[0], &pair[1]), std::cmp::Ordering::Greater);
        }
        let unique: HashSet<_> = list.iter().map(|c| &c.conversation_id).collect();
        assert_eq!(unique.len(), list.len());
    }

    #[test]
    fn test_single_inbound_conversation_from_fetch() {
        let json = r#"[{"conversationId":"c1","otherParticipantWaId":"919999999999",
            "lastMessage":"hi","lastMessageTimestamp":"2024-01-01T10:00:00Z",
            "lastMessageDirection":"inbound","lastMessageStatus":"delivered"}]"#;
        let inbox = loaded(serde_json::from_str(json).unwrap());
        assert_eq!(inbox.conversations().len(), 1);
        assert_eq!(inbox.conversations()[0].preview_line(), "hi");
    }

    #[test]
    fn test_fetch_sorts_and_dedupes() {
        let inbox = loaded(vec![
            conv("old", "2024-01-01T09:00:00Z", Direction::Inbound),
            conv("new", "2024-01-03T09:00:00Z", Direction::Inbound),
            conv("old", "2024-01-02T09:00:00Z", Direction::Inbound),
        ]);
        assert_eq!(ids(&inbox), ["new", "old"]);
        assert_eq!(
            inbox.conversations()[1].last_message_timestamp,
            Some("2024-01-02T09:00:00Z".parse().unwrap())
        );
    }

    #[test]
    fn test_message_update_moves_existing_to_top() {
        let mut inbox = loaded(vec![
            conv("c1", "2024-01-01T09:00:00Z", Direction::Inbound),
            conv("c2", "2024-01-02T09:00:00Z", Direction::Inbound),
        ]);
        inbox.apply_message_update(&message_update("c1", "m9", "2024-01-05T09:00:00Z", true));

        assert_eq!(ids(&inbox), ["c1", "c2"]);
        let c1 = &inbox.conversations()[0];
        assert_eq!(c1.last_message, "body of m9");
        assert_eq!(c1.preview_line(), "You: body of m9");
        assert_eq!(c1.last_message_status, Some(MessageStatus::Sent));
    }

    #[test]
    fn test_message_update_creates_unknown_conversation() {
        let mut inbox = loaded(vec![conv("c1", "2024-01-01T09:00:00Z", Direction::Inbound)]);
        let mut update = message_update("c7", "m1", "2024-01-04T09:00:00Z", false);
        update.sender_name = Some("Meera".to_string());
        inbox.apply_message_update(&update);

        assert_eq!(ids(&inbox), ["c7", "c1"]);
        let created = &inbox.conversations()[0];
        assert_eq!(created.other_participant_wa_id, "919999999999");
        assert_eq!(created.display_name(), "Meera");
    }

    #[test]
    fn test_message_update_sequences_keep_order_and_uniqueness() {
        let mut inbox = loaded(vec![
            conv("c1", "2024-01-01T09:00:00Z", Direction::Inbound),
            conv("c2", "2024-01-01T09:00:00Z", Direction::Outbound),
        ]);

        // Deterministic pseudo-random walk over ids and timestamps, ties included
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        for step in 0..200 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let conversation_id = format!("c{}", (seed >> 33) % 6);
            let minute = (seed >> 40) % 4;
            let ts = format!("2024-01-02T10:{:02}:00Z", minute);
            inbox.apply_message_update(&message_update(
                &conversation_id,
                &format!("m{}", step),
                &ts,
                step % 2 == 0,
            ));
            assert_sorted_and_unique(&inbox);
        }
    }

    #[test]
    fn test_status_update_only_for_outbound_preview() {
        let mut inbox = loaded(vec![
            conv("c1", "2024-01-01T09:00:00Z", Direction::Outbound),
            conv("c2", "2024-01-01T08:00:00Z", Direction::Inbound),
        ]);
        assert!(inbox.select("c1"));

        assert!(inbox.apply_status_update(&status("c1", MessageStatus::Read)));
        assert_eq!(inbox.find("c1").unwrap().last_message_status, Some(MessageStatus::Read));

        assert!(!inbox.apply_status_update(&status("c2", MessageStatus::Read)));
        assert_eq!(
            inbox.find("c2").unwrap().last_message_status,
            Some(MessageStatus::Delivered)
        );

        assert!(!inbox.apply_status_update(&status("missing", MessageStatus::Read)));
    }

    #[test]
    fn test_select_and_back_on_mobile() {
        let mut inbox = loaded(vec![conv("c1", "2024-01-01T09:00:00Z", Direction::Inbound)]);
        assert!(inbox.list_visible_on_mobile());
        assert!(!inbox.chat_visible_on_mobile());

        assert!(inbox.select("c1"));
        assert_eq!(inbox.selected_id(), Some("c1"));
        assert!(inbox.chat_visible_on_mobile());
        assert!(!inbox.list_visible_on_mobile());

        inbox.back();
        assert_eq!(inbox.selected(), None);
        assert!(!inbox.show_chat_on_mobile());
        assert!(inbox.list_visible_on_mobile());
    }

    #[test]
    fn test_select_unknown_is_ignored() {
        let mut inbox = loaded(vec![conv("c1", "2024-01-01T09:00:00Z", Direction::Inbound)]);
        assert!(!inbox.select("nope"));
        assert_eq!(inbox.selected_id(), None);
        assert!(!inbox.show_chat_on_mobile());
    }

    #[test]
    fn test_refetch_keeps_or_clears_selection() {
        let mut inbox = loaded(vec![
            conv("c1", "2024-01-01T09:00:00Z", Direction::Inbound),
            conv("c2", "2024-01-01T08:00:00Z", Direction::Inbound),
        ]);
        inbox.select("c2");

        let ticket = inbox.begin_fetch();
        inbox.accept_fetched(ticket, vec![conv("c2", "2024-01-02T08:00:00Z", Direction::Inbound)]);
        assert_eq!(inbox.selected().unwrap().last_message_timestamp,
            Some("2024-01-02T08:00:00Z".parse().unwrap()));

        let ticket = inbox.begin_fetch();
        inbox.accept_fetched(ticket, vec![conv("c1", "2024-01-01T09:00:00Z", Direction::Inbound)]);
        assert_eq!(inbox.selected_id(), None);
        assert!(inbox.list_visible_on_mobile());
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut inbox = Inbox::new(BUSINESS);
        let first = inbox.begin_fetch();
        let second = inbox.begin_fetch();

        assert!(inbox.accept_fetched(second, vec![conv("fresh", "2024-01-02T09:00:00Z", Direction::Inbound)]));
        assert!(!inbox.accept_fetched(first, vec![conv("stale", "2024-01-01T09:00:00Z", Direction::Inbound)]));
        assert_eq!(ids(&inbox), ["fresh"]);
    }

    #[test]
    fn test_fetch_does_not_roll_back_realtime_updates() {
        let mut inbox = loaded(vec![conv("c1", "2024-01-01T09:00:00Z", Direction::Inbound)]);

        let ticket = inbox.begin_fetch();
        // Events that land while the request is in flight
        inbox.apply_message_update(&message_update("c1", "m5", "2024-01-03T09:00:00Z", true));
        inbox.apply_message_update(&message_update("c9", "m6", "2024-01-03T10:00:00Z", false));

        inbox.accept_fetched(ticket, vec![conv("c1", "2024-01-02T09:00:00Z", Direction::Inbound)]);

        assert_eq!(ids(&inbox), ["c9", "c1"]);
        let c1 = inbox.find("c1").unwrap();
        assert_eq!(c1.last_message, "body of m5");
        assert!(c1.is_last_outbound());
    }

    #[test]
    fn test_fetch_keeps_status_update_received_meanwhile() {
        let mut sent = conv("c1", "2024-01-01T09:00:00Z", Direction::Outbound);
        sent.last_message_status = Some(MessageStatus::Sent);
        let mut inbox = loaded(vec![sent.clone()]);

        let ticket = inbox.begin_fetch();
        assert!(inbox.apply_status_update(&status("c1", MessageStatus::Read)));
        assert!(inbox.accept_fetched(ticket, vec![sent]));
        assert_eq!(inbox.find("c1").unwrap().last_message_status, Some(MessageStatus::Read));

        // A newer message from the server carries its own status
        let ticket = inbox.begin_fetch();
        inbox.apply_status_update(&status("c1", MessageStatus::Delivered));
        let mut newer = conv("c1", "2024-01-02T09:00:00Z", Direction::Outbound);
        newer.last_message_status = Some(MessageStatus::Sent);
        inbox.accept_fetched(ticket, vec![newer.clone()]);
        assert_eq!(inbox.find("c1").unwrap().last_message_status, Some(MessageStatus::Sent));

        // Untouched entries take the fetched status
        let ticket = inbox.begin_fetch();
        newer.last_message_status = Some(MessageStatus::Delivered);
        inbox.accept_fetched(ticket, vec![newer]);
        assert_eq!(inbox.find("c1").unwrap().last_message_status, Some(MessageStatus::Delivered));
    }

    #[test]
    fn test_filtered_keeps_inbox_order() {
        let mut a = conv("a", "2024-01-01T09:00:00Z", Direction::Inbound);
        a.other_participant_name = Some("Priya".to_string());
        let mut b = conv("b", "2024-01-02T09:00:00Z", Direction::Inbound);
        b.other_participant_name = Some("Pritam".to_string());
        let c = conv("c", "2024-01-03T09:00:00Z", Direction::Inbound);
        let inbox = loaded(vec![a, b, c]);

        let hits: Vec<_> = inbox
            .filtered("pri")
            .into_iter()
            .map(|c| c.conversation_id)
            .collect();
        assert_eq!(hits, ["b", "a"]);
        assert_eq!(inbox.filtered("").len(), 3);
    }
}
