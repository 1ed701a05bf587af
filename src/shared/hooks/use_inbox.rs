//! Root controller: conversation list, selection and mobile pane state

use dioxus::prelude::*;

use crate::config::AppConfig;
use crate::domain::models::{Conversation, RealtimeEvent, RealtimeEventKind};
use crate::domain::services::Inbox;
use crate::infrastructure::realtime::RealtimeClient;
use crate::shared::hooks::use_realtime::use_subscription_set;
use crate::shared::logging::{
    log_conversations_error, log_conversations_loaded, log_stale_response, LogOperation,
};
use crate::shared::services::ApiService;

#[derive(Clone, PartialEq)]
pub struct InboxController {
    pub inbox: Signal<Inbox>,
    pub query: Signal<String>,
    api: ApiService,
}

impl InboxController {
    pub fn select(&self, conversation_id: &str) {
        let mut inbox = self.inbox;
        if !inbox.write().select(conversation_id) {
            tracing::warn!(conversation_id, "Selected conversation is not in the list");
        }
    }

    pub fn back(&self) {
        let mut inbox = self.inbox;
        inbox.write().back();
    }

    /// Re-fetch the list; a newer refresh supersedes a running one
    pub fn refresh(&self) {
        spawn(fetch_conversations(self.inbox, self.api.clone()));
    }

    pub fn selected(&self) -> Option<Conversation> {
        self.inbox.read().selected().cloned()
    }

    pub fn visible(&self) -> Vec<Conversation> {
        self.inbox.read().filtered(&self.query.read())
    }
}

async fn fetch_conversations(mut inbox: Signal<Inbox>, api: ApiService) {
    let ticket = inbox.write().begin_fetch();
    match api.get_conversations().await {
        Ok(conversations) => {
            let count = conversations.len();
            if inbox.write().accept_fetched(ticket, conversations) {
                log_conversations_loaded(count);
            } else {
                log_stale_response(LogOperation::ConversationFetch, None);
            }
        }
        // Keep whatever is shown
        Err(e) => log_conversations_error(&e),
    }
}

pub fn use_inbox(api: ApiService, realtime: RealtimeClient) -> InboxController {
    let inbox = use_signal(|| Inbox::new(AppConfig::current().business_wa_id.clone()));
    let query = use_signal(String::new);
    let controller = InboxController { inbox, query, api };
    let subscriptions = use_subscription_set();

    let init = controller.clone();
    use_hook(move || {
        let mut subs = subscriptions.borrow_mut();
        subs.push(realtime.subscribe(RealtimeEventKind::MessageUpdate, move |event| {
            if let RealtimeEvent::MessageUpdate(update) = event {
                let mut inbox = inbox;
                inbox.write().apply_message_update(update);
            }
        }));
        subs.push(realtime.subscribe(RealtimeEventKind::StatusUpdate, move |event| {
            if let RealtimeEvent::StatusUpdate(update) = event {
                let mut inbox = inbox;
                inbox.write().apply_status_update(update);
            }
        }));
        let on_reconnect = init.clone();
        subs.push(realtime.subscribe(RealtimeEventKind::Reconnected, move |_| {
            tracing::info!("Realtime channel back, refreshing conversations");
            on_reconnect.refresh();
        }));
        init.refresh();
    });

    controller
}
