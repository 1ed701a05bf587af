//! Message list, draft and submission for the open conversation

use chrono::Utc;
use dioxus::prelude::*;

use crate::config::AppConfig;
use crate::domain::models::{Conversation, RealtimeEvent, RealtimeEventKind};
use crate::domain::services::{prepare_outbound, ChatThread, LoadTicket};
use crate::infrastructure::realtime::RealtimeClient;
use crate::shared::hooks::use_realtime::{use_subscription_set, SubscriptionSet};
use crate::shared::logging::{
    log_message_submit_error, log_message_submitted, log_messages_error, log_messages_loaded,
    log_pending_resolved, log_stale_response, LogOperation,
};
use crate::shared::services::ApiService;

pub const MESSAGES_END_ID: &str = "messages-end";

#[derive(Clone, PartialEq)]
pub struct ChatThreadController {
    pub thread: Signal<ChatThread>,
    pub draft: Signal<String>,
    api: ApiService,
}

impl ChatThreadController {
    /// Send the draft to `target`. Blank drafts and a missing target are
    /// ignored without touching the input.
    pub fn submit(&self, target: Option<&Conversation>) {
        let draft_text = self.draft.peek().clone();
        let Some(outbound) = prepare_outbound(&draft_text, target) else {
            return;
        };

        let mut thread = self.thread;
        let mut draft = self.draft;
        let pending = outbound.to_pending(&AppConfig::current().business_wa_id, Utc::now());
        thread.write().add_pending(pending);
        draft.set(String::new());

        let api = self.api.clone();
        spawn(async move {
            let conversation_id = outbound.conversation_id.clone();
            let client_id = outbound.client_message_id.clone().unwrap_or_default();
            match api.send_message(&outbound).await {
                Ok(()) => log_message_submitted(&conversation_id, &client_id),
                Err(e) => {
                    log_message_submit_error(&conversation_id, &e);
                    if thread.write().discard_pending(&client_id).is_some() {
                        log_pending_resolved(&conversation_id, &client_id, false);
                    }
                    let still_open =
                        thread.peek().conversation_id() == Some(conversation_id.as_str());
                    if still_open && draft.peek().is_empty() {
                        draft.set(outbound.body);
                    }
                }
            }
        });
    }
}

async fn load_messages(mut thread: Signal<ChatThread>, api: ApiService, ticket: LoadTicket) {
    match api.get_conversation_messages(&ticket.conversation_id).await {
        Ok(messages) => {
            let count = messages.len();
            if thread.write().accept_loaded(&ticket, messages) {
                log_messages_loaded(&ticket.conversation_id, count);
            } else {
                log_stale_response(LogOperation::MessageFetch, Some(&ticket.conversation_id));
            }
        }
        Err(e) => log_messages_error(&ticket.conversation_id, &e),
    }
}

fn subscribe_thread(
    realtime: &RealtimeClient,
    subscriptions: &SubscriptionSet,
    thread: Signal<ChatThread>,
    api: ApiService,
    conversation_id: String,
) {
    let mut subs = subscriptions.borrow_mut();

    let for_messages = conversation_id.clone();
    subs.push(realtime.subscribe(RealtimeEventKind::MessageUpdate, move |event| {
        let RealtimeEvent::MessageUpdate(update) = event else {
            return;
        };
        if update.message.conversation_id != for_messages {
            return;
        }
        let mut thread = thread;
        let mut guard = thread.write();
        let pending_before = guard.messages().iter().filter(|m| m.is_pending()).count();
        guard.apply_message_update(&update.message);
        let pending_after = guard.messages().iter().filter(|m| m.is_pending()).count();
        if pending_after < pending_before {
            log_pending_resolved(
                &for_messages,
                update.message.client_message_id.as_deref().unwrap_or("-"),
                true,
            );
        }
    }));

    let for_statuses = conversation_id;
    subs.push(realtime.subscribe(RealtimeEventKind::StatusUpdate, move |event| {
        if let RealtimeEvent::StatusUpdate(update) = event {
            if update.conversation_id == for_statuses {
                let mut thread = thread;
                thread.write().apply_status_update(update);
            }
        }
    }));

    subs.push(realtime.subscribe(RealtimeEventKind::Reconnected, move |_| {
        let mut thread = thread;
        let ticket = thread.write().reload();
        if let Some(ticket) = ticket {
            spawn(load_messages(thread, api.clone(), ticket));
        }
    }));
}

/// Thread state for `conversation_id`. Switching conversations drops the old
/// handlers before anything for the new one is subscribed or fetched.
pub fn use_chat_thread(
    conversation_id: Option<String>,
    api: ApiService,
    realtime: RealtimeClient,
) -> ChatThreadController {
    let thread = use_signal(ChatThread::new);
    let draft = use_signal(String::new);
    let subscriptions = use_subscription_set();

    // Props are not reactive: mirror the selection into a signal
    let mut current_id = use_signal(|| conversation_id.clone());
    if *current_id.peek() != conversation_id {
        current_id.set(conversation_id);
    }

    let controller = ChatThreadController {
        thread,
        draft,
        api: api.clone(),
    };

    use_effect(move || {
        let selected = current_id();
        subscriptions.borrow_mut().clear();

        let mut thread = thread;
        let ticket = thread.write().open(selected.clone());
        let (Some(ticket), Some(conversation_id)) = (ticket, selected) else {
            return;
        };

        subscribe_thread(&realtime, &subscriptions, thread, api.clone(), conversation_id);
        spawn(load_messages(thread, api.clone(), ticket));
    });

    use_auto_scroll(thread);

    controller
}

/// Keep the newest message in view
fn use_auto_scroll(thread: Signal<ChatThread>) {
    use_effect(move || {
        let count = thread.read().messages().len();
        if count == 0 {
            return;
        }
        #[cfg(target_arch = "wasm32")]
        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(50).await;
            let end = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(MESSAGES_END_ID));
            if let Some(end) = end {
                end.scroll_into_view();
            }
        });
    });
}
