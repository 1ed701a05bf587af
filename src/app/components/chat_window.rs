//! Right pane: header, thread and composer of the selected conversation

use dioxus::prelude::*;

use crate::app::components::{Avatar, ChatInput, ChatMessages, EmptyState};
use crate::domain::models::Conversation;
use crate::infrastructure::realtime::RealtimeClient;
use crate::shared::hooks::use_chat_thread;
use crate::shared::services::ApiService;

#[component]
pub fn ChatWindow(
    conversation: Option<Conversation>,
    api: ApiService,
    realtime: RealtimeClient,
    on_back: EventHandler<()>,
) -> Element {
    let controller = use_chat_thread(
        conversation.as_ref().map(|c| c.conversation_id.clone()),
        api,
        realtime,
    );

    let Some(conversation) = conversation else {
        return rsx! {
            section { class: "c-chat-window c-chat-window--idle",
                EmptyState {
                    icon: "💬",
                    title: "WhatsApp Inbox",
                    description: "Select a chat to start messaging",
                }
            }
        };
    };

    let name = conversation.display_name().to_string();
    let wa_id = conversation.other_participant_wa_id.clone();
    let initial = conversation.avatar_initial();

    let target = conversation.clone();
    let submit = controller.clone();
    let on_submit = move |_| submit.submit(Some(&target));

    rsx! {
        section { class: "c-chat-window",
            header { class: "c-chat-window__header",
                button {
                    class: "c-chat-window__back",
                    title: "Back",
                    onclick: move |_| on_back.call(()),
                    "←"
                }
                Avatar { initial, large: true }
                div { class: "c-chat-window__contact",
                    h2 { class: "c-chat-window__name", "{name}" }
                    span { class: "c-chat-window__wa-id", "{wa_id}" }
                }
            }

            ChatMessages { thread: controller.thread }

            ChatInput { draft: controller.draft, on_submit }
        }
    }
}
