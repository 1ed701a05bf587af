use dioxus::prelude::*;

use crate::app::components::MessageBubble;
use crate::domain::services::ChatThread;
use crate::shared::hooks::MESSAGES_END_ID;

#[component]
pub fn ChatMessages(thread: Signal<ChatThread>) -> Element {
    rsx! {
        div { class: "c-chat-messages",
            ul { class: "c-chat-messages__list",
                for message in thread.read().messages().iter() {
                    MessageBubble { key: "{message.message_id}", message: message.clone() }
                }
            }
            div { id: MESSAGES_END_ID }
        }
    }
}
