//! Left pane: search box, refresh and the sorted conversation entries

use dioxus::prelude::*;

use crate::app::components::Avatar;
use crate::domain::models::Conversation;
use crate::shared::hooks::InboxController;
use crate::shared::utils::format_optional_time;

#[component]
pub fn ConversationList(controller: InboxController) -> Element {
    let mut query = controller.query;
    let conversations = controller.visible();
    let selected_id = controller.inbox.read().selected_id().map(str::to_string);

    let refresh = controller.clone();
    let select = controller.clone();
    let on_select = EventHandler::new(move |conversation_id: String| {
        select.select(&conversation_id);
    });

    rsx! {
        aside { class: "c-conversation-list",
            header { class: "c-conversation-list__header",
                h1 { class: "c-conversation-list__title", "Chats" }
                button {
                    class: "c-conversation-list__refresh",
                    title: "Refresh",
                    onclick: move |_| refresh.refresh(),
                    "⟳"
                }
            }

            div { class: "c-conversation-list__search",
                input {
                    r#type: "search",
                    class: "c-conversation-list__search-input",
                    placeholder: "Search or start new chat",
                    value: "{query}",
                    oninput: move |evt| query.set(evt.value()),
                }
            }

            if conversations.is_empty() {
                p { class: "c-conversation-list__empty", "No conversations found." }
            } else {
                ul { class: "c-conversation-list__items",
                    for conversation in conversations {
                        ConversationItem {
                            key: "{conversation.conversation_id}",
                            selected: selected_id.as_deref() == Some(conversation.conversation_id.as_str()),
                            conversation: conversation.clone(),
                            on_select,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ConversationItem(
    conversation: Conversation,
    selected: bool,
    on_select: EventHandler<String>,
) -> Element {
    let class = if selected {
        "c-conversation-item c-conversation-item--selected"
    } else {
        "c-conversation-item"
    };
    let name = conversation.display_name().to_string();
    let time = format_optional_time(conversation.last_message_timestamp.as_ref());
    let preview = conversation.preview_line();
    let conversation_id = conversation.conversation_id.clone();

    rsx! {
        li {
            class: "{class}",
            onclick: move |_| on_select.call(conversation_id.clone()),
            Avatar { initial: conversation.avatar_initial() }
            div { class: "c-conversation-item__body",
                div { class: "c-conversation-item__top",
                    span { class: "c-conversation-item__name", "{name}" }
                    span { class: "c-conversation-item__time", "{time}" }
                }
                p { class: "c-conversation-item__preview", "{preview}" }
            }
        }
    }
}
