//! One message of the open thread

use dioxus::prelude::*;

use crate::domain::models::Message;
use crate::shared::utils::format_time_of_day;

/// Outbound bubbles sit on the right and carry a delivery tick
#[component]
pub fn MessageBubble(message: Message) -> Element {
    let direction = message.direction.as_str();
    let pending = if message.is_pending() { " c-bubble--pending" } else { "" };
    let time = format_time_of_day(&message.timestamp);
    let status = message.status.as_str().to_string();

    rsx! {
        li { class: "c-bubble-row c-bubble-row--{direction}",
            div { class: "c-bubble c-bubble--{direction}{pending}",
                p { class: "c-bubble__body", "{message.body}" }
                div { class: "c-bubble__meta",
                    span { class: "c-bubble__time", "{time}" }
                    if let Some(glyph) = message.status_glyph() {
                        span {
                            class: "c-bubble__status c-bubble__status--{glyph.modifier}",
                            title: "{status}",
                            "{glyph.symbol}"
                        }
                    }
                }
            }
        }
    }
}
