//! Root component: wires config, the REST client and the realtime channel
//! into the two panes

use dioxus::prelude::*;

use crate::app::components::{ChatWindow, ConversationList};
use crate::config::AppConfig;
use crate::shared::hooks::{use_inbox, use_realtime};
use crate::shared::services::ApiService;

const BUNDLE_CSS: Asset = asset!("/assets/dist/bundle.css");

#[component]
pub fn App() -> Element {
    let api = use_hook(|| ApiService::from_config(AppConfig::current()));
    let realtime = use_realtime();
    let controller = use_inbox(api.clone(), realtime.clone());

    let (list_visible, chat_visible) = {
        let inbox = controller.inbox.read();
        (inbox.list_visible_on_mobile(), inbox.chat_visible_on_mobile())
    };
    let list_pane = pane_class("list", list_visible);
    let chat_pane = pane_class("chat", chat_visible);

    let back = controller.clone();

    rsx! {
        document::Link { rel: "stylesheet", href: BUNDLE_CSS }

        main { class: "l-inbox",
            div { class: "{list_pane}",
                ConversationList { controller: controller.clone() }
            }
            div { class: "{chat_pane}",
                ChatWindow {
                    conversation: controller.selected(),
                    api,
                    realtime,
                    on_back: move |_| back.back(),
                }
            }
        }
    }
}

/// Narrow viewports show one pane at a time; wide ones always show both
fn pane_class(pane: &str, visible_on_mobile: bool) -> String {
    if visible_on_mobile {
        format!("l-inbox__pane l-inbox__pane--{}", pane)
    } else {
        format!("l-inbox__pane l-inbox__pane--{} l-inbox__pane--mobile-hidden", pane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pane_class() {
        assert_eq!(pane_class("list", true), "l-inbox__pane l-inbox__pane--list");
        assert_eq!(
            pane_class("chat", false),
            "l-inbox__pane l-inbox__pane--chat l-inbox__pane--mobile-hidden"
        );
    }
}
