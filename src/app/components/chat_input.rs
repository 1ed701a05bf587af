//! Message composer: Enter sends, Shift+Enter and IME composition do not

use dioxus::prelude::*;

#[component]
pub fn ChatInput(mut draft: Signal<String>, on_submit: EventHandler<()>) -> Element {
    let mut is_composing = use_signal(|| false);

    let handle_keydown = move |evt: Event<KeyboardData>| {
        if evt.key() == Key::Enter
            && !evt.modifiers().contains(Modifiers::SHIFT)
            && !*is_composing.read()
        {
            evt.prevent_default();
            on_submit.call(());
        }
    };

    let has_content = !draft.read().trim().is_empty();

    rsx! {
        div { class: "c-chat-input",
            textarea {
                id: "chat-input",
                class: "c-chat-input__field",
                value: "{draft}",
                placeholder: "Type a message",
                rows: "1",
                oninput: move |evt| draft.set(evt.value()),
                onkeydown: handle_keydown,
                oncompositionstart: move |_| is_composing.set(true),
                oncompositionend: move |_| is_composing.set(false),
            }
            button {
                class: "c-chat-input__send",
                title: "Send",
                disabled: !has_content,
                onclick: move |_| on_submit.call(()),
                "➤"
            }
        }
    }
}
