use dioxus::prelude::*;

// Initial-letter avatar (BEM: c-avatar)
#[component]
pub fn Avatar(initial: String, #[props(default)] large: bool) -> Element {
    let size = if large { "c-avatar c-avatar--large" } else { "c-avatar" };
    rsx! {
        div { class: "{size}", "{initial}" }
    }
}

// Reusable Empty State Component (BEM: c-empty-state)
#[component]
pub fn EmptyState(icon: String, title: String, description: String) -> Element {
    rsx! {
        div { class: "c-empty-state",
            div { class: "c-empty-state__icon", "{icon}" }
            h2 { class: "c-empty-state__title", "{title}" }
            p { class: "c-empty-state__description", "{description}" }
        }
    }
}
