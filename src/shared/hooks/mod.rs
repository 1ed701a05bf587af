// Custom Dioxus hooks
pub mod use_chat_thread;
pub mod use_inbox;
pub mod use_realtime;

pub use use_chat_thread::{use_chat_thread, ChatThreadController, MESSAGES_END_ID};
pub use use_inbox::{use_inbox, InboxController};
pub use use_realtime::{use_realtime, use_subscription_set, SubscriptionSet};
