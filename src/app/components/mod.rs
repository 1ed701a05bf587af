pub mod chat_input;
pub mod chat_messages;
pub mod chat_window;
pub mod common;
pub mod conversation_list;
pub mod message_bubble;

pub use chat_input::ChatInput;
pub use chat_messages::ChatMessages;
pub use chat_window::ChatWindow;
pub use common::{Avatar, EmptyState};
pub use conversation_list::ConversationList;
pub use message_bubble::MessageBubble;
