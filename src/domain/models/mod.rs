// Domain models (wire records of the messaging backend)
// Pure Rust, no framework dependencies

pub mod conversation;
pub mod events;
pub mod message;

pub use conversation::{newest_first, Conversation};
pub use events::{MessageUpdate, RealtimeEvent, RealtimeEventKind, StatusUpdate};
pub use message::{Direction, Message, MessageStatus, OutboundMessage, StatusGlyph, PENDING_ID_PREFIX};
