// Controller state (pure, DOM-free)
pub mod composer;
pub mod inbox;
pub mod thread;

pub use composer::prepare_outbound;
pub use inbox::{FetchTicket, Inbox};
pub use thread::{ChatThread, LoadTicket};
