// Realtime push channel (SSE)
pub mod client;
pub mod event_source;
pub mod registry;

pub use client::{RealtimeClient, Subscription, TransportSignal};
pub use registry::SubscriptionId;
