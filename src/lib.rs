// Public API exports
pub mod config;
pub mod domain;
pub mod shared;

// Browser transports (EventSource)
pub mod infrastructure;

// Dioxus UI
pub mod app;
