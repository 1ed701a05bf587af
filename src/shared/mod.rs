pub mod errors;
pub mod logging;
pub mod services;
pub mod utils;

// Dioxus hooks wiring state to the UI
pub mod hooks;
