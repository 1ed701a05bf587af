// Shared services
// REST client for the messaging backend (gloo-net, browser fetch under WASM)
pub mod api_service;

pub use api_service::ApiService;
