// Business entities and the state machines built on them
pub mod models;
pub mod services;
