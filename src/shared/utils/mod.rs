// Utility functions
pub mod format;

pub use format::{format_optional_time, format_time_in, format_time_of_day};
