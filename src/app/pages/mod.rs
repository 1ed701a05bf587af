pub mod inbox;

pub use inbox::App;
