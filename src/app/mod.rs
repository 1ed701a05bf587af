pub mod components;
pub mod pages;

pub use pages::App;
