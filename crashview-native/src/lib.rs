mod client;
mod log;

pub use client::*;
pub use log::*;

// Re-export these crates.
pub use crashview;
pub use reqwest;
