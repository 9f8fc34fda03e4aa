pub mod client;
pub mod error;

pub use client::{ChatClient, RelayResponse, ANTHROPIC_VERSION};
pub use error::ChatError;
