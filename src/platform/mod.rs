//! # Platform Layer
//!
//! The message-event seam between the dispatcher and the chat client.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod event;
pub mod gateway;

pub use event::{Author, MessageEvent};
pub use gateway::SerenityMessage;
