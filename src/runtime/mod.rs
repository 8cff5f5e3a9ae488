//! Async runtime plumbing: spawned fetches report back as messages.

mod message;
mod runtime;

pub use message::AppMessage;
pub use runtime::AsyncRuntime;
