//! Core framework: input events and the `View` trait.

pub mod event;
pub mod view;

pub use event::InputEvent;
pub use view::{ActiveTab, EventResult, View};
