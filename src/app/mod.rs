//! Application layer: debounced search, pane state machines, the workbench.

pub mod debounce;
pub mod pane;
pub mod theme;
pub mod workbench;

pub use debounce::SearchDebouncer;
pub use pane::{BodyKind, ListPane, Phase};
pub use theme::UiTheme;
pub use workbench::Workbench;
