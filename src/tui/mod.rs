//! Terminal lifecycle: raw mode setup and guaranteed restore on exit,
//! panic or termination signal.

mod terminal_guard;

pub use terminal_guard::{
    CrosstermTerminalOps, TerminalGuard, TerminalOps, TerminalRestorer, TerminationSignal,
};

#[cfg(unix)]
pub use terminal_guard::install_termination_signals;
