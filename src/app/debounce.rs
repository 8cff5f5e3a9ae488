//! Trailing-edge search debounce.
//!
//! Every keystroke restarts the idle window; a commit happens only once the
//! input has been stable for the full delay. The pending commit is a deadline
//! checked from the event-loop tick, so there is at most one in flight and no
//! timer task to cancel.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<Pending>,
    committed: String,
}

#[derive(Debug)]
struct Pending {
    text: String,
    deadline: Instant,
}

/// A committed search value. Empty input commits as `None` ("unset").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCommit {
    pub name: Option<String>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            committed: String::new(),
        }
    }

    /// Record the raw input as of `now`, superseding any pending commit.
    pub fn input(&mut self, text: &str, now: Instant) {
        if text == self.committed {
            // Typing back to the committed value cancels the pending commit.
            self.pending = None;
            return;
        }
        self.pending = Some(Pending {
            text: text.to_string(),
            deadline: now + self.delay,
        });
    }

    /// Check the deadline; returns the commit once the input has been idle
    /// for the full delay.
    pub fn poll(&mut self, now: Instant) -> Option<SearchCommit> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| now >= pending.deadline);
        if !due {
            return None;
        }

        let pending = self.pending.take()?;
        self.committed = pending.text;
        Some(SearchCommit {
            name: if self.committed.is_empty() {
                None
            } else {
                Some(self.committed.clone())
            },
        })
    }

    /// Drop any pending commit and forget the committed value.
    pub fn reset(&mut self) {
        self.pending = None;
        self.committed.clear();
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_burst_commits_once() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(DELAY);

        debouncer.input("a", start);
        debouncer.input("ab", start + ms(100));
        debouncer.input("abc", start + ms(200));

        assert_eq!(debouncer.poll(start + ms(400)), None);
        let commit = debouncer.poll(start + ms(700)).unwrap();
        assert_eq!(commit.name.as_deref(), Some("abc"));

        // Nothing further once drained.
        assert_eq!(debouncer.poll(start + ms(2000)), None);
    }

    #[test]
    fn test_idle_gap_commits_twice() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(DELAY);

        debouncer.input("a", start);
        let first = debouncer.poll(start + ms(600)).unwrap();
        assert_eq!(first.name.as_deref(), Some("a"));

        debouncer.input("ab", start + ms(700));
        let second = debouncer.poll(start + ms(1300)).unwrap();
        assert_eq!(second.name.as_deref(), Some("ab"));
    }

    #[test]
    fn test_empty_commits_as_unset() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(DELAY);

        debouncer.input("rick", start);
        debouncer.poll(start + ms(600)).unwrap();

        debouncer.input("", start + ms(700));
        let commit = debouncer.poll(start + ms(1300)).unwrap();
        assert_eq!(commit.name, None);
    }

    #[test]
    fn test_typing_back_to_committed_cancels() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(DELAY);

        debouncer.input("rick", start);
        debouncer.poll(start + ms(600)).unwrap();

        debouncer.input("rickx", start + ms(700));
        debouncer.input("rick", start + ms(800));
        assert!(!debouncer.has_pending());
        assert_eq!(debouncer.poll(start + ms(2000)), None);
    }

    #[test]
    fn test_reset() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(DELAY);

        debouncer.input("morty", start);
        debouncer.reset();
        assert_eq!(debouncer.poll(start + ms(1000)), None);

        // After reset the empty committed baseline is restored, so typing the
        // same text again schedules a fresh commit.
        debouncer.input("morty", start + ms(1100));
        assert!(debouncer.has_pending());
    }
}
