//! Trailing-edge debounce from raw input to a committed query
//!
//! Driven by the event loop's ticks: time is always passed in, never read,
//! so the controller behaves the same under test as in the terminal.

use std::time::{Duration, Instant};

/// Default delay between the last keystroke and the commit
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(350);

/// Raw/committed query pair with a restartable commit deadline
#[derive(Debug, Clone)]
pub struct Debouncer {
    raw: String,
    committed: String,
    deadline: Option<Instant>,
    delay: Duration,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            raw: String::new(),
            committed: String::new(),
            deadline: None,
            delay,
        }
    }

    /// Latest value seen, updated on every keystroke
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Last value that stayed stable for the full delay
    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether a commit is scheduled
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Record a new raw value and restart the timer.
    ///
    /// Returning to the committed value drops the pending commit instead.
    pub fn set_raw(&mut self, value: impl Into<String>, now: Instant) {
        let value = value.into();
        if value == self.raw {
            return;
        }
        self.deadline = if value == self.committed {
            None
        } else {
            Some(now + self.delay)
        };
        self.raw = value;
    }

    /// Commit the raw value if its deadline has passed.
    ///
    /// Returns the newly committed value, or `None` when nothing is due or the
    /// raw value settled back on what was already committed.
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                if self.raw == self.committed {
                    return None;
                }
                self.committed = self.raw.clone();
                Some(self.committed.as_str())
            }
            _ => None,
        }
    }

    /// Drop any scheduled commit
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Forget both values and any scheduled commit
    pub fn reset(&mut self) {
        self.raw.clear();
        self.committed.clear();
        self.deadline = None;
    }
}
