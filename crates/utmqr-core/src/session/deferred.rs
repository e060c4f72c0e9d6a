//! One-shot delayed actions driven by an explicit clock.

use std::time::{Duration, Instant};

/// A single pending "run once after N ms" action.
///
/// Scheduling again replaces the previous deadline; `cancel` drops it. The
/// owner polls `fire_if_due` from its event loop, which returns `true`
/// exactly once per scheduled deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deferred {
    deadline: Option<Instant>,
}

impl Deferred {
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
