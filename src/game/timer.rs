use std::time::{Duration, Instant};

/// A single pending deadline. Scheduling again replaces the previous one.
#[derive(Debug, Default, Clone, Copy)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.at = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.at = None;
    }

    pub fn is_pending(&self) -> bool {
        self.at.is_some()
    }

    /// Returns true exactly once, on the first poll at or after the deadline.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.at {
            Some(at) if now >= at => {
                self.at = None;
                true
            }
            _ => false,
        }
    }
}
