// src/state/warning.rs
use std::time::{Duration, Instant};

/// How long the "too many panels" warning stays up after it was last raised.
pub const WARNING_DURATION: Duration = Duration::from_secs(5);

/// A flag that turns itself off `WARNING_DURATION` after the last `raise`.
#[derive(Debug, Clone, Default)]
pub struct CapacityWarning {
    raised_at: Option<Instant>,
}

impl CapacityWarning {
    /// Raising again restarts the countdown.
    pub fn raise(&mut self, now: Instant) {
        self.raised_at = Some(now);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.remaining(now).is_some()
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let raised = self.raised_at?;
        WARNING_DURATION
            .checked_sub(now.saturating_duration_since(raised))
            .filter(|left| !left.is_zero())
    }

    /// Drop an expired warning so later reads see a cleared state.
    pub fn tick(&mut self, now: Instant) {
        if self.raised_at.is_some() && !self.is_active(now) {
            self.raised_at = None;
        }
    }
}
