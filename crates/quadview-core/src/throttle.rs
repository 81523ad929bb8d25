//! Trailing-edge redraw rate limiter.
//!
//! Driven by caller-supplied instants so the state machine can be stepped
//! deterministically. A request inside the cooldown window is never dropped:
//! it becomes a pending trailing paint that fires once the window closes.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThrottleState {
    /// No paint in the last interval.
    Idle,
    /// Painted at `since`; further requests are deferred.
    Throttled { since: Instant },
    /// Painted at `since` and at least one request arrived afterwards.
    TrailingPending { since: Instant },
}

#[derive(Clone, Debug)]
pub struct RedrawThrottle {
    interval: Duration,
    state: ThrottleState,
}

impl RedrawThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: ThrottleState::Idle,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> ThrottleState {
        self.state
    }

    /// Ask for a paint. Returns `true` when the caller should paint right now.
    pub fn request(&mut self, now: Instant) -> bool {
        self.expire(now);
        match self.state {
            ThrottleState::Idle => {
                self.state = ThrottleState::Throttled { since: now };
                true
            }
            ThrottleState::TrailingPending { since } if now >= since + self.interval => {
                self.state = ThrottleState::Throttled { since: now };
                true
            }
            ThrottleState::Throttled { since } | ThrottleState::TrailingPending { since } => {
                self.state = ThrottleState::TrailingPending { since };
                false
            }
        }
    }

    /// Advance the clock. Returns `true` when the deferred trailing paint is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            ThrottleState::TrailingPending { since } if now >= since + self.interval => {
                self.state = ThrottleState::Throttled { since: now };
                true
            }
            _ => {
                self.expire(now);
                false
            }
        }
    }

    /// When the pending trailing paint becomes due, if there is one.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            ThrottleState::TrailingPending { since } => Some(since + self.interval),
            _ => None,
        }
    }

    pub fn has_pending(&self) -> bool {
        matches!(self.state, ThrottleState::TrailingPending { .. })
    }

    fn expire(&mut self, now: Instant) {
        if let ThrottleState::Throttled { since } = self.state {
            if now >= since + self.interval {
                self.state = ThrottleState::Idle;
            }
        }
    }
}
