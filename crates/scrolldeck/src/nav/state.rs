use std::time::Instant;

use super::input::SwipeTracker;

/// Whether an animated move is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Transitioning {
        target: usize,
        /// When the guard is released even without a completion signal.
        release_at: Instant,
        /// Whether the host's scroll-completion signal can release it earlier.
        awaiting_completion: bool,
    },
}

/// The authoritative navigation state. Owned by the controller only.
#[derive(Debug, Clone)]
pub(crate) struct NavigationState {
    pub index: usize,
    pub count: usize,
    pub phase: Phase,
    pub swipe: SwipeTracker,
    /// A scroll recomputation came due mid-transition and waits for the guard.
    pub scroll_check_deferred: bool,
}

impl NavigationState {
    pub fn new(count: usize) -> Self {
        Self {
            index: 0,
            count,
            phase: Phase::Idle,
            swipe: SwipeTracker::default(),
            scroll_check_deferred: false,
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.count
    }

    pub fn last_index(&self) -> usize {
        self.count.saturating_sub(1)
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }

    pub fn release_deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Transitioning { release_at, .. } => Some(release_at),
            Phase::Idle => None,
        }
    }

    /// Release the guard if its deadline has passed.
    pub fn release_if_due(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Transitioning { release_at, .. } if now >= release_at => {
                self.phase = Phase::Idle;
                true
            }
            _ => false,
        }
    }
}
