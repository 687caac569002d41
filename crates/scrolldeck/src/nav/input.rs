//! Normalization of raw input into navigation intents.

use std::time::{Duration, Instant};

/// Character that toggles fullscreen.
pub const FULLSCREEN_KEY: char = 'f';

/// A key press, named the way DOM `KeyboardEvent.key` names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowRight,
    ArrowUp,
    ArrowLeft,
    Space,
    PageDown,
    PageUp,
    Home,
    End,
    Character(char),
    Other,
}

impl Key {
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowDown" => Self::ArrowDown,
            "ArrowRight" => Self::ArrowRight,
            "ArrowUp" => Self::ArrowUp,
            "ArrowLeft" => Self::ArrowLeft,
            " " | "Spacebar" => Self::Space,
            "PageDown" => Self::PageDown,
            "PageUp" => Self::PageUp,
            "Home" => Self::Home,
            "End" => Self::End,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Character(c),
                    _ => Self::Other,
                }
            }
        }
    }

    /// What this key asks the deck to do, if anything.
    pub fn intent(self) -> Option<KeyIntent> {
        match self {
            Self::ArrowDown | Self::ArrowRight | Self::Space | Self::PageDown => {
                Some(KeyIntent::Next)
            }
            Self::ArrowUp | Self::ArrowLeft | Self::PageUp => Some(KeyIntent::Previous),
            Self::Home => Some(KeyIntent::First),
            Self::End => Some(KeyIntent::Last),
            Self::Character(FULLSCREEN_KEY) => Some(KeyIntent::ToggleFullscreen),
            Self::Character(_) | Self::Other => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    Next,
    Previous,
    First,
    Last,
    ToggleFullscreen,
}

/// Result of offering a key press to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Dropped because a transition is in flight.
    Ignored,
    /// Not a key the deck reacts to.
    Unhandled,
    /// The key's intent was acted on (navigation may still be a boundary no-op).
    Handled(KeyIntent),
}

impl KeyOutcome {
    /// Whether the host should suppress its default action (native scrolling).
    pub fn prevents_default(self) -> bool {
        matches!(self, Self::Handled(intent) if intent != KeyIntent::ToggleFullscreen)
    }
}

/// Vertical swipe direction, named after the finger's movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved towards the top: advance.
    Up,
    /// Finger moved towards the bottom: go back.
    Down,
}

/// Holds the touch origin between touch-start and touch-end.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    origin: Option<f32>,
}

impl SwipeTracker {
    pub fn start(&mut self, y: f32) {
        self.origin = Some(y);
    }

    /// Close the gesture. Returns a direction only when the vertical travel
    /// strictly exceeds `threshold`.
    pub fn finish(&mut self, y: f32, threshold: f32) -> Option<SwipeDirection> {
        let origin = self.origin.take()?;
        let delta = origin - y;
        if delta.abs() <= threshold {
            return None;
        }
        Some(if delta > 0.0 {
            SwipeDirection::Up
        } else {
            SwipeDirection::Down
        })
    }
}

/// Trailing debounce: every `schedule` pushes the deadline out again.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the pending deadline if it has passed.
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
