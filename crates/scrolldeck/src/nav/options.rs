use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Decks with more slides than this get no dot navigation.
pub const DEFAULT_DOT_LIMIT: usize = 30;
pub const DEFAULT_SCROLL_DEBOUNCE_MS: u64 = 50;
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 500;
pub const DEFAULT_COMPLETION_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

/// How the transition guard is released after an animated move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettleMode {
    /// Use the host's scroll-completion signal when it has one, else the timer.
    #[default]
    Auto,
    /// Always release after the fixed settle delay.
    Timer,
    /// Release on the host's completion signal, with a watchdog timeout.
    ScrollCompletion,
}

impl SettleMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Timer => "timer",
            Self::ScrollCompletion => "scroll-completion",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "auto" => Some(Self::Auto),
            "timer" => Some(Self::Timer),
            "scroll-completion" => Some(Self::ScrollCompletion),
            _ => None,
        }
    }
}

impl std::fmt::Display for SettleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Construction-time options. Never mutated once the controller exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerOptions {
    pub show_progress: bool,
    pub show_dots: bool,
    pub show_number: bool,
    pub show_keyboard_hint: bool,
    pub show_fullscreen_button: bool,

    /// Target of the "All Slides" link. No link is built when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_link: Option<String>,

    pub dot_limit: usize,
    pub scroll_debounce_ms: u64,
    pub settle_delay_ms: u64,
    pub completion_timeout_ms: u64,
    pub swipe_threshold: f32,
    pub settle_mode: SettleMode,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            show_progress: true,
            show_dots: true,
            show_number: true,
            show_keyboard_hint: true,
            show_fullscreen_button: true,
            back_link: None,
            dot_limit: DEFAULT_DOT_LIMIT,
            scroll_debounce_ms: DEFAULT_SCROLL_DEBOUNCE_MS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            completion_timeout_ms: DEFAULT_COMPLETION_TIMEOUT_MS,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            settle_mode: SettleMode::Auto,
        }
    }
}

impl ControllerOptions {
    pub fn scroll_debounce(&self) -> Duration {
        Duration::from_millis(self.scroll_debounce_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn completion_timeout(&self) -> Duration {
        Duration::from_millis(self.completion_timeout_ms)
    }

    /// Dot navigation is built only when enabled and the deck is small enough.
    pub fn dots_enabled_for(&self, slide_count: usize) -> bool {
        self.show_dots && slide_count <= self.dot_limit
    }

    /// Resolve [`SettleMode::Auto`] against what the host can report.
    pub fn effective_settle_mode(&self, host_reports_completion: bool) -> SettleMode {
        match self.settle_mode {
            SettleMode::Auto if host_reports_completion => SettleMode::ScrollCompletion,
            SettleMode::Auto => SettleMode::Timer,
            SettleMode::ScrollCompletion if !host_reports_completion => SettleMode::Timer,
            other => other,
        }
    }
}
