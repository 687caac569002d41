//! Interfaces the controller needs from its host environment.
//!
//! The controller never touches a window, a document or a URL directly. A
//! host implements these four traits (usually on one struct) and hands
//! itself to [`SlideController::init`](super::SlideController::init).

use thiserror::Error;

/// How a programmatic scroll should reach its target offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Interpolated scroll; the host animates towards the target.
    Smooth,
    /// Jump straight to the target offset.
    Instant,
}

/// The scrollable container holding the slides.
pub trait Viewport {
    /// Current scroll offset along the slide axis.
    fn scroll_offset(&self) -> f32;

    /// Extent of one slide along the slide axis (one viewport unit).
    fn viewport_extent(&self) -> f32;

    fn scroll_to(&mut self, offset: f32, behavior: ScrollBehavior);

    /// Whether the host calls
    /// [`handle_scroll_complete`](super::SlideController::handle_scroll_complete)
    /// once a smooth scroll has reached its target.
    fn reports_scroll_completion(&self) -> bool {
        false
    }
}

/// A readable and replaceable location fragment such as `#slide-3`.
pub trait Location {
    fn fragment(&self) -> Option<String>;

    /// Replace the fragment in place. Must not create a history entry.
    fn replace_fragment(&mut self, fragment: &str);
}

/// Per-slide flags the controller toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlideState {
    pub active: bool,
    pub aria_hidden: bool,
}

impl SlideState {
    pub fn for_active(active: bool) -> Self {
        Self {
            active,
            aria_hidden: !active,
        }
    }
}

/// The fixed, ordered collection of already-rendered slides.
pub trait SlideSurface {
    fn slide_count(&self) -> usize;

    fn set_slide_state(&mut self, index: usize, state: SlideState);
}

/// Errors a host may report from its fullscreen capability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FullscreenError {
    /// The environment refused the request (policy, missing user gesture, ...).
    #[error("fullscreen request denied: {0}")]
    Denied(String),

    /// The host has no fullscreen capability at all.
    #[error("fullscreen is not supported by this host")]
    Unsupported,
}

/// The host's fullscreen capability.
pub trait Fullscreen {
    fn is_fullscreen(&self) -> bool;

    fn request_fullscreen(&mut self) -> Result<(), FullscreenError>;

    fn exit_fullscreen(&mut self) -> Result<(), FullscreenError>;
}

/// Everything the controller needs, in one bound.
pub trait Host: Viewport + Location + SlideSurface + Fullscreen {}

impl<T: Viewport + Location + SlideSurface + Fullscreen> Host for T {}
