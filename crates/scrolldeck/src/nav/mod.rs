//! Slide navigation core.
//!
//! Input adapters (keyboard, touch, wheel scroll, resize, visibility) feed a
//! single [`SlideController`], which validates and commits index changes and
//! fans them out to the slides, the widgets and the location fragment.

mod controller;
pub mod fragment;
pub mod input;
mod options;
pub mod ports;
mod state;
pub mod widgets;

#[cfg(test)]
mod tests;

pub use controller::SlideController;
pub use input::{Key, KeyIntent, KeyOutcome, SwipeDirection};
pub use options::{ControllerOptions, SettleMode};
pub use ports::{
    Fullscreen, FullscreenError, Host, Location, ScrollBehavior, SlideState, SlideSurface, Viewport,
};
pub use state::Phase;
pub use widgets::{Position, Projection, Widgets};
