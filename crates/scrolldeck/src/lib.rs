//! Navigation for full-viewport slide decks inside a scrolling container.
//!
//! The [`nav`] module owns the current slide index and keeps scroll
//! position, the location fragment and on-screen widgets in step with it.
//! Hosts plug in through the traits in [`nav::ports`].

pub mod nav;
