mod guard;
mod sync;

use std::time::{Duration, Instant};

use super::ports::{
    Fullscreen, FullscreenError, Location, ScrollBehavior, SlideState, SlideSurface, Viewport,
};
use super::{ControllerOptions, SlideController, fragment};

/// Recording stand-in for a browser-like host.
#[derive(Debug, Clone)]
struct MockHost {
    slides: Vec<SlideState>,
    extent: f32,
    offset: f32,
    scrolls: Vec<(f32, ScrollBehavior)>,
    fragment: Option<String>,
    fragment_writes: usize,
    completes: bool,
    fullscreen: bool,
    deny_fullscreen: bool,
    fullscreen_calls: usize,
}

impl Viewport for MockHost {
    fn scroll_offset(&self) -> f32 {
        self.offset
    }

    fn viewport_extent(&self) -> f32 {
        self.extent
    }

    fn scroll_to(&mut self, offset: f32, behavior: ScrollBehavior) {
        self.offset = offset;
        self.scrolls.push((offset, behavior));
    }

    fn reports_scroll_completion(&self) -> bool {
        self.completes
    }
}

impl Location for MockHost {
    fn fragment(&self) -> Option<String> {
        self.fragment.clone()
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.fragment = Some(fragment.to_string());
        self.fragment_writes += 1;
    }
}

impl SlideSurface for MockHost {
    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn set_slide_state(&mut self, index: usize, state: SlideState) {
        self.slides[index] = state;
    }
}

impl Fullscreen for MockHost {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self) -> Result<(), FullscreenError> {
        self.fullscreen_calls += 1;
        if self.deny_fullscreen {
            return Err(FullscreenError::Denied("not allowed".to_string()));
        }
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), FullscreenError> {
        self.fullscreen_calls += 1;
        self.fullscreen = false;
        Ok(())
    }
}

/// Helper to create a host with `count` slides, 800 units tall each.
fn host(count: usize) -> MockHost {
    MockHost {
        slides: vec![SlideState::default(); count],
        extent: 800.0,
        offset: 0.0,
        scrolls: Vec::new(),
        fragment: None,
        fragment_writes: 0,
        completes: false,
        fullscreen: false,
        deny_fullscreen: false,
        fullscreen_calls: 0,
    }
}

/// Helper to create a host whose location already carries `fragment`.
fn host_at(count: usize, fragment: &str) -> MockHost {
    MockHost {
        fragment: Some(fragment.to_string()),
        ..host(count)
    }
}

fn controller(count: usize) -> SlideController<MockHost> {
    SlideController::init(host(count), ControllerOptions::default())
}

fn ms(base: Instant, millis: u64) -> Instant {
    base + Duration::from_millis(millis)
}

/// Assert every projection agrees with the current index.
fn assert_synced(c: &SlideController<MockHost>) {
    let index = c.current_index();
    let count = c.slide_count();
    assert!(index < count, "index {index} out of bounds for {count}");

    let active: Vec<usize> = c
        .host()
        .slides
        .iter()
        .enumerate()
        .filter(|(_, s)| s.active)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(active, vec![index]);
    for (i, slide) in c.host().slides.iter().enumerate() {
        assert_eq!(slide.aria_hidden, i != index, "aria-hidden on slide {i}");
    }

    let widgets = c.widgets();
    if let Some(counter) = &widgets.counter {
        assert_eq!(counter.text(), format!("{} / {}", index + 1, count));
    }
    if let Some(progress) = &widgets.progress {
        let expected = (index + 1) as f32 / count as f32;
        assert!((progress.fill() - expected).abs() < 1e-6);
    }
    if let Some(dots) = &widgets.dots {
        assert_eq!(dots.active_index(), Some(index));
    }
}

/// Like [`assert_synced`], plus the location fragment.
fn assert_fully_synced(c: &SlideController<MockHost>) {
    assert_synced(c);
    assert_eq!(
        c.host().fragment.as_deref(),
        Some(fragment::format(c.current_index()).as_str())
    );
}
