//! On-screen widgets derived from the current position.
//!
//! Each widget is a projection of `(index, count)` with no state of its own
//! beyond what the last [`Projection::render`] call produced. Hosts read the
//! rendered values and draw them however they like.

use super::options::ControllerOptions;

/// Where the deck currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub index: usize,
    pub count: usize,
}

impl Position {
    pub fn new(index: usize, count: usize) -> Self {
        Self { index, count }
    }

    /// 1-based slide number.
    pub fn ordinal(&self) -> usize {
        self.index + 1
    }

    /// `(index + 1) / count`, in `(0, 1]` for any valid position.
    pub fn fraction(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            self.ordinal() as f32 / self.count as f32
        }
    }

    pub fn label(&self) -> String {
        format!("{} / {}", self.ordinal(), self.count)
    }
}

/// A widget that can be brought up to date with a position.
pub trait Projection {
    fn render(&mut self, position: Position);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressBar {
    fill: f32,
}

impl ProgressBar {
    pub fn fill(&self) -> f32 {
        self.fill
    }
}

impl Projection for ProgressBar {
    fn render(&mut self, position: Position) {
        self.fill = position.fraction();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dot {
    pub label: String,
    pub active: bool,
}

/// One dot per slide; clicking a dot selects its slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotNav {
    dots: Vec<Dot>,
}

impl DotNav {
    pub fn new(count: usize) -> Self {
        let dots = (1..=count)
            .map(|n| Dot {
                label: format!("Go to slide {n}"),
                active: false,
            })
            .collect();
        Self { dots }
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn active_index(&self) -> Option<usize> {
        self.dots.iter().position(|d| d.active)
    }
}

impl Projection for DotNav {
    fn render(&mut self, position: Position) {
        for (i, dot) in self.dots.iter_mut().enumerate() {
            dot.active = i == position.index;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counter {
    text: String,
}

impl Counter {
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Projection for Counter {
    fn render(&mut self, position: Position) {
        self.text = position.label();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintSegment {
    Key(&'static str),
    Text(&'static str),
}

/// Static reminder of the navigation keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardHint {
    segments: Vec<HintSegment>,
}

impl Default for KeyboardHint {
    fn default() -> Self {
        Self {
            segments: vec![
                HintSegment::Key("\u{2191}"),
                HintSegment::Key("\u{2193}"),
                HintSegment::Text("or"),
                HintSegment::Key("Space"),
                HintSegment::Text("to navigate"),
            ],
        }
    }
}

impl KeyboardHint {
    pub fn segments(&self) -> &[HintSegment] {
        &self.segments
    }
}

impl Projection for KeyboardHint {
    fn render(&mut self, _position: Position) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullscreenButton {
    pub label: &'static str,
}

impl Default for FullscreenButton {
    fn default() -> Self {
        Self {
            label: "Toggle fullscreen",
        }
    }
}

impl Projection for FullscreenButton {
    fn render(&mut self, _position: Position) {}
}

/// Link back to the deck index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackLink {
    pub label: &'static str,
    pub href: String,
}

impl BackLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            label: "All Slides",
            href: href.into(),
        }
    }
}

impl Projection for BackLink {
    fn render(&mut self, _position: Position) {}
}

/// The set of widgets the options asked for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Widgets {
    pub progress: Option<ProgressBar>,
    pub dots: Option<DotNav>,
    pub counter: Option<Counter>,
    pub keyboard_hint: Option<KeyboardHint>,
    pub fullscreen_button: Option<FullscreenButton>,
    pub back_link: Option<BackLink>,
}

impl Widgets {
    pub fn build(options: &ControllerOptions, count: usize) -> Self {
        Self {
            progress: options.show_progress.then(ProgressBar::default),
            dots: options
                .dots_enabled_for(count)
                .then(|| DotNav::new(count)),
            counter: options.show_number.then(Counter::default),
            keyboard_hint: options.show_keyboard_hint.then(KeyboardHint::default),
            fullscreen_button: options
                .show_fullscreen_button
                .then(FullscreenButton::default),
            back_link: options.back_link.as_deref().map(BackLink::new),
        }
    }

    /// Widgets that mirror which slide is visible.
    pub(crate) fn visibility_targets(&mut self) -> impl Iterator<Item = &mut dyn Projection> {
        self.dots.iter_mut().map(|d| d as &mut dyn Projection)
    }

    /// Widgets that mirror how far through the deck we are.
    pub(crate) fn progress_targets(&mut self) -> impl Iterator<Item = &mut dyn Projection> {
        let progress = self.progress.iter_mut().map(|p| p as &mut dyn Projection);
        let counter = self.counter.iter_mut().map(|c| c as &mut dyn Projection);
        progress.chain(counter)
    }

    pub fn render_all(&mut self, position: Position) {
        let statics = [
            self.keyboard_hint.as_mut().map(|w| w as &mut dyn Projection),
            self.fullscreen_button.as_mut().map(|w| w as &mut dyn Projection),
            self.back_link.as_mut().map(|w| w as &mut dyn Projection),
        ];
        for widget in statics.into_iter().flatten() {
            widget.render(position);
        }
        for widget in self.visibility_targets() {
            widget.render(position);
        }
        for widget in self.progress_targets() {
            widget.render(position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_helpers() {
        let pos = Position::new(2, 5);
        assert_eq!(pos.ordinal(), 3);
        assert_eq!(pos.label(), "3 / 5");
        assert!((pos.fraction() - 0.6).abs() < f32::EPSILON);
        assert_eq!(Position::new(0, 0).fraction(), 0.0);
    }

    #[test]
    fn test_progress_fill_reaches_one_on_last_slide() {
        let mut bar = ProgressBar::default();
        bar.render(Position::new(3, 4));
        assert_eq!(bar.fill(), 1.0);
        bar.render(Position::new(0, 4));
        assert_eq!(bar.fill(), 0.25);
    }

    #[test]
    fn test_dots_have_single_active() {
        let mut dots = DotNav::new(4);
        assert_eq!(dots.active_index(), None);
        dots.render(Position::new(2, 4));
        assert_eq!(dots.active_index(), Some(2));
        assert_eq!(dots.dots().iter().filter(|d| d.active).count(), 1);
        assert_eq!(dots.dots()[0].label, "Go to slide 1");
        dots.render(Position::new(0, 4));
        assert_eq!(dots.active_index(), Some(0));
    }

    #[test]
    fn test_counter_text() {
        let mut counter = Counter::default();
        counter.render(Position::new(0, 5));
        assert_eq!(counter.text(), "1 / 5");
    }

    #[test]
    fn test_build_respects_toggles() {
        let opts = ControllerOptions {
            show_progress: false,
            show_keyboard_hint: false,
            back_link: Some("../../index.html".to_string()),
            ..Default::default()
        };
        let widgets = Widgets::build(&opts, 5);
        assert!(widgets.progress.is_none());
        assert!(widgets.keyboard_hint.is_none());
        assert!(widgets.counter.is_some());
        assert!(widgets.fullscreen_button.is_some());
        assert_eq!(widgets.dots.as_ref().map(|d| d.dots().len()), Some(5));
        assert_eq!(
            widgets.back_link.as_ref().map(|l| l.href.as_str()),
            Some("../../index.html")
        );
    }

    #[test]
    fn test_build_skips_dots_for_large_decks() {
        let widgets = Widgets::build(&ControllerOptions::default(), 40);
        assert!(widgets.dots.is_none());
        assert!(widgets.progress.is_some());
    }

    #[test]
    fn test_render_all() {
        let mut widgets = Widgets::build(&ControllerOptions::default(), 3);
        widgets.render_all(Position::new(1, 3));
        assert_eq!(widgets.counter.as_ref().map(Counter::text), Some("2 / 3"));
        assert_eq!(widgets.dots.as_ref().and_then(DotNav::active_index), Some(1));
        let fill = widgets.progress.as_ref().map(ProgressBar::fill).unwrap();
        assert!((fill - 2.0 / 3.0).abs() < 1e-6);
    }
}
