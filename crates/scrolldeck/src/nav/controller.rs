use std::time::Instant;

use tracing::{debug, trace, warn};

use super::fragment;
use super::input::{Debounce, Key, KeyIntent, KeyOutcome, SwipeDirection};
use super::options::{ControllerOptions, SettleMode};
use super::ports::{Host, ScrollBehavior, SlideState};
use super::state::{NavigationState, Phase};
use super::widgets::{Position, Widgets};

#[derive(Debug, Clone, Copy)]
enum Motion {
    Animated(Instant),
    Immediate,
}

/// Owns the current slide index and everything that has to follow it.
///
/// All entry points run to completion synchronously. Timers (scroll debounce,
/// guard release) are deadlines checked against the `now` the host passes in;
/// hosts call [`tick`](Self::tick) whenever [`next_deadline`](Self::next_deadline)
/// has passed.
///
/// A deck without slides yields an inert controller: every entry point is a
/// no-op and the accessors report an empty deck.
pub struct SlideController<H: Host> {
    host: H,
    options: ControllerOptions,
    settle_mode: SettleMode,
    widgets: Widgets,
    state: Option<NavigationState>,
    scroll_debounce: Debounce,
}

impl<H: Host> SlideController<H> {
    pub fn init(host: H, options: ControllerOptions) -> Self {
        let count = host.slide_count();
        let settle_mode = options.effective_settle_mode(host.reports_scroll_completion());
        let scroll_debounce = Debounce::new(options.scroll_debounce());

        if count == 0 {
            warn!("no slides found, navigation disabled");
            return Self {
                host,
                options,
                settle_mode,
                widgets: Widgets::default(),
                state: None,
                scroll_debounce,
            };
        }

        let mut widgets = Widgets::build(&options, count);
        widgets.render_all(Position::new(0, count));

        let mut controller = Self {
            host,
            options,
            settle_mode,
            widgets,
            state: Some(NavigationState::new(count)),
            scroll_debounce,
        };

        let initial = controller
            .host
            .fragment()
            .and_then(|f| fragment::parse(&f, count));
        match initial {
            Some(index) => {
                debug!(index, "restoring slide from location fragment");
                controller.navigate(index, Motion::Immediate);
            }
            None => {
                controller.sync_visibility();
                controller.sync_progress();
            }
        }

        debug!(count, settle_mode = %controller.settle_mode, "slide controller ready");
        controller
    }

    /// 0-based index of the active slide.
    pub fn current_index(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.index)
    }

    pub fn slide_count(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.count)
    }

    pub fn position(&self) -> Option<Position> {
        self.state
            .as_ref()
            .map(|s| Position::new(s.index, s.count))
    }

    pub fn is_inert(&self) -> bool {
        self.state.is_none()
    }

    pub fn is_transitioning(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.is_transitioning())
    }

    pub fn phase(&self) -> Phase {
        self.state.as_ref().map_or(Phase::Idle, |s| s.phase)
    }

    pub fn settle_mode(&self) -> SettleMode {
        self.settle_mode
    }

    pub fn widgets(&self) -> &Widgets {
        &self.widgets
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Earliest pending timer, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        let release = self.state.as_ref().and_then(|s| s.release_deadline());
        match (release, self.scroll_debounce.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire every timer that is due at `now`.
    pub fn tick(&mut self, now: Instant) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        if state.release_if_due(now) {
            trace!(index = state.index, "transition settled by timer");
            self.after_release();
        }

        if self.scroll_debounce.fire_if_due(now) {
            self.on_scroll_settled();
        }
    }

    /// Move to `target`. Out-of-range targets are ignored, as are animated
    /// requests while another animated move is still in flight.
    pub fn go_to_slide(&mut self, target: usize, animate: bool, now: Instant) {
        self.tick(now);
        let motion = if animate {
            Motion::Animated(now)
        } else {
            Motion::Immediate
        };
        self.navigate(target, motion);
    }

    pub fn next_slide(&mut self, now: Instant) {
        self.tick(now);
        let Some((index, count)) = self.state.as_ref().map(|s| (s.index, s.count)) else {
            return;
        };
        if index + 1 < count {
            self.navigate(index + 1, Motion::Animated(now));
        }
    }

    pub fn prev_slide(&mut self, now: Instant) {
        self.tick(now);
        let Some(index) = self.state.as_ref().map(|s| s.index) else {
            return;
        };
        if index > 0 {
            self.navigate(index - 1, Motion::Animated(now));
        }
    }

    /// Dot navigation click.
    pub fn select_slide(&mut self, index: usize, now: Instant) {
        self.go_to_slide(index, true, now);
    }

    pub fn handle_key(&mut self, key: Key, now: Instant) -> KeyOutcome {
        self.tick(now);
        let Some(state) = self.state.as_ref() else {
            return KeyOutcome::Unhandled;
        };
        if state.is_transitioning() {
            trace!(?key, "key ignored during transition");
            return KeyOutcome::Ignored;
        }
        let Some(intent) = key.intent() else {
            return KeyOutcome::Unhandled;
        };
        let last = state.last_index();

        match intent {
            KeyIntent::Next => self.next_slide(now),
            KeyIntent::Previous => self.prev_slide(now),
            KeyIntent::First => self.navigate(0, Motion::Animated(now)),
            KeyIntent::Last => self.navigate(last, Motion::Animated(now)),
            KeyIntent::ToggleFullscreen => self.toggle_fullscreen(),
        }
        KeyOutcome::Handled(intent)
    }

    pub fn touch_start(&mut self, y: f32) {
        if let Some(state) = self.state.as_mut() {
            state.swipe.start(y);
        }
    }

    pub fn touch_end(&mut self, y: f32, now: Instant) {
        let threshold = self.options.swipe_threshold;
        let Some(state) = self.state.as_mut() else {
            return;
        };
        match state.swipe.finish(y, threshold) {
            Some(SwipeDirection::Up) => self.next_slide(now),
            Some(SwipeDirection::Down) => self.prev_slide(now),
            None => trace!(y, "touch ended below swipe threshold"),
        }
    }

    /// The container scrolled. Recomputes the index once scrolling has been
    /// quiet for the debounce window.
    pub fn handle_scroll(&mut self, now: Instant) {
        self.tick(now);
        if self.state.is_some() {
            self.scroll_debounce.schedule(now);
        }
    }

    /// The host finished a smooth scroll it was asked to perform.
    pub fn handle_scroll_complete(&mut self, now: Instant) {
        self.tick(now);
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if let Phase::Transitioning {
            awaiting_completion: true,
            target,
            ..
        } = state.phase
        {
            state.phase = Phase::Idle;
            trace!(target, "transition settled by scroll completion");
            self.after_release();
        }
    }

    /// The user took over a smooth scroll before it arrived. The guard is
    /// released in every settle mode and the index follows the offset.
    pub fn handle_scroll_interrupted(&mut self, now: Instant) {
        self.tick(now);
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if !state.is_transitioning() {
            return;
        }
        state.phase = Phase::Idle;
        state.scroll_check_deferred = false;
        debug!(index = state.index, "transition interrupted by user scroll");
        self.recompute_from_scroll();
    }

    /// The viewport changed size: re-snap to the current slide.
    pub fn handle_resize(&mut self, now: Instant) {
        self.tick(now);
        if let Some(index) = self.state.as_ref().map(|s| s.index) {
            self.navigate(index, Motion::Immediate);
        }
    }

    /// The page was hidden or shown again.
    pub fn handle_visibility_change(&mut self, visible: bool) {
        if visible {
            self.sync_visibility();
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        if self.state.is_none() {
            return;
        }
        if self.host.is_fullscreen() {
            if let Err(err) = self.host.exit_fullscreen() {
                warn!(%err, "failed to exit fullscreen");
            }
        } else if let Err(err) = self.host.request_fullscreen() {
            warn!(%err, "fullscreen request failed");
        }
    }

    fn navigate(&mut self, target: usize, motion: Motion) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if !state.contains(target) {
            trace!(target, count = state.count, "navigation target out of range");
            return;
        }
        if matches!(motion, Motion::Animated(_)) && state.is_transitioning() {
            trace!(target, "transition in flight, request dropped");
            return;
        }

        state.index = target;
        let offset = target as f32 * self.host.viewport_extent();

        match motion {
            Motion::Animated(now) => {
                let awaiting_completion = self.settle_mode == SettleMode::ScrollCompletion;
                let release_at = if awaiting_completion {
                    now + self.options.completion_timeout()
                } else {
                    now + self.options.settle_delay()
                };
                state.phase = Phase::Transitioning {
                    target,
                    release_at,
                    awaiting_completion,
                };
                self.host.scroll_to(offset, ScrollBehavior::Smooth);
            }
            Motion::Immediate => {
                state.phase = Phase::Idle;
                state.scroll_check_deferred = false;
                self.host.scroll_to(offset, ScrollBehavior::Instant);
            }
        }

        debug!(index = target, ?motion, "slide changed");
        self.sync_all();
    }

    fn after_release(&mut self) {
        let deferred = self
            .state
            .as_mut()
            .is_some_and(|s| std::mem::take(&mut s.scroll_check_deferred));
        if deferred {
            self.recompute_from_scroll();
        }
    }

    fn on_scroll_settled(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.is_transitioning() {
            // Re-evaluated against the settled offset once the guard clears.
            state.scroll_check_deferred = true;
            return;
        }
        self.recompute_from_scroll();
    }

    /// Free-scroll path: adopt the slide nearest the scroll offset without
    /// going through the transition guard.
    fn recompute_from_scroll(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let extent = self.host.viewport_extent();
        if extent.is_nan() || extent <= 0.0 {
            return;
        }
        let slot = (self.host.scroll_offset() / extent).round();
        if slot.is_nan() || slot < 0.0 {
            return;
        }
        let slot = slot as usize;
        if slot == state.index || !state.contains(slot) {
            return;
        }

        state.index = slot;
        debug!(index = slot, "free scroll settled on slide");
        self.sync_all();
    }

    fn sync_all(&mut self) {
        self.sync_visibility();
        self.sync_progress();
        self.sync_location();
    }

    fn sync_visibility(&mut self) {
        let Some(position) = self.position() else {
            return;
        };
        for i in 0..position.count {
            self.host
                .set_slide_state(i, SlideState::for_active(i == position.index));
        }
        for widget in self.widgets.visibility_targets() {
            widget.render(position);
        }
    }

    fn sync_progress(&mut self) {
        let Some(position) = self.position() else {
            return;
        };
        for widget in self.widgets.progress_targets() {
            widget.render(position);
        }
    }

    fn sync_location(&mut self) {
        let Some(position) = self.position() else {
            return;
        };
        let wanted = fragment::format(position.index);
        if self.host.fragment().as_deref() != Some(wanted.as_str()) {
            self.host.replace_fragment(&wanted);
        }
    }
}
