use super::*;
use crate::nav::{Key, KeyOutcome, Phase, SettleMode};

fn completing_controller(count: usize) -> SlideController<MockHost> {
    let host = MockHost {
        completes: true,
        ..host(count)
    };
    SlideController::init(host, ControllerOptions::default())
}

#[test]
fn second_animated_move_is_rejected() {
    let t0 = Instant::now();
    let mut c = controller(5);
    c.go_to_slide(2, true, t0);
    c.go_to_slide(4, true, ms(t0, 100));
    assert_eq!(c.current_index(), 2);
    assert_eq!(
        c.host().scrolls,
        vec![(1600.0, ScrollBehavior::Smooth)]
    );
    assert_fully_synced(&c);
}

#[test]
fn guard_releases_after_settle_delay() {
    let t0 = Instant::now();
    let mut c = controller(5);
    c.go_to_slide(2, true, t0);
    assert!(c.is_transitioning());
    assert_eq!(c.next_deadline(), Some(ms(t0, 500)));

    c.tick(ms(t0, 499));
    assert!(c.is_transitioning());
    c.tick(ms(t0, 500));
    assert!(!c.is_transitioning());

    c.go_to_slide(4, true, ms(t0, 510));
    assert_eq!(c.current_index(), 4);
}

#[test]
fn entry_points_fire_due_timers_first() {
    let t0 = Instant::now();
    let mut c = controller(5);
    c.go_to_slide(1, true, t0);
    // No explicit tick: the call itself notices the guard has expired.
    c.go_to_slide(3, true, ms(t0, 700));
    assert_eq!(c.current_index(), 3);
}

#[test]
fn keys_are_ignored_while_transitioning() {
    let t0 = Instant::now();
    let mut c = controller(5);
    assert!(c.handle_key(Key::ArrowDown, t0).prevents_default());
    assert_eq!(c.current_index(), 1);

    assert_eq!(c.handle_key(Key::ArrowDown, ms(t0, 100)), KeyOutcome::Ignored);
    assert_eq!(
        c.handle_key(Key::Character('f'), ms(t0, 100)),
        KeyOutcome::Ignored
    );
    assert_eq!(c.current_index(), 1);
    assert_eq!(c.host().fullscreen_calls, 0);

    c.handle_key(Key::ArrowDown, ms(t0, 500));
    assert_eq!(c.current_index(), 2);
}

#[test]
fn immediate_move_passes_the_guard_and_clears_it() {
    let t0 = Instant::now();
    let mut c = controller(5);
    c.go_to_slide(1, true, t0);
    c.go_to_slide(3, false, ms(t0, 100));
    assert_eq!(c.current_index(), 3);
    assert!(!c.is_transitioning());
    assert_eq!(
        c.host().scrolls.last(),
        Some(&(2400.0, ScrollBehavior::Instant))
    );
}

#[test]
fn stale_release_does_not_end_a_later_transition() {
    let t0 = Instant::now();
    let mut c = controller(5);
    c.go_to_slide(1, true, t0);
    c.handle_resize(ms(t0, 100));
    c.go_to_slide(2, true, ms(t0, 200));

    c.tick(ms(t0, 550));
    assert!(c.is_transitioning());
    c.go_to_slide(4, true, ms(t0, 560));
    assert_eq!(c.current_index(), 2);

    c.tick(ms(t0, 700));
    assert!(!c.is_transitioning());
}

#[test]
fn completion_signal_releases_the_guard() {
    let t0 = Instant::now();
    let mut c = completing_controller(5);
    assert_eq!(c.settle_mode(), SettleMode::ScrollCompletion);

    c.go_to_slide(2, true, t0);
    assert!(matches!(
        c.phase(),
        Phase::Transitioning {
            target: 2,
            awaiting_completion: true,
            ..
        }
    ));
    c.handle_scroll_complete(ms(t0, 120));
    assert!(!c.is_transitioning());

    c.next_slide(ms(t0, 130));
    assert_eq!(c.current_index(), 3);
}

#[test]
fn completion_mode_holds_past_the_settle_delay() {
    let t0 = Instant::now();
    let mut c = completing_controller(5);
    c.go_to_slide(2, true, t0);

    c.tick(ms(t0, 600));
    assert!(c.is_transitioning());
    assert_eq!(c.handle_key(Key::ArrowDown, ms(t0, 600)), KeyOutcome::Ignored);
}

#[test]
fn completion_watchdog_releases_a_lost_signal() {
    let t0 = Instant::now();
    let mut c = completing_controller(5);
    c.go_to_slide(2, true, t0);
    assert_eq!(c.next_deadline(), Some(ms(t0, 2000)));

    c.tick(ms(t0, 2000));
    assert!(!c.is_transitioning());
}

#[test]
fn timer_mode_ignores_completion_signal() {
    let t0 = Instant::now();
    let host = MockHost {
        completes: true,
        ..host(5)
    };
    let opts = ControllerOptions {
        settle_mode: SettleMode::Timer,
        ..Default::default()
    };
    let mut c = SlideController::init(host, opts);
    c.go_to_slide(1, true, t0);
    c.handle_scroll_complete(ms(t0, 100));
    assert!(c.is_transitioning());
    c.tick(ms(t0, 500));
    assert!(!c.is_transitioning());
}

#[test]
fn rejected_targets_leave_guard_untouched() {
    let t0 = Instant::now();
    let mut c = controller(5);
    c.go_to_slide(7, true, t0);
    assert!(!c.is_transitioning());
    assert_eq!(c.current_index(), 0);
    assert_eq!(c.next_deadline(), None);
}

#[test]
fn interrupted_scroll_releases_the_guard_at_once() {
    let t0 = Instant::now();
    let mut c = completing_controller(4);
    c.handle_key(Key::ArrowDown, t0);
    assert_eq!(c.current_index(), 1);

    // Wheel pulled the container back while still near slide 0.
    c.host_mut().offset = 160.0;
    c.handle_scroll_interrupted(ms(t0, 20));

    assert!(!c.is_transitioning());
    assert_eq!(c.current_index(), 0);
    assert_synced(&c);
    assert_eq!(c.next_deadline(), None);
    assert!(matches!(
        c.handle_key(Key::ArrowDown, ms(t0, 30)),
        KeyOutcome::Handled(_)
    ));
}

#[test]
fn interrupted_scroll_also_releases_timer_mode() {
    let t0 = Instant::now();
    let mut c = controller(4);
    c.go_to_slide(3, true, t0);
    c.host_mut().offset = 1700.0;
    c.handle_scroll_interrupted(ms(t0, 100));
    assert!(!c.is_transitioning());
    assert_eq!(c.current_index(), 2);
}

#[test]
fn interruption_without_transition_is_noop() {
    let t0 = Instant::now();
    let mut c = controller(4);
    c.host_mut().offset = 1600.0;
    c.handle_scroll_interrupted(t0);
    assert_eq!(c.current_index(), 0);
    assert_eq!(c.host().fragment_writes, 0);
}
