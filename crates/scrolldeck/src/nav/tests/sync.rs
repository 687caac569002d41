use super::*;
use crate::nav::Key;

#[test]
fn random_walk_keeps_bounds_and_sync() {
    let t0 = Instant::now();
    let mut c = controller(7);
    let mut seed: u64 = 0x5EED;
    let mut elapsed = 0;

    for _ in 0..400 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let roll = (seed >> 33) % 6;
        let target = ((seed >> 40) % 10) as usize;
        elapsed += if seed & 1 == 0 { 120 } else { 520 };
        let now = ms(t0, elapsed);

        match roll {
            0 => c.next_slide(now),
            1 => c.prev_slide(now),
            2 => c.go_to_slide(target, true, now),
            3 => c.go_to_slide(target, false, now),
            4 => {
                c.handle_key(Key::End, now);
            }
            _ => {
                c.host_mut().offset = target as f32 * 800.0;
                c.handle_scroll(now);
                c.tick(ms(t0, elapsed + 60));
            }
        }
        assert!(c.current_index() < c.slide_count());
        assert_synced(&c);
    }
}

#[test]
fn settled_navigation_syncs_everything() {
    let t0 = Instant::now();
    let mut c = controller(5);
    c.next_slide(t0);
    c.tick(ms(t0, 500));
    assert_fully_synced(&c);
    assert_eq!(c.host().fragment.as_deref(), Some("#slide-2"));
    let fill = c.widgets().progress.as_ref().map(|p| p.fill());
    assert_eq!(fill, Some(0.4));
}

#[test]
fn repeating_current_target_is_idempotent() {
    let t0 = Instant::now();
    let mut c = controller(5);
    c.go_to_slide(2, false, t0);
    let slides = c.host().slides.clone();
    let widgets = c.widgets().clone();
    let writes = c.host().fragment_writes;

    c.go_to_slide(2, false, ms(t0, 10));
    c.go_to_slide(2, true, ms(t0, 20));
    c.tick(ms(t0, 600));

    assert_eq!(c.current_index(), 2);
    assert_eq!(c.host().slides, slides);
    assert_eq!(c.widgets(), &widgets);
    assert_eq!(c.host().fragment_writes, writes);
}

#[test]
fn location_is_replaced_only_when_different() {
    let t0 = Instant::now();
    let mut c = controller(5);
    c.go_to_slide(1, false, t0);
    assert_eq!(c.host().fragment_writes, 1);

    c.host_mut().fragment = Some("#notes".to_string());
    c.handle_resize(ms(t0, 10));
    assert_eq!(c.host().fragment.as_deref(), Some("#slide-2"));
    assert_eq!(c.host().fragment_writes, 2);
}

#[test]
fn disabled_widgets_stay_absent() {
    let t0 = Instant::now();
    let opts = ControllerOptions {
        show_progress: false,
        show_dots: false,
        show_number: false,
        show_keyboard_hint: false,
        show_fullscreen_button: false,
        ..Default::default()
    };
    let mut c = SlideController::init(host(5), opts);
    c.next_slide(t0);
    let widgets = c.widgets();
    assert!(widgets.progress.is_none());
    assert!(widgets.dots.is_none());
    assert!(widgets.counter.is_none());
    assert!(widgets.keyboard_hint.is_none());
    assert!(widgets.fullscreen_button.is_none());
    assert!(widgets.back_link.is_none());
    assert_fully_synced(&c);
}
