//! Randomized operation sequences against `SlidingWindow`.

use cinefeed_carousel::{SlidingWindow, WrapMode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn assert_invariants(window: &SlidingWindow) {
    let expected_max =
        window.item_count().saturating_sub(window.visible_count());
    assert!(window.visible_count() >= 1);
    assert_eq!(window.max_index(), expected_max);
    assert!(
        window.current_index() <= window.max_index(),
        "index {} beyond max {} ({} items, {} visible)",
        window.current_index(),
        window.max_index(),
        window.item_count(),
        window.visible_count()
    );
}

#[test]
fn index_stays_in_range_under_random_operations() {
    let mut rng = StdRng::seed_from_u64(0x00ca_7005_e1);

    for _ in 0..500 {
        let items = rng.random_range(0..40usize);
        let visible = rng.random_range(1..8usize);
        let mut window = SlidingWindow::new(items, visible);
        assert_invariants(&window);

        for _ in 0..200 {
            let before = window.current_index();
            match rng.random_range(0..6) {
                0 => {
                    let at_end = before == window.max_index();
                    window.next();
                    if at_end {
                        assert_eq!(window.current_index(), before);
                    } else {
                        assert_eq!(window.current_index(), before + 1);
                    }
                }
                1 => {
                    window.prev();
                    assert_eq!(
                        window.current_index(),
                        before.saturating_sub(1)
                    );
                }
                2 => {
                    let target = rng.random_range(-60i64..60);
                    window.go_to(target);
                    assert_eq!(
                        window.current_index() as i64,
                        target.clamp(0, window.max_index() as i64)
                    );
                }
                3 => {
                    let count = rng.random_range(-3i64..10);
                    window.set_visible_count(count);
                    // Only a shrinking range may move the index, and only
                    // down to the new max.
                    let expected = before.min(window.max_index());
                    assert_eq!(window.current_index(), expected);
                }
                4 => {
                    let count = rng.random_range(-3i64..40);
                    window.set_item_count(count);
                    assert_eq!(
                        window.current_index(),
                        before.min(window.max_index())
                    );
                }
                _ => {
                    window.advance(WrapMode::Wrap);
                    if before == window.max_index() {
                        assert_eq!(window.current_index(), 0);
                    } else {
                        assert_eq!(window.current_index(), before + 1);
                    }
                }
            }
            assert_invariants(&window);
        }
    }
}

#[test]
fn advance_visits_every_window_then_wraps() {
    let mut window = SlidingWindow::new(10, 4);
    let mut seen = vec![window.current_index()];
    for _ in 0..7 {
        window.advance(WrapMode::Wrap);
        seen.push(window.current_index());
    }
    assert_eq!(seen, vec![0, 1, 2, 3, 4, 5, 6, 0]);
}

#[test]
fn resize_scenarios() {
    let mut window = SlidingWindow::new(10, 4);
    window.go_to(6);
    window.set_visible_count(1);
    assert_eq!(window.max_index(), 9);
    assert_eq!(window.current_index(), 6);

    window.go_to(9);
    window.set_visible_count(4);
    assert_eq!(window.max_index(), 6);
    assert_eq!(window.current_index(), 6);
}
