//! Property-based tests for the drawer controller
//!
//! Random sequences of user input and frame ticks are replayed against a mounted
//! controller. Whatever the order, the panel and backdrop stay within their ranges,
//! navigation is requested at most once per dismissal and only on reaching `Closed`,
//! and dropping the controller hands the page back untouched.

use folio::document::{Document, Element};
use folio::overlay::focus::Focusable;
use folio::overlay::{
    Effect, Key, OverlayConfig, OverlayController, Phase, BACKDROP_OPACITY,
};
use proptest::prelude::*;
use std::time::Duration;

const TOLERANCE: f32 = 1e-3;

#[derive(Debug, Clone)]
enum Op {
    Open,
    Close,
    Tick(u64),
    TouchStart(f32),
    TouchMove(f32),
    TouchEnd,
    Key(Key),
    Detach,
    Attach,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Open),
        Just(Op::Close),
        (0u64..120).prop_map(Op::Tick),
        (0u64..120).prop_map(Op::Tick),
        (-10.0f32..80.0).prop_map(Op::TouchStart),
        (-50.0f32..500.0).prop_map(Op::TouchMove),
        Just(Op::TouchEnd),
        prop_oneof![Just(Key::Escape), Just(Key::Tab), Just(Key::BackTab)].prop_map(Op::Key),
        Just(Op::Detach),
        Just(Op::Attach),
    ]
}

fn apply(overlay: &mut OverlayController, op: &Op) -> Option<Effect> {
    match op {
        Op::Open => {
            overlay.open();
            None
        }
        Op::Close => overlay.close(),
        Op::Tick(ms) => overlay.tick(Duration::from_millis(*ms)),
        Op::TouchStart(x) => {
            overlay.touch_start(*x);
            None
        }
        Op::TouchMove(x) => {
            overlay.touch_move(*x);
            None
        }
        Op::TouchEnd => overlay.touch_end(),
        Op::Key(key) => overlay.key(*key),
        Op::Detach => {
            overlay.detach();
            None
        }
        Op::Attach => {
            let width = overlay.config().panel_width;
            overlay.attach(width);
            None
        }
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_controller_invariants(
            ops in prop::collection::vec(op_strategy(), 0..60),
            reduced_motion in any::<bool>(),
        ) {
            let doc = Document::new(vec![Element::new("main"), Element::new("bar").exempt()]).shared();
            let elements = doc.borrow().elements.clone();
            let mut overlay = OverlayController::mount(
                &doc,
                OverlayConfig::default(),
                "/",
                reduced_motion,
                vec![Focusable::new("a"), Focusable::new("b")],
            );
            let width = overlay.config().panel_width;

            for op in &ops {
                let previous = overlay.phase();
                let effect = apply(&mut overlay, op);
                if effect.is_some() {
                    prop_assert_ne!(previous, Phase::Closed, "navigation while closed after {:?}", op);
                    prop_assert_eq!(overlay.phase(), Phase::Closed);
                }
                if let Some(panel) = overlay.panel() {
                    prop_assert!(panel.offset >= -TOLERANCE && panel.offset <= width + TOLERANCE,
                        "offset {} after {:?}", panel.offset, op);
                }
                if let Some(backdrop) = overlay.backdrop() {
                    prop_assert!(backdrop.opacity >= -TOLERANCE
                        && backdrop.opacity <= BACKDROP_OPACITY + TOLERANCE,
                        "opacity {} after {:?}", backdrop.opacity, op);
                }
                prop_assert!(doc.borrow().overlay_open());
            }

            drop(overlay);
            let page = doc.borrow();
            prop_assert_eq!(&page.elements, &elements);
            prop_assert!(!page.overlay_open());
            prop_assert!(!page.scroll_locked());
        }
    }
}
