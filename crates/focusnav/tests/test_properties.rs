//! Property tests: focus flags stay consistent under arbitrary operation
//! sequences.

use focusnav::{prelude::*, testing::check_focus_flags};
use proptest::prelude::*;

/// One engine operation over a small key space.
#[derive(Debug, Clone)]
enum Op {
    Add { key: usize, parent: Option<usize>, focusable: bool, x: u8, y: u8 },
    Remove(usize),
    Focus(usize),
    Arrow(Direction),
    Blur,
}

fn key(n: usize) -> String {
    format!("n{n}")
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..12usize, proptest::option::of(0..12usize), any::<bool>(), 0..8u8, 0..8u8)
            .prop_map(|(key, parent, focusable, x, y)| Op::Add { key, parent, focusable, x, y }),
        1 => (0..12usize).prop_map(Op::Remove),
        2 => (0..12usize).prop_map(Op::Focus),
        3 => direction().prop_map(Op::Arrow),
        1 => Just(Op::Blur),
    ]
}

fn apply(e: &mut Engine, op: &Op) {
    match op {
        Op::Add { key: k, parent, focusable, x, y } => {
            let mut spec = FocusableSpec::keyed(key(*k))
                .focusable(*focusable)
                .rect(Rect::new(f64::from(*x) * 120.0, f64::from(*y) * 120.0, 100.0, 100.0));
            if let Some(p) = parent {
                spec = spec.parent(key(*p));
            }
            // Duplicate keys and missing parents are expected failures.
            e.add(spec).ok();
        }
        Op::Remove(k) => e.remove(&key(*k)),
        Op::Focus(k) => {
            e.focus_self(&key(*k)).ok();
        }
        Op::Arrow(d) => {
            e.dispatch_arrow(*d);
        }
        Op::Blur => e.blur(),
    }
}

proptest! {
    #[test]
    fn focus_flags_match_focus_path(ops in proptest::collection::vec(op(), 1..60)) {
        let mut e = Engine::new();
        for op in &ops {
            apply(&mut e, op);
            prop_assert_eq!(check_focus_flags(&e), Ok(()), "after {:?}", op);
            if let Some(k) = e.current_focus_key() {
                prop_assert!(e.get(k.as_str()).is_some());
            }
        }
    }

    #[test]
    fn same_inputs_same_outcome(ops in proptest::collection::vec(op(), 1..40)) {
        let mut a = Engine::new();
        let mut b = Engine::new();
        for op in &ops {
            apply(&mut a, op);
            apply(&mut b, op);
        }
        prop_assert_eq!(a.current_focus_key(), b.current_focus_key());
        prop_assert_eq!(a.dump().ok(), b.dump().ok());
    }

    #[test]
    fn duplicate_add_never_mutates(ops in proptest::collection::vec(op(), 1..40), dup in 0..12usize) {
        let mut e = Engine::new();
        for op in &ops {
            apply(&mut e, op);
        }
        if e.get(&key(dup)).is_some() {
            let before = e.dump().ok();
            let focus = e.current_focus_key().cloned();
            prop_assert!(e.add(FocusableSpec::keyed(key(dup))).is_err());
            prop_assert_eq!(e.dump().ok(), before);
            prop_assert_eq!(e.current_focus_key().cloned(), focus);
        }
    }

    #[test]
    fn removing_focus_under_restoring_parent_refocuses(extra in 1..6usize, pick in 0..6usize) {
        let mut e = Engine::new();
        e.add(FocusableSpec::keyed("row").focusable(false)).unwrap();
        for i in 0..=extra {
            e.add(
                FocusableSpec::keyed(key(i))
                    .parent("row")
                    .rect(Rect::new(i as f64 * 120.0, 0.0, 100.0, 100.0)),
            )
            .unwrap();
        }
        let target = key(pick.min(extra));
        e.focus_self(&target).unwrap();
        e.remove(&target);
        let now = e.current_focus_key().cloned();
        prop_assert!(now.is_some());
        let now = now.unwrap();
        prop_assert!(now.as_str() != target);
        prop_assert!(e.get(now.as_str()).is_some_and(|n| n.is_focusable()));
        prop_assert_eq!(check_focus_flags(&e), Ok(()));
    }
}
