use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::animation::codec::Scalar;
use crate::animation::timing::{Iterations, ManualClock};
use crate::foundation::value::Value;

fn point(x: f64, y: f64) -> Value {
    Value::object([("pos", Value::object([("x", x), ("y", y)]))])
}

fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(&T) + 'static) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (seen, move |v: &T| sink.borrow_mut().push(v.clone()))
}

#[test]
fn scalar_tween_is_exact_at_both_ends() {
    let mut t = Tween::<Scalar>::between(2.0, 12.0, TweenOptions::with_duration(100.0)).unwrap();
    assert_eq!(t.update_at(0.0), Some(2.0));
    assert_eq!(t.update_at(25.0), Some(4.5));
    assert_eq!(t.update_at(100.0), Some(12.0));
}

#[test]
fn structured_values_interpolate_per_leaf() {
    let mut t = Tween::<Identity>::between(
        point(0.0, 0.0),
        point(10.0, 20.0),
        TweenOptions::with_duration(100.0),
    )
    .unwrap();
    assert_eq!(t.update_at(50.0), Some(point(5.0, 10.0)));
}

#[test]
fn time_before_start_and_after_end_clamps() {
    let mut t = Tween::<Scalar>::between(0.0, 10.0, TweenOptions::with_duration(100.0)).unwrap();
    assert_eq!(t.update_at(-20.0), Some(0.0));
    assert_eq!(t.update_at(1_000.0), Some(10.0));

    let mut reset = Tween::<Scalar>::between(
        0.0,
        10.0,
        TweenOptions::with_duration(100.0).fill(false),
    )
    .unwrap();
    reset.update_at(50.0);
    assert_eq!(reset.update_at(1_000.0), Some(0.0));
}

#[test]
fn single_keyframe_is_rejected() {
    let err = match Tween::<Scalar>::from_keyframes(
        vec![Keyframe::new(1.0)],
        TweenOptions::default(),
    ) {
        Err(e) => e,
        Ok(_) => panic!("expected an error"),
    };
    assert!(err.is_config());
    assert!(err.to_string().contains("minimum length of 2"));
}

#[test]
fn incompatible_keyframes_are_rejected_with_path() {
    let from = Value::object([("a", Value::object([("b", Value::from(1.0))]))]);
    let to = Value::object([("a", Value::object([("b", Value::from("x"))]))]);
    let Err(err) = Tween::<Identity>::between(from, to, TweenOptions::default()) else {
        panic!("expected a schema error");
    };
    assert_eq!(err.as_schema().unwrap().dotted_path(), "a.b");
}

#[test]
fn listeners_fire_once_per_change_in_order() {
    let mut t = Tween::<Scalar>::between(0.0, 10.0, TweenOptions::with_duration(100.0)).unwrap();
    let order = Rc::new(RefCell::new(Vec::new()));
    let (o1, o2) = (Rc::clone(&order), Rc::clone(&order));
    t.on_update(move |_| o1.borrow_mut().push("first"));
    t.on_update(move |_| o2.borrow_mut().push("second"));

    t.update_at(10.0);
    assert_eq!(*order.borrow(), vec!["first", "second"]);
}

#[test]
fn same_progress_notifies_at_most_once() {
    let mut t = Tween::<Scalar>::between(0.0, 10.0, TweenOptions::with_duration(100.0)).unwrap();
    let (seen, listener) = recorder::<f64>();
    t.on_update(listener);

    t.update_at(150.0);
    t.update_at(400.0);
    assert_eq!(*seen.borrow(), vec![10.0]);
}

#[test]
fn identical_output_at_new_progress_is_not_emitted() {
    // The middle segment holds still, so different progress yields the same value.
    let mut t = Tween::<Scalar>::from_keyframes(
        vec![
            Keyframe::new(0.0),
            Keyframe::new(5.0),
            Keyframe::new(5.0),
            Keyframe::new(10.0),
        ],
        TweenOptions::with_duration(100.0),
    )
    .unwrap();
    let (seen, listener) = recorder::<f64>();
    t.on_update(listener);

    t.update_at(40.0);
    t.update_at(50.0);
    t.update_at(100.0);
    assert_eq!(*seen.borrow(), vec![5.0, 10.0]);
    assert_eq!(t.progress(), Some(1.0));
}

#[test]
fn off_update_stops_delivery() {
    let mut t = Tween::<Scalar>::between(0.0, 10.0, TweenOptions::with_duration(100.0)).unwrap();
    let (seen, listener) = recorder::<f64>();
    let id = t.on_update(listener);
    t.update_at(10.0);
    assert!(t.off_update(id));
    assert!(!t.off_update(id));
    t.update_at(20.0);
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn returned_output_is_isolated_from_the_tween() {
    let mut t = Tween::<Identity>::between(
        point(0.0, 0.0),
        point(10.0, 20.0),
        TweenOptions::with_duration(100.0),
    )
    .unwrap();
    let mut out = t.update_at(50.0).unwrap();
    *out.at_mut(&["pos".into(), "x".into()]).unwrap() = Value::Number(-1.0);
    assert_eq!(t.update_at(50.0), Some(point(5.0, 10.0)));
}

#[test]
fn getters_return_boundaries_and_resolved_offsets() {
    let t = Tween::<Scalar>::from_keyframes(
        vec![Keyframe::new(0.0), Keyframe::new(5.0), Keyframe::new(10.0)],
        TweenOptions::default(),
    )
    .unwrap();
    assert_eq!(t.from(), 0.0);
    assert_eq!(t.to(), 10.0);
    let offsets: Vec<Option<f64>> = t.keyframes().iter().map(|k| k.offset).collect();
    assert_eq!(offsets, vec![Some(0.0), Some(0.5), Some(1.0)]);
}

#[test]
fn setters_rebuild_and_recompute() {
    let mut t = Tween::<Scalar>::between(0.0, 10.0, TweenOptions::with_duration(100.0)).unwrap();
    assert_eq!(t.update_at(50.0), Some(5.0));

    t.set_to(20.0).unwrap();
    assert_eq!(t.update_at(50.0), Some(10.0));

    t.set_from(10.0).unwrap();
    assert_eq!(t.update_at(50.0), Some(15.0));

    t.set_keyframes(vec![Keyframe::new(0.0), Keyframe::new(100.0), Keyframe::new(0.0)])
        .unwrap();
    assert_eq!(t.update_at(50.0), Some(100.0));
    assert_eq!(t.update_at(75.0), Some(50.0));
}

#[test]
fn failed_setter_keeps_previous_configuration() {
    let mut t = Tween::<Identity>::between(
        point(0.0, 0.0),
        point(10.0, 20.0),
        TweenOptions::with_duration(100.0),
    )
    .unwrap();
    assert!(t.set_to(Value::Number(3.0)).is_err());
    assert!(t.set_keyframes(vec![Keyframe::new(point(1.0, 1.0))]).is_err());
    assert_eq!(t.to(), point(10.0, 20.0));
    assert_eq!(t.update_at(50.0), Some(point(5.0, 10.0)));
}

#[test]
fn wall_clock_drives_update() {
    let clock = ManualClock::new(1_000.0);
    let mut t = Tween::<Scalar>::between(0.0, 10.0, TweenOptions::with_duration(100.0))
        .unwrap()
        .with_clock(clock.clone());
    assert_eq!(t.update(), Some(0.0));
    clock.advance(30.0);
    assert_eq!(t.update(), Some(3.0));
    assert_eq!(t.progress(), Some(0.3));

    t.restart();
    assert_eq!(t.update(), Some(0.0));
}

#[test]
fn infinite_loop_wraps_values() {
    let mut t = Tween::<Scalar>::between(
        0.0,
        10.0,
        TweenOptions::with_duration(100.0).iterations(Iterations::Infinite),
    )
    .unwrap();
    assert_eq!(t.update_at(1_020.0), Some(2.0));
}

#[test]
fn overshooting_easing_extrapolates() {
    let mut t = Tween::<Scalar>::between(
        0.0,
        10.0,
        TweenOptions::with_duration(100.0).easing(|p| p * 1.5),
    )
    .unwrap();
    assert_eq!(t.update_at(100.0), Some(15.0));
}

#[test]
fn constants_ride_along_unchanged() {
    let frame = |x: f64| Value::object([("x", Value::from(x)), ("unit", Value::from("px"))]);
    let mut t =
        Tween::<Identity>::between(frame(0.0), frame(8.0), TweenOptions::with_duration(100.0))
            .unwrap();
    assert_eq!(t.update_at(25.0), Some(frame(2.0)));
}

#[test]
fn debug_lists_store_and_listener_count() {
    let mut t = Tween::<Scalar>::between(0.0, 1.0, TweenOptions::default()).unwrap();
    t.on_update(|_| {});
    let text = format!("{t:?}");
    assert!(text.starts_with("Tween {"), "{text}");
    assert!(text.contains("listeners: 1"), "{text}");
    assert!(text.ends_with(".. }"), "{text}");
}
