use super::*;
use crate::animation::keyframes::Keyframe;

fn store(values: Vec<Keyframe<Value>>) -> KeyframeStore {
    KeyframeStore::new(values).unwrap()
}

#[test]
fn scalar_root_gets_one_unit_per_segment_and_a_sentinel() {
    let tree = UnitTree::build(&store(vec![
        Keyframe::new(Value::Number(0.0)),
        Keyframe::new(Value::Number(10.0)),
        Keyframe::new(Value::Number(0.0)),
    ]));
    let starts: Vec<f64> = tree.segments().iter().map(|s| s.start).collect();
    assert_eq!(starts, vec![0.0, 0.5, 1.0]);
    assert_eq!(tree.segments()[0].units.len(), 1);
    assert!(tree.segments()[0].units[0].path().is_empty());
    assert!(tree.segments()[2].units.is_empty());
}

#[test]
fn every_numeric_leaf_gets_its_own_unit() {
    let tree = UnitTree::build(&store(vec![
        Keyframe::new(Value::object([
            ("pos", Value::object([("x", 0.0), ("y", 0.0)])),
            ("label", Value::from("a")),
        ])),
        Keyframe::new(Value::object([
            ("pos", Value::object([("x", 10.0), ("y", 20.0)])),
            ("label", Value::from("a")),
        ])),
    ]));
    assert_eq!(tree.unit_count(), 2);
    let paths: Vec<String> = tree.segments()[0]
        .units
        .iter()
        .map(|u| {
            u.path()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(".")
        })
        .collect();
    assert_eq!(paths, vec!["pos.x", "pos.y"]);
}

#[test]
fn apply_recomposes_structured_value() {
    let mut tree = UnitTree::build(&store(vec![
        Keyframe::new(Value::object([("pos", Value::object([("x", 0.0), ("y", 0.0)]))])),
        Keyframe::new(Value::object([("pos", Value::object([("x", 10.0), ("y", 20.0)]))])),
    ]));
    assert!(tree.apply(0.5));
    assert_eq!(
        tree.working(),
        &Value::object([("pos", Value::object([("x", 5.0), ("y", 10.0)]))])
    );
}

#[test]
fn locate_is_inclusive_and_prefers_the_earlier_segment() {
    let tree = UnitTree::build(&store(vec![
        Keyframe::new(Value::Number(0.0)),
        Keyframe::at(0.25, Value::Number(1.0)),
        Keyframe::new(Value::Number(2.0)),
    ]));
    assert_eq!(tree.locate(0.0), Some((0, 0.0)));
    assert_eq!(tree.locate(0.25), Some((0, 1.0)));
    assert_eq!(tree.locate(0.625), Some((1, 0.5)));
    assert_eq!(tree.locate(1.0), Some((1, 1.0)));
}

#[test]
fn locate_extrapolates_past_the_ends() {
    let tree = UnitTree::build(&store(vec![
        Keyframe::new(Value::Number(0.0)),
        Keyframe::new(Value::Number(10.0)),
    ]));
    assert_eq!(tree.locate(1.5), Some((0, 1.5)));
    assert_eq!(tree.locate(-0.5), Some((0, -0.5)));
    assert_eq!(tree.locate(f64::NAN), None);
}

#[test]
fn lists_tween_positionally() {
    let seg = |x: f64, y: f64| Value::List(vec![Value::from("L"), x.into(), y.into()]);
    let mut tree = UnitTree::build(&store(vec![
        Keyframe::new(Value::List(vec![seg(0.0, 0.0), seg(10.0, 10.0)])),
        Keyframe::new(Value::List(vec![seg(4.0, 8.0), seg(20.0, 0.0)])),
    ]));
    assert_eq!(tree.unit_count(), 4);
    tree.apply(0.5);
    assert_eq!(
        tree.working(),
        &Value::List(vec![seg(2.0, 4.0), seg(15.0, 5.0)])
    );
}

#[test]
fn shared_offset_jumps_to_the_later_pair() {
    // Two keyframes at 0.5 make a discontinuity: the later pair owns the next segment.
    let mut tree = UnitTree::build(&store(vec![
        Keyframe::new(Value::Number(0.0)),
        Keyframe::at(0.5, Value::Number(1.0)),
        Keyframe::at(0.5, Value::Number(100.0)),
        Keyframe::new(Value::Number(200.0)),
    ]));
    let starts: Vec<f64> = tree.segments().iter().map(|s| s.start).collect();
    assert_eq!(starts, vec![0.0, 0.5, 1.0]);
    tree.apply(0.5);
    assert_eq!(tree.working(), &Value::Number(1.0));
    tree.apply(0.75);
    assert_eq!(tree.working(), &Value::Number(150.0));
}

#[test]
fn constant_only_values_have_no_units() {
    let mut tree = UnitTree::build(&store(vec![
        Keyframe::new(Value::object([("name", "a")])),
        Keyframe::new(Value::object([("name", "a")])),
    ]));
    assert_eq!(tree.segments().len(), 1);
    assert!(!tree.apply(0.5));
    assert_eq!(tree.working(), &Value::object([("name", "a")]));
}
