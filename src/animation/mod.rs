//! Keyframe tweening: validation, unit decomposition, timing, and the [`Tween`] driver.
//!
//! [`Tween`]: tween::Tween

pub(crate) mod codec;
pub(crate) mod document;
pub(crate) mod ease;
pub(crate) mod keyframes;
pub(crate) mod schema;
pub(crate) mod timing;
pub(crate) mod tween;
pub(crate) mod unit;
pub(crate) mod unit_tree;
