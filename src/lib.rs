//! keytween is a keyframe interpolation engine for numbers and nested structured values.
//!
//! A [`Tween`] holds two or more keyframes, each a value pinned to a normalized offset in
//! `[0, 1]`, and computes the interpolated value for any point in time. Structured values
//! are interpolated leaf by leaf, so `{ pos: { x, y } }` tweens as two independent scalars.
//!
//! # Pipeline overview
//!
//! 1. **Normalize**: missing keyframe offsets are spread evenly between their neighbors.
//! 2. **Validate**: every keyframe must share one shape; failures name the offending path.
//! 3. **Decompose**: each numeric leaf gets one [`LinearUnit`] per keyframe segment.
//! 4. **Map time**: elapsed time becomes eased progress, honoring delay, iterations and fill.
//! 5. **Drive**: the active segment's units write into a working value; listeners see a
//!    fresh copy whenever the output changes.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Synchronous**: no internal scheduling. Some external driver calls
//!   [`Tween::update`] or [`Tween::update_at`] on its own cadence.
//! - **Owned values**: inputs are moved in and outputs are fresh copies, so callers never
//!   alias the live working value.
//!
//! # Example
//!
//! ```
//! use keytween::{Scalar, Tween, TweenOptions};
//!
//! let mut tween = Tween::<Scalar>::between(0.0, 10.0, TweenOptions::with_duration(1000.0))?;
//! assert_eq!(tween.update_at(250.0), Some(2.5));
//! # Ok::<(), keytween::TweenError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;

pub use animation::codec::{Identity, Json, Scalar, TweenCodec};
pub use animation::document::TweenDocument;
pub use animation::ease::{Ease, Easing};
pub use animation::keyframes::{Keyframe, KeyframeStore, ResolvedKeyframe, spread_offsets};
pub use animation::schema::validate as validate_schema;
pub use animation::timing::{
    Clock, DEFAULT_END, Iterations, ManualClock, SystemClock, TimeMapper, Timing, TweenOptions,
};
pub use animation::tween::{ListenerId, Tween};
pub use animation::unit::LinearUnit;
pub use animation::unit_tree::{Segment, UnitTree};
pub use foundation::error::{SchemaError, SchemaErrorKind, TweenError, TweenResult};
pub use foundation::value::{PathSegment, Value, ValueKind};
