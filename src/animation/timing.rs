use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crate::{
    animation::ease::{Ease, Easing},
    foundation::error::{TweenError, TweenResult},
};

/// Default timeline end, in milliseconds, when neither `end` nor `duration` is given.
pub const DEFAULT_END: f64 = 1000.0;

/// How many times the timeline plays.
///
/// Serialized as a plain number of cycles or the string `"infinite"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "IterationsRepr", into = "IterationsRepr")]
pub enum Iterations {
    /// Play this many cycles (at least one).
    Count(u32),
    /// Loop forever.
    Infinite,
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum IterationsRepr {
    Count(u32),
    Keyword(IterationsKeyword),
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
enum IterationsKeyword {
    #[serde(alias = "Infinity")]
    Infinite,
}

impl From<IterationsRepr> for Iterations {
    fn from(repr: IterationsRepr) -> Self {
        match repr {
            IterationsRepr::Count(n) => Self::Count(n),
            IterationsRepr::Keyword(IterationsKeyword::Infinite) => Self::Infinite,
        }
    }
}

impl From<Iterations> for IterationsRepr {
    fn from(iterations: Iterations) -> Self {
        match iterations {
            Iterations::Count(n) => Self::Count(n),
            Iterations::Infinite => Self::Keyword(IterationsKeyword::Infinite),
        }
    }
}

impl Default for Iterations {
    fn default() -> Self {
        Self::Count(1)
    }
}

impl Iterations {
    /// True once the 1-based `iteration` is past the last cycle.
    pub fn exceeded_by(self, iteration: f64) -> bool {
        match self {
            Self::Count(n) => iteration > f64::from(n),
            Self::Infinite => false,
        }
    }
}

/// Caller-facing tween options. Every field is optional.
///
/// Two shapes are accepted: `{ duration, .. }` or `{ start, end, .. }`. When `duration` is
/// present it wins and `end` becomes `start + duration`.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TweenOptions {
    /// Delay before each cycle, in milliseconds.
    pub start: Option<f64>,
    /// End of the first cycle, in milliseconds.
    pub end: Option<f64>,
    /// Length of one cycle without the delay, in milliseconds.
    pub duration: Option<f64>,
    /// Named easing preset.
    pub ease: Option<Ease>,
    /// Arbitrary easing closure. Takes precedence over `ease`.
    #[serde(skip)]
    pub easing: Option<Easing>,
    /// Cycle count.
    pub iterations: Option<Iterations>,
    /// Hold the end state after the last cycle instead of snapping back to the start.
    pub fill: Option<bool>,
}

impl TweenOptions {
    /// Options for a plain tween of `duration` milliseconds.
    pub fn with_duration(duration: f64) -> Self {
        Self {
            duration: Some(duration),
            ..Self::default()
        }
    }

    /// Options spanning `start..end` milliseconds.
    pub fn with_range(start: f64, end: f64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    /// Set a named easing preset.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    /// Set an easing closure.
    pub fn easing(mut self, f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        self.easing = Some(Easing::custom(f));
        self
    }

    /// Set the cycle count.
    pub fn iterations(mut self, iterations: Iterations) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Set fill behavior.
    pub fn fill(mut self, fill: bool) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Apply defaults and check invariants.
    pub fn resolve(&self) -> TweenResult<Timing> {
        let start = self.start.unwrap_or(0.0);
        if !start.is_finite() || start < 0.0 {
            return Err(TweenError::config(format!(
                "Invalid start {start}. Must be a finite number >= 0."
            )));
        }

        let (end, duration) = match (self.duration, self.end) {
            (Some(d), end) => {
                if let Some(e) = end.filter(|e| *e != start + d) {
                    tracing::warn!(end = e, duration = d, "end ignored in favor of duration");
                }
                (start + d, d)
            }
            (None, Some(e)) => (e, e - start),
            (None, None) => (DEFAULT_END, DEFAULT_END - start),
        };
        if !duration.is_finite() || duration <= 0.0 {
            return Err(TweenError::config(format!(
                "Invalid duration {duration}. Must be a finite number > 0."
            )));
        }

        let iterations = self.iterations.unwrap_or_default();
        if iterations == Iterations::Count(0) {
            return Err(TweenError::config(
                "Invalid iterations. Must be at least 1.",
            ));
        }

        let easing = match (&self.easing, self.ease) {
            (Some(f), _) => f.clone(),
            (None, Some(ease)) => ease.into(),
            (None, None) => Easing::identity(),
        };

        Ok(Timing {
            start,
            end,
            duration,
            easing,
            iterations,
            fill: self.fill.unwrap_or(true),
        })
    }
}

/// Resolved, immutable timing configuration.
#[derive(Clone, Debug)]
pub struct Timing {
    start: f64,
    end: f64,
    duration: f64,
    easing: Easing,
    iterations: Iterations,
    fill: bool,
}

impl Timing {
    /// Delay before each cycle.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// End of the first cycle (`start + duration`); also the length of every cycle.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Active length of one cycle.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Easing applied to normalized progress.
    pub fn easing(&self) -> &Easing {
        &self.easing
    }

    /// Cycle count.
    pub fn iterations(&self) -> Iterations {
        self.iterations
    }

    /// Whether the end state is held after the last cycle.
    pub fn fill(&self) -> bool {
        self.fill
    }

    /// Eased progress for `elapsed` milliseconds since the timeline began.
    ///
    /// Each cycle lasts `end`: `start` of delay holding the first keyframe, then `duration`
    /// of motion. Past the last cycle the position is held at the end (`fill`) or reset to
    /// the beginning. Negative or NaN input counts as 0.
    pub fn progress_at(&self, elapsed: f64) -> f64 {
        let elapsed = if elapsed.is_nan() || elapsed < 0.0 {
            0.0
        } else {
            elapsed.min(f64::MAX)
        };

        let iteration = (elapsed / self.end).floor() + 1.0;
        let mut position =
            elapsed - iteration * self.start - (iteration - 1.0) * self.duration;

        if self.iterations.exceeded_by(iteration) {
            position = if self.fill { self.duration } else { 0.0 };
        } else if position < 0.0 {
            position = 0.0;
        }
        let position = position.clamp(0.0, self.duration);

        self.easing.apply(position / self.duration)
    }
}

/// Source of wall-clock milliseconds for tweens driven without explicit times.
pub trait Clock {
    /// Milliseconds on a monotonic scale; only differences are used.
    fn now_ms(&self) -> f64;
}

/// Monotonic clock backed by [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock advanced by hand. Clones share the same reading.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Clock reading `now_ms`.
    pub fn new(now_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(now_ms)),
        }
    }

    /// Set the reading.
    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    /// Move the reading forward by `delta_ms`.
    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Maps raw or wall-clock time to eased progress.
pub struct TimeMapper {
    timing: Timing,
    clock: Box<dyn Clock>,
    epoch: Option<f64>,
}

impl TimeMapper {
    /// Mapper over `timing` reading wall-clock time from `clock`.
    pub fn new(timing: Timing, clock: Box<dyn Clock>) -> Self {
        Self {
            timing,
            clock,
            epoch: None,
        }
    }

    /// Resolved timing.
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Replace the clock; the next wall-clock call starts a new epoch.
    pub fn set_clock(&mut self, clock: Box<dyn Clock>) {
        self.clock = clock;
        self.epoch = None;
    }

    /// Forget the epoch; the next wall-clock call counts as elapsed 0.
    pub fn restart(&mut self) {
        self.epoch = None;
    }

    /// Progress for an explicit `time`, or for the clock when `None`.
    ///
    /// The first clock read becomes the epoch and maps to elapsed 0.
    pub fn map(&mut self, time: Option<f64>) -> f64 {
        let elapsed = match time {
            Some(t) => t,
            None => {
                let now = self.clock.now_ms();
                match self.epoch {
                    Some(epoch) => now - epoch,
                    None => {
                        self.epoch = Some(now);
                        0.0
                    }
                }
            }
        };
        self.timing.progress_at(elapsed)
    }
}

impl std::fmt::Debug for TimeMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeMapper")
            .field("timing", &self.timing)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timing.rs"]
mod tests;
