use std::fmt;
use std::sync::Arc;

/// Easing functions used to map normalized animation progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// CSS-style cubic Bézier through `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
    ///
    /// `x1` and `x2` are clamped to `[0, 1]` so the curve stays a function of time;
    /// `y1` and `y2` may leave that range to produce overshoot.
    CubicBezier {
        /// First control point x.
        x1: f64,
        /// First control point y.
        y1: f64,
        /// Second control point x.
        x2: f64,
        /// Second control point y.
        y2: f64,
    },
}

impl Ease {
    /// The classic `ease-in-out` curve, `cubic-bezier(0.42, 0, 0.58, 1)`.
    pub const EASE_IN_OUT: Self = Self::CubicBezier {
        x1: 0.42,
        y1: 0.0,
        x2: 0.58,
        y2: 1.0,
    };

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

// One Bézier coordinate at parameter `s` for control values `p1`, `p2` (ends fixed at 0 and 1).
fn bezier_at(p1: f64, p2: f64, s: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * s + b) * s + c) * s
}

fn bezier_slope(p1: f64, p2: f64, s: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * s + 2.0 * b) * s + c
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    let x1 = x1.clamp(0.0, 1.0);
    let x2 = x2.clamp(0.0, 1.0);
    if x1 == y1 && x2 == y2 {
        return t;
    }
    if t <= 0.0 || t >= 1.0 {
        return t;
    }

    // Solve x(s) = t: Newton first, bisection if the slope is too flat.
    let mut s = t;
    let mut solved = false;
    for _ in 0..8 {
        let slope = bezier_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        let err = bezier_at(x1, x2, s) - t;
        if err.abs() < 1e-7 {
            solved = true;
            break;
        }
        s -= err / slope;
    }
    if !solved || !(0.0..=1.0).contains(&s) {
        let (mut lo, mut hi) = (0.0, 1.0);
        s = t;
        for _ in 0..50 {
            let x = bezier_at(x1, x2, s);
            if (x - t).abs() < 1e-7 {
                break;
            }
            if x < t {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
    }
    bezier_at(y1, y2, s)
}

/// Opaque progress transform `(progress) -> progress` used by a resolved timing.
///
/// Built from an [`Ease`] preset or any closure. Output may leave `[0, 1]`.
#[derive(Clone)]
pub struct Easing(Arc<dyn Fn(f64) -> f64 + Send + Sync>);

impl Easing {
    /// Wrap an arbitrary easing closure.
    pub fn custom(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Identity easing.
    pub fn identity() -> Self {
        Self::custom(|t| t)
    }

    /// Evaluate at `t`.
    pub fn apply(&self, t: f64) -> f64 {
        (self.0)(t)
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Ease> for Easing {
    fn from(ease: Ease) -> Self {
        Self::custom(move |t| ease.apply(t))
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Easing(..)")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
