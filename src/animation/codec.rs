use crate::foundation::value::Value;

/// Conversion between caller-facing values and the interior form tweens interpolate.
///
/// `parse_in` runs once per keyframe when keyframes are set; `parse_out` runs on every
/// emitted update and on every getter call, always producing a fresh output.
pub trait TweenCodec {
    /// Type accepted by constructors and setters.
    type Input;
    /// Type handed to listeners and returned by getters.
    type Output: Clone + PartialEq;

    /// Caller value to interior.
    fn parse_in(&self, input: Self::Input) -> Value;

    /// Interior to caller value.
    fn parse_out(&self, interior: &Value) -> Self::Output;
}

/// Tweens [`Value`]s directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl TweenCodec for Identity {
    type Input = Value;
    type Output = Value;

    fn parse_in(&self, input: Value) -> Value {
        input
    }

    fn parse_out(&self, interior: &Value) -> Value {
        interior.clone()
    }
}

/// Tweens a bare `f64`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scalar;

impl TweenCodec for Scalar {
    type Input = f64;
    type Output = f64;

    fn parse_in(&self, input: f64) -> Value {
        Value::Number(input)
    }

    fn parse_out(&self, interior: &Value) -> f64 {
        interior.as_f64().unwrap_or(f64::NAN)
    }
}

/// Tweens `serde_json::Value` documents.
#[derive(Clone, Copy, Debug, Default)]
pub struct Json;

impl TweenCodec for Json {
    type Input = serde_json::Value;
    type Output = serde_json::Value;

    fn parse_in(&self, input: serde_json::Value) -> Value {
        Value::from(input)
    }

    fn parse_out(&self, interior: &Value) -> serde_json::Value {
        serde_json::Value::from(interior)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/codec.rs"]
mod tests;
