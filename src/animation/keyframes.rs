use crate::{
    animation::schema,
    foundation::error::{TweenError, TweenResult},
    foundation::value::Value,
};

/// One keyframe: a value pinned to a normalized offset along the timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Keyframe<T> {
    /// Position in `[0, 1]`. Missing offsets are spread evenly between their neighbors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
    /// Value at `offset`.
    pub value: T,
}

impl<T> Keyframe<T> {
    /// Keyframe with an offset to be filled in by spreading.
    pub fn new(value: T) -> Self {
        Self {
            offset: None,
            value,
        }
    }

    /// Keyframe pinned at `offset`.
    pub fn at(offset: f64, value: T) -> Self {
        Self {
            offset: Some(offset),
            value,
        }
    }

    /// Convert the value, keeping the offset.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Keyframe<U> {
        Keyframe {
            offset: self.offset,
            value: f(self.value),
        }
    }
}

/// A keyframe after offset spreading.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedKeyframe {
    /// Position in `[0, 1]`.
    pub offset: f64,
    /// Interior value.
    pub value: Value,
}

/// Validated, offset-normalized keyframes.
///
/// A store always holds at least two keyframes, offsets run from 0 to 1 without going
/// backwards, and all values share one interpolatable shape. Replacement operations
/// build a new store so a failure leaves the old one untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeStore {
    frames: Vec<ResolvedKeyframe>,
}

impl KeyframeStore {
    /// Spread offsets, check them, and validate the value schema.
    pub fn new(keyframes: Vec<Keyframe<Value>>) -> TweenResult<Self> {
        if keyframes.len() < 2 {
            return Err(TweenError::config(
                "Invalid keyframes. Must have a minimum length of 2.",
            ));
        }

        let offsets: Vec<Option<f64>> = keyframes.iter().map(|k| k.offset).collect();
        let offsets = spread_offsets(&offsets)?;

        let frames: Vec<ResolvedKeyframe> = keyframes
            .into_iter()
            .zip(offsets)
            .map(|(k, offset)| ResolvedKeyframe {
                offset,
                value: k.value,
            })
            .collect();

        let values: Vec<&Value> = frames.iter().map(|f| &f.value).collect();
        schema::validate(&values)?;

        Ok(Self { frames })
    }

    /// All keyframes in timeline order.
    pub fn frames(&self) -> &[ResolvedKeyframe] {
        &self.frames
    }

    /// Keyframe at offset 0.
    pub fn first(&self) -> &ResolvedKeyframe {
        &self.frames[0]
    }

    /// Keyframe at offset 1.
    pub fn last(&self) -> &ResolvedKeyframe {
        &self.frames[self.frames.len() - 1]
    }

    /// Copy of this store with the first keyframe's value replaced.
    pub fn with_first(&self, value: Value) -> TweenResult<Self> {
        let mut keyframes = self.to_keyframes();
        keyframes[0] = Keyframe::at(0.0, value);
        Self::new(keyframes)
    }

    /// Copy of this store with the last keyframe's value replaced.
    pub fn with_last(&self, value: Value) -> TweenResult<Self> {
        let mut keyframes = self.to_keyframes();
        let last = keyframes.len() - 1;
        keyframes[last] = Keyframe::at(1.0, value);
        Self::new(keyframes)
    }

    fn to_keyframes(&self) -> Vec<Keyframe<Value>> {
        self.frames
            .iter()
            .map(|f| Keyframe::at(f.offset, f.value.clone()))
            .collect()
    }
}

/// Resolve optional offsets into a full, non-decreasing list from 0 to 1.
///
/// Each run of missing offsets is spaced evenly, by index, between the explicit offsets
/// around it. The first and last offsets are always 0 and 1.
pub fn spread_offsets(offsets: &[Option<f64>]) -> TweenResult<Vec<f64>> {
    let n = offsets.len();
    let mut out: Vec<Option<f64>> = offsets.to_vec();
    if n == 0 {
        return Ok(Vec::new());
    }

    if let Some(o) = out[0].filter(|o| *o != 0.0) {
        tracing::warn!(offset = o, "first keyframe offset forced to 0");
    }
    out[0] = Some(0.0);
    if n > 1 {
        if let Some(o) = out[n - 1].filter(|o| *o != 1.0) {
            tracing::warn!(offset = o, "last keyframe offset forced to 1");
        }
        out[n - 1] = Some(1.0);
    }

    let mut anchor = 0usize;
    for j in 1..n {
        let Some(b) = out[j] else { continue };
        if let Some(a) = out[anchor] {
            let span = (j - anchor) as f64;
            for (k, slot) in out.iter_mut().enumerate().take(j).skip(anchor + 1) {
                *slot = Some(a + (b - a) * ((k - anchor) as f64) / span);
            }
        }
        anchor = j;
    }

    let resolved: Vec<f64> = out.into_iter().map(|o| o.unwrap_or(0.0)).collect();
    for (i, o) in resolved.iter().enumerate() {
        if !o.is_finite() || !(0.0..=1.0).contains(o) {
            return Err(TweenError::config(format!(
                "Invalid keyframe offset {o} at index {i}. Offsets must lie within [0, 1]."
            )));
        }
    }
    if let Some(i) = resolved.windows(2).position(|w| w[1] < w[0]) {
        return Err(TweenError::config(format!(
            "Invalid keyframe offset at index {}. Offsets must not decrease.",
            i + 1
        )));
    }
    Ok(resolved)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
