use crate::{
    animation::codec::Json,
    animation::keyframes::Keyframe,
    animation::timing::TweenOptions,
    animation::tween::Tween,
    foundation::error::{TweenError, TweenResult},
};

/// Serializable description of a tween: keyframes plus options.
///
/// ```json
/// { "keyframes": [{ "value": { "x": 0 } }, { "value": { "x": 10 } }],
///   "options": { "duration": 500, "ease": "in_out_cubic" } }
/// ```
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TweenDocument {
    /// Keyframes in timeline order.
    pub keyframes: Vec<Keyframe<serde_json::Value>>,
    /// Timing options; defaults apply to anything omitted.
    #[serde(default)]
    pub options: TweenOptions,
}

impl TweenDocument {
    /// Parse a document from JSON text.
    pub fn from_json(s: &str) -> TweenResult<Self> {
        serde_json::from_str(s).map_err(|e| TweenError::serde(e.to_string()))
    }

    /// Parse a document from a JSON reader.
    pub fn from_reader(r: impl std::io::Read) -> TweenResult<Self> {
        serde_json::from_reader(r).map_err(|e| TweenError::serde(e.to_string()))
    }

    /// Build the described tween over JSON values.
    pub fn build(self) -> TweenResult<Tween<Json>> {
        Tween::from_keyframes(self.keyframes, self.options)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/document.rs"]
mod tests;
