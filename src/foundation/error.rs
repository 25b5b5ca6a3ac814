use std::fmt;

use crate::foundation::value::PathSegment;

/// Convenience result type used across keytween.
pub type TweenResult<T> = Result<T, TweenError>;

/// Top-level error taxonomy used by tween APIs.
#[derive(thiserror::Error, Debug)]
pub enum TweenError {
    /// Structural precondition violated by keyframes or options.
    #[error("tween error: {0}")]
    Config(String),

    /// Keyframe values do not share one interpolatable shape.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Errors when serializing or deserializing tween documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TweenError {
    /// Build a [`TweenError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`TweenError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for configuration errors, schema errors included.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Schema(_))
    }

    /// The schema failure, if this is one.
    pub fn as_schema(&self) -> Option<&SchemaError> {
        match self {
            Self::Schema(e) => Some(e),
            _ => None,
        }
    }
}

/// What made a set of keyframe values incompatible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaErrorKind {
    /// Values at the same path have different kinds.
    TypeMismatch,
    /// Structured values at the same path have a different number of fields.
    KeyCountMismatch,
    /// Structured values at the same path have different field names.
    KeySetMismatch,
    /// Non-numeric leaves at the same path are not identical.
    ConstantMismatch,
}

/// Keyframe values that cannot be interpolated, located by the path of the first bad leaf.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaError {
    /// Navigation path from the interior root to the offending value.
    pub path: Vec<PathSegment>,
    /// Failure category.
    pub kind: SchemaErrorKind,
    /// Keyframe index at which the mismatch was found.
    pub index: usize,
}

impl SchemaError {
    pub(crate) fn new(kind: SchemaErrorKind, index: usize) -> Self {
        Self {
            path: Vec::new(),
            kind,
            index,
        }
    }

    /// Prepend one navigation step; used while unwinding out of nested values.
    pub(crate) fn add_step(mut self, step: PathSegment) -> Self {
        self.path.insert(0, step);
        self
    }

    /// Dotted rendering of [`SchemaError::path`], e.g. `pos.x` or `segments.2.1`.
    pub fn dotted_path(&self) -> String {
        let mut s = String::new();
        for (i, step) in self.path.iter().enumerate() {
            if i > 0 {
                s.push('.');
            }
            s.push_str(&step.to_string());
        }
        s
    }

    /// Human-readable message without the path prefix.
    pub fn message(&self) -> String {
        let i = self.index;
        match self.kind {
            SchemaErrorKind::TypeMismatch => format!("Types are not equal at index {i}."),
            SchemaErrorKind::KeyCountMismatch => {
                format!("Length of keys are not equal at index {i}.")
            }
            SchemaErrorKind::KeySetMismatch => format!("Keys do not match at index {i}."),
            SchemaErrorKind::ConstantMismatch => format!(
                "Unable to interpolate between non-numeric values. When using such, make sure \
                 the values are the same at all given keyframes. Error occurred at index {i}."
            ),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "check error: {}", self.message());
        }
        write!(f, "check error at \"{}\": {}", self.dotted_path(), self.message())
    }
}

impl std::error::Error for SchemaError {}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
