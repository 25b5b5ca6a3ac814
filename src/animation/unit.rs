use crate::foundation::value::{PathSegment, Value};

/// Interpolates one numeric leaf over one segment and writes it back at `path`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearUnit {
    from: f64,
    to: f64,
    path: Vec<PathSegment>,
}

impl LinearUnit {
    pub(crate) fn new(from: f64, to: f64, path: Vec<PathSegment>) -> Self {
        Self { from, to, path }
    }

    /// Lower bound (value at local progress 0).
    pub fn from(&self) -> f64 {
        self.from
    }

    /// Upper bound (value at local progress 1).
    pub fn to(&self) -> f64 {
        self.to
    }

    /// Leaf this unit is responsible for, relative to the working value root.
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Interpolated scalar at local progress `t`. `t` outside `[0, 1]` extrapolates.
    pub fn value_at(&self, t: f64) -> f64 {
        self.from + (self.to - self.from) * t
    }

    /// Write the value at `t` into `root`. Returns false if the path no longer resolves.
    pub fn apply(&self, root: &mut Value, t: f64) -> bool {
        match root.at_mut(&self.path) {
            Some(slot) => {
                *slot = Value::Number(self.value_at(t));
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/unit.rs"]
mod tests;
