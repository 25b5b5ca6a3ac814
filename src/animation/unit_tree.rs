use crate::{
    animation::keyframes::KeyframeStore,
    animation::unit::LinearUnit,
    foundation::value::{PathSegment, Value},
};

/// Units whose timeline segment starts at `start`.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    /// Offset where the segment begins; it ends where the next segment begins.
    pub start: f64,
    /// One unit per numeric leaf. Later units win when two write the same leaf.
    pub units: Vec<LinearUnit>,
}

/// Per-leaf interpolation units indexed by segment start, plus the working value they
/// write into.
///
/// The last segment is a sentinel at offset 1 with no units; it only bounds the search.
#[derive(Clone, Debug)]
pub struct UnitTree {
    working: Value,
    segments: Vec<Segment>,
}

impl UnitTree {
    /// Decompose every numeric leaf of the keyframes into per-segment linear units.
    ///
    /// The working value starts as a copy of the first keyframe. Non-numeric leaves get no
    /// units and keep that copy's value, which the schema check proved is shared by all.
    #[tracing::instrument(skip(store), fields(keyframes = store.frames().len()))]
    pub fn build(store: &KeyframeStore) -> Self {
        let frames = store.frames();
        let mut tree = Self {
            working: store.first().value.clone(),
            segments: Vec::new(),
        };

        let column: Vec<&Value> = frames.iter().map(|f| &f.value).collect();
        let offsets: Vec<f64> = frames.iter().map(|f| f.offset).collect();
        let mut path = Vec::new();
        tree.collect(&column, &offsets, &mut path);

        match tree.segments.iter_mut().find(|s| s.start == 1.0) {
            Some(end) => end.units.clear(),
            None => tree.segments.push(Segment {
                start: 1.0,
                units: Vec::new(),
            }),
        }

        tracing::debug!(
            segments = tree.segments.len(),
            units = tree.unit_count(),
            "unit tree built"
        );
        tree
    }

    fn collect(&mut self, column: &[&Value], offsets: &[f64], path: &mut Vec<PathSegment>) {
        let Some(head) = column.first() else {
            return;
        };
        match head {
            Value::Number(_) => {
                for (i, pair) in column.windows(2).enumerate() {
                    let (Some(from), Some(to)) = (pair[0].as_f64(), pair[1].as_f64()) else {
                        continue;
                    };
                    self.segment_mut(offsets[i])
                        .units
                        .push(LinearUnit::new(from, to, path.clone()));
                }
            }
            Value::Struct(fields) => {
                for key in fields.keys() {
                    self.descend(column, offsets, path, PathSegment::Key(key.clone()));
                }
            }
            Value::List(items) => {
                for idx in 0..items.len() {
                    self.descend(column, offsets, path, PathSegment::Index(idx));
                }
            }
            Value::Null | Value::Bool(_) | Value::Text(_) => {}
        }
    }

    fn descend(
        &mut self,
        column: &[&Value],
        offsets: &[f64],
        path: &mut Vec<PathSegment>,
        step: PathSegment,
    ) {
        let sub: Vec<&Value> = column.iter().filter_map(|v| v.child(&step)).collect();
        path.push(step);
        self.collect(&sub, offsets, path);
        path.pop();
    }

    fn segment_mut(&mut self, start: f64) -> &mut Segment {
        let idx = match self.segments.iter().position(|s| s.start == start) {
            Some(idx) => idx,
            None => {
                self.segments.push(Segment {
                    start,
                    units: Vec::new(),
                });
                self.segments.len() - 1
            }
        };
        &mut self.segments[idx]
    }

    /// Segments in timeline order, sentinel last.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Total number of units across all segments.
    pub fn unit_count(&self) -> usize {
        self.segments.iter().map(|s| s.units.len()).sum()
    }

    /// Live working value.
    pub fn working(&self) -> &Value {
        &self.working
    }

    /// Find the segment containing `progress` and the local progress inside it.
    ///
    /// Bounds are inclusive on both ends, so a progress equal to an inner offset resolves
    /// to the segment that ends there. Progress before 0 or after 1 maps onto the first or
    /// last real segment with a local progress outside `[0, 1]`.
    pub fn locate(&self, progress: f64) -> Option<(usize, f64)> {
        if self.segments.len() < 2 {
            return None;
        }
        let last = self.segments.len() - 2;
        let idx = if progress < self.segments[0].start {
            0
        } else if progress > self.segments[last + 1].start {
            last
        } else {
            self.segments
                .windows(2)
                .position(|w| w[0].start <= progress && progress <= w[1].start)?
        };

        let a = self.segments[idx].start;
        let b = self.segments[idx + 1].start;
        let local = if b > a { (progress - a) / (b - a) } else { 1.0 };
        Some((idx, local))
    }

    /// Drive every unit of the active segment. Returns false if no segment matched.
    pub fn apply(&mut self, progress: f64) -> bool {
        let Some((idx, local)) = self.locate(progress) else {
            return false;
        };
        for unit in &self.segments[idx].units {
            unit.apply(&mut self.working, local);
        }
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/unit_tree.rs"]
mod tests;
