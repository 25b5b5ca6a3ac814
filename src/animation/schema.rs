use crate::foundation::error::{SchemaError, SchemaErrorKind};
use crate::foundation::value::{PathSegment, Value};

/// Check that `values` (one interior per keyframe) can be interpolated as a whole.
///
/// All values must share their kind at every path. Structs must share their key sets and
/// lists their lengths. Non-numeric leaves must be identical. The first failure is reported
/// with the full path from the root down to it.
pub fn validate(values: &[&Value]) -> Result<(), SchemaError> {
    let Some((first, rest)) = values.split_first() else {
        return Ok(());
    };

    for (i, v) in rest.iter().enumerate() {
        if v.kind() != first.kind() {
            return Err(SchemaError::new(SchemaErrorKind::TypeMismatch, i + 1));
        }
    }

    match first {
        Value::Number(_) => Ok(()),
        Value::Struct(fields) => {
            for (i, v) in rest.iter().enumerate() {
                let Value::Struct(other) = v else {
                    return Err(SchemaError::new(SchemaErrorKind::TypeMismatch, i + 1));
                };
                if other.len() != fields.len() {
                    return Err(SchemaError::new(SchemaErrorKind::KeyCountMismatch, i + 1));
                }
                if !fields.keys().all(|k| other.contains_key(k)) {
                    return Err(SchemaError::new(SchemaErrorKind::KeySetMismatch, i + 1));
                }
            }
            for key in fields.keys() {
                let step = PathSegment::Key(key.clone());
                validate_column(values, &step)?;
            }
            Ok(())
        }
        Value::List(items) => {
            for (i, v) in rest.iter().enumerate() {
                let Value::List(other) = v else {
                    return Err(SchemaError::new(SchemaErrorKind::TypeMismatch, i + 1));
                };
                if other.len() != items.len() {
                    return Err(SchemaError::new(SchemaErrorKind::KeyCountMismatch, i + 1));
                }
            }
            for idx in 0..items.len() {
                validate_column(values, &PathSegment::Index(idx))?;
            }
            Ok(())
        }
        Value::Null | Value::Bool(_) | Value::Text(_) => {
            match rest.iter().position(|v| *v != *first) {
                Some(i) => Err(SchemaError::new(SchemaErrorKind::ConstantMismatch, i + 1)),
                None => Ok(()),
            }
        }
    }
}

// Validate the values found one step below every input.
fn validate_column(values: &[&Value], step: &PathSegment) -> Result<(), SchemaError> {
    let column: Vec<&Value> = values.iter().filter_map(|v| v.child(step)).collect();
    debug_assert_eq!(column.len(), values.len());
    validate(&column).map_err(|e| e.add_step(step.clone()))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/schema.rs"]
mod tests;
