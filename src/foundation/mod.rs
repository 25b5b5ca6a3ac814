//! Shared building blocks: the interior value model and the error taxonomy.

pub(crate) mod error;
pub(crate) mod value;
