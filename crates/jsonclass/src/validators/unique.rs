//! Marker for fields whose values must be unique among persisted objects.
//!
//! The check itself needs persisted state, so it belongs to the
//! persistence integration, which reports collisions through
//! [`UniqueConstraintError`](crate::error::UniqueConstraintError).

use serde_json::Value;

use crate::keypath::Keypath;
use crate::session::ValidationContext;
use crate::validator::{Outcome, Validator};

/// Flags its field as unique. Always continues unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Unique;

impl Validator for Unique {
    fn validate(
        &self,
        value: Value,
        _keypath: &Keypath,
        _root: &Value,
        _ctx: &mut ValidationContext,
    ) -> Outcome {
        Ok(value)
    }

    fn marks_unique(&self) -> bool {
        true
    }
}

#[must_use]
pub const fn unique() -> Unique {
    Unique
}
