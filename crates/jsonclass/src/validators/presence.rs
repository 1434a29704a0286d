//! Presence rules: requiring a value, or supplying one when absent.

use serde_json::Value;

use crate::keypath::Keypath;
use crate::session::ValidationContext;
use crate::validator::{Outcome, Validator};

crate::validator! {
    /// Rejects the absence marker (`null` or a missing field).
    pub Required;
    rule(value) { !value.is_null() }
    message(value, keypath) { format!("Value at '{keypath}' should not be None.") }
    fn required();
}

/// Substitutes a fixed value for an absent one. Never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultValue {
    value: Value,
}

impl DefaultValue {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

impl Validator for DefaultValue {
    fn validate(
        &self,
        value: Value,
        _keypath: &Keypath,
        _root: &Value,
        _ctx: &mut ValidationContext,
    ) -> Outcome {
        if value.is_null() {
            Ok(self.value.clone())
        } else {
            Ok(value)
        }
    }
}

#[must_use]
pub fn default(value: Value) -> DefaultValue {
    DefaultValue::new(value)
}
