//! Primitive type rules.
//!
//! All of them pass `null`; combine with [`Required`](super::Required) to
//! forbid absence.

use serde_json::{Number, Value};

use crate::keypath::Keypath;
use crate::session::ValidationContext;
use crate::validator::{Outcome, Rejection, Validator, display_value};

crate::validator! {
    /// Accepts strings.
    pub Str;
    rule(value) { value.is_null() || value.is_string() }
    message(value, keypath) { format!("Value '{value}' at '{keypath}' should be str.") }
    fn str();
}

crate::validator! {
    /// Accepts integral numbers.
    pub Int;
    rule(value) { value.is_null() || value.is_i64() || value.is_u64() }
    message(value, keypath) { format!("Value '{value}' at '{keypath}' should be int.") }
    fn int();
}

crate::validator! {
    /// Accepts booleans.
    pub Bool;
    rule(value) { value.is_null() || value.is_boolean() }
    message(value, keypath) { format!("Value '{value}' at '{keypath}' should be bool.") }
    fn bool();
}

/// Accepts any number and coerces integers to floats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Float;

impl Validator for Float {
    fn validate(
        &self,
        value: Value,
        keypath: &Keypath,
        _root: &Value,
        _ctx: &mut ValidationContext,
    ) -> Outcome {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Number(n) if n.is_f64() => Ok(Value::Number(n)),
            Value::Number(n) => match n.as_f64().and_then(Number::from_f64) {
                Some(coerced) => Ok(Value::Number(coerced)),
                None => Ok(Value::Number(n)),
            },
            other => Err(Rejection::at(
                keypath,
                format!(
                    "Value '{}' at '{keypath}' should be float.",
                    display_value(&other)
                ),
                other,
            )),
        }
    }
}

#[must_use]
pub const fn float() -> Float {
    Float
}
