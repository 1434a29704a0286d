//! Transform rules. They rewrite the value and never fail.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::keypath::Keypath;
use crate::session::ValidationContext;
use crate::validator::{Outcome, Validator};

fn map_str(value: Value, f: impl FnOnce(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(f(&s)),
        other => other,
    }
}

macro_rules! string_transform {
    ($(#[$meta:meta])* $name:ident, $factory:ident, $f:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl Validator for $name {
            fn validate(
                &self,
                value: Value,
                _keypath: &Keypath,
                _root: &Value,
                _ctx: &mut ValidationContext,
            ) -> Outcome {
                Ok(map_str(value, $f))
            }
        }

        #[must_use]
        pub const fn $factory() -> $name {
            $name
        }
    };
}

string_transform!(
    /// Strips leading and trailing whitespace from strings.
    Trim, trim, |s| s.trim().to_owned()
);
string_transform!(
    /// Lowercases strings.
    ToLower, to_lower, str::to_lowercase
);
string_transform!(
    /// Uppercases strings.
    ToUpper, to_upper, str::to_uppercase
);

/// Replaces the value with the result of a closure.
#[derive(Clone)]
pub struct Transform {
    f: Arc<dyn Fn(Value) -> Value + Send + Sync>,
}

impl Transform {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform").field("f", &"<function>").finish()
    }
}

impl Validator for Transform {
    fn validate(
        &self,
        value: Value,
        _keypath: &Keypath,
        _root: &Value,
        _ctx: &mut ValidationContext,
    ) -> Outcome {
        Ok((self.f)(value))
    }
}

pub fn transform<F>(f: F) -> Transform
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    Transform::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::types;
    use serde_json::json;

    #[test]
    fn string_transforms() {
        assert_eq!(types().trim().validate_value(json!("  a ")).unwrap(), json!("a"));
        assert_eq!(types().to_lower().validate_value(json!("AbC")).unwrap(), json!("abc"));
        assert_eq!(types().to_upper().validate_value(json!("AbC")).unwrap(), json!("ABC"));
    }

    #[test]
    fn string_transforms_leave_other_values() {
        assert_eq!(types().trim().validate_value(json!(1)).unwrap(), json!(1));
        assert_eq!(types().trim().validate_value(Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn closure_transform() {
        let double = types().transform(|v| json!(v.as_i64().unwrap_or(0) * 2));
        assert_eq!(double.validate_value(json!(21)).unwrap(), json!(42));
    }
}
