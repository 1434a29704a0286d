//! User-supplied predicates.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::keypath::Keypath;
use crate::session::ValidationContext;
use crate::validator::{Outcome, Rejection, Validator};

type CheckFn = dyn Fn(&Value, &Value) -> Result<(), String> + Send + Sync;

/// Runs a closure over the value and the session root.
///
/// `Err(message)` is recorded verbatim at the value's keypath. The closure
/// also sees absent values, so it decides itself whether `null` is valid.
///
/// ```
/// use jsonclass::types;
/// use serde_json::json;
///
/// let even = types().check(|value, _root| match value.as_i64() {
///     Some(n) if n % 2 != 0 => Err(format!("{n} is odd")),
///     _ => Ok(()),
/// });
/// assert!(even.validate_value(json!(2)).is_ok());
/// assert!(even.validate_value(json!(3)).is_err());
/// ```
#[derive(Clone)]
pub struct Check {
    f: Arc<CheckFn>,
}

impl Check {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check").field("f", &"<function>").finish()
    }
}

impl Validator for Check {
    fn validate(
        &self,
        value: Value,
        keypath: &Keypath,
        root: &Value,
        _ctx: &mut ValidationContext,
    ) -> Outcome {
        match (self.f)(&value, root) {
            Ok(()) => Ok(value),
            Err(message) => Err(Rejection::at(keypath, message, value)),
        }
    }
}

pub fn check<F>(f: F) -> Check
where
    F: Fn(&Value, &Value) -> Result<(), String> + Send + Sync + 'static,
{
    Check::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::types;
    use serde_json::json;

    #[test]
    fn message_is_recorded_verbatim() {
        let chain = types().check(|_, _| Err("nope".to_owned()));
        let err = chain.validate_value(json!(1)).unwrap_err();
        assert_eq!(err.keypath_messages().unwrap().get(""), Some("nope"));
    }

    #[test]
    fn sees_the_root() {
        let chain = types().check(|value, root| {
            if value == root {
                Ok(())
            } else {
                Err("differs".to_owned())
            }
        });
        assert!(chain.validate_value(json!({"a": 1})).is_ok());
    }
}
