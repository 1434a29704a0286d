//! The validator contract every rule of the chain language implements.
//!
//! A [`Validator`] receives the current value by ownership and either hands
//! back the (possibly transformed) value for the next rule in the chain, or
//! rejects it with keypath-addressed messages.
//!
//! ```
//! use jsonclass::prelude::*;
//! use serde_json::{Value, json};
//!
//! #[derive(Debug)]
//! struct Even;
//!
//! impl Validator for Even {
//!     fn validate(
//!         &self,
//!         value: Value,
//!         keypath: &Keypath,
//!         _root: &Value,
//!         _ctx: &mut ValidationContext,
//!     ) -> Outcome {
//!         match value.as_i64() {
//!             Some(n) if n % 2 != 0 => Err(Rejection::at(keypath, "should be even", value)),
//!             _ => Ok(value),
//!         }
//!     }
//! }
//!
//! let chain = types().int().validator(Even);
//! assert!(chain.validate_value(json!(4)).is_ok());
//! assert!(chain.validate_value(json!(3)).is_err());
//! ```

use std::fmt;

use serde_json::Value;

use crate::keypath::{Keypath, KeypathMessages};
use crate::session::ValidationContext;

/// What a validator hands to the next rule of its chain.
pub type Outcome = Result<Value, Rejection>;

/// A failed rule: the value as it stood plus the messages it contributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// The value at the time of failure, with earlier transforms applied.
    pub value: Value,
    /// Messages contributed by the failure.
    pub messages: KeypathMessages,
}

impl Rejection {
    /// A single message addressed at `keypath`.
    pub fn at(keypath: &Keypath, message: impl Into<String>, value: Value) -> Self {
        Self {
            value,
            messages: KeypathMessages::single(keypath.to_string(), message),
        }
    }

    /// A rejection carrying messages collected from nested values.
    pub fn with_messages(value: Value, messages: KeypathMessages) -> Self {
        Self { value, messages }
    }
}

/// The shape a chain establishes for its value.
///
/// Instantiation and serialization use this to find nested declarations
/// without running the chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldKind {
    /// A plain value with no declared structure.
    #[default]
    Any,
    /// An instance of the named class.
    Instance(String),
    /// A list whose elements have the inner kind.
    List(Box<FieldKind>),
    /// A string-keyed object whose values have the inner kind.
    Dict(Box<FieldKind>),
}

/// One composable validation or transformation rule.
///
/// Implementations hold only immutable configuration, so one instance can
/// serve any number of chains and concurrent sessions.
pub trait Validator: fmt::Debug + Send + Sync {
    /// Validates or transforms `value`, found at `keypath` below `root`.
    fn validate(
        &self,
        value: Value,
        keypath: &Keypath,
        root: &Value,
        ctx: &mut ValidationContext,
    ) -> Outcome;

    /// The structure this rule establishes, if any.
    fn kind(&self) -> Option<FieldKind> {
        None
    }

    /// Whether this rule declares the field unique among persisted objects.
    fn marks_unique(&self) -> bool {
        false
    }
}

/// Renders a value for a human readable message; strings lose their quotes.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejection_at_addresses_keypath() {
        let path = Keypath::root().key("a").index(1);
        let rejection = Rejection::at(&path, "bad", json!(3));
        assert_eq!(rejection.messages.get("a.1"), Some("bad"));
        assert_eq!(rejection.value, json!(3));
    }

    #[test]
    fn display_value_strips_string_quotes() {
        assert_eq!(display_value(&json!("abc")), "abc");
        assert_eq!(display_value(&json!(-5)), "-5");
        assert_eq!(display_value(&json!(null)), "null");
    }
}
