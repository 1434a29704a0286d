//! Element-wise validation of lists and string-keyed dicts.

use serde_json::{Map, Value};

use crate::keypath::{Keypath, KeypathMessages};
use crate::session::ValidationContext;
use crate::types::Types;
use crate::validator::{FieldKind, Outcome, Rejection, Validator};

/// Runs an inner chain on every element of a list.
///
/// Every element is visited even after a failure, so messages for all bad
/// elements are reported together, each at `keypath.<index>`.
#[derive(Debug, Clone)]
pub struct ListOf {
    inner: Types,
}

impl ListOf {
    #[must_use]
    pub fn new(inner: Types) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &Types {
        &self.inner
    }
}

impl Validator for ListOf {
    fn validate(
        &self,
        value: Value,
        keypath: &Keypath,
        root: &Value,
        ctx: &mut ValidationContext,
    ) -> Outcome {
        let items = match value {
            Value::Null => return Ok(Value::Null),
            Value::Array(items) => items,
            other => {
                return Err(Rejection::at(
                    keypath,
                    format!("Value at '{keypath}' should be a list."),
                    other,
                ));
            }
        };

        let mut messages = KeypathMessages::new();
        let mut validated = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            if ctx.is_aborted() {
                validated.push(item);
                continue;
            }
            match self.inner.run(item, &keypath.index(index), root, ctx) {
                Ok(item) => validated.push(item),
                Err(rejection) => {
                    messages.merge(rejection.messages);
                    validated.push(rejection.value);
                }
            }
        }

        finish(Value::Array(validated), messages)
    }

    fn kind(&self) -> Option<FieldKind> {
        Some(FieldKind::List(Box::new(self.inner.kind())))
    }
}

/// Runs an inner chain on every value of a string-keyed object.
///
/// Keys are kept as given; messages are addressed at `keypath.<key>`.
#[derive(Debug, Clone)]
pub struct DictOf {
    inner: Types,
}

impl DictOf {
    #[must_use]
    pub fn new(inner: Types) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &Types {
        &self.inner
    }
}

impl Validator for DictOf {
    fn validate(
        &self,
        value: Value,
        keypath: &Keypath,
        root: &Value,
        ctx: &mut ValidationContext,
    ) -> Outcome {
        let entries = match value {
            Value::Null => return Ok(Value::Null),
            Value::Object(entries) => entries,
            other => {
                return Err(Rejection::at(
                    keypath,
                    format!("Value at '{keypath}' should be a dict."),
                    other,
                ));
            }
        };

        let mut messages = KeypathMessages::new();
        let mut validated = Map::with_capacity(entries.len());
        for (key, item) in entries {
            if ctx.is_aborted() {
                validated.insert(key, item);
                continue;
            }
            let item = match self.inner.run(item, &keypath.key(key.as_str()), root, ctx) {
                Ok(item) => item,
                Err(rejection) => {
                    messages.merge(rejection.messages);
                    rejection.value
                }
            };
            validated.insert(key, item);
        }

        finish(Value::Object(validated), messages)
    }

    fn kind(&self) -> Option<FieldKind> {
        Some(FieldKind::Dict(Box::new(self.inner.kind())))
    }
}

fn finish(value: Value, messages: KeypathMessages) -> Outcome {
    if messages.is_empty() {
        Ok(value)
    } else {
        Err(Rejection::with_messages(value, messages))
    }
}

#[must_use]
pub fn listof(inner: Types) -> ListOf {
    ListOf::new(inner)
}

#[must_use]
pub fn dictof(inner: Types) -> DictOf {
    DictOf::new(inner)
}
