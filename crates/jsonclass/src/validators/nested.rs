//! References to other class declarations.
//!
//! The class is looked up by name when the chain runs, so a declaration may
//! reference classes added to its graph later, including itself.

use serde_json::Value;

use crate::keypath::Keypath;
use crate::session::{self, ValidationContext};
use crate::validator::{FieldKind, Outcome, Rejection, Validator};

/// Validates the value as an instance of a named class of the session graph.
///
/// Absent values pass. An unknown class aborts the whole session with
/// [`Error::ClassNotFound`](crate::error::Error::ClassNotFound).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceOf {
    class: String,
}

impl InstanceOf {
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }
}

impl Validator for InstanceOf {
    fn validate(
        &self,
        value: Value,
        keypath: &Keypath,
        root: &Value,
        ctx: &mut ValidationContext,
    ) -> Outcome {
        if value.is_null() {
            return Ok(value);
        }

        let declaration = match ctx.graph().get(&self.class) {
            Ok(declaration) => declaration,
            Err(e) => {
                ctx.abort(e.into());
                return Ok(value);
            }
        };

        if ctx.depth_exhausted() {
            let max_depth = ctx.options().max_depth;
            tracing::warn!(
                class = %self.class,
                keypath = %keypath,
                max_depth,
                "nesting depth exceeded"
            );
            return Err(Rejection::at(
                keypath,
                format!("Value at '{keypath}' exceeds the maximum nesting depth of {max_depth}."),
                value,
            ));
        }

        ctx.nested(|ctx| session::walk_object(&declaration, value, keypath, root, ctx))
    }

    fn kind(&self) -> Option<FieldKind> {
        Some(FieldKind::Instance(self.class.clone()))
    }
}

#[must_use]
pub fn instanceof(class: impl Into<String>) -> InstanceOf {
    InstanceOf::new(class)
}
