//! Error types for class registration, lookup, validation and object lifecycle.
//!
//! Each failure signal has its own struct so callers can match on exactly
//! what they handle; [`Error`] unifies them for `?` propagation.
//!
//! Validation and uniqueness failures both expose a [`KeypathMessages`] map,
//! so presentation layers can render them through [`Error::keypath_messages`]
//! without caring which one occurred.

use std::fmt;

use serde_json::Value;

use crate::class::ClassOrigin;
use crate::keypath::KeypathMessages;
use crate::validator::display_value;

/// Result alias using the crate-wide [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// REGISTRY CONFLICTS
// ============================================================================

/// A second, different class was declared under a name already taken in
/// the same graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Existing JSON Class '{name}' in graph '{graph}' is defined at '{existing_origin}'. \
     Cannot define new JSON class with same name in same graph '{graph}' at '{new_origin}'."
)]
pub struct ClassRedefinitionError {
    /// The contested class name.
    pub name: String,
    /// The graph both declarations target.
    pub graph: String,
    /// Where the registered declaration was built.
    pub existing_origin: ClassOrigin,
    /// Where the rejected declaration was built.
    pub new_origin: ClassOrigin,
}

/// No class is registered under a name in a graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("JSON Class with name '{class_name}' in graph '{graph_name}' is not found.")]
pub struct ClassNotFoundError {
    /// The requested class name.
    pub class_name: String,
    /// The graph that was searched.
    pub graph_name: String,
}

// ============================================================================
// DATA FAILURES
// ============================================================================

/// One or more rules were violated during a validation session.
///
/// `root` holds the root object with every transform of the session
/// applied, including those that ran before a rule failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Every violation found, addressed by keypath.
    pub keypath_messages: KeypathMessages,
    /// The root object the session walked.
    pub root: Value,
}

impl ValidationError {
    /// Creates a validation error from collected messages.
    pub fn new(keypath_messages: KeypathMessages, root: Value) -> Self {
        Self {
            keypath_messages,
            root,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Json classes validation failed:")?;
        for (keypath, message) in self.keypath_messages.iter() {
            writeln!(f, "  '{keypath}': {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// A value collides with persisted state on a field declared unique.
///
/// Raised by persistence integrations; carries the same keypath map shape
/// as [`ValidationError`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct UniqueConstraintError {
    /// The offending value.
    pub value: Value,
    /// Keypath of the unique field.
    pub field: String,
    /// Human readable message.
    pub message: String,
    /// `{field: message}`.
    pub keypath_messages: KeypathMessages,
}

impl UniqueConstraintError {
    /// Creates a uniqueness failure for `value` at `field`.
    pub fn new(value: Value, field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!(
            "Value '{}' at '{field}' is not unique.",
            display_value(&value)
        );
        let keypath_messages = KeypathMessages::single(field.clone(), message.clone());
        Self {
            value,
            field,
            message,
            keypath_messages,
        }
    }
}

/// A persisted object could not be located by a persistence integration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ObjectNotFoundError {
    /// Human readable message.
    pub message: String,
}

impl ObjectNotFoundError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// USAGE CONFLICTS
// ============================================================================

/// An abstract class was instantiated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{class_name} is an abstract class and should not be initialized")]
pub struct AbstractClassError {
    /// The abstract class.
    pub class_name: String,
}

/// Reset was requested on an object that cannot be reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ResetError {
    /// The object has no persisted state to return to.
    #[error("object is new and cannot be reset")]
    ObjectIsNew,
    /// The object's class does not enable `reset_all_fields`.
    #[error("reset called on a reset disabled object")]
    NotEnabled,
}

// ============================================================================
// UNIFIED ERROR
// ============================================================================

/// Every failure this crate reports.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Redefinition(#[from] ClassRedefinitionError),

    #[error(transparent)]
    ClassNotFound(#[from] ClassNotFoundError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    UniqueConstraint(#[from] UniqueConstraintError),

    #[error(transparent)]
    ObjectNotFound(#[from] ObjectNotFoundError),

    #[error(transparent)]
    AbstractClass(#[from] AbstractClassError),

    #[error(transparent)]
    Reset(#[from] ResetError),

    /// The graph owning a declaration was dropped together with its
    /// registry.
    #[error("class graph '{graph}' has been released")]
    GraphReleased {
        /// Name of the dropped graph.
        graph: String,
    },
}

impl Error {
    /// The keypath map for data failures (validation, uniqueness).
    #[must_use]
    pub fn keypath_messages(&self) -> Option<&KeypathMessages> {
        match self {
            Self::Validation(e) => Some(&e.keypath_messages),
            Self::UniqueConstraint(e) => Some(&e.keypath_messages),
            _ => None,
        }
    }

    /// Whether this signals misuse that aborts the operation rather than
    /// bad input data.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::Redefinition(_) | Self::AbstractClass(_) | Self::Reset(_) | Self::GraphReleased { .. }
        )
    }
}
