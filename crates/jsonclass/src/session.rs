//! Validation sessions: one walk of a root value through its chains.
//!
//! A session moves through [`SessionState::Pending`] →
//! [`SessionState::InProgress`] → [`SessionState::Completed`] or
//! [`SessionState::Failed`]. Every field is visited in declaration order;
//! a failing rule stops the chain for its own field only, and all messages
//! of the walk are reported together.
//!
//! Transforms are never rolled back. When a session fails, the root carried
//! by the [`ValidationError`] (and written back by
//! [`JsonObject::validate`](crate::object::JsonObject::validate)) already
//! holds every transform applied before and after the failing rules.

use std::sync::Arc;

use serde_json::Value;

use crate::class::ClassDeclaration;
use crate::config::ValidationOptions;
use crate::error::{Error, Result, ValidationError};
use crate::graph::ClassGraph;
use crate::keypath::{Keypath, KeypathMessages};
use crate::types::Types;
use crate::validator::{Outcome, Rejection};

// ============================================================================
// CONTEXT
// ============================================================================

/// Ambient data threaded to every validator of a session.
#[derive(Debug)]
pub struct ValidationContext {
    graph: Arc<ClassGraph>,
    is_new: bool,
    depth: usize,
    options: ValidationOptions,
    fatal: Option<Error>,
}

impl ValidationContext {
    /// A context resolving class names against `graph`.
    pub fn new(graph: Arc<ClassGraph>) -> Self {
        Self {
            graph,
            is_new: true,
            depth: 0,
            options: ValidationOptions::default(),
            fatal: None,
        }
    }

    /// Marks the validated object as new (not yet persisted) or existing.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_new(mut self, is_new: bool) -> Self {
        self.is_new = is_new;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    /// Graph used to resolve class references.
    pub fn graph(&self) -> &Arc<ClassGraph> {
        &self.graph
    }

    /// Whether the object under validation has never been persisted.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Number of class instances entered below the session root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Aborts the session with a usage error instead of a data failure.
    ///
    /// Only the first abort is kept.
    pub fn abort(&mut self, error: Error) {
        if self.fatal.is_none() {
            self.fatal = Some(error);
        }
    }

    /// Whether [`abort`](Self::abort) was called.
    pub fn is_aborted(&self) -> bool {
        self.fatal.is_some()
    }

    /// Whether entering another class instance would exceed
    /// [`ValidationOptions::max_depth`].
    pub fn depth_exhausted(&self) -> bool {
        self.depth >= self.options.max_depth
    }

    /// Runs `f` one nesting level deeper.
    pub(crate) fn nested<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn take_fatal(&mut self) -> Option<Error> {
        self.fatal.take()
    }
}

// ============================================================================
// WALK
// ============================================================================

/// Walks every declared field of `value` through its chain.
///
/// Fields missing from `value` are validated as absent and written back as
/// `null`. Undeclared keys are left untouched.
pub(crate) fn walk_object(
    class: &ClassDeclaration,
    value: Value,
    keypath: &Keypath,
    root: &Value,
    ctx: &mut ValidationContext,
) -> Outcome {
    let mut map = match value {
        Value::Object(map) => map,
        other => {
            return Err(Rejection::at(
                keypath,
                format!(
                    "Value at '{keypath}' should be instance of '{}'.",
                    class.name()
                ),
                other,
            ));
        }
    };

    let mut messages = KeypathMessages::new();
    for field in class.fields() {
        if ctx.is_aborted() {
            break;
        }
        let field_path = keypath.key(field.name());
        let current = map.remove(field.name()).unwrap_or(Value::Null);
        let validated = match field.types().run(current, &field_path, root, ctx) {
            Ok(value) => value,
            Err(rejection) => {
                messages.merge(rejection.messages);
                rejection.value
            }
        };
        map.insert(field.name().to_owned(), validated);
    }

    if messages.is_empty() {
        Ok(Value::Object(map))
    } else {
        Err(Rejection::with_messages(Value::Object(map), messages))
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// Lifecycle of a [`ValidationSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Created, not yet run.
    Pending,
    /// Walking the root value.
    InProgress,
    /// Finished without messages.
    Completed,
    /// Finished with at least one message, or aborted.
    Failed,
}

#[derive(Debug)]
enum Target {
    Class(Arc<ClassDeclaration>),
    Chain(Types),
}

/// One traversal of a root value against a class declaration or a
/// standalone chain.
///
/// # Examples
///
/// ```
/// use jsonclass::prelude::*;
/// use serde_json::json;
///
/// let registry = GraphRegistry::new();
/// let point = ClassDeclaration::builder("Point")
///     .field("x", types().required().int())
///     .field("y", types().int().default(json!(0)))
///     .register_in(&registry)
///     .unwrap();
///
/// let session = ValidationSession::for_class(&point, json!({ "x": 1 })).unwrap();
/// assert_eq!(session.state(), SessionState::Pending);
/// assert_eq!(session.run().unwrap(), json!({ "x": 1, "y": 0 }));
/// ```
#[derive(Debug)]
pub struct ValidationSession {
    target: Target,
    root: Value,
    keypath: Keypath,
    ctx: ValidationContext,
    state: SessionState,
}

impl ValidationSession {
    /// Opens a session validating `root` as an instance of `class`.
    ///
    /// Class references inside the chains resolve against the graph the
    /// declaration was added to.
    pub fn for_class(class: &Arc<ClassDeclaration>, root: Value) -> Result<Self> {
        let graph = class.graph()?;
        Ok(Self {
            target: Target::Class(Arc::clone(class)),
            root,
            keypath: Keypath::root(),
            ctx: ValidationContext::new(graph),
            state: SessionState::Pending,
        })
    }

    /// Opens a session validating a single value against `types`.
    pub fn for_chain(types: Types, value: Value, ctx: ValidationContext) -> Self {
        Self {
            target: Target::Chain(types),
            root: value,
            keypath: Keypath::root(),
            ctx,
            state: SessionState::Pending,
        }
    }

    /// Addresses messages below `keypath` instead of the root.
    #[must_use = "builder methods must be chained or built"]
    pub fn at(mut self, keypath: Keypath) -> Self {
        self.keypath = keypath;
        self
    }

    /// Marks the root object as new or existing for the persistence layer.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_new(mut self, is_new: bool) -> Self {
        self.ctx = self.ctx.with_new(is_new);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.ctx = self.ctx.with_options(options);
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Walks the root and returns the validated value.
    ///
    /// Data failures come back as [`Error::Validation`]; a class reference
    /// that cannot be resolved aborts the walk with
    /// [`Error::ClassNotFound`].
    pub fn run(mut self) -> Result<Value> {
        self.transition(SessionState::InProgress);

        let value = std::mem::take(&mut self.root);
        let submitted = value.clone();
        let outcome = match &self.target {
            Target::Class(class) => {
                walk_object(class, value, &self.keypath, &submitted, &mut self.ctx)
            }
            Target::Chain(types) => types.run(value, &self.keypath, &submitted, &mut self.ctx),
        };

        if let Some(fatal) = self.ctx.take_fatal() {
            self.transition(SessionState::Failed);
            return Err(fatal);
        }

        match outcome {
            Ok(value) => {
                self.transition(SessionState::Completed);
                Ok(value)
            }
            Err(rejection) => {
                self.transition(SessionState::Failed);
                tracing::debug!(
                    target_name = %self.target_name(),
                    messages = rejection.messages.len(),
                    "validation failed"
                );
                Err(ValidationError::new(rejection.messages, rejection.value).into())
            }
        }
    }

    fn transition(&mut self, next: SessionState) {
        tracing::trace!(from = ?self.state, to = ?next, "validation session state");
        self.state = next;
    }

    fn target_name(&self) -> &str {
        match &self.target {
            Target::Class(class) => class.name(),
            Target::Chain(_) => "<chain>",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphRegistry;
    use crate::types::types;
    use serde_json::json;

    fn context() -> ValidationContext {
        ValidationContext::new(GraphRegistry::new().graph("test"))
    }

    #[test]
    fn nesting_tracks_depth() {
        let mut ctx = context().with_options(ValidationOptions::default().with_max_depth(1));
        assert!(!ctx.depth_exhausted());
        let inner = ctx.nested(|ctx| (ctx.depth(), ctx.depth_exhausted()));
        assert_eq!(inner, (1, true));
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn only_first_abort_is_kept() {
        let mut ctx = context();
        ctx.abort(Error::GraphReleased { graph: "a".into() });
        ctx.abort(Error::GraphReleased { graph: "b".into() });
        assert_eq!(
            ctx.take_fatal(),
            Some(Error::GraphReleased { graph: "a".into() })
        );
    }

    #[test]
    fn chain_session_completes() {
        let session = ValidationSession::for_chain(types().int().min(1.0), json!(3), context());
        assert_eq!(session.state(), SessionState::Pending);
        assert_eq!(session.run().unwrap(), json!(3));
    }

    #[test]
    fn chain_session_addresses_messages_at_keypath() {
        let err = ValidationSession::for_chain(types().min(10.0), json!(5), context())
            .at(Keypath::root().key("age"))
            .run()
            .unwrap_err();
        let messages = err.keypath_messages().unwrap();
        assert_eq!(
            messages.get("age"),
            Some("Value '5' at 'age' should not be less than 10.")
        );
    }

    #[test]
    fn context_defaults_to_new_object() {
        let ctx = context();
        assert!(ctx.is_new());
        assert!(!ctx.with_new(false).is_new());
    }
}
