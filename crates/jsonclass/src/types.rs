//! Fluent builder for validator chains.
//!
//! Every call appends one validator and hands back the extended chain, so a
//! declaration reads as the pipeline it runs:
//!
//! ```
//! use jsonclass::types;
//! use serde_json::json;
//!
//! let percent = types().required().float().min(0.0).max(100.0);
//! assert_eq!(percent.validate_value(json!(42)).unwrap(), json!(42.0));
//! assert!(percent.validate_value(json!(120)).is_err());
//! ```
//!
//! Order is evaluation order: later validators see the value as left by
//! earlier ones, and the first failing validator ends the chain.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::config::DEFAULT_GRAPH;
use crate::error::Result;
use crate::graph::GraphRegistry;
use crate::keypath::Keypath;
use crate::session::{ValidationContext, ValidationSession};
use crate::validator::{FieldKind, Outcome, Validator};
use crate::validators;

/// An ordered, immutable-once-built chain of validators.
///
/// Cloning is cheap; validators are shared behind `Arc`.
#[derive(Clone, Default)]
pub struct Types {
    validators: Vec<Arc<dyn Validator>>,
}

/// Starts an empty chain.
#[must_use]
pub fn types() -> Types {
    Types::new()
}

impl Types {
    /// An empty chain, which accepts every value unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Appends any validator.
    #[must_use]
    pub fn validator(self, validator: impl Validator + 'static) -> Self {
        self.shared(Arc::new(validator))
    }

    /// Appends a validator already shared with other chains.
    #[must_use]
    pub fn shared(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validators.push(validator);
        self
    }

    // ── presence ────────────────────────────────────────────────────────

    #[must_use]
    pub fn required(self) -> Self {
        self.validator(validators::required())
    }

    /// Substitutes `value` when the field is absent.
    #[must_use]
    pub fn default(self, value: Value) -> Self {
        self.validator(validators::default(value))
    }

    // ── primitive types ─────────────────────────────────────────────────

    #[must_use]
    pub fn str(self) -> Self {
        self.validator(validators::str())
    }

    #[must_use]
    pub fn int(self) -> Self {
        self.validator(validators::int())
    }

    /// Accepts any number, coercing integers to floats.
    #[must_use]
    pub fn float(self) -> Self {
        self.validator(validators::float())
    }

    #[must_use]
    pub fn bool(self) -> Self {
        self.validator(validators::bool())
    }

    // ── bounds ──────────────────────────────────────────────────────────

    #[must_use]
    pub fn min(self, min: f64) -> Self {
        self.validator(validators::min(min))
    }

    #[must_use]
    pub fn max(self, max: f64) -> Self {
        self.validator(validators::max(max))
    }

    #[must_use]
    pub fn range(self, min: f64, max: f64) -> Self {
        self.validator(validators::range(min, max))
    }

    #[must_use]
    pub fn min_length(self, min: usize) -> Self {
        self.validator(validators::min_length(min))
    }

    #[must_use]
    pub fn max_length(self, max: usize) -> Self {
        self.validator(validators::max_length(max))
    }

    #[must_use]
    pub fn length(self, min: usize, max: usize) -> Self {
        self.validator(validators::length(min, max))
    }

    // ── format ──────────────────────────────────────────────────────────

    #[must_use]
    pub fn pattern(self, regex: Regex) -> Self {
        self.validator(validators::pattern(regex))
    }

    #[must_use]
    pub fn one_of(self, allowed: impl IntoIterator<Item = Value>) -> Self {
        self.validator(validators::one_of(allowed))
    }

    // ── transforms ──────────────────────────────────────────────────────

    #[must_use]
    pub fn trim(self) -> Self {
        self.validator(validators::trim())
    }

    #[must_use]
    pub fn to_lower(self) -> Self {
        self.validator(validators::to_lower())
    }

    #[must_use]
    pub fn to_upper(self) -> Self {
        self.validator(validators::to_upper())
    }

    /// Replaces the value with `f(value)`.
    #[must_use]
    pub fn transform<F>(self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.validator(validators::transform(f))
    }

    /// Runs a custom predicate over the value and the session root.
    #[must_use]
    pub fn check<F>(self, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> std::result::Result<(), String> + Send + Sync + 'static,
    {
        self.validator(validators::check(f))
    }

    // ── structure ───────────────────────────────────────────────────────

    /// Validates the value as an instance of the class named `class`,
    /// resolved when the chain runs.
    #[must_use]
    pub fn instanceof(self, class: impl Into<String>) -> Self {
        self.validator(validators::instanceof(class))
    }

    /// Validates every list element with `inner`.
    #[must_use]
    pub fn listof(self, inner: Types) -> Self {
        self.validator(validators::listof(inner))
    }

    /// Validates every value of a string-keyed object with `inner`.
    #[must_use]
    pub fn dictof(self, inner: Types) -> Self {
        self.validator(validators::dictof(inner))
    }

    // ── markers ─────────────────────────────────────────────────────────

    /// Declares the field unique among persisted objects.
    #[must_use]
    pub fn unique(self) -> Self {
        self.validator(validators::unique())
    }

    // ── introspection ───────────────────────────────────────────────────

    pub fn validators(&self) -> &[Arc<dyn Validator>] {
        &self.validators
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// The structure established by the last structural validator.
    pub fn kind(&self) -> FieldKind {
        self.validators
            .iter()
            .rev()
            .find_map(|v| v.kind())
            .unwrap_or_default()
    }

    pub fn is_unique(&self) -> bool {
        self.validators.iter().any(|v| v.marks_unique())
    }

    // ── execution ───────────────────────────────────────────────────────

    /// Runs the chain in order, stopping at the first rejection.
    pub fn run(
        &self,
        value: Value,
        keypath: &Keypath,
        root: &Value,
        ctx: &mut ValidationContext,
    ) -> Outcome {
        self.validators
            .iter()
            .try_fold(value, |value, validator| {
                validator.validate(value, keypath, root, ctx)
            })
    }

    /// Validates a standalone value, resolving class references against
    /// the process-wide `"default"` graph.
    pub fn validate_value(&self, value: Value) -> Result<Value> {
        let graph = GraphRegistry::global().graph(DEFAULT_GRAPH);
        self.validate_value_in(value, ValidationContext::new(graph))
    }

    /// Validates a standalone value with an explicit context.
    pub fn validate_value_in(&self, value: Value, ctx: ValidationContext) -> Result<Value> {
        ValidationSession::for_chain(self.clone(), value, ctx).run()
    }
}

impl Validator for Types {
    fn validate(
        &self,
        value: Value,
        keypath: &Keypath,
        root: &Value,
        ctx: &mut ValidationContext,
    ) -> Outcome {
        self.run(value, keypath, root, ctx)
    }

    fn kind(&self) -> Option<FieldKind> {
        match Types::kind(self) {
            FieldKind::Any => None,
            kind => Some(kind),
        }
    }

    fn marks_unique(&self) -> bool {
        self.is_unique()
    }
}

impl fmt::Debug for Types {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.validators).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    fn messages(result: Result<Value>) -> Vec<(String, String)> {
        match result {
            Err(Error::Validation(e)) => e.keypath_messages.into_iter().collect(),
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn empty_chain_passes_everything() {
        assert_eq!(types().validate_value(json!("x")).unwrap(), json!("x"));
        assert!(types().is_empty());
    }

    #[test]
    fn each_call_appends_one_validator() {
        let chain = types().required().min(0.0).max(100.0);
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn base_chain_is_reusable() {
        let base = types().int();
        let bounded = base.clone().min(0.0);
        assert_eq!(base.len(), 1);
        assert_eq!(bounded.len(), 2);
    }

    #[test]
    fn required_short_circuits_the_chain() {
        let result = types().required().min(0.0).validate_value(Value::Null);
        assert_eq!(
            messages(result),
            vec![(String::new(), "Value at '' should not be None.".to_owned())]
        );
    }

    #[test]
    fn later_validators_see_transformed_value() {
        let chain = types().trim().min_length(3);
        assert!(chain.validate_value(json!("  ab  ")).is_err());
        assert_eq!(chain.validate_value(json!(" abc ")).unwrap(), json!("abc"));
    }

    #[test]
    fn order_changes_observable_output() {
        let default_then_required = types().default(json!(1)).required();
        let required_then_default = types().required().default(json!(1));

        assert_eq!(
            default_then_required.validate_value(Value::Null).unwrap(),
            json!(1)
        );
        assert!(required_then_default.validate_value(Value::Null).is_err());
    }

    #[test]
    fn kind_comes_from_structural_validator() {
        assert_eq!(types().str().kind(), FieldKind::Any);
        assert_eq!(
            types().listof(types().instanceof("Item")).kind(),
            FieldKind::List(Box::new(FieldKind::Instance("Item".into())))
        );
    }

    #[test]
    fn unique_marker_is_visible() {
        assert!(types().str().unique().is_unique());
        assert!(!types().str().is_unique());
    }
}
