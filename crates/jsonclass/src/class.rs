//! Class declarations and their builder.

use std::fmt;
use std::panic::Location;
use std::sync::{Arc, OnceLock, Weak};

use serde_json::Value;

use crate::config::ClassConfig;
use crate::error::{ClassNotFoundError, Error, Result};
use crate::field::FieldDescriptor;
use crate::graph::{ClassGraph, GraphRegistry};
use crate::object::JsonObject;
use crate::session::ValidationSession;
use crate::types::Types;

/// Source location where a class was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassOrigin {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl ClassOrigin {
    /// The location of the caller.
    #[track_caller]
    #[must_use]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for ClassOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

// ============================================================================
// DECLARATION
// ============================================================================

/// One declared data shape: a name, ordered fields and options.
///
/// Declarations are immutable once built and shared as
/// `Arc<ClassDeclaration>`. The graph a declaration is added to is held
/// weakly; the graph owns the declaration, not the other way round.
#[derive(Debug)]
pub struct ClassDeclaration {
    name: String,
    config: ClassConfig,
    fields: Vec<FieldDescriptor>,
    origin: ClassOrigin,
    graph: OnceLock<Weak<ClassGraph>>,
}

impl ClassDeclaration {
    /// Starts a declaration named `name`, recording the call site as its
    /// origin.
    #[track_caller]
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ClassDeclarationBuilder {
        ClassDeclarationBuilder {
            name: name.into(),
            config: ClassConfig::default(),
            fields: Vec::new(),
            origin: ClassOrigin::caller(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &ClassConfig {
        &self.config
    }

    pub fn origin(&self) -> ClassOrigin {
        self.origin
    }

    pub fn is_abstract(&self) -> bool {
        self.config.abstract_class
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Looks up a field by storage name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Looks up a field by wire name.
    pub fn field_by_json_name(&self, json_name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.json_name() == json_name)
    }

    /// `(storage name, wire name)` pairs in declaration order.
    pub fn wire_names(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|f| (f.name(), f.json_name()))
    }

    /// The graph this declaration was added to.
    ///
    /// # Errors
    ///
    /// [`Error::ClassNotFound`] if the declaration was never added to a
    /// graph, [`Error::GraphReleased`] if that graph has been dropped.
    pub fn graph(&self) -> Result<Arc<ClassGraph>> {
        let Some(graph) = self.graph.get() else {
            return Err(ClassNotFoundError {
                class_name: self.name.clone(),
                graph_name: self.config.graph.clone(),
            }
            .into());
        };
        graph.upgrade().ok_or_else(|| Error::GraphReleased {
            graph: self.config.graph.clone(),
        })
    }

    /// Records the owning graph. The first graph wins.
    pub(crate) fn attach(&self, graph: &Arc<ClassGraph>) {
        if self.graph.set(Arc::downgrade(graph)).is_err() {
            tracing::trace!(
                class = %self.name,
                graph = %graph.name(),
                "declaration already attached to a graph"
            );
        }
    }

    /// Validates `value` as an instance of this class and returns it with
    /// every transform applied.
    pub fn validate(self: &Arc<Self>, value: Value) -> Result<Value> {
        ValidationSession::for_class(self, value)?.run()
    }

    /// Builds an object of this class from wire-keyed (or storage-keyed)
    /// input.
    pub fn instantiate(self: &Arc<Self>, input: Value) -> Result<JsonObject> {
        JsonObject::instantiate(self, input)
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder returned by [`ClassDeclaration::builder`].
#[derive(Debug)]
pub struct ClassDeclarationBuilder {
    name: String,
    config: ClassConfig,
    fields: Vec<FieldDescriptor>,
    origin: ClassOrigin,
}

impl ClassDeclarationBuilder {
    /// Declares a field. Redeclaring a name replaces the earlier field in
    /// place.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(self, name: impl Into<String>, types: Types) -> Self {
        self.field_with(FieldDescriptor::new(name, types))
    }

    /// Declares a fully described field.
    #[must_use = "builder methods must be chained or built"]
    pub fn field_with(mut self, field: FieldDescriptor) -> Self {
        match self.fields.iter_mut().find(|f| f.name() == field.name()) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn config(mut self, config: ClassConfig) -> Self {
        self.config = config;
        self
    }

    /// Targets the named graph instead of `"default"`.
    #[must_use = "builder methods must be chained or built"]
    pub fn graph(mut self, graph: impl Into<String>) -> Self {
        self.config.graph = graph.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn abstract_class(mut self) -> Self {
        self.config.abstract_class = true;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn reset_all_fields(mut self) -> Self {
        self.config.reset_all_fields = true;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn camelize_json_keys(mut self, camelize: bool) -> Self {
        self.config.camelize_json_keys = camelize;
        self
    }

    /// Finishes the declaration without registering it.
    #[must_use]
    pub fn build(self) -> Arc<ClassDeclaration> {
        let camelize = self.config.camelize_json_keys;
        Arc::new(ClassDeclaration {
            name: self.name,
            fields: self
                .fields
                .into_iter()
                .map(|f| f.resolve_json_name(camelize))
                .collect(),
            config: self.config,
            origin: self.origin,
            graph: OnceLock::new(),
        })
    }

    /// Builds and adds the declaration to its graph in the process-wide
    /// registry.
    pub fn register(self) -> Result<Arc<ClassDeclaration>> {
        self.register_in(GraphRegistry::global())
    }

    /// Builds and adds the declaration to its graph in `registry`.
    ///
    /// # Errors
    ///
    /// [`Error::Redefinition`] if the graph already holds a different
    /// class with the same name.
    pub fn register_in(self, registry: &GraphRegistry) -> Result<Arc<ClassDeclaration>> {
        let graph = registry.graph(&self.config.graph);
        Ok(graph.add(self.build())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::types;
    use serde_json::json;

    #[test]
    fn origin_points_at_builder_call() {
        let line = line!() + 1;
        let class = ClassDeclaration::builder("A").build();
        assert_eq!(class.origin().file, file!());
        assert_eq!(class.origin().line, line);
    }

    #[test]
    fn redeclared_field_replaces_in_place() {
        let class = ClassDeclaration::builder("A")
            .field("a", types().str())
            .field("b", types())
            .field("a", types().int())
            .build();
        let names: Vec<_> = class.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(class.field("a").unwrap().types().len(), 1);
    }

    #[test]
    fn wire_names_follow_config() {
        let camel = ClassDeclaration::builder("A")
            .field("created_at", types())
            .build();
        let plain = ClassDeclaration::builder("B")
            .camelize_json_keys(false)
            .field("created_at", types())
            .build();

        assert_eq!(camel.wire_names().collect::<Vec<_>>(), [("created_at", "createdAt")]);
        assert_eq!(plain.wire_names().collect::<Vec<_>>(), [("created_at", "created_at")]);
        assert!(camel.field_by_json_name("createdAt").is_some());
    }

    #[test]
    fn unattached_declaration_has_no_graph() {
        let class = ClassDeclaration::builder("Loose").build();
        let err = class.graph().unwrap_err();
        assert!(matches!(err, Error::ClassNotFound(ref e) if e.class_name == "Loose"));
        assert!(class.validate(json!({})).is_err());
    }

    #[test]
    fn dropped_registry_releases_graph() {
        let registry = GraphRegistry::new();
        let class = ClassDeclaration::builder("A").register_in(&registry).unwrap();
        drop(registry);
        assert_eq!(
            class.graph().unwrap_err(),
            Error::GraphReleased {
                graph: "default".into()
            }
        );
    }

    #[test]
    fn builder_options_reach_config() {
        let class = ClassDeclaration::builder("A")
            .graph("billing")
            .abstract_class()
            .reset_all_fields()
            .build();
        assert_eq!(class.config().graph, "billing");
        assert!(class.is_abstract());
        assert!(class.config().reset_all_fields);
    }
}
