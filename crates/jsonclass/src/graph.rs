//! Class graphs: named namespaces mapping class names to declarations.
//!
//! A [`GraphRegistry`] hands out graphs by name, creating them on first
//! use. The process-wide registry behind [`graph`] and
//! [`GraphRegistry::global`] is what [`ClassDeclarationBuilder::register`]
//! targets; tests and embedders that need isolation create their own with
//! [`GraphRegistry::new`].
//!
//! [`ClassDeclarationBuilder::register`]: crate::class::ClassDeclarationBuilder::register

use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::class::ClassDeclaration;
use crate::error::{ClassNotFoundError, ClassRedefinitionError};

static GLOBAL_REGISTRY: LazyLock<GraphRegistry> = LazyLock::new(GraphRegistry::new);

/// Returns the named graph of the process-wide registry.
pub fn graph(name: &str) -> Arc<ClassGraph> {
    GraphRegistry::global().graph(name)
}

// ============================================================================
// GRAPH
// ============================================================================

/// A namespace holding at most one declaration per class name.
///
/// Lookups run concurrently; [`add`](Self::add) checks and inserts under
/// the entry lock, so two racing registrations of one name cannot both
/// succeed.
#[derive(Debug)]
pub struct ClassGraph {
    name: String,
    classes: DashMap<String, Arc<ClassDeclaration>>,
}

impl ClassGraph {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: DashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds `class` under its name and returns it for chaining.
    ///
    /// Adding the same declaration again is a no-op.
    ///
    /// # Errors
    ///
    /// [`ClassRedefinitionError`] if a different declaration already holds
    /// the name. The registered declaration stays in place.
    pub fn add(
        self: &Arc<Self>,
        class: Arc<ClassDeclaration>,
    ) -> Result<Arc<ClassDeclaration>, ClassRedefinitionError> {
        match self.classes.entry(class.name().to_owned()) {
            Entry::Occupied(entry) => {
                let existing = entry.get();
                if Arc::ptr_eq(existing, &class) {
                    return Ok(class);
                }
                tracing::warn!(
                    class = %class.name(),
                    graph = %self.name,
                    existing = %existing.origin(),
                    "rejected class redefinition"
                );
                Err(ClassRedefinitionError {
                    name: class.name().to_owned(),
                    graph: self.name.clone(),
                    existing_origin: existing.origin(),
                    new_origin: class.origin(),
                })
            }
            Entry::Vacant(entry) => {
                class.attach(self);
                entry.insert(Arc::clone(&class));
                tracing::debug!(
                    class = %class.name(),
                    graph = %self.name,
                    fields = class.fields().len(),
                    "registered class"
                );
                Ok(class)
            }
        }
    }

    /// Looks up a declaration by class name.
    pub fn get(&self, name: &str) -> Result<Arc<ClassDeclaration>, ClassNotFoundError> {
        self.classes
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| ClassNotFoundError {
                class_name: name.to_owned(),
                graph_name: self.name.clone(),
            })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Registered class names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classes.iter().map(|e| e.key().clone()).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Graphs keyed by name, created lazily.
#[derive(Debug, Default)]
pub struct GraphRegistry {
    graphs: DashMap<String, Arc<ClassGraph>>,
}

impl GraphRegistry {
    /// An empty registry, isolated from the process-wide one.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graphs: DashMap::new(),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static Self {
        &GLOBAL_REGISTRY
    }

    /// Returns the named graph, creating it on first access.
    pub fn graph(&self, name: &str) -> Arc<ClassGraph> {
        if let Some(graph) = self.graphs.get(name) {
            return Arc::clone(graph.value());
        }
        let entry = self.graphs.entry(name.to_owned()).or_insert_with(|| {
            tracing::trace!(graph = %name, "created class graph");
            Arc::new(ClassGraph::new(name))
        });
        Arc::clone(entry.value())
    }

    /// Names of the graphs created so far, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.graphs.iter().map(|e| e.key().clone()).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::types;
    use std::thread;

    #[test]
    fn graph_is_created_once() {
        let registry = GraphRegistry::new();
        let a = registry.graph("default");
        let b = registry.graph("default");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.names(), ["default"]);
    }

    #[test]
    fn add_then_get() {
        let graph = Arc::new(ClassGraph::new("g"));
        let class = ClassDeclaration::builder("User").build();
        let added = graph.add(Arc::clone(&class)).unwrap();
        assert!(Arc::ptr_eq(&added, &class));
        assert!(Arc::ptr_eq(&graph.get("User").unwrap(), &class));
        assert!(Arc::ptr_eq(&class.graph().unwrap(), &graph));
    }

    #[test]
    fn readding_same_declaration_is_idempotent() {
        let graph = Arc::new(ClassGraph::new("g"));
        let class = ClassDeclaration::builder("User").build();
        graph.add(Arc::clone(&class)).unwrap();
        graph.add(Arc::clone(&class)).unwrap();
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn different_declaration_same_name_conflicts() {
        let graph = Arc::new(ClassGraph::new("g"));
        let first = ClassDeclaration::builder("User").build();
        let second = ClassDeclaration::builder("User")
            .field("email", types().str())
            .build();
        graph.add(Arc::clone(&first)).unwrap();

        let err = graph.add(Arc::clone(&second)).unwrap_err();
        assert_eq!(err.name, "User");
        assert_eq!(err.graph, "g");
        assert_eq!(err.existing_origin, first.origin());
        assert_eq!(err.new_origin, second.origin());
        assert!(Arc::ptr_eq(&graph.get("User").unwrap(), &first));
    }

    #[test]
    fn missing_class_names_graph() {
        let graph = ClassGraph::new("billing");
        let err = graph.get("Invoice").unwrap_err();
        assert_eq!(
            Error::from(err).to_string(),
            "JSON Class with name 'Invoice' in graph 'billing' is not found."
        );
    }

    #[test]
    fn names_are_sorted() {
        let graph = Arc::new(ClassGraph::new("g"));
        for name in ["b", "c", "a"] {
            graph.add(ClassDeclaration::builder(name).build()).unwrap();
        }
        assert_eq!(graph.names(), ["a", "b", "c"]);
        assert!(graph.contains("a"));
        assert!(!graph.contains("z"));
    }

    #[test]
    fn concurrent_registration_admits_one_winner() {
        let graph = Arc::new(ClassGraph::new("g"));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let graph = Arc::clone(&graph);
                thread::spawn(move || graph.add(ClassDeclaration::builder("Race").build()).is_ok())
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(winners, 1);
        assert_eq!(graph.len(), 1);
    }
}
