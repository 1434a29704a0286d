//! Declaration-level and session-level options.
//!
//! Both structs deserialize with `#[serde(default)]`, so partial documents
//! (for example a `[classes.Order]` table in an application config file)
//! fill in the remaining options.

use serde::{Deserialize, Serialize};

/// Graph a declaration registers into unless told otherwise.
pub const DEFAULT_GRAPH: &str = "default";

/// Nesting depth a session descends before refusing to go further.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options attached to one class declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassConfig {
    /// Name of the graph the declaration registers into.
    pub graph: String,
    /// Derive camelCase wire names from snake_case storage names.
    pub camelize_json_keys: bool,
    /// Abstract classes cannot be instantiated.
    pub abstract_class: bool,
    /// Allow objects of this class to be reset to their persisted state.
    pub reset_all_fields: bool,
}

impl Default for ClassConfig {
    fn default() -> Self {
        Self {
            graph: DEFAULT_GRAPH.to_owned(),
            camelize_json_keys: true,
            abstract_class: false,
            reset_all_fields: false,
        }
    }
}

impl ClassConfig {
    /// Targets the named graph.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_graph(mut self, graph: impl Into<String>) -> Self {
        self.graph = graph.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_camelize_json_keys(mut self, camelize: bool) -> Self {
        self.camelize_json_keys = camelize;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_abstract_class(mut self, abstract_class: bool) -> Self {
        self.abstract_class = abstract_class;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_reset_all_fields(mut self, reset: bool) -> Self {
        self.reset_all_fields = reset;
        self
    }
}

/// Options for one validation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Maximum number of nested class instances below the root.
    pub max_depth: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ValidationOptions {
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
