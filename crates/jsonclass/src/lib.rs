//! # jsonclass
//!
//! Declarative classes for JSON-shaped data: named declarations grouped in
//! isolated graphs, fields carrying composable validator chains, and
//! validation sessions that report every violation by keypath.
//!
//! ## Quick Start
//!
//! ```
//! use jsonclass::prelude::*;
//! use serde_json::json;
//!
//! let registry = GraphRegistry::new();
//!
//! ClassDeclaration::builder("Item")
//!     .field("price", types().required().min(0.0))
//!     .register_in(&registry)
//!     .unwrap();
//!
//! let order = ClassDeclaration::builder("Order")
//!     .field("total", types().required().min(0.0))
//!     .field("items", types().listof(types().instanceof("Item")))
//!     .register_in(&registry)
//!     .unwrap();
//!
//! let err = order
//!     .validate(json!({ "total": -5, "items": [{ "price": -1 }, { "price": 10 }] }))
//!     .unwrap_err();
//! let messages = err.keypath_messages().unwrap();
//! assert_eq!(messages.keypaths().collect::<Vec<_>>(), ["total", "items.0.price"]);
//! ```
//!
//! ## Building blocks
//!
//! - [`Types`](types::Types): the fluent chain builder started by [`types()`].
//! - [`Validator`](validator::Validator): the contract every rule
//!   implements; declare check-only rules with [`validator!`].
//! - [`ClassDeclaration`](class::ClassDeclaration) and
//!   [`FieldDescriptor`](field::FieldDescriptor): declared shapes.
//! - [`GraphRegistry`](graph::GraphRegistry) and
//!   [`ClassGraph`](graph::ClassGraph): one declaration per name per graph.
//! - [`ValidationSession`](session::ValidationSession): one walk of a root
//!   value, aggregating messages into
//!   [`KeypathMessages`](keypath::KeypathMessages).
//! - [`JsonObject`](object::JsonObject): instances with wire-name
//!   (de)serialization and reset.

// Error carries a full ValidationError including the transformed root;
// boxing it would add an allocation to every failed session.
#![allow(clippy::result_large_err)]

pub mod class;
pub mod config;
pub mod error;
pub mod field;
pub mod graph;
pub mod keypath;
mod macros;
pub mod object;
pub mod prelude;
pub mod session;
pub mod types;
pub mod validator;
pub mod validators;

pub use error::{Error, Result};
pub use graph::graph;
pub use serde_json::Value;
pub use types::{Types, types};
