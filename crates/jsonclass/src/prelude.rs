//! Prelude module for convenient imports.
//!
//! ```
//! use jsonclass::prelude::*;
//!
//! let chain = types().required().str().trim();
//! assert_eq!(chain.len(), 3);
//! ```

// ============================================================================
// DECLARATIONS
// ============================================================================

pub use crate::class::{ClassDeclaration, ClassDeclarationBuilder, ClassOrigin};
pub use crate::config::{ClassConfig, ValidationOptions};
pub use crate::field::FieldDescriptor;
pub use crate::graph::{ClassGraph, GraphRegistry};

// ============================================================================
// CHAINS AND RULES
// ============================================================================

pub use crate::types::{Types, types};
pub use crate::validator::{FieldKind, Outcome, Rejection, Validator};

// ============================================================================
// SESSIONS AND RESULTS
// ============================================================================

pub use crate::error::{Error, ValidationError};
pub use crate::keypath::{Keypath, KeypathMessages};
pub use crate::object::JsonObject;
pub use crate::session::{SessionState, ValidationContext, ValidationSession};
