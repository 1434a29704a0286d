//! Instances of class declarations.
//!
//! A [`JsonObject`] keeps its data keyed by storage name. Wire names only
//! appear at the edges: [`JsonObject::instantiate`] accepts them and
//! [`JsonObject::to_json`] emits them.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::class::ClassDeclaration;
use crate::error::{AbstractClassError, Error, ResetError, Result, ValidationError};
use crate::graph::ClassGraph;
use crate::keypath::KeypathMessages;
use crate::session::ValidationSession;
use crate::validator::FieldKind;

/// One object of a declared class.
#[derive(Debug, Clone)]
pub struct JsonObject {
    class: Arc<ClassDeclaration>,
    data: Map<String, Value>,
    is_new: bool,
    persisted: Option<Map<String, Value>>,
}

impl JsonObject {
    /// An object with every declared field absent.
    pub fn new(class: &Arc<ClassDeclaration>) -> Result<Self> {
        Self::instantiate(class, Value::Object(Map::new()))
    }

    /// Builds an object from input keyed by wire names.
    ///
    /// Storage names are accepted too; when both are present the wire name
    /// wins. Keys that match no field are dropped. Nested instances, lists
    /// and dicts of instances are re-keyed the same way.
    ///
    /// # Errors
    ///
    /// - [`Error::AbstractClass`] if this class or a nested one is abstract.
    /// - [`Error::ClassNotFound`] if a nested class name cannot be resolved.
    /// - [`Error::Validation`] if `input` is not an object.
    pub fn instantiate(class: &Arc<ClassDeclaration>, input: Value) -> Result<Self> {
        if class.is_abstract() {
            return Err(abstract_error(class));
        }
        let graph = class.graph()?;
        let input = match input {
            Value::Object(map) => map,
            other => {
                let message = format!("Value at '' should be instance of '{}'.", class.name());
                return Err(
                    ValidationError::new(KeypathMessages::single("", message), other).into(),
                );
            }
        };
        let data = rekey_object(class, &graph, input, Direction::ToStorage)?;
        tracing::trace!(class = %class.name(), "instantiated object");
        Ok(Self {
            class: Arc::clone(class),
            data,
            is_new: true,
            persisted: None,
        })
    }

    pub fn class(&self) -> &Arc<ClassDeclaration> {
        &self.class
    }

    /// Field data keyed by storage name.
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Value of a field by storage name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// Replaces a field by storage name and returns the previous value.
    pub fn set(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.data.insert(field.into(), value)
    }

    /// Whether the object has never been persisted.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Validates the object in place.
    ///
    /// Transforms are written back whether or not validation passes.
    pub fn validate(&mut self) -> Result<()> {
        let session = ValidationSession::for_class(&self.class, Value::Object(self.data.clone()))?
            .with_new(self.is_new);
        match session.run() {
            Ok(Value::Object(data)) => {
                self.data = data;
                Ok(())
            }
            Ok(_) => Ok(()),
            Err(Error::Validation(e)) => {
                if let Value::Object(data) = &e.root {
                    self.data = data.clone();
                }
                Err(Error::Validation(e))
            }
            Err(e) => Err(e),
        }
    }

    /// Serializes the object with wire names.
    pub fn to_json(&self) -> Result<Value> {
        let graph = self.class.graph()?;
        rekey_object(&self.class, &graph, self.data.clone(), Direction::ToWire).map(Value::Object)
    }

    /// Records the current data as persisted state.
    pub fn mark_persisted(&mut self) {
        self.is_new = false;
        self.persisted = Some(self.data.clone());
    }

    /// Restores the data recorded by the last
    /// [`mark_persisted`](Self::mark_persisted).
    ///
    /// # Errors
    ///
    /// [`ResetError::ObjectIsNew`] for objects never persisted,
    /// [`ResetError::NotEnabled`] when the class does not enable
    /// `reset_all_fields`.
    pub fn reset(&mut self) -> Result<()> {
        let Some(persisted) = self.persisted.as_ref().filter(|_| !self.is_new) else {
            return Err(ResetError::ObjectIsNew.into());
        };
        if !self.class.config().reset_all_fields {
            return Err(ResetError::NotEnabled.into());
        }
        self.data = persisted.clone();
        Ok(())
    }
}

fn abstract_error(class: &ClassDeclaration) -> Error {
    AbstractClassError {
        class_name: class.name().to_owned(),
    }
    .into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    ToStorage,
    ToWire,
}

fn rekey_object(
    class: &ClassDeclaration,
    graph: &ClassGraph,
    mut input: Map<String, Value>,
    direction: Direction,
) -> Result<Map<String, Value>> {
    if direction == Direction::ToStorage && class.is_abstract() {
        return Err(abstract_error(class));
    }

    let mut out = Map::with_capacity(class.fields().len());
    for field in class.fields() {
        let (from, to) = match direction {
            Direction::ToStorage => (field.json_name(), field.name()),
            Direction::ToWire => (field.name(), field.json_name()),
        };
        let value = input
            .remove(from)
            .or_else(|| input.remove(to))
            .unwrap_or(Value::Null);
        let value = rekey_value(&field.types().kind(), value, graph, direction)?;
        out.insert(to.to_owned(), value);
    }
    Ok(out)
}

fn rekey_value(
    kind: &FieldKind,
    value: Value,
    graph: &ClassGraph,
    direction: Direction,
) -> Result<Value> {
    match (kind, value) {
        (FieldKind::Instance(name), Value::Object(map)) => {
            let class = graph.get(name)?;
            rekey_object(&class, graph, map, direction).map(Value::Object)
        }
        (FieldKind::List(inner), Value::Array(items)) => items
            .into_iter()
            .map(|item| rekey_value(inner, item, graph, direction))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        (FieldKind::Dict(inner), Value::Object(map)) => map
            .into_iter()
            .map(|(key, item)| Ok((key, rekey_value(inner, item, graph, direction)?)))
            .collect::<Result<Map<_, _>>>()
            .map(Value::Object),
        (_, value) => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphRegistry;
    use crate::types::types;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn declare(registry: &GraphRegistry) -> Arc<ClassDeclaration> {
        ClassDeclaration::builder("Author")
            .field("first_name", types().required().str().trim())
            .field("tags", types().listof(types().str()))
            .reset_all_fields()
            .register_in(registry)
            .unwrap()
    }

    #[test]
    fn instantiate_accepts_wire_and_storage_names() {
        let registry = GraphRegistry::new();
        let author = declare(&registry);

        let wire = author.instantiate(json!({ "firstName": "Ann" })).unwrap();
        let storage = author.instantiate(json!({ "first_name": "Ann" })).unwrap();
        assert_eq!(wire.get("first_name"), Some(&json!("Ann")));
        assert_eq!(storage.data(), wire.data());
        assert_eq!(wire.get("tags"), Some(&Value::Null));
    }

    #[test]
    fn instantiate_drops_unknown_keys() {
        let registry = GraphRegistry::new();
        let author = declare(&registry);
        let object = author.instantiate(json!({ "nickname": "A" })).unwrap();
        assert!(object.get("nickname").is_none());
    }

    #[test]
    fn instantiate_rejects_non_object() {
        let registry = GraphRegistry::new();
        let author = declare(&registry);
        let err = author.instantiate(json!([1])).unwrap_err();
        assert_eq!(
            err.keypath_messages().unwrap().get(""),
            Some("Value at '' should be instance of 'Author'.")
        );
    }

    #[test]
    fn validate_writes_transforms_back_on_failure() {
        let registry = GraphRegistry::new();
        let author = declare(&registry);
        let mut object = author
            .instantiate(json!({ "firstName": "  Ann ", "tags": [1] }))
            .unwrap();

        let err = object.validate().unwrap_err();
        assert_eq!(
            err.keypath_messages().unwrap().keypaths().collect::<Vec<_>>(),
            ["tags.0"]
        );
        assert_eq!(object.get("first_name"), Some(&json!("Ann")));
    }

    #[test]
    fn to_json_uses_wire_names() {
        let registry = GraphRegistry::new();
        let author = declare(&registry);
        let object = author.instantiate(json!({ "firstName": "Ann" })).unwrap();
        assert_eq!(
            object.to_json().unwrap(),
            json!({ "firstName": "Ann", "tags": null })
        );
    }

    #[test]
    fn reset_restores_persisted_state() {
        let registry = GraphRegistry::new();
        let author = declare(&registry);
        let mut object = author.instantiate(json!({ "firstName": "Ann" })).unwrap();

        assert_eq!(object.reset(), Err(Error::Reset(ResetError::ObjectIsNew)));

        object.mark_persisted();
        assert!(!object.is_new());
        object.set("first_name", json!("Bob"));
        object.reset().unwrap();
        assert_eq!(object.get("first_name"), Some(&json!("Ann")));
    }

    #[test]
    fn reset_requires_opt_in() {
        let registry = GraphRegistry::new();
        let plain = ClassDeclaration::builder("Plain")
            .field("a", types())
            .register_in(&registry)
            .unwrap();
        let mut object = plain.instantiate(json!({})).unwrap();
        object.mark_persisted();
        assert_eq!(object.reset(), Err(Error::Reset(ResetError::NotEnabled)));
    }

    #[test]
    fn abstract_class_cannot_be_instantiated() {
        let registry = GraphRegistry::new();
        let base = ClassDeclaration::builder("Base")
            .abstract_class()
            .register_in(&registry)
            .unwrap();
        let err = JsonObject::new(&base).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Base is an abstract class and should not be initialized"
        );
        assert!(err.is_conflict());
    }
}
