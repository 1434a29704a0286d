//! Field descriptors: the static metadata of one declared attribute.

use crate::types::Types;

/// One declared attribute of a class.
///
/// A field has up to three names:
///
/// - `name`: the storage name, used for object data and keypaths;
/// - `json_name`: the wire name used by instantiation and serialization;
/// - `db_name`: the column or document key used by persistence.
///
/// Unset wire names are derived from the storage name when the declaration
/// is built (see [`ClassConfig::camelize_json_keys`](crate::config::ClassConfig::camelize_json_keys)).
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: String,
    json_name: Option<String>,
    db_name: Option<String>,
    types: Types,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, types: Types) -> Self {
        Self {
            name: name.into(),
            json_name: None,
            db_name: None,
            types,
        }
    }

    /// Overrides the wire name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_json_name(mut self, json_name: impl Into<String>) -> Self {
        self.json_name = Some(json_name.into());
        self
    }

    /// Sets a dedicated persistence name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_db_name(mut self, db_name: impl Into<String>) -> Self {
        self.db_name = Some(db_name.into());
        self
    }

    /// Storage name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wire name, falling back to the storage name.
    pub fn json_name(&self) -> &str {
        self.json_name.as_deref().unwrap_or(&self.name)
    }

    pub fn db_name(&self) -> Option<&str> {
        self.db_name.as_deref()
    }

    /// Key used by persistence: db name, then wire name, then storage name.
    pub fn persistence_name(&self) -> &str {
        self.db_name.as_deref().unwrap_or_else(|| self.json_name())
    }

    pub fn types(&self) -> &Types {
        &self.types
    }

    pub fn is_unique(&self) -> bool {
        self.types.is_unique()
    }

    /// Fills in a missing wire name from the storage name.
    pub(crate) fn resolve_json_name(mut self, camelize_keys: bool) -> Self {
        if self.json_name.is_none() && camelize_keys {
            self.json_name = Some(camelize(&self.name));
        }
        self
    }
}

/// Converts a snake_case name to lowerCamelCase.
///
/// Leading underscores are kept; runs of inner underscores collapse.
///
/// ```
/// use jsonclass::field::camelize;
///
/// assert_eq!(camelize("created_at"), "createdAt");
/// assert_eq!(camelize("_private_key"), "_privateKey");
/// assert_eq!(camelize("id"), "id");
/// ```
pub fn camelize(name: &str) -> String {
    let body = name.trim_start_matches('_');
    let mut out = String::with_capacity(name.len());
    out.push_str(&name[..name.len() - body.len()]);

    let mut upper_next = false;
    for (i, c) in body.chars().enumerate() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else if i == 0 {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::types;
    use rstest::rstest;

    #[rstest]
    #[case("name", "name")]
    #[case("first_name", "firstName")]
    #[case("created_at_utc", "createdAtUtc")]
    #[case("_id", "_id")]
    #[case("__meta_data", "__metaData")]
    #[case("double__gap", "doubleGap")]
    #[case("Already", "already")]
    #[case("", "")]
    fn camelizes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(camelize(input), expected);
    }

    #[test]
    fn persistence_name_precedence() {
        let field = FieldDescriptor::new("user_id", types());
        assert_eq!(field.persistence_name(), "user_id");

        let field = field.with_json_name("userId");
        assert_eq!(field.persistence_name(), "userId");

        let field = field.with_db_name("uid");
        assert_eq!(field.persistence_name(), "uid");
        assert_eq!(field.json_name(), "userId");
        assert_eq!(field.name(), "user_id");
    }

    #[test]
    fn explicit_json_name_survives_camelize() {
        let field = FieldDescriptor::new("user_id", types())
            .with_json_name("UID")
            .resolve_json_name(true);
        assert_eq!(field.json_name(), "UID");
    }

    #[test]
    fn wire_name_defaults_to_storage_name_without_camelize() {
        let field = FieldDescriptor::new("user_id", types()).resolve_json_name(false);
        assert_eq!(field.json_name(), "user_id");
    }

    #[test]
    fn unique_comes_from_chain() {
        assert!(FieldDescriptor::new("email", types().str().unique()).is_unique());
    }
}
