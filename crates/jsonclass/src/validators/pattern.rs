//! Format rules: regular expressions and enumerations.

use regex::Regex;
use serde_json::Value;

use crate::validator::display_value;

crate::validator! {
    /// Rejects strings that do not match `regex`.
    pub Pattern { regex: Regex };
    rule(self, value) { value.as_str().is_none_or(|s| self.regex.is_match(s)) }
    message(self, value, keypath) {
        format!(
            "Value '{value}' at '{keypath}' should match pattern '{}'.",
            self.regex.as_str()
        )
    }
    fn pattern(regex: Regex);
}

crate::validator! {
    /// Rejects values not equal to one of `allowed`.
    pub OneOf { allowed: Vec<Value> };
    rule(self, value) { value.is_null() || self.allowed.contains(value) }
    message(self, value, keypath) {
        let allowed: Vec<String> = self.allowed.iter().map(display_value).collect();
        format!(
            "Value '{value}' at '{keypath}' should be one of {}.",
            allowed.join(", ")
        )
    }
    new(allowed: impl IntoIterator<Item = Value>) {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }
    fn one_of(allowed: impl IntoIterator<Item = Value>);
}
