//! Length bound rules for strings (counted in chars) and lists.

use serde_json::Value;

fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

crate::validator! {
    /// Rejects strings or lists shorter than `min`.
    pub MinLength { min: usize };
    rule(self, value) { length_of(value).is_none_or(|len| len >= self.min) }
    message(self, value, keypath) {
        format!("Length of value '{value}' at '{keypath}' should not be less than {}.", self.min)
    }
    fn min_length(min: usize);
}

crate::validator! {
    /// Rejects strings or lists longer than `max`.
    pub MaxLength { max: usize };
    rule(self, value) { length_of(value).is_none_or(|len| len <= self.max) }
    message(self, value, keypath) {
        format!("Length of value '{value}' at '{keypath}' should not be greater than {}.", self.max)
    }
    fn max_length(max: usize);
}

crate::validator! {
    /// Rejects strings or lists whose length falls outside `min..=max`.
    pub Length { min: usize, max: usize };
    rule(self, value) { length_of(value).is_none_or(|len| len >= self.min && len <= self.max) }
    message(self, value, keypath) {
        format!(
            "Length of value '{value}' at '{keypath}' should be between {} and {}.",
            self.min, self.max
        )
    }
    fn length(min: usize, max: usize);
}
