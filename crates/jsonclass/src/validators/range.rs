//! Numeric bound rules.
//!
//! Bounds only judge numbers. Absent values and values of other types pass,
//! so `types().min(0.0)` reads as "when a number is present, it is at least
//! zero".

crate::validator! {
    /// Rejects numbers below `min`.
    pub Min { min: f64 };
    rule(self, value) { value.as_f64().is_none_or(|n| n >= self.min) }
    message(self, value, keypath) {
        format!("Value '{value}' at '{keypath}' should not be less than {}.", self.min)
    }
    fn min(min: f64);
}

crate::validator! {
    /// Rejects numbers above `max`.
    pub Max { max: f64 };
    rule(self, value) { value.as_f64().is_none_or(|n| n <= self.max) }
    message(self, value, keypath) {
        format!("Value '{value}' at '{keypath}' should not be greater than {}.", self.max)
    }
    fn max(max: f64);
}

crate::validator! {
    /// Rejects numbers outside the inclusive range `min..=max`.
    pub Range { min: f64, max: f64 };
    rule(self, value) { value.as_f64().is_none_or(|n| n >= self.min && n <= self.max) }
    message(self, value, keypath) {
        format!(
            "Value '{value}' at '{keypath}' should be between {} and {}.",
            self.min, self.max
        )
    }
    fn range(min: f64, max: f64);
}
