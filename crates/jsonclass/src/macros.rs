//! Macros for declaring check-only validators with minimal boilerplate.
//!
//! - [`validator!`]: struct, [`Validator`](crate::validator::Validator)
//!   impl and factory fn
//!
//! A check-only validator never transforms its value: the `rule` block
//! decides pass/fail and the `message` block builds the text recorded at the
//! value's keypath on failure.
//!
//! ```
//! use jsonclass::validator;
//!
//! validator! {
//!     /// Rejects the empty string.
//!     pub NonEmpty;
//!     rule(value) { value.as_str().is_none_or(|s| !s.is_empty()) }
//!     message(value, keypath) { format!("Value at '{keypath}' should not be empty.") }
//!     fn non_empty();
//! }
//!
//! validator! {
//!     /// Rejects numbers that are not multiples of `step`.
//!     pub MultipleOf { step: i64 };
//!     rule(self, value) { value.as_i64().is_none_or(|n| n % self.step == 0) }
//!     message(self, value, keypath) {
//!         format!("Value '{value}' at '{keypath}' should be a multiple of {}.", self.step)
//!     }
//!     fn multiple_of(step: i64);
//! }
//!
//! let chain = jsonclass::types().validator(multiple_of(5)).validator(non_empty());
//! assert!(chain.validate_value(serde_json::json!(10)).is_ok());
//! ```

/// Declares a check-only validator: struct definition, `Validator`
/// implementation, constructor and factory function.
///
/// `#[derive(Debug, Clone)]` is always applied.
///
/// # Variants
///
/// **Unit validator** (zero-sized, no fields):
/// ```rust,ignore
/// validator! {
///     pub Required;
///     rule(value) { !value.is_null() }
///     message(value, keypath) { format!("Value at '{keypath}' should not be None.") }
///     fn required();
/// }
/// ```
///
/// **Struct with fields** (auto `new` from all fields):
/// ```rust,ignore
/// validator! {
///     pub Min { min: f64 };
///     rule(self, value) { value.as_f64().is_none_or(|n| n >= self.min) }
///     message(self, value, keypath) { format!("... {}", self.min) }
///     fn min(min: f64);
/// }
/// ```
///
/// **Custom constructor** (overrides auto `new`):
/// ```rust,ignore
/// validator! {
///     pub OneOf { allowed: Vec<Value> };
///     rule(self, value) { value.is_null() || self.allowed.contains(value) }
///     message(self, value, keypath) { ... }
///     new(allowed: impl IntoIterator<Item = Value>) { Self { allowed: allowed.into_iter().collect() } }
///     fn one_of(allowed: impl IntoIterator<Item = Value>);
/// }
/// ```
#[macro_export]
macro_rules! validator {
    // ── Internal: Validator impl shared by the struct variants ───────────
    (@impl $name:ident; rule($self_:ident, $inp:ident) $rule:block message($self2:ident, $minp:ident, $kp:ident) $msg:block) => {
        impl $crate::validator::Validator for $name {
            #[allow(unused_variables)]
            fn validate(
                &$self_,
                value: $crate::Value,
                keypath: &$crate::keypath::Keypath,
                _root: &$crate::Value,
                _ctx: &mut $crate::session::ValidationContext,
            ) -> $crate::validator::Outcome {
                let passed = {
                    let $inp = &value;
                    $rule
                };
                if passed {
                    return Ok(value);
                }
                let message: ::std::string::String = {
                    let $minp = $crate::validator::display_value(&value);
                    let $kp = keypath;
                    $msg
                };
                Err($crate::validator::Rejection::at(keypath, message, value))
            }
        }
    };

    // ── Variant 1: Unit validator (no fields) + factory fn ───────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident;
        rule($inp:ident) $rule:block
        message($minp:ident, $kp:ident) $msg:block
        fn $factory:ident();
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::validator::Validator for $name {
            #[allow(unused_variables)]
            fn validate(
                &self,
                value: $crate::Value,
                keypath: &$crate::keypath::Keypath,
                _root: &$crate::Value,
                _ctx: &mut $crate::session::ValidationContext,
            ) -> $crate::validator::Outcome {
                let passed = {
                    let $inp = &value;
                    $rule
                };
                if passed {
                    return Ok(value);
                }
                let message: ::std::string::String = {
                    let $minp = $crate::validator::display_value(&value);
                    let $kp = keypath;
                    $msg
                };
                Err($crate::validator::Rejection::at(keypath, message, value))
            }
        }

        #[must_use]
        $vis const fn $factory() -> $name {
            $name
        }
    };

    // ── Variant 2: Struct with fields + custom new + factory fn ──────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? };
        rule($self_:ident, $inp:ident) $rule:block
        message($self2:ident, $minp:ident, $kp:ident) $msg:block
        new($($narg:ident: $naty:ty),* $(,)?) $new_body:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            #[must_use]
            pub fn new($($narg: $naty),*) -> Self $new_body
        }

        $crate::validator!(@impl $name; rule($self_, $inp) $rule message($self2, $minp, $kp) $msg);

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    // ── Variant 3: Struct with fields + auto new + factory fn ────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? };
        rule($self_:ident, $inp:ident) $rule:block
        message($self2:ident, $minp:ident, $kp:ident) $msg:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            #[must_use]
            pub fn new($($field: $fty),+) -> Self {
                Self { $($field),+ }
            }
        }

        $crate::validator!(@impl $name; rule($self_, $inp) $rule message($self2, $minp, $kp) $msg);

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };
}
