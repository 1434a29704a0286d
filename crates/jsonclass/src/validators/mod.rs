//! Built-in validators.
//!
//! - **Presence**: [`Required`], [`DefaultValue`]
//! - **Primitive types**: [`Str`], [`Int`], [`Float`], [`Bool`]
//! - **Bounds**: [`Min`], [`Max`], [`Range`], [`MinLength`], [`MaxLength`], [`Length`]
//! - **Format**: [`Pattern`], [`OneOf`]
//! - **Transforms**: [`Trim`], [`ToLower`], [`ToUpper`], [`Transform`]
//! - **Custom**: [`Check`]
//! - **Structure**: [`InstanceOf`], [`ListOf`], [`DictOf`]
//! - **Markers**: [`Unique`]
//!
//! Apart from [`Required`] and [`Check`], every rule treats `null` as valid:
//! absence is the presence rules' concern. Bound and format rules likewise
//! pass values they cannot judge (a length bound on a number, a pattern on
//! a bool); enforcing the type is the primitive rules' concern.

pub mod collection;
pub mod custom;
pub mod length;
pub mod nested;
pub mod pattern;
pub mod presence;
pub mod primitive;
pub mod range;
pub mod transform;
pub mod unique;

pub use collection::{DictOf, ListOf, dictof, listof};
pub use custom::{Check, check};
pub use length::{Length, MaxLength, MinLength, length, max_length, min_length};
pub use nested::{InstanceOf, instanceof};
pub use pattern::{OneOf, Pattern, one_of, pattern};
pub use presence::{DefaultValue, Required, default, required};
pub use primitive::{Bool, Float, Int, Str, bool, float, int, str};
pub use range::{Max, Min, Range, max, min, range};
pub use transform::{ToLower, ToUpper, Transform, Trim, to_lower, to_upper, transform, trim};
pub use unique::{Unique, unique};
