//! Built-in checkers for the default rule types

pub mod custom;
pub mod kinds;
pub mod multiple;
pub mod numeric;
pub mod pattern;

pub use custom::FnChecker;
pub use kinds::{ArrayChecker, BooleanChecker, ObjectChecker, StringChecker};
pub use multiple::MultipleChecker;
pub use numeric::{numeric_value, IntChecker, NumberChecker};
pub use pattern::PatternChecker;
