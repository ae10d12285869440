//! # param-validation
//!
//! Declarative parameter validation: map field names to rules, map field
//! names to values, get back an ordered list of field errors (or nothing).
//!
//! ```
//! use param_validation::Validator;
//! use serde_json::json;
//!
//! let validator = Validator::new();
//! let errors = validator
//!     .validate(
//!         &json!({ "age": { "type": "number", "min": 0, "max": 120 } }),
//!         &json!({ "age": 150 }),
//!     )
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(errors.get("age").unwrap().error, "should smaller than 120");
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod request;
pub mod rules;
pub mod traits;
pub mod validator;
pub mod validators;

// Re-exports for easy access
pub use config::ValidatorConfig;
pub use error::{FieldError, FieldErrors, RuleError, ValidationFailed};
pub use registry::RuleRegistry;
pub use request::{RequestError, RequestMethod, RequestParams};
pub use rules::{NormalizedRule, RuleDeclaration, RuleSet};
pub use traits::{CheckContext, CheckResult, Checker};
pub use validator::Validator;

// Built-in checkers
pub use validators::{
    ArrayChecker, BooleanChecker, FnChecker, IntChecker, MultipleChecker, NumberChecker,
    ObjectChecker, PatternChecker, StringChecker,
};
