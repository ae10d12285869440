//! Rules that only check the kind of a value

use crate::traits::{CheckContext, CheckResult, Checker};
use serde_json::Value;

/// `string`: value is a JSON string
#[derive(Debug, Clone, Copy, Default)]
pub struct StringChecker;

impl Checker for StringChecker {
    fn check(&self, _ctx: &CheckContext<'_>, value: Option<&Value>) -> CheckResult {
        CheckResult::from_bool(matches!(value, Some(Value::String(_))))
    }

    fn rule_name(&self) -> &'static str {
        "string"
    }
}

/// `boolean`: value is a JSON boolean
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanChecker;

impl Checker for BooleanChecker {
    fn check(&self, _ctx: &CheckContext<'_>, value: Option<&Value>) -> CheckResult {
        CheckResult::from_bool(matches!(value, Some(Value::Bool(_))))
    }

    fn rule_name(&self) -> &'static str {
        "boolean"
    }
}

/// `array`: value is a JSON array
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayChecker;

impl Checker for ArrayChecker {
    fn check(&self, _ctx: &CheckContext<'_>, value: Option<&Value>) -> CheckResult {
        CheckResult::from_bool(matches!(value, Some(Value::Array(_))))
    }

    fn rule_name(&self) -> &'static str {
        "array"
    }
}

/// `object`: value is a JSON object
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectChecker;

impl Checker for ObjectChecker {
    fn check(&self, _ctx: &CheckContext<'_>, value: Option<&Value>) -> CheckResult {
        CheckResult::from_bool(matches!(value, Some(Value::Object(_))))
    }

    fn rule_name(&self) -> &'static str {
        "object"
    }
}
