//! Numeric rules: `number` and `int`

use crate::rules::RuleDeclaration;
use crate::traits::{CheckContext, CheckResult, Checker};
use serde_json::Value;

/// Numeric reading of a candidate value.
///
/// JSON numbers and strings holding a finite number (query parameters
/// arrive as strings) are numeric; everything else, including a missing
/// value, is not.
pub fn numeric_value(value: Option<&Value>) -> Option<f64> {
    let num = match value? {
        Value::Number(num) => num.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    num.is_finite().then_some(num)
}

/// Format a bound the way it was most likely written: `120`, not `120.0`
fn format_bound(bound: f64) -> String {
    if bound.fract() == 0.0 && bound.abs() < 1e15 {
        format!("{}", bound as i64)
    } else {
        format!("{}", bound)
    }
}

/// Apply the optional `max` then `min` constraints of `rule` to `num`.
///
/// Constraints that are not themselves numeric are ignored.
fn check_bounds(rule: &RuleDeclaration, num: f64) -> CheckResult {
    if let Some(max) = numeric_value(rule.constraint("max")) {
        if num > max {
            return CheckResult::message(format!("should smaller than {}", format_bound(max)));
        }
    }

    if let Some(min) = numeric_value(rule.constraint("min")) {
        if num < min {
            return CheckResult::message(format!("should bigger than {}", format_bound(min)));
        }
    }

    CheckResult::Valid
}

/// `number`: any numeric value within the optional `min`/`max` bounds
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberChecker;

impl Checker for NumberChecker {
    fn check(&self, ctx: &CheckContext<'_>, value: Option<&Value>) -> CheckResult {
        match numeric_value(value) {
            Some(num) => check_bounds(ctx.rule, num),
            None => CheckResult::Invalid,
        }
    }

    fn rule_name(&self) -> &'static str {
        "number"
    }
}

/// `int`: a numeric value with no fractional part, within bounds
#[derive(Debug, Clone, Copy, Default)]
pub struct IntChecker;

impl Checker for IntChecker {
    fn check(&self, ctx: &CheckContext<'_>, value: Option<&Value>) -> CheckResult {
        match numeric_value(value) {
            Some(num) if num.fract() == 0.0 => check_bounds(ctx.rule, num),
            _ => CheckResult::message("should be an integer"),
        }
    }

    fn rule_name(&self) -> &'static str {
        "int"
    }
}
