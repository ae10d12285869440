//! Pattern-based rule using regular expressions

use crate::traits::{CheckContext, CheckResult, Checker};
use serde_json::Value;
use std::borrow::Cow;

/// `reg`: value must match the declared pattern somewhere.
///
/// Numbers and booleans are matched against their JSON text; other
/// non-string values never match. A `reg` rule with no compiled pattern
/// fails with the generic message.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternChecker;

impl Checker for PatternChecker {
    fn check(&self, ctx: &CheckContext<'_>, value: Option<&Value>) -> CheckResult {
        let Some(pattern) = ctx.rule.as_pattern() else {
            return CheckResult::Invalid;
        };

        let text: Option<Cow<'_, str>> = match value {
            Some(Value::String(s)) => Some(Cow::Borrowed(s.as_str())),
            Some(v @ (Value::Number(_) | Value::Bool(_))) => Some(Cow::Owned(v.to_string())),
            _ => None,
        };

        match text {
            Some(text) if pattern.is_match(&text) => CheckResult::Valid,
            _ => CheckResult::message(format!("should match {}", pattern.as_str())),
        }
    }

    fn rule_name(&self) -> &'static str {
        "reg"
    }
}
