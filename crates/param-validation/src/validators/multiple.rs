//! The `multiple` rule: value must satisfy at least one named rule

use crate::traits::{CheckContext, CheckResult, Checker};
use serde_json::Value;

/// Runs each inner rule by name, with no constraints.
///
/// Inner rules are bare type names only; `["number", "string"]` cannot say
/// "number with min 0". A name missing from the registry counts as a
/// rejection here; the engine refuses such declarations before checking.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultipleChecker;

impl Checker for MultipleChecker {
    fn check(&self, ctx: &CheckContext<'_>, value: Option<&Value>) -> CheckResult {
        let names = ctx.rule.type_names().unwrap_or_default();

        let accepted = names.iter().any(|name| match ctx.check_named(name, value) {
            Some(result) => result
                .message_for(name, ctx.config.legacy_undefined_pass)
                .is_none(),
            None => false,
        });

        if accepted {
            CheckResult::Valid
        } else {
            CheckResult::message(format!("should be one of [{}]", names.join(",")))
        }
    }

    fn rule_name(&self) -> &'static str {
        "multiple"
    }
}
