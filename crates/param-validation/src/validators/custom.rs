//! Custom checkers built from functions and closures

use crate::rules::RuleDeclaration;
use crate::traits::{CheckContext, CheckResult, Checker};
use serde_json::Value;
use std::sync::Arc;

/// Type alias for checker functions that see the whole check context
pub type CheckFn = Arc<dyn Fn(&CheckContext<'_>, Option<&Value>) -> CheckResult + Send + Sync>;

/// Checker backed by a user-supplied function
#[derive(Clone)]
pub struct FnChecker {
    check_fn: CheckFn,
}

impl FnChecker {
    /// Wrap a function of the rule value and the candidate value
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&RuleDeclaration, Option<&Value>) -> CheckResult + Send + Sync + 'static,
    {
        Self::with_context(move |ctx, value| check(ctx.rule, value))
    }

    /// Wrap a function that also needs the registry or configuration
    pub fn with_context<F>(check: F) -> Self
    where
        F: Fn(&CheckContext<'_>, Option<&Value>) -> CheckResult + Send + Sync + 'static,
    {
        Self {
            check_fn: Arc::new(check),
        }
    }
}

impl std::fmt::Debug for FnChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnChecker").finish_non_exhaustive()
    }
}

impl Checker for FnChecker {
    fn check(&self, ctx: &CheckContext<'_>, value: Option<&Value>) -> CheckResult {
        (self.check_fn)(ctx, value)
    }
}
