//! Core checker trait and the tri-state check result

use crate::config::ValidatorConfig;
use crate::registry::RuleRegistry;
use crate::rules::RuleDeclaration;
use serde_json::Value;

/// Message a legacy checker returns to mean "treat as pass"
pub const LEGACY_PASS_MESSAGE: &str = "undefined";

/// Verdict of a single checker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    /// Value satisfies the rule
    Valid,
    /// Value fails; the engine reports `should be a {type}`
    Invalid,
    /// Value fails with this exact message
    InvalidWithMessage(String),
}

impl CheckResult {
    pub fn from_bool(valid: bool) -> Self {
        if valid {
            Self::Valid
        } else {
            Self::Invalid
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self::InvalidWithMessage(message.into())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Error message this result produces for `rule_type`, `None` on pass.
    ///
    /// With `legacy_undefined_pass` set, an explicit `"undefined"` message
    /// counts as a pass.
    pub fn message_for(&self, rule_type: &str, legacy_undefined_pass: bool) -> Option<String> {
        match self {
            Self::Valid => None,
            Self::Invalid => Some(format!("should be a {}", rule_type)),
            Self::InvalidWithMessage(message)
                if legacy_undefined_pass && message == LEGACY_PASS_MESSAGE =>
            {
                None
            }
            Self::InvalidWithMessage(message) => Some(message.clone()),
        }
    }
}

impl From<bool> for CheckResult {
    fn from(valid: bool) -> Self {
        Self::from_bool(valid)
    }
}

impl From<Option<String>> for CheckResult {
    fn from(message: Option<String>) -> Self {
        message.map_or(Self::Valid, Self::InvalidWithMessage)
    }
}

/// What a checker sees besides the candidate value
#[derive(Clone, Copy)]
pub struct CheckContext<'a> {
    /// The normalized rule value (constraints, inner names, pattern)
    pub rule: &'a RuleDeclaration,
    /// Registry of the validator running the check
    pub registry: &'a RuleRegistry,
    pub config: &'a ValidatorConfig,
}

impl<'a> CheckContext<'a> {
    pub fn new(rule: &'a RuleDeclaration, registry: &'a RuleRegistry, config: &'a ValidatorConfig) -> Self {
        Self {
            rule,
            registry,
            config,
        }
    }

    /// Run the sibling checker registered as `name` with no constraints.
    ///
    /// Returns `None` when no such checker exists.
    pub fn check_named(&self, name: &str, value: Option<&Value>) -> Option<CheckResult> {
        let checker = self.registry.get(name)?;
        let rule = RuleDeclaration::Type(name.to_string());
        let ctx = CheckContext::new(&rule, self.registry, self.config);
        Some(checker.check(&ctx, value))
    }
}

impl std::fmt::Debug for CheckContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckContext")
            .field("rule", self.rule)
            .field("registered_rules", &self.registry.len())
            .finish()
    }
}

/// A rule checker. Implementations must be pure: same input, same verdict.
pub trait Checker: Send + Sync {
    /// Inspect `value` (`None` when the field is missing) against the rule
    fn check(&self, ctx: &CheckContext<'_>, value: Option<&Value>) -> CheckResult;

    /// Name of the checker implementation, for diagnostics
    fn rule_name(&self) -> &'static str {
        "custom"
    }
}
