//! The validation engine

use crate::config::ValidatorConfig;
use crate::error::{FieldErrors, RuleError};
use crate::registry::RuleRegistry;
use crate::rules::{NormalizedRule, RuleDeclaration, RuleSet, MULTIPLE};
use crate::traits::{CheckContext, CheckResult, Checker};
use crate::validators::FnChecker;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, debug_span, trace, warn};

/// Evaluates field rules against candidate data.
///
/// Build it once, register custom rules with [`Validator::add_rule`], then
/// share it (e.g. behind an `Arc`) for concurrent validation. Registration
/// takes `&mut self`, so the registry cannot change while it is shared.
#[derive(Debug, Clone)]
pub struct Validator {
    registry: RuleRegistry,
    config: ValidatorConfig,
}

/// A field whose rule has been normalized and resolved to a checker
struct ResolvedRule<'a> {
    field: &'a str,
    rule: NormalizedRule<'a>,
    checker: &'a Arc<dyn Checker>,
}

impl Validator {
    /// Create a validator with the default rules and configuration
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            registry: RuleRegistry::with_builtins(&config),
            config,
        }
    }

    /// Create a validator configured from the process environment
    pub fn from_env() -> Result<Self, RuleError> {
        Ok(Self::with_config(ValidatorConfig::from_env()?))
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Register or overwrite the checker for rule type `name`
    pub fn add_rule<C>(&mut self, name: &str, checker: C) -> Result<(), RuleError>
    where
        C: Checker + 'static,
    {
        self.registry.register(name, Arc::new(checker))
    }

    /// Register a closure of `(rule value, candidate value)` as rule type `name`
    pub fn add_rule_fn<F>(&mut self, name: &str, check: F) -> Result<(), RuleError>
    where
        F: Fn(&RuleDeclaration, Option<&Value>) -> CheckResult + Send + Sync + 'static,
    {
        self.add_rule(name, FnChecker::new(check))
    }

    /// Validate `data` against a JSON object of field rules.
    ///
    /// Returns `Ok(None)` when every field passes and `Ok(Some(errors))`
    /// otherwise. Malformed rules are an `Err`, reported before any field
    /// is checked. Non-object `data` is treated as an empty mapping.
    pub fn validate(&self, rules: &Value, data: &Value) -> Result<Option<FieldErrors>, RuleError> {
        let rules = RuleSet::from_value(rules)?;
        let empty = Map::new();
        let data = data.as_object().unwrap_or(&empty);
        self.validate_rules(&rules, data)
    }

    /// Validate `data` against an already-built [`RuleSet`]
    pub fn validate_rules(
        &self,
        rules: &RuleSet,
        data: &Map<String, Value>,
    ) -> Result<Option<FieldErrors>, RuleError> {
        let _span = debug_span!("validate", fields = rules.len()).entered();

        let resolved = rules
            .iter()
            .map(|(field, declaration)| self.resolve(field, declaration))
            .collect::<Result<Vec<_>, _>>()?;

        let mut errors = FieldErrors::new();
        for ResolvedRule {
            field,
            rule,
            checker,
        } in resolved
        {
            let value = data.get(field);
            let ctx = CheckContext::new(rule.value, &self.registry, &self.config);
            let result = checker.check(&ctx, value);
            trace!(field, rule_type = %rule.rule_type, ?result, "checked field");

            if let Some(message) = self.interpret(&rule, result) {
                errors.push(field, message);
            }
        }

        debug!(errors = errors.len(), "validation finished");
        Ok(errors.into_option())
    }

    /// Normalize a declaration and find its checker, failing fast on unknown types
    fn resolve<'a>(
        &'a self,
        field: &'a str,
        declaration: &'a RuleDeclaration,
    ) -> Result<ResolvedRule<'a>, RuleError> {
        let rule = declaration.normalize();
        if !declaration.is_recognized() {
            return Err(self.unknown_rule_type(&rule.rule_type));
        }
        let checker = self.lookup(&rule.rule_type)?;

        if rule.rule_type == MULTIPLE {
            for name in declaration.type_names().unwrap_or_default() {
                self.lookup(name)?;
            }
        }

        Ok(ResolvedRule {
            field,
            rule,
            checker,
        })
    }

    fn lookup(&self, rule_type: &str) -> Result<&Arc<dyn Checker>, RuleError> {
        self.registry
            .get(rule_type)
            .ok_or_else(|| self.unknown_rule_type(rule_type))
    }

    fn unknown_rule_type(&self, rule_type: &str) -> RuleError {
        warn!(rule_type, "unknown rule type");
        RuleError::UnknownRuleType {
            found: rule_type.to_string(),
            known: self.registry.names(),
        }
    }

    /// Turn a check result into an error message, if it is a failure.
    ///
    /// `multiple` explains itself, so only explicit messages are reported
    /// for it; no generic `should be a multiple` is ever produced.
    fn interpret(&self, rule: &NormalizedRule<'_>, result: CheckResult) -> Option<String> {
        if rule.rule_type == MULTIPLE {
            return match result {
                CheckResult::InvalidWithMessage(message) => Some(message),
                _ => None,
            };
        }
        result.message_for(&rule.rule_type, self.config.legacy_undefined_pass)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn messages(errors: Option<FieldErrors>) -> Vec<(String, String)> {
        errors
            .map(|errors| errors.into_iter().map(|e| (e.field, e.error)).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_valid_data_returns_none() {
        let validator = Validator::new();
        let result = validator
            .validate(
                &json!({
                    "name": "string",
                    "age": { "type": "int", "min": 0 },
                    "admin": "boolean",
                    "tags": "array",
                    "score": "number"
                }),
                &json!({
                    "name": "Ada",
                    "age": 36,
                    "admin": false,
                    "tags": ["x"],
                    "score": 9.5
                }),
            )
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_generic_and_specific_messages() {
        let validator = Validator::new();
        let errors = validator
            .validate(
                &json!({ "name": "string", "age": "int", "tags": "array" }),
                &json!({ "name": 1, "age": 1.5, "tags": "a,b" }),
            )
            .unwrap();

        assert_eq!(
            messages(errors),
            vec![
                ("name".to_string(), "should be a string".to_string()),
                ("age".to_string(), "should be an integer".to_string()),
                ("tags".to_string(), "should be a array".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_field_reaches_checker() {
        let validator = Validator::new();
        let errors = validator.validate(&json!({ "n": "number" }), &json!({})).unwrap();
        assert_eq!(messages(errors), vec![("n".to_string(), "should be a number".to_string())]);
    }

    #[test]
    fn test_multiple_reports_only_its_own_message() {
        let validator = Validator::new();
        let rules = json!({ "tag": ["string", "number"] });

        let errors = validator.validate(&rules, &json!({ "tag": true })).unwrap();
        assert_eq!(
            messages(errors),
            vec![("tag".to_string(), "should be one of [string,number]".to_string())]
        );
        assert!(validator.validate(&rules, &json!({ "tag": "ok" })).unwrap().is_none());
    }

    #[test]
    fn test_unknown_rule_type_aborts() {
        let validator = Validator::new();
        let result = validator.validate(
            &json!({ "ok": "string", "mail": "email" }),
            &json!({ "ok": 1, "mail": "a@b.c" }),
        );

        match result {
            Err(RuleError::UnknownRuleType { found, known }) => {
                assert_eq!(found, "email");
                assert_eq!(known, validator.registry().names());
            }
            other => panic!("expected UnknownRuleType, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_inner_multiple_type_aborts() {
        let validator = Validator::new();
        let result = validator.validate(&json!({ "tag": ["string", "uuid"] }), &json!({ "tag": "x" }));
        assert!(matches!(result, Err(RuleError::UnknownRuleType { found, .. }) if found == "uuid"));
    }

    #[test]
    fn test_unrecognized_declarations_abort() {
        let validator = Validator::new();
        for rule in [json!(42), json!(null), json!(true), json!(["string", 1]), json!({ "type": 7 })] {
            let result = validator.validate(&json!({ "x": rule }), &json!({ "x": 1 }));
            assert!(matches!(result, Err(RuleError::UnknownRuleType { .. })));
        }
    }

    #[test]
    fn test_unrecognized_declarations_ignore_lookalike_rule_names() {
        let mut validator = Validator::new();
        validator.add_rule_fn("null", |_, _| CheckResult::Valid).unwrap();
        validator.add_rule_fn("42", |_, _| CheckResult::Valid).unwrap();

        let result = validator.validate(&json!({ "x": null, "y": 42 }), &json!({}));
        match result {
            Err(RuleError::UnknownRuleType { found, known }) => {
                assert_eq!(found, "null");
                assert!(known.contains(&"null".to_string()));
            }
            other => panic!("expected UnknownRuleType, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_object_rule_needs_object_checker() {
        let validator = Validator::new();
        let result = validator.validate(&json!({ "meta": { "min": 1 } }), &json!({ "meta": {} }));
        assert!(matches!(result, Err(RuleError::UnknownRuleType { found, .. }) if found == "object"));

        let validator = Validator::with_config(ValidatorConfig::extended());
        let result = validator.validate(&json!({ "meta": { "min": 1 } }), &json!({ "meta": {} }));
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_non_object_data_means_all_missing() {
        let validator = Validator::new();
        let errors = validator.validate(&json!({ "s": "string" }), &json!("not a map")).unwrap();
        assert_eq!(messages(errors), vec![("s".to_string(), "should be a string".to_string())]);
    }

    #[test]
    fn test_add_rule_fn() {
        let mut validator = Validator::new();
        validator
            .add_rule_fn("even", |_rule, value| {
                match value.and_then(Value::as_i64) {
                    Some(n) if n % 2 == 0 => CheckResult::Valid,
                    Some(_) => CheckResult::message("should be even"),
                    None => CheckResult::Invalid,
                }
            })
            .unwrap();

        let rules = json!({ "a": "even", "b": "even", "c": "even" });
        let errors = validator
            .validate(&rules, &json!({ "a": 2, "b": 3, "c": "x" }))
            .unwrap();
        assert_eq!(
            messages(errors),
            vec![
                ("b".to_string(), "should be even".to_string()),
                ("c".to_string(), "should be a even".to_string()),
            ]
        );
    }

    #[test]
    fn test_legacy_undefined_pass() {
        let undefined = |_: &RuleDeclaration, _: Option<&Value>| CheckResult::message("undefined");

        let mut strict = Validator::new();
        strict.add_rule_fn("legacy", undefined).unwrap();
        let errors = strict.validate(&json!({ "x": "legacy" }), &json!({})).unwrap();
        assert_eq!(messages(errors), vec![("x".to_string(), "undefined".to_string())]);

        let mut legacy = Validator::with_config(ValidatorConfig::default().with_legacy_undefined_pass(true));
        legacy.add_rule_fn("legacy", undefined).unwrap();
        assert!(legacy.validate(&json!({ "x": "legacy" }), &json!({})).unwrap().is_none());
    }
}
