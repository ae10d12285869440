//! Rule registry - maps rule type names to checkers

use crate::config::ValidatorConfig;
use crate::error::RuleError;
use crate::rules::{MULTIPLE, OBJECT, REG};
use crate::traits::Checker;
use crate::validators::{
    ArrayChecker, BooleanChecker, IntChecker, MultipleChecker, NumberChecker, ObjectChecker,
    PatternChecker, StringChecker,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Registry of checkers, keyed by rule type name
#[derive(Clone, Default)]
pub struct RuleRegistry {
    checkers: BTreeMap<String, Arc<dyn Checker>>,
}

impl RuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            checkers: BTreeMap::new(),
        }
    }

    /// Create a registry seeded with the built-in rules
    pub fn with_builtins(config: &ValidatorConfig) -> Self {
        let mut registry = Self::new();
        registry.insert("number", Arc::new(NumberChecker));
        registry.insert("int", Arc::new(IntChecker));
        registry.insert("string", Arc::new(StringChecker));
        registry.insert("boolean", Arc::new(BooleanChecker));
        registry.insert("array", Arc::new(ArrayChecker));
        registry.insert(MULTIPLE, Arc::new(MultipleChecker));

        if config.extended_rules {
            registry.insert(REG, Arc::new(PatternChecker));
            registry.insert(OBJECT, Arc::new(ObjectChecker));
        }

        debug!(rules = registry.len(), "seeded built-in rules");
        registry
    }

    /// Register a checker, replacing any previous one under the same name
    pub fn register(&mut self, name: &str, checker: Arc<dyn Checker>) -> Result<(), RuleError> {
        if name.is_empty() {
            return Err(RuleError::InvalidRuleName);
        }

        if self.checkers.contains_key(name) {
            debug!(rule = name, "overwriting registered rule");
        } else {
            debug!(rule = name, checker = checker.rule_name(), "registering rule");
        }
        self.insert(name, checker);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Checker>> {
        self.checkers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.checkers.contains_key(name)
    }

    /// Registered rule names, sorted
    pub fn names(&self) -> Vec<String> {
        self.checkers.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }

    fn insert(&mut self, name: &str, checker: Arc<dyn Checker>) {
        self.checkers.insert(name.to_string(), checker);
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}
