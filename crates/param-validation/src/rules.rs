//! Rule declarations, normalization and ordered rule sets

use crate::error::RuleError;
use regex::Regex;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Rule type selected by a list of type names
pub const MULTIPLE: &str = "multiple";
/// Rule type selected by a pattern declaration
pub const REG: &str = "reg";
/// Rule type selected by a plain object without a `type` key
pub const OBJECT: &str = "object";

/// A caller-supplied rule, in one of its surface shapes
#[derive(Debug, Clone)]
pub enum RuleDeclaration {
    /// Bare type name, e.g. `"string"`
    Type(String),
    /// Value must satisfy at least one of these named rules
    OneOf(Vec<String>),
    /// Value must match this pattern
    Pattern(Regex),
    /// Structured rule carrying constraints such as `min`/`max`
    Object(Map<String, Value>),
    /// Anything else; always rejected as an unknown rule type
    Unrecognized(Value),
}

/// Canonical `{type, value}` form consumed by the engine
#[derive(Debug, Clone)]
pub struct NormalizedRule<'a> {
    pub rule_type: Cow<'a, str>,
    pub value: &'a RuleDeclaration,
}

impl RuleDeclaration {
    /// Parse the declarative JSON form of a rule.
    ///
    /// Objects of type `reg` carrying a `pattern` string are compiled into
    /// [`RuleDeclaration::Pattern`] here, so a bad pattern is reported as a
    /// configuration error before any data is looked at.
    pub fn from_value(value: &Value) -> Result<Self, RuleError> {
        let declaration = match value {
            Value::String(name) => Self::Type(name.clone()),
            Value::Array(items) => {
                let names: Option<Vec<String>> = items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect();
                match names {
                    Some(names) => Self::OneOf(names),
                    None => Self::Unrecognized(value.clone()),
                }
            }
            Value::Object(map) => {
                let is_reg = map.get("type").and_then(Value::as_str) == Some(REG);
                match map.get("pattern").and_then(Value::as_str) {
                    Some(pattern) if is_reg => Self::pattern(pattern)?,
                    _ => Self::Object(map.clone()),
                }
            }
            other => Self::Unrecognized(other.clone()),
        };
        Ok(declaration)
    }

    /// Compile a pattern rule
    pub fn pattern(pattern: &str) -> Result<Self, RuleError> {
        Ok(Self::Pattern(Regex::new(pattern)?))
    }

    /// Normalize into the canonical `{type, value}` pair
    pub fn normalize(&self) -> NormalizedRule<'_> {
        let rule_type = match self {
            Self::Type(name) => Cow::Borrowed(name.as_str()),
            Self::OneOf(_) => Cow::Borrowed(MULTIPLE),
            Self::Pattern(_) => Cow::Borrowed(REG),
            Self::Object(map) => match map.get("type") {
                Some(Value::String(name)) => Cow::Borrowed(name.as_str()),
                Some(other) => Cow::Owned(other.to_string()),
                None => Cow::Borrowed(OBJECT),
            },
            Self::Unrecognized(value) => Cow::Owned(value.to_string()),
        };

        NormalizedRule {
            rule_type,
            value: self,
        }
    }

    /// Whether the declaration has one of the supported shapes.
    ///
    /// Unrecognized values and objects whose `type` is not a string never
    /// resolve to a checker, whatever the registry holds.
    pub fn is_recognized(&self) -> bool {
        match self {
            Self::Unrecognized(_) => false,
            Self::Object(map) => !matches!(map.get("type"), Some(t) if !t.is_string()),
            _ => true,
        }
    }

    /// Raw constraint value from an object rule
    pub fn constraint(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Object(map) => map.get(name),
            _ => None,
        }
    }

    /// Inner type names of a `multiple` rule
    pub fn type_names(&self) -> Option<&[String]> {
        match self {
            Self::OneOf(names) => Some(names),
            _ => None,
        }
    }

    pub fn as_pattern(&self) -> Option<&Regex> {
        match self {
            Self::Pattern(regex) => Some(regex),
            _ => None,
        }
    }
}

impl From<&str> for RuleDeclaration {
    fn from(name: &str) -> Self {
        Self::Type(name.to_string())
    }
}

impl From<String> for RuleDeclaration {
    fn from(name: String) -> Self {
        Self::Type(name)
    }
}

impl From<Vec<String>> for RuleDeclaration {
    fn from(names: Vec<String>) -> Self {
        Self::OneOf(names)
    }
}

impl From<Regex> for RuleDeclaration {
    fn from(regex: Regex) -> Self {
        Self::Pattern(regex)
    }
}

impl From<Map<String, Value>> for RuleDeclaration {
    fn from(map: Map<String, Value>) -> Self {
        Self::Object(map)
    }
}

/// Field rules in declaration order
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<(String, RuleDeclaration)>,
}

impl RuleSet {
    /// Create a new empty rule set
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Parse a JSON object of `field -> rule` declarations
    pub fn from_value(rules: &Value) -> Result<Self, RuleError> {
        let map = rules.as_object().ok_or(RuleError::RulesNotObject)?;
        let mut set = Self::new();
        for (field, declaration) in map {
            set.insert(field.clone(), RuleDeclaration::from_value(declaration)?);
        }
        Ok(set)
    }

    /// Set the rule for a field. Redeclaring a field keeps its original position.
    pub fn field(mut self, field: impl Into<String>, rule: impl Into<RuleDeclaration>) -> Self {
        self.insert(field.into(), rule.into());
        self
    }

    /// Require a bare rule type for a field
    pub fn typed(self, field: impl Into<String>, rule_type: &str) -> Self {
        self.field(field, RuleDeclaration::Type(rule_type.to_string()))
    }

    /// Accept any of the given rule types for a field
    pub fn one_of(self, field: impl Into<String>, rule_types: &[&str]) -> Self {
        let names = rule_types.iter().map(|name| name.to_string()).collect();
        self.field(field, RuleDeclaration::OneOf(names))
    }

    /// Require a field to match a pattern
    pub fn pattern(self, field: impl Into<String>, pattern: &str) -> Result<Self, RuleError> {
        Ok(self.field(field, RuleDeclaration::pattern(pattern)?))
    }

    pub fn get(&self, field: &str) -> Option<&RuleDeclaration> {
        self.rules
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rule)| rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleDeclaration)> {
        self.rules.iter().map(|(field, rule)| (field.as_str(), rule))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    fn insert(&mut self, field: String, rule: RuleDeclaration) {
        match self.rules.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = rule,
            None => self.rules.push((field, rule)),
        }
    }
}
