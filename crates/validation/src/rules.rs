use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Constraint on a free-text field. Length is measured on the trimmed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRule {
    pub min_length: usize,
    pub max_length: usize,
    /// Reported when the trimmed length is outside `[min_length, max_length]`.
    pub message: String,
    /// Reported when the value is empty after trimming.
    pub required_message: String,
    /// Blank values pass; non-blank values must still fit the bounds.
    #[serde(default)]
    pub optional: bool,
}

impl TextRule {
    pub fn new(min_length: usize, max_length: usize, message: impl Into<String>) -> Self {
        Self {
            min_length,
            max_length,
            message: message.into(),
            required_message: "this field is required".to_string(),
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = message.into();
        self
    }
}

/// Inclusive numeric bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericRule {
    pub min: Decimal,
    pub max: Decimal,
    pub message: String,
}

impl NumericRule {
    pub fn new(min: impl Into<Decimal>, max: impl Into<Decimal>, message: impl Into<String>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
            message: message.into(),
        }
    }

    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Optional calendar date that may not lie before the current date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRule {
    /// Reported when the date is earlier than today.
    pub message: String,
    /// Reported when the value is not a date at all.
    pub invalid_message: String,
}

impl DateRule {
    pub fn not_in_past(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            invalid_message: "must be a valid date (YYYY-MM-DD)".to_string(),
        }
    }
}

/// One rule per field kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldRule {
    Text(TextRule),
    /// Whole numbers only.
    Integer(NumericRule),
    /// Zero is always accepted (the "free" price).
    Decimal(NumericRule),
    Date(DateRule),
}

/// Field name → rule.
///
/// Iteration order is by field name so full validation output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: BTreeMap<String, FieldRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, rule: FieldRule) -> Self {
        self.rules.insert(field.into(), rule);
        self
    }

    pub fn text(self, field: impl Into<String>, rule: TextRule) -> Self {
        self.with(field, FieldRule::Text(rule))
    }

    pub fn integer(self, field: impl Into<String>, rule: NumericRule) -> Self {
        self.with(field, FieldRule::Integer(rule))
    }

    pub fn decimal(self, field: impl Into<String>, rule: NumericRule) -> Self {
        self.with(field, FieldRule::Decimal(rule))
    }

    pub fn date(self, field: impl Into<String>, rule: DateRule) -> Self {
        self.with(field, FieldRule::Date(rule))
    }

    pub fn get(&self, field: &str) -> Option<&FieldRule> {
        self.rules.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_bounds_are_inclusive() {
        let rule = NumericRule::new(0, 10, "out of range");
        assert!(rule.contains(Decimal::ZERO));
        assert!(rule.contains(Decimal::from(10)));
        assert!(!rule.contains(Decimal::from(11)));
        assert!(!rule.contains(Decimal::from(-1)));
    }

    #[test]
    fn rule_sets_iterate_in_field_order() {
        let rules = RuleSet::new()
            .text("zeta", TextRule::new(1, 2, "z"))
            .text("alpha", TextRule::new(1, 2, "a"));
        let fields: Vec<_> = rules.fields().collect();
        assert_eq!(fields, vec!["alpha", "zeta"]);
    }

    #[test]
    fn rules_are_tagged_by_kind() {
        let rules = RuleSet::new().date("expires_on", DateRule::not_in_past("past"));
        let json = serde_json::to_value(&rules).unwrap();
        assert_eq!(json["expires_on"]["kind"], "date");
    }
}
