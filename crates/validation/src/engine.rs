use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use rescata_core::parse_calendar_date;

use crate::form::FormInput;
use crate::rules::{DateRule, FieldRule, NumericRule, RuleSet, TextRule};

/// Field → message for every field that failed.
///
/// Empty means the record passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(transparent)]
#[error("validation failed: {}", summary(.errors))]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

fn summary(errors: &BTreeMap<String, String>) -> String {
    errors
        .iter()
        .map(|(field, msg)| format!("{field}: {msg}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error. Blank messages are ignored.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let message = message.into();
        if !message.trim().is_empty() {
            self.errors.insert(field.into(), message);
        }
    }

    pub fn remove(&mut self, field: &str) {
        self.errors.remove(field);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.errors
    }
}

/// Validate one field value against its rule.
///
/// Fields without a rule are always valid. Returns the message for the first
/// failed constraint.
pub fn validate_field(rules: &RuleSet, field: &str, raw: &str, today: NaiveDate) -> Option<String> {
    match rules.get(field)? {
        FieldRule::Text(rule) => check_text(rule, raw),
        FieldRule::Integer(rule) => check_number(rule, raw, true),
        FieldRule::Decimal(rule) => check_decimal(rule, raw),
        FieldRule::Date(rule) => check_date(rule, raw, today),
    }
}

/// Validate every field that has a rule. Missing inputs are checked as blank.
pub fn validate_all(rules: &RuleSet, input: &FormInput, today: NaiveDate) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in rules.fields() {
        let raw = input.get(field).unwrap_or("");
        if let Some(msg) = validate_field(rules, field, raw, today) {
            errors.insert(field, msg);
        }
    }
    errors
}

/// Full validation as a submit gate.
pub fn accept(rules: &RuleSet, input: &FormInput, today: NaiveDate) -> Result<(), ValidationErrors> {
    let errors = validate_all(rules, input, today);
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn check_text(rule: &TextRule, raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return (!rule.optional).then(|| rule.required_message.clone());
    }
    let len = trimmed.chars().count();
    if len < rule.min_length || len > rule.max_length {
        return Some(rule.message.clone());
    }
    None
}

fn check_number(rule: &NumericRule, raw: &str, whole: bool) -> Option<String> {
    match Decimal::from_str(raw.trim()) {
        Ok(value) if whole && !value.fract().is_zero() => Some(rule.message.clone()),
        Ok(value) if rule.contains(value) => None,
        _ => Some(rule.message.clone()),
    }
}

fn check_decimal(rule: &NumericRule, raw: &str) -> Option<String> {
    match Decimal::from_str(raw.trim()) {
        Ok(value) if value.is_zero() => None,
        _ => check_number(rule, raw, false),
    }
}

fn check_date(rule: &DateRule, raw: &str, today: NaiveDate) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }
    match parse_calendar_date(raw) {
        Some(date) if date < today => Some(rule.message.clone()),
        Some(_) => None,
        None => Some(rule.invalid_message.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn rules() -> RuleSet {
        RuleSet::new()
            .text(
                "name",
                TextRule::new(3, 50, "name must be 3-50 characters").required_message("name is required"),
            )
            .integer("quantity", NumericRule::new(0, 1000, "quantity must be 0-1000"))
            .decimal("price", NumericRule::new(1, 500, "price must be 1-500 or 0"))
            .date("expires_on", DateRule::not_in_past("date cannot be before today"))
    }

    #[test]
    fn text_is_measured_after_trimming() {
        let msg = validate_field(&rules(), "name", "  ab  ", today());
        assert_eq!(msg.as_deref(), Some("name must be 3-50 characters"));
        assert_eq!(validate_field(&rules(), "name", "abcde", today()), None);
    }

    #[test]
    fn whitespace_only_text_is_required_not_short() {
        let msg = validate_field(&rules(), "name", "     ", today());
        assert_eq!(msg.as_deref(), Some("name is required"));
    }

    #[test]
    fn text_length_counts_characters() {
        assert_eq!(validate_field(&rules(), "name", "ñam", today()), None);
    }

    #[test]
    fn integers_reject_garbage_fractions_and_out_of_range() {
        let r = rules();
        assert_eq!(validate_field(&r, "quantity", "12", today()), None);
        assert_eq!(validate_field(&r, "quantity", "0", today()), None);
        assert!(validate_field(&r, "quantity", "abc", today()).is_some());
        assert!(validate_field(&r, "quantity", "2.5", today()).is_some());
        assert!(validate_field(&r, "quantity", "1001", today()).is_some());
        assert!(validate_field(&r, "quantity", "-1", today()).is_some());
        assert!(validate_field(&r, "quantity", "", today()).is_some());
    }

    #[test]
    fn zero_price_is_always_valid() {
        let r = rules();
        assert_eq!(validate_field(&r, "price", "0", today()), None);
        assert_eq!(validate_field(&r, "price", "0.00", today()), None);
        assert!(validate_field(&r, "price", "0.5", today()).is_some());
        assert_eq!(validate_field(&r, "price", "19.99", today()), None);
        assert!(validate_field(&r, "price", "free", today()).is_some());
    }

    #[test]
    fn same_day_expiration_is_valid() {
        let r = rules();
        assert_eq!(validate_field(&r, "expires_on", "2026-10-19", today()), None);
        assert_eq!(validate_field(&r, "expires_on", "2026-12-01", today()), None);
        assert_eq!(
            validate_field(&r, "expires_on", "2026-10-18", today()).as_deref(),
            Some("date cannot be before today")
        );
    }

    #[test]
    fn blank_date_is_valid_but_garbage_is_not() {
        let r = rules();
        assert_eq!(validate_field(&r, "expires_on", "", today()), None);
        assert!(validate_field(&r, "expires_on", "mañana", today()).is_some());
    }

    #[test]
    fn optional_text_allows_blank_but_checks_length() {
        let r = RuleSet::new().text("phone", TextRule::new(8, 15, "phone must be 8-15 characters").optional());
        assert_eq!(validate_field(&r, "phone", "  ", today()), None);
        assert!(validate_field(&r, "phone", "123", today()).is_some());
        assert_eq!(validate_field(&r, "phone", "+56912345678", today()), None);
    }

    #[test]
    fn unknown_fields_are_not_validated() {
        assert_eq!(validate_field(&rules(), "color", "", today()), None);
    }

    #[test]
    fn full_validation_reports_every_failing_field() {
        let input = FormInput::new().set("name", " x ").set("quantity", "many");
        let errors = validate_all(&rules(), &input, today());
        assert_eq!(errors.len(), 3);
        assert!(errors.get("name").is_some());
        assert!(errors.get("quantity").is_some());
        assert!(errors.get("price").is_some());
        assert!(errors.get("expires_on").is_none());
    }

    #[test]
    fn accept_passes_a_valid_record() {
        let input = FormInput::new()
            .set("name", "Pan integral")
            .set("quantity", "10")
            .set("price", "0")
            .set("expires_on", "2026-10-20");
        assert!(accept(&rules(), &input, today()).is_ok());
    }

    #[test]
    fn error_display_lists_fields() {
        let mut errors = ValidationErrors::new();
        errors.insert("name", "name is required");
        errors.insert("price", "");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.to_string(), "validation failed: name: name is required");
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: a field judged valid live is judged valid on submit.
            #[test]
            fn incremental_agrees_with_full(
                field in prop::sample::select(vec!["name", "quantity", "price", "expires_on"]),
                raw in "[ a-z0-9.\\-]{0,12}"
            ) {
                let r = rules();
                let live = validate_field(&r, field, &raw, today());
                let full = validate_all(&r, &FormInput::new().set(field, raw.clone()), today());
                prop_assert_eq!(live.as_deref(), full.get(field));
            }

            /// Property: full validation has no hidden state.
            #[test]
            fn full_validation_is_idempotent(
                name in "[A-Za-z ]{0,60}",
                quantity in -5i64..2000,
            ) {
                let r = rules();
                let input = FormInput::new()
                    .set("name", name)
                    .set("quantity", quantity.to_string())
                    .set("price", "0");
                let first = validate_all(&r, &input, today());
                let second = validate_all(&r, &input, today());
                prop_assert_eq!(first, second);
            }
        }
    }
}
