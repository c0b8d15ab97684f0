use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::{ValidationErrors, validate_all, validate_field};
use crate::rules::RuleSet;

/// Raw field values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormInput {
    values: BTreeMap<String, String>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Trimmed value; `None` when missing or blank.
    pub fn trimmed(&self, field: &str) -> Option<&str> {
        self.get(field).map(str::trim).filter(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// An open create/edit form: current values plus live errors.
///
/// Every change re-validates only the changed field. Submitting re-validates
/// everything with the same rules.
#[derive(Debug, Clone)]
pub struct FormState {
    rules: RuleSet,
    input: FormInput,
    errors: ValidationErrors,
}

impl FormState {
    pub fn new(rules: RuleSet) -> Self {
        Self::with_input(rules, FormInput::new())
    }

    /// Open a form pre-filled from an existing record (edit flow).
    /// Errors start empty, like a freshly opened dialog.
    pub fn with_input(rules: RuleSet, input: FormInput) -> Self {
        Self {
            rules,
            input,
            errors: ValidationErrors::new(),
        }
    }

    pub fn change(&mut self, field: &str, value: impl Into<String>, today: NaiveDate) {
        let value = value.into();
        match validate_field(&self.rules, field, &value, today) {
            Some(msg) => self.errors.insert(field, msg),
            None => self.errors.remove(field),
        }
        self.input.insert(field, value);
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.errors.is_empty()
    }

    /// Final gate: full validation. Live errors are replaced by the result.
    pub fn submit(&mut self, today: NaiveDate) -> Result<FormInput, ValidationErrors> {
        self.errors = validate_all(&self.rules, &self.input, today);
        if self.errors.is_empty() {
            Ok(self.input.clone())
        } else {
            Err(self.errors.clone())
        }
    }
}
