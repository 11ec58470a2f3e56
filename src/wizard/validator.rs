//! Per-step validation producing field error maps

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::wizard::definition::{Rule, WizardDefinition};
use crate::wizard::field::{FieldStore, FieldValue};

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("Invalid regex pattern"));

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[\d\s\-()]+$").expect("Invalid regex pattern"));

static YEAR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}$").expect("Invalid regex pattern"));

/// Field name to error message. Empty means the step is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<String, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error unless the field already has one
    pub fn insert_first(&mut self, field: &str, message: String) {
        self.0.entry(field.to_string()).or_insert(message);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ErrorMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Validates wizard steps against a definition
///
/// The reference year used by year-range rules is fixed when the
/// validator is built, so results never depend on the clock.
#[derive(Debug, Clone)]
pub struct StepValidator {
    definition: Arc<WizardDefinition>,
    reference_year: i32,
}

impl StepValidator {
    /// Validator using the current calendar year as reference
    pub fn new(definition: Arc<WizardDefinition>) -> Self {
        Self::with_reference_year(definition, chrono::Local::now().year())
    }

    pub fn with_reference_year(definition: Arc<WizardDefinition>, reference_year: i32) -> Self {
        Self {
            definition,
            reference_year,
        }
    }

    pub fn definition(&self) -> &Arc<WizardDefinition> {
        &self.definition
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Validate one step. Unknown step indices have no rules.
    pub fn validate(&self, step_index: usize, store: &FieldStore) -> ErrorMap {
        let mut errors = ErrorMap::new();
        let Some(step) = self.definition.step(step_index) else {
            return errors;
        };

        for rule in &step.rules {
            let field = rule.field();
            if errors.contains(field) {
                continue;
            }
            if let Some(message) = self.check(rule, store.get(field)) {
                errors.insert_first(field, message);
            }
        }

        errors
    }

    /// Validate every step, merging the results
    pub fn validate_all(&self, store: &FieldStore) -> ErrorMap {
        let mut errors = ErrorMap::new();
        for step in self.definition.steps() {
            for (field, message) in self.validate(step.index(), store).iter() {
                errors.insert_first(field, message.to_string());
            }
        }
        errors
    }

    fn check(&self, rule: &Rule, value: Option<&FieldValue>) -> Option<String> {
        let label = self.definition.label(rule.field());
        let text = value.and_then(FieldValue::as_text).map(str::trim).unwrap_or("");

        match rule {
            Rule::Required { message, .. } => {
                let blank = value.map(FieldValue::is_blank).unwrap_or(true);
                blank.then(|| message.clone().unwrap_or_else(|| format!("{} is required", label)))
            }
            Rule::Email { message, .. } => (!text.is_empty() && !EMAIL_REGEX.is_match(text))
                .then(|| message.clone().unwrap_or_else(|| "Invalid email format".to_string())),
            Rule::NonEmpty { message, .. } => {
                let empty = match value {
                    Some(FieldValue::Set(items)) => items.is_empty(),
                    Some(FieldValue::Items(items)) => items.is_empty(),
                    _ => true,
                };
                empty.then(|| {
                    message
                        .clone()
                        .unwrap_or_else(|| format!("At least one {} is required", label.to_lowercase()))
                })
            }
            Rule::YearRange { min, message, .. } => {
                if text.is_empty() {
                    return None;
                }
                let in_range = YEAR_REGEX.is_match(text)
                    && text
                        .parse::<i32>()
                        .map(|year| year >= *min && year <= self.reference_year)
                        .unwrap_or(false);
                (!in_range).then(|| {
                    message.clone().unwrap_or_else(|| {
                        format!(
                            "{} must be a year between {} and {}",
                            label, min, self.reference_year
                        )
                    })
                })
            }
            Rule::Phone { message, .. } => (!text.is_empty() && !PHONE_REGEX.is_match(text)).then(|| {
                message
                    .clone()
                    .unwrap_or_else(|| "Please enter a valid phone number".to_string())
            }),
            Rule::Accepted { message, .. } => {
                let accepted = value.and_then(FieldValue::as_flag).unwrap_or(false);
                (!accepted).then(|| message.clone().unwrap_or_else(|| format!("{} must be accepted", label)))
            }
        }
    }
}
