//! Pre-filled answers loaded from YAML
//!
//! An answers file is a flat mapping of field name to value:
//!
//! ```yaml
//! businessName: Acme Corp
//! services: [Consulting, Audits]
//! nda: true
//! startDate: 2025-03-01
//! requirements:
//!   - title: Offline mode
//!     description: Works without a network connection
//!     priority: high
//! ```
//!
//! Decimal numbers must be quoted (`budgetAmount: "5000.00"`) so they keep
//! the digits as written.

use chrono::NaiveDate;
use serde_yml::Value;
use std::path::Path;
use thiserror::Error;

use crate::wizard::field::{FieldError, FieldKind, FieldValue, Item, Priority};
use crate::wizard::session::WizardSession;

#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("Failed to read answers file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid answers YAML: {0}")]
    Parse(String),

    #[error("Answers must be a mapping of field names to values")]
    NotAMapping,

    #[error("Answer for '{field}' must be {expected}")]
    WrongShape { field: String, expected: &'static str },

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Parsed answers, in file order
#[derive(Debug, Clone, Default)]
pub struct Answers {
    entries: Vec<(String, Value)>,
}

impl Answers {
    pub fn from_path(path: &Path) -> Result<Self, AnswerError> {
        let content = std::fs::read_to_string(path).map_err(|e| AnswerError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, AnswerError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value =
            serde_yml::from_str(content).map_err(|e| AnswerError::Parse(e.to_string()))?;
        let mapping = match value {
            Value::Mapping(m) => m,
            Value::Null => return Ok(Self::default()),
            _ => return Err(AnswerError::NotAMapping),
        };

        let mut entries = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let key = match key {
                Value::String(s) => s,
                _ => return Err(AnswerError::NotAMapping),
            };
            entries.push((key, value));
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write every answer into the session, converting by declared kind
    ///
    /// Answers are applied in declaration order rather than file order, so
    /// a field that resets its dependents never wipes an answer given for
    /// them.
    pub fn apply(&self, session: &mut WizardSession) -> Result<(), AnswerError> {
        let mut ordered = Vec::with_capacity(self.entries.len());
        for (field, raw) in &self.entries {
            let (position, spec) = session
                .definition()
                .fields()
                .iter()
                .enumerate()
                .find(|(_, spec)| &spec.name == field)
                .ok_or_else(|| FieldError::UnknownField(field.clone()))?;
            ordered.push((position, spec.kind, field, raw));
        }
        ordered.sort_by_key(|(position, ..)| *position);

        for (_, kind, field, raw) in ordered {
            let value = convert(field, kind, raw)?;
            session.set_field(field, value)?;
        }
        Ok(())
    }
}

/// Convert one YAML value to a field value of the given kind
pub fn convert(field: &str, kind: FieldKind, raw: &Value) -> Result<FieldValue, AnswerError> {
    let wrong = |expected: &'static str| AnswerError::WrongShape {
        field: field.to_string(),
        expected,
    };

    match kind {
        FieldKind::Text => match raw {
            Value::String(s) => Ok(FieldValue::Text(s.clone())),
            Value::Number(n) if !n.is_f64() => Ok(FieldValue::Text(n.to_string())),
            Value::Number(_) => Err(wrong("a string (quote decimal numbers)")),
            Value::Null => Ok(FieldValue::Text(String::new())),
            _ => Err(wrong("a string")),
        },
        FieldKind::Flag => match raw {
            Value::Bool(b) => Ok(FieldValue::Flag(*b)),
            _ => Err(wrong("true or false")),
        },
        FieldKind::Set => match raw {
            Value::Sequence(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.trim().to_string()),
                    Value::Number(n) if !n.is_f64() => Ok(n.to_string()),
                    _ => Err(wrong("a list of strings")),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(|items| FieldValue::Set(items.into_iter().filter(|s| !s.is_empty()).collect())),
            Value::String(s) => Ok(FieldValue::Set(
                s.split(',')
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect(),
            )),
            Value::Null => Ok(FieldValue::Set(Vec::new())),
            _ => Err(wrong("a list of strings")),
        },
        FieldKind::Date => match raw {
            Value::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map(|d| FieldValue::Date(Some(d)))
                .map_err(|_| wrong("a date in YYYY-MM-DD form")),
            Value::Null => Ok(FieldValue::Date(None)),
            _ => Err(wrong("a date in YYYY-MM-DD form")),
        },
        FieldKind::Items => match raw {
            Value::Sequence(entries) => entries
                .iter()
                .map(|entry| convert_item(entry).ok_or_else(|| wrong(ITEM_SHAPE)))
                .collect::<Result<Vec<_>, _>>()
                .map(FieldValue::Items),
            Value::Null => Ok(FieldValue::Items(Vec::new())),
            _ => Err(wrong(ITEM_SHAPE)),
        },
    }
}

const ITEM_SHAPE: &str = "a list of entries with title, description and an optional priority";

fn convert_item(entry: &Value) -> Option<Item> {
    let text = |key: &str| entry.get(key).and_then(Value::as_str);
    let priority = match entry.get("priority") {
        None | Some(Value::Null) => Priority::default(),
        Some(value) => Priority::parse(value.as_str()?)?,
    };
    Item::new(text("title")?, text("description")?, priority)
}
