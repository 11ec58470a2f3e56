//! Typed form fields and the per-session field store

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use ulid::Ulid;

/// The semantic kind of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free or choice text
    Text,
    /// Checkbox / yes-no
    Flag,
    /// Ordered collection of distinct strings
    Set,
    /// Calendar date (may be unset)
    Date,
    /// Entries with a title, description and priority
    Items,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Flag => "flag",
            FieldKind::Set => "set",
            FieldKind::Date => "date",
            FieldKind::Items => "items",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Priority of an item entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of an items field, identified for removal by `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl Item {
    /// Build an entry with a fresh id. Both title and description must be
    /// non-blank after trimming.
    pub fn new(title: &str, description: &str, priority: Priority) -> Option<Self> {
        let (title, description) = (title.trim(), description.trim());
        if title.is_empty() || description.is_empty() {
            return None;
        }
        Some(Self {
            id: Ulid::new().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            priority,
        })
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} priority)", self.title, self.priority)
    }
}

/// A field value. Serializes untagged so output reads like plain data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Set(Vec<String>),
    Date(Option<NaiveDate>),
    Items(Vec<Item>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Flag(_) => FieldKind::Flag,
            FieldValue::Set(_) => FieldKind::Set,
            FieldValue::Date(_) => FieldKind::Date,
            FieldValue::Items(_) => FieldKind::Items,
        }
    }

    /// The empty value for a kind
    pub fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Flag => FieldValue::Flag(false),
            FieldKind::Set => FieldValue::Set(Vec::new()),
            FieldKind::Date => FieldValue::Date(None),
            FieldKind::Items => FieldValue::Items(Vec::new()),
        }
    }

    /// Whether the value counts as "not provided"
    ///
    /// Text is trimmed first; an unchecked flag counts as missing.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Flag(b) => !b,
            FieldValue::Set(items) => items.is_empty(),
            FieldValue::Date(d) => d.is_none(),
            FieldValue::Items(items) => items.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&[String]> {
        match self {
            FieldValue::Set(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => *d,
            _ => None,
        }
    }

    pub fn as_items(&self) -> Option<&[Item]> {
        match self {
            FieldValue::Items(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Flag(true) => write!(f, "yes"),
            FieldValue::Flag(false) => write!(f, "no"),
            FieldValue::Set(items) => write!(f, "{}", items.join(", ")),
            FieldValue::Date(Some(d)) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::Date(None) => Ok(()),
            FieldValue::Items(items) => {
                let shown: Vec<String> = items.iter().map(Item::to_string).collect();
                write!(f, "{}", shown.join("; "))
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        FieldValue::Date(Some(d))
    }
}

/// Choices offered for a field when prompting
#[derive(Debug, Clone, Default)]
pub enum Options {
    /// Free entry
    #[default]
    None,
    /// A fixed list
    Fixed(Vec<String>),
    /// Choices keyed by the current value of another field
    ByField {
        field: String,
        table: Vec<(String, Vec<String>)>,
    },
}

impl Options {
    /// The choices applicable given the current field values
    ///
    /// `None` means free entry. A dependent field whose controlling value
    /// has no table entry yields an empty list.
    pub fn resolve<'a>(&'a self, store: &FieldStore) -> Option<&'a [String]> {
        match self {
            Options::None => None,
            Options::Fixed(choices) => Some(choices),
            Options::ByField { field, table } => {
                let key = store.text(field);
                Some(
                    table
                        .iter()
                        .find(|(k, _)| k == key)
                        .map(|(_, v)| v.as_slice())
                        .unwrap_or(&[]),
                )
            }
        }
    }
}

/// Declaration of one field in a wizard definition
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub default: FieldValue,
    pub help: Option<String>,
    pub options: Options,
    /// Fields returned to their defaults when this one changes
    pub resets: Vec<String>,
    /// Hide the value in summaries
    pub masked: bool,
    /// Normalizes text input as it is entered
    pub format: Option<fn(&str) -> String>,
    /// Set fields with choices also accept free entries
    pub allow_other: bool,
}

impl FieldSpec {
    fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            default: FieldValue::empty(kind),
            help: None,
            options: Options::None,
            resets: Vec::new(),
            masked: false,
            format: None,
            allow_other: false,
        }
    }

    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn flag(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Flag)
    }

    pub fn set(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Set)
    }

    pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    pub fn items(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Items)
    }

    /// Set the default value. The value must match the field kind.
    pub fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        let value = value.into();
        if value.kind() == self.kind {
            self.default = value;
        }
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Options::Fixed(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn choices_by<I, S>(mut self, field: impl Into<String>, table: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<&'static str>)>,
        S: Into<String>,
    {
        self.options = Options::ByField {
            field: field.into(),
            table: table
                .into_iter()
                .map(|(k, v)| (k.into(), v.into_iter().map(String::from).collect()))
                .collect(),
        };
        self
    }

    pub fn resets<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resets = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn format_with(mut self, format: fn(&str) -> String) -> Self {
        self.format = Some(format);
        self
    }

    /// Apply the input formatter, if any, to a text value
    pub fn normalize(&self, value: FieldValue) -> FieldValue {
        match (self.format, value) {
            (Some(format), FieldValue::Text(text)) => FieldValue::Text(format(&text)),
            (_, value) => value,
        }
    }

    pub fn allow_other(mut self) -> Self {
        self.allow_other = true;
        self
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    /// Render a value for summaries. Masked values keep at most their
    /// last four characters, and only when longer than four.
    pub fn display(&self, value: &FieldValue) -> String {
        let shown = value.to_string();
        if !self.masked || shown.is_empty() {
            return shown;
        }
        let chars: Vec<char> = shown.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() > 4 {
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("•••• {}", tail)
        } else {
            "••••".to_string()
        }
    }
}

/// Errors raised by field store mutations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field '{field}' holds {expected} values, got {actual}")]
    KindMismatch {
        field: String,
        expected: FieldKind,
        actual: FieldKind,
    },
}

/// The mutable value record for one wizard session
///
/// Keys are fixed when the store is built from field specs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldStore {
    values: BTreeMap<String, FieldValue>,
}

impl FieldStore {
    /// Build a store holding each spec's default value
    pub fn from_specs(specs: &[FieldSpec]) -> Self {
        let values = specs
            .iter()
            .map(|spec| (spec.name.clone(), spec.default.clone()))
            .collect();
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Text value of a field, or "" when absent or not text
    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(FieldValue::as_text).unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replace a field's value. Returns whether the stored value changed.
    pub fn set(&mut self, name: &str, value: FieldValue) -> Result<bool, FieldError> {
        let slot = self.slot(name, value.kind())?;
        let value = match value {
            FieldValue::Set(items) => FieldValue::Set(dedup(items)),
            other => other,
        };
        if *slot == value {
            return Ok(false);
        }
        *slot = value;
        Ok(true)
    }

    /// Insert an item into a set field if it is not already present.
    ///
    /// The item is trimmed; blank items are ignored. Returns whether the
    /// collection changed.
    pub fn add_to_collection(&mut self, name: &str, item: &str) -> Result<bool, FieldError> {
        let item = item.trim();
        let items = self.set_slot(name)?;
        if item.is_empty() || items.iter().any(|existing| existing == item) {
            return Ok(false);
        }
        items.push(item.to_string());
        Ok(true)
    }

    /// Remove an item from a set field by equality
    pub fn remove_from_collection(&mut self, name: &str, item: &str) -> Result<bool, FieldError> {
        let items = self.set_slot(name)?;
        let before = items.len();
        items.retain(|existing| existing != item);
        Ok(items.len() != before)
    }

    /// Append an entry to an items field. Returns the new entry's id, or
    /// `None` when the title or description is blank.
    pub fn add_item(
        &mut self,
        name: &str,
        title: &str,
        description: &str,
        priority: Priority,
    ) -> Result<Option<String>, FieldError> {
        let items = self.items_slot(name)?;
        let Some(item) = Item::new(title, description, priority) else {
            return Ok(None);
        };
        let id = item.id.clone();
        items.push(item);
        Ok(Some(id))
    }

    /// Remove an entry from an items field by id
    pub fn remove_item(&mut self, name: &str, id: &str) -> Result<bool, FieldError> {
        let items = self.items_slot(name)?;
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok(items.len() != before)
    }

    fn slot(&mut self, name: &str, kind: FieldKind) -> Result<&mut FieldValue, FieldError> {
        let slot = self
            .values
            .get_mut(name)
            .ok_or_else(|| FieldError::UnknownField(name.to_string()))?;
        if slot.kind() != kind {
            return Err(FieldError::KindMismatch {
                field: name.to_string(),
                expected: slot.kind(),
                actual: kind,
            });
        }
        Ok(slot)
    }

    fn set_slot(&mut self, name: &str) -> Result<&mut Vec<String>, FieldError> {
        match self.slot(name, FieldKind::Set)? {
            FieldValue::Set(items) => Ok(items),
            other => Err(FieldError::KindMismatch {
                field: name.to_string(),
                expected: other.kind(),
                actual: FieldKind::Set,
            }),
        }
    }

    fn items_slot(&mut self, name: &str) -> Result<&mut Vec<Item>, FieldError> {
        match self.slot(name, FieldKind::Items)? {
            FieldValue::Items(items) => Ok(items),
            other => Err(FieldError::KindMismatch {
                field: name.to_string(),
                expected: other.kind(),
                actual: FieldKind::Items,
            }),
        }
    }
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
