//! Wizard definitions: declared fields, ordered steps and their rules

use std::collections::HashSet;
use thiserror::Error;

use crate::wizard::field::{FieldSpec, FieldStore};

/// A validation rule attached to a step
///
/// Each rule inspects a single field. A `None` message means the
/// rule's standard wording is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Value must be provided (text non-blank, set non-empty, date set, flag checked)
    Required { field: String, message: Option<String> },
    /// Non-empty text must look like `x@y.z`
    Email { field: String, message: Option<String> },
    /// Set field must contain at least one entry
    NonEmpty { field: String, message: Option<String> },
    /// Non-empty text must be a 4-digit year between `min` and the reference year
    YearRange { field: String, min: i32, message: Option<String> },
    /// Non-empty text must look like a phone number
    Phone { field: String, message: Option<String> },
    /// Flag must be checked
    Accepted { field: String, message: Option<String> },
}

impl Rule {
    pub fn required(field: impl Into<String>) -> Self {
        Rule::Required { field: field.into(), message: None }
    }

    pub fn email(field: impl Into<String>) -> Self {
        Rule::Email { field: field.into(), message: None }
    }

    pub fn non_empty(field: impl Into<String>) -> Self {
        Rule::NonEmpty { field: field.into(), message: None }
    }

    pub fn year_range(field: impl Into<String>, min: i32) -> Self {
        Rule::YearRange { field: field.into(), min, message: None }
    }

    pub fn phone(field: impl Into<String>) -> Self {
        Rule::Phone { field: field.into(), message: None }
    }

    pub fn accepted(field: impl Into<String>) -> Self {
        Rule::Accepted { field: field.into(), message: None }
    }

    /// Replace the standard message with custom wording
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        let text = Some(text.into());
        match &mut self {
            Rule::Required { message, .. }
            | Rule::Email { message, .. }
            | Rule::NonEmpty { message, .. }
            | Rule::YearRange { message, .. }
            | Rule::Phone { message, .. }
            | Rule::Accepted { message, .. } => *message = text,
        }
        self
    }

    /// The field this rule inspects
    pub fn field(&self) -> &str {
        match self {
            Rule::Required { field, .. }
            | Rule::Email { field, .. }
            | Rule::NonEmpty { field, .. }
            | Rule::YearRange { field, .. }
            | Rule::Phone { field, .. }
            | Rule::Accepted { field, .. } => field,
        }
    }
}

/// One page of a wizard
#[derive(Debug, Clone)]
pub struct Step {
    index: usize,
    pub title: String,
    pub description: String,
    /// Fields shown on this step, in display order
    pub fields: Vec<String>,
    pub rules: Vec<Rule>,
}

impl Step {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            index: 0,
            title: title.into(),
            description: description.into(),
            fields: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// 0-based position within the wizard
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// Errors detected while assembling a definition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("Wizard '{0}' has no steps")]
    NoSteps(String),

    #[error("Field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("Step '{step}' references undeclared field '{field}'")]
    UndeclaredField { step: String, field: String },
}

/// The immutable description of one multi-step form
#[derive(Debug, Clone)]
pub struct WizardDefinition {
    pub id: String,
    pub title: String,
    /// Prefix for submission receipt references (e.g. "REG")
    pub reference_prefix: String,
    fields: Vec<FieldSpec>,
    steps: Vec<Step>,
}

impl WizardDefinition {
    pub fn builder(id: impl Into<String>, title: impl Into<String>) -> WizardBuilder {
        WizardBuilder {
            id: id.into(),
            title: title.into(),
            reference_prefix: "BIZ".to_string(),
            fields: Vec::new(),
            steps: Vec::new(),
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Human label of a field, falling back to its name
    pub fn label<'a>(&'a self, name: &'a str) -> &'a str {
        self.field(name).map(|f| f.label.as_str()).unwrap_or(name)
    }

    /// A fresh store holding every field's default
    pub fn initial_store(&self) -> FieldStore {
        FieldStore::from_specs(&self.fields)
    }
}

/// Builder for [`WizardDefinition`]
#[derive(Debug)]
pub struct WizardBuilder {
    id: String,
    title: String,
    reference_prefix: String,
    fields: Vec<FieldSpec>,
    steps: Vec<Step>,
}

impl WizardBuilder {
    pub fn reference_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.reference_prefix = prefix.into();
        self
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Check references and assign step indices
    pub fn build(self) -> Result<WizardDefinition, DefinitionError> {
        if self.steps.is_empty() {
            return Err(DefinitionError::NoSteps(self.id));
        }

        let mut declared = HashSet::new();
        for spec in &self.fields {
            if !declared.insert(spec.name.as_str()) {
                return Err(DefinitionError::DuplicateField(spec.name.clone()));
            }
        }

        for step in &self.steps {
            let referenced = step
                .fields
                .iter()
                .map(String::as_str)
                .chain(step.rules.iter().map(Rule::field));
            for field in referenced {
                if !declared.contains(field) {
                    return Err(DefinitionError::UndeclaredField {
                        step: step.title.clone(),
                        field: field.to_string(),
                    });
                }
            }
        }

        for spec in &self.fields {
            for dependent in &spec.resets {
                if !declared.contains(dependent.as_str()) {
                    return Err(DefinitionError::UndeclaredField {
                        step: format!("{} (reset)", spec.name),
                        field: dependent.clone(),
                    });
                }
            }
        }

        let steps = self
            .steps
            .into_iter()
            .enumerate()
            .map(|(index, step)| Step { index, ..step })
            .collect();

        Ok(WizardDefinition {
            id: self.id,
            title: self.title,
            reference_prefix: self.reference_prefix,
            fields: self.fields,
            steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_assigns_indices() {
        let def = WizardDefinition::builder("demo", "Demo")
            .field(FieldSpec::text("a", "A"))
            .step(Step::new("One", "first").fields(["a"]))
            .step(Step::new("Two", "second"))
            .build()
            .unwrap();

        assert_eq!(def.steps().len(), 2);
        assert_eq!(def.step(1).unwrap().index(), 1);
        assert_eq!(def.last_index(), 1);
        assert_eq!(def.label("a"), "A");
        assert_eq!(def.label("missing"), "missing");
    }

    #[test]
    fn test_build_rejects_empty_definition() {
        let err = WizardDefinition::builder("demo", "Demo").build().unwrap_err();
        assert_eq!(err, DefinitionError::NoSteps("demo".to_string()));
    }

    #[test]
    fn test_build_rejects_undeclared_rule_field() {
        let err = WizardDefinition::builder("demo", "Demo")
            .step(Step::new("One", "").rule(Rule::required("ghost")))
            .build()
            .unwrap_err();
        assert!(matches!(err, DefinitionError::UndeclaredField { field, .. } if field == "ghost"));
    }

    #[test]
    fn test_build_rejects_duplicate_fields() {
        let err = WizardDefinition::builder("demo", "Demo")
            .field(FieldSpec::text("a", "A"))
            .field(FieldSpec::flag("a", "A again"))
            .step(Step::new("One", ""))
            .build()
            .unwrap_err();
        assert_eq!(err, DefinitionError::DuplicateField("a".to_string()));
    }

    #[test]
    fn test_with_message_overrides_wording() {
        let rule = Rule::non_empty("services").with_message("At least one service is required");
        assert_eq!(
            rule,
            Rule::NonEmpty {
                field: "services".to_string(),
                message: Some("At least one service is required".to_string()),
            }
        );
        assert_eq!(rule.field(), "services");
    }
}
