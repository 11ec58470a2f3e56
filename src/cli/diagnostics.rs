//! Validation failures reported as miette diagnostics

use miette::Diagnostic;
use thiserror::Error;

use crate::wizard::{ErrorMap, WizardDefinition};

/// A form that could not be completed from its answers
#[derive(Debug, Error, Diagnostic)]
#[error("Form '{form}' failed validation on step {step_number} ({step_title}): {summary}")]
#[diagnostic(
    code(bizc::form::validation_error),
    help("Fix the listed fields in the answers file and run the command again")
)]
pub struct FormValidationError {
    form: String,
    step_number: usize,
    step_title: String,
    summary: String,

    #[related]
    violations: Vec<FieldViolation>,
}

/// One field's first failing rule
#[derive(Debug, Error, Diagnostic)]
#[error("{label}: {message}")]
pub struct FieldViolation {
    label: String,
    message: String,

    #[help]
    help: Option<String>,
}

impl FormValidationError {
    pub fn new(definition: &WizardDefinition, step_index: usize, errors: &ErrorMap) -> Self {
        let violations: Vec<FieldViolation> = errors
            .iter()
            .map(|(field, message)| {
                let spec = definition.field(field);
                FieldViolation {
                    label: definition.label(field).to_string(),
                    message: message.to_string(),
                    help: spec.and_then(|s| s.help.clone()).or_else(|| {
                        spec.map(|s| format!("answers key: {}", s.name))
                    }),
                }
            })
            .collect();

        let count = violations.len();
        let summary = if count == 1 {
            "1 error".to_string()
        } else {
            format!("{} errors", count)
        };
        let step_title = definition
            .step(step_index)
            .map(|s| s.title.clone())
            .unwrap_or_default();

        Self {
            form: definition.id.clone(),
            step_number: step_index + 1,
            step_title,
            summary,
            violations,
        }
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FormKind;
    use crate::wizard::StepValidator;
    use std::sync::Arc;

    #[test]
    fn test_collects_one_violation_per_field() {
        let def = Arc::new(FormKind::Contact.definition().unwrap());
        let validator = StepValidator::new(Arc::clone(&def));
        let errors = validator.validate(0, &def.initial_store());
        let err = FormValidationError::new(&def, 0, &errors);

        assert_eq!(err.violation_count(), errors.len());
        let text = err.to_string();
        assert!(text.contains("Form 'contact' failed validation on step 1"));
        assert!(text.contains(&format!("{} errors", errors.len())));
    }
}
