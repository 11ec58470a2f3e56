//! The platform's concrete forms, each a definition for the wizard engine

pub mod checkout;
pub mod contact;
pub mod feedback;
pub mod project;
pub mod registration;

use clap::ValueEnum;
use std::fmt;
use std::time::Duration;

use crate::wizard::{DefinitionError, WizardDefinition};

/// Forms available in the toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum FormKind {
    /// Business registration
    Registration,
    /// Project request
    Project,
    /// Plan checkout
    Checkout,
    /// Contact message
    Contact,
    /// Platform feedback
    Feedback,
}

impl FormKind {
    pub fn all() -> &'static [FormKind] {
        &[
            FormKind::Registration,
            FormKind::Project,
            FormKind::Checkout,
            FormKind::Contact,
            FormKind::Feedback,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Registration => "registration",
            FormKind::Project => "project",
            FormKind::Checkout => "checkout",
            FormKind::Contact => "contact",
            FormKind::Feedback => "feedback",
        }
    }

    pub fn definition(&self) -> Result<WizardDefinition, DefinitionError> {
        match self {
            FormKind::Registration => registration::definition(),
            FormKind::Project => project::definition(),
            FormKind::Checkout => checkout::definition(),
            FormKind::Contact => contact::definition(),
            FormKind::Feedback => feedback::definition(),
        }
    }

    /// Simulated processing time before a submission is accepted
    pub fn default_submit_delay(&self) -> Duration {
        match self {
            FormKind::Feedback => Duration::from_millis(1500),
            _ => Duration::from_millis(2000),
        }
    }

    /// Whether the session starts over once a submission is accepted
    pub fn clears_after_submit(&self) -> bool {
        matches!(self, FormKind::Feedback)
    }

    /// Message shown once the form is accepted
    pub fn success_message(&self) -> &'static str {
        match self {
            FormKind::Registration => {
                "Business registration submitted successfully! We'll review your application and get back to you within 24 hours."
            }
            FormKind::Project => {
                "Project request submitted successfully! You'll start receiving proposals within 24 hours."
            }
            FormKind::Checkout => "Payment processed successfully!",
            FormKind::Contact => {
                "Your message has been sent successfully! We'll get back to you within 24 hours."
            }
            FormKind::Feedback => {
                "Thank you for your feedback! Your input helps us improve BizConnect."
            }
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_form_definition_builds() {
        for kind in FormKind::all() {
            let def = kind.definition().unwrap();
            assert_eq!(def.id, kind.as_str());
            assert!(!def.steps().is_empty());
        }
    }

    #[test]
    fn test_submit_delays() {
        assert_eq!(FormKind::Feedback.default_submit_delay(), Duration::from_millis(1500));
        assert_eq!(FormKind::Registration.default_submit_delay(), Duration::from_millis(2000));
        assert!(FormKind::Feedback.clears_after_submit());
        assert!(!FormKind::Contact.clears_after_submit());
    }

    #[test]
    fn test_reference_prefixes_are_distinct() {
        let mut prefixes: Vec<_> = FormKind::all()
            .iter()
            .map(|k| k.definition().unwrap().reference_prefix)
            .collect();
        prefixes.sort();
        prefixes.dedup();
        assert_eq!(prefixes.len(), FormKind::all().len());
    }
}
