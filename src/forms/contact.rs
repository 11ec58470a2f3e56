//! General contact form, a single-step wizard

use crate::wizard::{DefinitionError, FieldSpec, Rule, Step, WizardDefinition};

pub const INQUIRY_TYPES: &[&str] = &["partnership", "service", "support", "demo", "other"];

pub const URGENCY_LEVELS: &[&str] = &["low", "medium", "high", "urgent"];

pub const BUDGET_RANGES: &[&str] = &[
    "Under $10K", "$10K - $50K", "$50K - $100K", "$100K - $500K",
    "$500K - $1M", "Over $1M", "Not specified",
];

pub fn definition() -> Result<WizardDefinition, DefinitionError> {
    WizardDefinition::builder("contact", "Contact Us")
        .reference_prefix("MSG")
        .field(FieldSpec::text("firstName", "First name"))
        .field(FieldSpec::text("lastName", "Last name"))
        .field(FieldSpec::text("email", "Email"))
        .field(FieldSpec::text("phone", "Phone"))
        .field(FieldSpec::text("company", "Company name"))
        .field(FieldSpec::text("jobTitle", "Job title"))
        .field(FieldSpec::text("inquiryType", "Inquiry type").choices(INQUIRY_TYPES.iter().copied()))
        .field(FieldSpec::text("subject", "Subject"))
        .field(FieldSpec::text("message", "Message"))
        .field(FieldSpec::text("urgency", "Urgency").choices(URGENCY_LEVELS.iter().copied()))
        .field(FieldSpec::text("budget", "Budget").choices(BUDGET_RANGES.iter().copied()))
        .field(FieldSpec::flag("marketingConsent", "Send me product updates"))
        .step(
            Step::new("Send a Message", "We'll get back to you within 24 hours")
                .fields([
                    "firstName", "lastName", "email", "phone", "company", "jobTitle",
                    "inquiryType", "subject", "message", "urgency", "budget", "marketingConsent",
                ])
                .rule(Rule::required("firstName"))
                .rule(Rule::required("lastName"))
                .rule(Rule::required("email"))
                .rule(Rule::email("email").with_message("Please enter a valid email address"))
                .rule(Rule::required("company"))
                .rule(Rule::required("inquiryType").with_message("Please select an inquiry type"))
                .rule(Rule::required("subject"))
                .rule(Rule::required("message"))
                .rule(Rule::phone("phone")),
        )
        .build()
}
