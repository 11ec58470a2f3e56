//! Business registration ("Join BizConnect")

use crate::wizard::{DefinitionError, FieldSpec, Rule, Step, WizardDefinition};

pub const INDUSTRIES: &[&str] = &[
    "Technology", "Healthcare", "Finance", "Manufacturing", "Retail",
    "Education", "Real Estate", "Consulting", "Marketing", "Legal",
    "Construction", "Transportation", "Energy", "Entertainment", "Other",
];

pub const EMPLOYEE_COUNTS: &[&str] = &[
    "1-10", "11-50", "51-200", "201-500", "501-1000", "1000-5000", "5000+",
];

pub const REVENUE_RANGES: &[&str] = &[
    "Under $100K", "$100K - $500K", "$500K - $1M", "$1M - $10M",
    "$10M - $50M", "$50M - $100M", "Over $100M",
];

pub const PARTNERSHIP_TYPES: &[&str] = &[
    "Service Providers", "Suppliers", "Technology Partners", "Distribution Partners",
    "Strategic Alliances", "Joint Ventures", "Clients", "Vendors",
];

pub const BUSINESS_TYPES: &[&str] = &["enterprise", "small-business"];

pub fn definition() -> Result<WizardDefinition, DefinitionError> {
    WizardDefinition::builder("registration", "Join BizConnect")
        .reference_prefix("REG")
        // Basic info
        .field(FieldSpec::text("businessName", "Business name"))
        .field(FieldSpec::text("businessType", "Business type").choices(BUSINESS_TYPES.iter().copied()))
        .field(FieldSpec::text("industry", "Industry").choices(INDUSTRIES.iter().copied()))
        .field(FieldSpec::text("description", "Description"))
        .field(FieldSpec::text("foundedYear", "Founded year").help("4-digit year, e.g. 2015"))
        .field(FieldSpec::text("website", "Website"))
        // Contact
        .field(FieldSpec::text("contactName", "Contact name"))
        .field(FieldSpec::text("contactEmail", "Email"))
        .field(FieldSpec::text("contactPhone", "Phone"))
        .field(FieldSpec::text("address", "Address"))
        .field(FieldSpec::text("city", "City"))
        .field(FieldSpec::text("state", "State / province"))
        .field(FieldSpec::text("country", "Country"))
        // Profile
        .field(FieldSpec::text("employeeCount", "Employee count").choices(EMPLOYEE_COUNTS.iter().copied()))
        .field(FieldSpec::text("annualRevenue", "Annual revenue").choices(REVENUE_RANGES.iter().copied()))
        .field(FieldSpec::set("certifications", "Certifications"))
        .field(FieldSpec::set("services", "Services"))
        // Partnership goals
        .field(FieldSpec::set("lookingFor", "Looking for").choices(PARTNERSHIP_TYPES.iter().copied()))
        .field(FieldSpec::text("projectBudget", "Typical project budget"))
        .field(FieldSpec::text("projectTimeline", "Typical timeline"))
        .field(FieldSpec::set("preferredLocations", "Preferred locations"))
        .step(
            Step::new("Basic Info", "Tell us about your business")
                .fields(["businessName", "businessType", "industry", "description", "foundedYear", "website"])
                .rule(Rule::required("businessName"))
                .rule(Rule::required("businessType"))
                .rule(Rule::required("industry"))
                .rule(Rule::required("description"))
                .rule(Rule::year_range("foundedYear", 1800)),
        )
        .step(
            Step::new("Contact Details", "How can we reach you?")
                .fields(["contactName", "contactEmail", "contactPhone", "address", "city", "state", "country"])
                .rule(Rule::required("contactName"))
                .rule(Rule::required("contactEmail"))
                .rule(Rule::email("contactEmail"))
                .rule(Rule::required("city"))
                .rule(Rule::required("country")),
        )
        .step(
            Step::new("Business Profile", "Showcase your capabilities")
                .fields(["employeeCount", "annualRevenue", "services", "certifications"])
                .rule(Rule::required("employeeCount"))
                .rule(Rule::non_empty("services").with_message("At least one service is required")),
        )
        .step(
            Step::new("Partnership Goals", "What are you looking for?")
                .fields(["lookingFor", "projectBudget", "projectTimeline", "preferredLocations"])
                .rule(Rule::non_empty("lookingFor").with_message("Please select what you're looking for")),
        )
        .step(Step::new("Review & Submit", "Confirm your information"))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{Advance, StepValidator, WizardSession};
    use std::sync::Arc;

    fn session() -> WizardSession {
        let def = Arc::new(definition().unwrap());
        WizardSession::with_validator(StepValidator::with_reference_year(def, 2024))
    }

    #[test]
    fn test_missing_business_name() {
        let mut s = session();
        s.set_field("businessName", "".into()).unwrap();
        s.set_field("businessType", "enterprise".into()).unwrap();
        s.set_field("industry", "Technology".into()).unwrap();
        s.set_field("description", "x".into()).unwrap();

        assert_eq!(s.go_next(), Advance::Blocked);
        assert_eq!(s.index(), 0);
        assert_eq!(s.errors().len(), 1);
        assert_eq!(s.errors().get("businessName"), Some("Business name is required"));
    }

    #[test]
    fn test_contact_step_email_rules() {
        let mut s = session();
        for (k, v) in [("businessName", "Acme"), ("businessType", "enterprise"), ("industry", "Technology"), ("description", "x")] {
            s.set_field(k, v.into()).unwrap();
        }
        s.go_next();
        assert_eq!(s.index(), 1);

        s.go_next();
        assert_eq!(s.errors().get("contactEmail"), Some("Email is required"));

        s.set_field("contactEmail", "not-an-email".into()).unwrap();
        s.go_next();
        assert_eq!(s.errors().get("contactEmail"), Some("Invalid email format"));
    }

    #[test]
    fn test_has_five_steps() {
        let def = definition().unwrap();
        let titles: Vec<_> = def.steps().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            ["Basic Info", "Contact Details", "Business Profile", "Partnership Goals", "Review & Submit"]
        );
    }
}
