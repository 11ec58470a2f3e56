//! Platform feedback ("Share Your Feedback"), a single-step wizard
//!
//! Cleared after each accepted submission so another response can be
//! entered straight away.

use crate::wizard::{DefinitionError, FieldSpec, Rule, Step, WizardDefinition};

pub const USER_TYPES: &[&str] = &["enterprise", "small-business", "other"];

pub const RATINGS: &[&str] = &["1", "2", "3", "4"];

pub const RECOMMEND: &[&str] = &["definitely", "probably", "maybe", "unlikely"];

pub const FEATURES: &[&str] = &[
    "AI-powered matching algorithm",
    "Verified partner network",
    "Interactive dashboard",
    "Business registration process",
    "Vendor search functionality",
    "Project request system",
    "Communication tools",
    "Mobile-responsive design",
];

pub fn definition() -> Result<WizardDefinition, DefinitionError> {
    WizardDefinition::builder("feedback", "Share Your Feedback")
        .reference_prefix("FBK")
        .field(FieldSpec::text("name", "Name"))
        .field(FieldSpec::text("email", "Email"))
        .field(FieldSpec::text("company", "Company"))
        .field(FieldSpec::text("role", "Role"))
        .field(FieldSpec::text("userType", "I represent a").choices(USER_TYPES.iter().copied()))
        .field(
            FieldSpec::text("rating", "Overall rating")
                .choices(RATINGS.iter().copied())
                .help("1 to 4 stars"),
        )
        .field(FieldSpec::text("experience", "Your experience"))
        .field(FieldSpec::set("mostHelpful", "Most helpful features").choices(FEATURES.iter().copied()))
        .field(FieldSpec::text("improvements", "What could we improve"))
        .field(
            FieldSpec::text("wouldRecommend", "Would you recommend BizConnect")
                .choices(RECOMMEND.iter().copied()),
        )
        .field(FieldSpec::flag("testimonialConsent", "Use my feedback as a testimonial"))
        .step(
            Step::new("Share Your Feedback", "Help us improve BizConnect")
                .fields([
                    "name", "email", "company", "role", "userType", "rating", "experience",
                    "mostHelpful", "improvements", "wouldRecommend", "testimonialConsent",
                ])
                .rule(Rule::required("name"))
                .rule(Rule::required("email"))
                .rule(Rule::email("email"))
                .rule(Rule::required("rating"))
                .rule(Rule::required("experience"))
                .rule(Rule::required("wouldRecommend")),
        )
        .build()
}
