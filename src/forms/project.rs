//! Project request ("Post a Project Request")

use crate::wizard::{DefinitionError, FieldSpec, Rule, Step, WizardDefinition};

pub fn categories() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        ("Technology", vec!["Web Development", "Mobile Development", "AI/ML", "Cloud Services", "Cybersecurity"]),
        ("Design", vec!["UI/UX Design", "Graphic Design", "Brand Identity", "Product Design", "Marketing Materials"]),
        ("Marketing", vec!["Digital Marketing", "Content Marketing", "SEO/SEM", "Social Media", "Email Marketing"]),
        ("Consulting", vec!["Business Strategy", "Management Consulting", "Financial Consulting", "IT Consulting", "HR Consulting"]),
        ("Writing", vec!["Content Writing", "Technical Writing", "Copywriting", "Translation", "Editing"]),
    ]
}

pub const SKILLS: &[&str] = &[
    "React", "Node.js", "Python", "JavaScript", "TypeScript", "AWS", "Docker", "MongoDB",
    "Figma", "Adobe Creative Suite", "Sketch", "Photoshop", "Illustrator",
    "Google Analytics", "Facebook Ads", "SEO", "Content Strategy", "Email Marketing",
    "Project Management", "Business Analysis", "Data Analysis", "Strategic Planning",
];

pub const TIMELINES: &[&str] = &[
    "asap", "1-week", "2-weeks", "1-month", "3-months", "6-months", "flexible",
];

pub const EXPERIENCE_LEVELS: &[&str] = &["entry", "intermediate", "expert", "any"];

pub const COMPANY_SIZES: &[&str] = &["startup", "small", "medium", "large", "enterprise"];

pub fn definition() -> Result<WizardDefinition, DefinitionError> {
    let categories = categories();
    let category_names: Vec<&str> = categories.iter().map(|(name, _)| *name).collect();

    WizardDefinition::builder("project", "Post a Project Request")
        .reference_prefix("PRJ")
        .field(FieldSpec::text("projectTitle", "Project title"))
        .field(FieldSpec::text("projectDescription", "Project description"))
        .field(
            FieldSpec::text("category", "Category")
                .choices(category_names)
                .resets(["subcategory"]),
        )
        .field(FieldSpec::text("subcategory", "Subcategory").choices_by("category", categories))
        .field(
            FieldSpec::text("budgetType", "Budget type")
                .choices(["fixed", "hourly", "negotiable"])
                .default_value("fixed"),
        )
        .field(FieldSpec::text("budgetAmount", "Budget amount"))
        .field(FieldSpec::date("startDate", "Start date"))
        .field(FieldSpec::date("endDate", "End date"))
        .field(FieldSpec::text("timeline", "Timeline").choices(TIMELINES.iter().copied()))
        .field(
            FieldSpec::set("skillsNeeded", "Skills needed")
                .choices(SKILLS.iter().copied())
                .allow_other(),
        )
        .field(FieldSpec::text("experienceLevel", "Experience level").choices(EXPERIENCE_LEVELS.iter().copied()))
        .field(
            FieldSpec::items("requirements", "Specific requirements")
                .help("title, description and priority per entry"),
        )
        .field(
            FieldSpec::text("workLocation", "Work location")
                .choices(["remote", "onsite", "hybrid"])
                .default_value("remote"),
        )
        .field(FieldSpec::set("preferredLocations", "Preferred locations"))
        .field(FieldSpec::text("timezone", "Timezone"))
        .field(FieldSpec::text("companyName", "Company name"))
        .field(FieldSpec::text("industryType", "Industry"))
        .field(FieldSpec::text("companySize", "Company size").choices(COMPANY_SIZES.iter().copied()))
        .field(FieldSpec::text("contactName", "Contact name"))
        .field(FieldSpec::text("contactEmail", "Contact email"))
        .field(FieldSpec::text("specialInstructions", "Special instructions"))
        .field(FieldSpec::flag("nda", "NDA required"))
        .field(FieldSpec::flag("urgent", "Urgent"))
        .step(
            Step::new("Project Details", "Basic information about your project")
                .fields(["projectTitle", "projectDescription", "category", "subcategory"])
                .rule(Rule::required("projectTitle"))
                .rule(Rule::required("projectDescription"))
                .rule(Rule::required("category")),
        )
        .step(
            Step::new("Budget & Timeline", "Financial and scheduling details")
                .fields(["budgetType", "budgetAmount", "startDate", "endDate", "timeline"])
                .rule(Rule::required("budgetAmount"))
                .rule(Rule::required("timeline")),
        )
        .step(
            Step::new("Requirements", "Skills and requirements needed")
                .fields(["skillsNeeded", "experienceLevel", "requirements"])
                .rule(Rule::non_empty("skillsNeeded").with_message("At least one skill is required"))
                .rule(Rule::required("experienceLevel")),
        )
        .step(
            Step::new("Location & Contact", "Work arrangement and contact info")
                .fields([
                    "workLocation", "preferredLocations", "timezone", "companyName",
                    "industryType", "companySize", "contactName", "contactEmail",
                ])
                .rule(Rule::required("contactName"))
                .rule(Rule::required("contactEmail"))
                .rule(Rule::email("contactEmail")),
        )
        .step(
            Step::new("Review & Submit", "Final review and submission")
                .fields(["specialInstructions", "nda", "urgent"]),
        )
        .build()
}
