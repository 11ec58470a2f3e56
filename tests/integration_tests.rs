//! Integration tests for the bizc CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.
//! Every command runs with an isolated config and state directory and a
//! zero submission delay.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const REGISTRATION: &str = "\
businessName: Acme Robotics
businessType: small-business
industry: Technology
description: Industrial automation for small factories
foundedYear: 2015
contactName: Ada Lovelace
contactEmail: ada@example.com
contactPhone: +1 (512) 555-0100
city: Austin
country: USA
employeeCount: 11-50
services: [Automation, Consulting]
lookingFor: [Suppliers, Technology Partners]
";

const CONTACT: &str = "\
firstName: Grace
lastName: Hopper
email: grace@example.com
company: Navy Labs
inquiryType: demo
subject: Demo request
message: We would like a walkthrough.
";

const CHECKOUT: &str = "\
fullName: Ada Lovelace
email: ada@example.com
company: Analytical Engines
cardNumber: \"4242424242421234\"
expiryDate: \"1227\"
cvv: \"123\"
cardName: Ada Lovelace
terms: true
";

const PROJECT: &str = "\
projectTitle: Inventory app
projectDescription: Track stock across three warehouses
category: Technology
subcategory: Mobile Development
budgetAmount: \"5000.00\"
timeline: 1-month
skillsNeeded: [React, Rust]
experienceLevel: expert
requirements:
  - title: Offline mode
    description: Works without a network connection
    priority: high
contactName: Grace Hopper
contactEmail: grace@example.com
";

const FEEDBACK: &str = "\
name: Ada Lovelace
email: ada@example.com
rating: \"4\"
experience: Found a partner in a week
mostHelpful: [Verified partner network]
wouldRecommend: definitely
testimonialConsent: true
";

/// Helper to get an isolated bizc command
fn bizc(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bizc").unwrap();
    cmd.env("XDG_CONFIG_HOME", tmp.path().join("config"))
        .env("BIZC_STATE_DIR", tmp.path().join("state"))
        .env("BIZC_SUBMIT_DELAY_MS", "0")
        .env_remove("BIZC_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to write an answers file into the temp directory
fn answers(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// Basic Commands
// ============================================================================

#[test]
fn test_help_lists_commands() {
    let tmp = TempDir::new().unwrap();
    bizc(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("vendors"))
        .stdout(predicate::str::contains("onboarding"));
}

#[test]
fn test_version() {
    let tmp = TempDir::new().unwrap();
    bizc(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bizc"));
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    bizc(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bizc"));
}

// ============================================================================
// Forms
// ============================================================================

#[test]
fn test_forms_lists_every_form() {
    let tmp = TempDir::new().unwrap();
    bizc(&tmp)
        .args(["forms", "--format", "id"])
        .assert()
        .success()
        .stdout("registration\nproject\ncheckout\ncontact\nfeedback\n");
}

#[test]
fn test_forms_describe_project_yaml() {
    let tmp = TempDir::new().unwrap();
    bizc(&tmp)
        .args(["forms", "project", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reference_prefix: PRJ"))
        .stdout(predicate::str::contains("choices_depend_on: category"));
}

#[test]
fn test_register_from_answers_prints_reference() {
    let tmp = TempDir::new().unwrap();
    let file = answers(&tmp, "reg.yaml", REGISTRATION);
    bizc(&tmp)
        .args(["register", "--format", "id", "--answers"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("REG-"));
}

#[test]
fn test_register_json_report() {
    let tmp = TempDir::new().unwrap();
    let file = answers(&tmp, "reg.yaml", REGISTRATION);
    bizc(&tmp)
        .args(["register", "--format", "json", "--answers"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"submitted\""))
        .stdout(predicate::str::contains("\"businessName\": \"Acme Robotics\""));
}

#[test]
fn test_register_missing_business_name_fails() {
    let tmp = TempDir::new().unwrap();
    let content = REGISTRATION.replace("businessName: Acme Robotics\n", "");
    let file = answers(&tmp, "reg.yaml", &content);
    bizc(&tmp)
        .args(["register", "--answers"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Business name is required"))
        .stderr(predicate::str::contains("step 1"));
}

#[test]
fn test_register_bad_email_stops_on_contact_step() {
    let tmp = TempDir::new().unwrap();
    let content = REGISTRATION.replace("ada@example.com", "not-an-email");
    let file = answers(&tmp, "reg.yaml", &content);
    bizc(&tmp)
        .args(["register", "--answers"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email format"))
        .stderr(predicate::str::contains("step 2"));
}

#[test]
fn test_project_keeps_requirements_and_free_skills() {
    let tmp = TempDir::new().unwrap();
    let file = answers(&tmp, "project.yaml", PROJECT);
    bizc(&tmp)
        .args(["project", "--format", "json", "--answers"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"budgetAmount\": \"5000.00\""))
        .stdout(predicate::str::contains("\"Rust\""))
        .stdout(predicate::str::contains("\"title\": \"Offline mode\""))
        .stdout(predicate::str::contains("\"priority\": \"high\""));
}

#[test]
fn test_project_unquoted_decimal_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let content = PROJECT.replace("\"5000.00\"", "5000.00");
    let file = answers(&tmp, "project.yaml", &content);
    bizc(&tmp)
        .args(["project", "--answers"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("budgetAmount"));
}

#[test]
fn test_unknown_answer_field_fails() {
    let tmp = TempDir::new().unwrap();
    let file = answers(&tmp, "contact.yaml", &format!("{}nickname: Amazing\n", CONTACT));
    bizc(&tmp)
        .args(["contact", "--answers"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown field: nickname"));
}

#[test]
fn test_contact_no_submit_prints_review() {
    let tmp = TempDir::new().unwrap();
    let file = answers(&tmp, "contact.yaml", CONTACT);
    bizc(&tmp)
        .args(["contact", "--no-submit", "--answers"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/1] Send a Message"))
        .stdout(predicate::str::contains("First name: Grace"))
        .stdout(predicate::str::contains("successfully").not());
}

#[test]
fn test_contact_invalid_phone() {
    let tmp = TempDir::new().unwrap();
    let file = answers(&tmp, "contact.yaml", &format!("{}phone: call me\n", CONTACT));
    bizc(&tmp)
        .args(["contact", "--answers"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a valid phone number"));
}

#[test]
fn test_checkout_receipt_shows_total() {
    let tmp = TempDir::new().unwrap();
    let file = answers(&tmp, "checkout.yaml", CHECKOUT);
    bizc(&tmp)
        .args(["checkout", "--answers"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Payment processed successfully!"))
        .stdout(predicate::str::contains("$429.84"));
}

#[test]
fn test_checkout_requires_terms() {
    let tmp = TempDir::new().unwrap();
    let file = answers(&tmp, "checkout.yaml", &CHECKOUT.replace("terms: true", "terms: false"));
    bizc(&tmp)
        .args(["checkout", "--answers"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("I agree to the terms and conditions"))
        .stderr(predicate::str::contains("Please accept the terms"));
}

#[test]
fn test_feedback_from_answers_prints_reference() {
    let tmp = TempDir::new().unwrap();
    let file = answers(&tmp, "feedback.yaml", FEEDBACK);
    bizc(&tmp)
        .args(["feedback", "--format", "id", "--answers"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("FBK-"));
}

#[test]
fn test_feedback_requires_recommendation() {
    let tmp = TempDir::new().unwrap();
    let content = FEEDBACK.replace("wouldRecommend: definitely\n", "");
    let file = answers(&tmp, "feedback.yaml", &content);
    bizc(&tmp)
        .args(["feedback", "--answers"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("answers key: wouldRecommend"));
}

#[test]
fn test_contact_review_as_csv() {
    let tmp = TempDir::new().unwrap();
    let file = answers(&tmp, "contact.yaml", CONTACT);
    bizc(&tmp)
        .args(["contact", "--no-submit", "--format", "csv", "--answers"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("field,step,label,value\n"))
        .stdout(predicate::str::contains("firstName,1,First name,Grace\n"));
}

#[test]
fn test_receipt_as_tsv() {
    let tmp = TempDir::new().unwrap();
    let file = answers(&tmp, "contact.yaml", CONTACT);
    bizc(&tmp)
        .args(["contact", "--format", "tsv", "--answers"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("reference\tform\tsubmitted_at\nMSG-"))
        .stdout(predicate::str::contains("\tcontact\t"));
}

#[test]
fn test_form_without_terminal_or_answers_fails() {
    let tmp = TempDir::new().unwrap();
    bizc(&tmp)
        .arg("contact")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No terminal attached"));
}

// ============================================================================
// Vendors
// ============================================================================

#[test]
fn test_vendors_featured_first_then_rating() {
    let tmp = TempDir::new().unwrap();
    bizc(&tmp)
        .args(["vendors", "--format", "id"])
        .assert()
        .success()
        .stdout("1\n4\n2\n3\n");
}

#[test]
fn test_vendors_verified_only() {
    let tmp = TempDir::new().unwrap();
    bizc(&tmp)
        .args(["vendors", "--verified", "--format", "id"])
        .assert()
        .success()
        .stdout("1\n2\n3\n");
}

#[test]
fn test_vendors_text_search() {
    let tmp = TempDir::new().unwrap();
    bizc(&tmp)
        .args(["vendors", "energy", "--format", "id"])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn test_vendors_specialization_any_case() {
    let tmp = TempDir::new().unwrap();
    bizc(&tmp)
        .args(["vendors", "-s", "cloud migration", "--format", "id"])
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn test_vendors_csv_has_header() {
    let tmp = TempDir::new().unwrap();
    bizc(&tmp)
        .args(["vendors", "--industry", "technology", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("id,name,industry"))
        .stdout(predicate::str::contains("DataMind Consulting"))
        .stdout(predicate::str::contains("Creative Marketing Hub").not());
}

#[test]
fn test_vendors_no_match() {
    let tmp = TempDir::new().unwrap();
    bizc(&tmp)
        .args(["vendors", "--min-rating", "5"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No vendors match"));
}

// ============================================================================
// Onboarding
// ============================================================================

#[test]
fn test_onboarding_lifecycle() {
    let tmp = TempDir::new().unwrap();

    bizc(&tmp)
        .args(["onboarding", "--status"])
        .assert()
        .success()
        .stdout("not seen\n");

    bizc(&tmp)
        .arg("onboarding")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to BizConnect"));

    let state = fs::read_to_string(tmp.path().join("state").join("state.yaml")).unwrap();
    assert!(state.contains("bizconnect_onboarding_complete: true"));

    bizc(&tmp)
        .args(["onboarding", "--status"])
        .assert()
        .success()
        .stdout("seen\n");

    bizc(&tmp).args(["onboarding", "--reset"]).assert().success();

    bizc(&tmp)
        .args(["onboarding", "--status"])
        .assert()
        .success()
        .stdout("not seen\n");
}

#[test]
fn test_first_run_hint_until_onboarded() {
    let tmp = TempDir::new().unwrap();
    let file = answers(&tmp, "contact.yaml", CONTACT);

    bizc(&tmp)
        .args(["contact", "--answers"])
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains("bizc onboarding"));

    bizc(&tmp).arg("onboarding").assert().success();

    bizc(&tmp)
        .args(["contact", "--answers"])
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains("bizc onboarding").not());
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_show_key_from_env() {
    let tmp = TempDir::new().unwrap();
    bizc(&tmp)
        .args(["config", "show", "submit_delay_ms"])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_config_show_unknown_key() {
    let tmp = TempDir::new().unwrap();
    bizc(&tmp)
        .args(["config", "show", "editor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_default_format_from_env() {
    let tmp = TempDir::new().unwrap();
    bizc(&tmp)
        .env("BIZC_FORMAT", "id")
        .arg("forms")
        .assert()
        .success()
        .stdout("registration\nproject\ncheckout\ncontact\nfeedback\n");
}
