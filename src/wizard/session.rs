//! Wizard sessions: step navigation gated by validation
//!
//! A [`WizardSession`] owns the state of one run through a form:
//!
//! ```text
//! Editing(i) --go_next, valid--> Editing(i+1)        i < last
//! Editing(last) --go_next, valid--> Submitting
//! Editing(i) --go_next, invalid--> Editing(i)        errors stored
//! Editing(i) --go_prev--> Editing(i-1)               i > 0
//! Editing(i) --jump_to(j), j < i--> Editing(j)
//! Submitting --submit resolves--> Submitted
//! Submitted --reset--> Editing(0)
//! ```

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::wizard::definition::{Step, WizardDefinition};
use crate::wizard::field::{FieldError, FieldStore, FieldValue, Priority};
use crate::wizard::submission::{Receipt, SubmissionHandler, SubmissionOutcome};
use crate::wizard::validator::{ErrorMap, StepValidator};

/// Coarse session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Editing,
    Submitting,
    Submitted,
}

/// Result of [`WizardSession::go_next`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The step was valid and the index moved
    Moved { from: usize, to: usize },
    /// The last step was valid; the session now waits for `submit`
    ReadyToSubmit,
    /// The step has errors; see [`WizardSession::errors`]
    Blocked,
    /// Not editing, nothing happened
    Ignored,
}

/// Result of [`WizardSession::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Completed(Receipt),
    /// The final step failed validation
    Blocked(ErrorMap),
    /// Still editing an earlier step
    NotReady { index: usize },
    AlreadySubmitted(Receipt),
    /// The handler refused the form; the session is editable again
    Rejected(String),
}

/// Whether a field mutation was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Applied,
    Unchanged,
    /// The session is submitting or submitted
    Locked,
}

/// One user's pass through a wizard
#[derive(Debug, Clone)]
pub struct WizardSession {
    definition: Arc<WizardDefinition>,
    validator: StepValidator,
    index: usize,
    fields: FieldStore,
    errors: ErrorMap,
    phase: Phase,
    receipt: Option<Receipt>,
    rejection: Option<String>,
}

impl WizardSession {
    pub fn new(definition: Arc<WizardDefinition>) -> Self {
        let validator = StepValidator::new(Arc::clone(&definition));
        Self::with_validator(validator)
    }

    pub fn with_validator(validator: StepValidator) -> Self {
        let definition = Arc::clone(validator.definition());
        let fields = definition.initial_store();
        Self {
            definition,
            validator,
            index: 0,
            fields,
            errors: ErrorMap::new(),
            phase: Phase::Editing,
            receipt: None,
            rejection: None,
        }
    }

    pub fn definition(&self) -> &WizardDefinition {
        &self.definition
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_step(&self) -> &Step {
        &self.definition.steps()[self.index]
    }

    pub fn is_last_step(&self) -> bool {
        self.index == self.definition.last_index()
    }

    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }

    /// Errors from the most recent forward attempt
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == Phase::Submitted
    }

    pub fn receipt(&self) -> Option<&Receipt> {
        self.receipt.as_ref()
    }

    /// Reason given by the handler for the last rejected submission
    pub fn rejection(&self) -> Option<&str> {
        self.rejection.as_deref()
    }

    /// Completion percentage shown by the step indicator
    pub fn progress(&self) -> f64 {
        if self.is_submitted() {
            return 100.0;
        }
        (self.index + 1) as f64 / self.definition.steps().len() as f64 * 100.0
    }

    /// Whether the step indicator may jump to `target`
    pub fn can_jump_to(&self, target: usize) -> bool {
        self.phase == Phase::Editing && target < self.index
    }

    pub fn set_field(&mut self, name: &str, value: FieldValue) -> Result<Edit, FieldError> {
        if self.phase != Phase::Editing {
            return Ok(Edit::Locked);
        }
        let value = match self.definition.field(name) {
            Some(spec) => spec.normalize(value),
            None => value,
        };
        if !self.fields.set(name, value)? {
            return Ok(Edit::Unchanged);
        }
        self.reset_dependents(name)?;
        Ok(Edit::Applied)
    }

    pub fn add_to_collection(&mut self, name: &str, item: &str) -> Result<Edit, FieldError> {
        if self.phase != Phase::Editing {
            return Ok(Edit::Locked);
        }
        Ok(edit(self.fields.add_to_collection(name, item)?))
    }

    pub fn remove_from_collection(&mut self, name: &str, item: &str) -> Result<Edit, FieldError> {
        if self.phase != Phase::Editing {
            return Ok(Edit::Locked);
        }
        Ok(edit(self.fields.remove_from_collection(name, item)?))
    }

    /// Append an entry to an items field. Entries with a blank title or
    /// description are ignored.
    pub fn add_item(
        &mut self,
        name: &str,
        title: &str,
        description: &str,
        priority: Priority,
    ) -> Result<Edit, FieldError> {
        if self.phase != Phase::Editing {
            return Ok(Edit::Locked);
        }
        Ok(edit(self.fields.add_item(name, title, description, priority)?.is_some()))
    }

    pub fn remove_item(&mut self, name: &str, id: &str) -> Result<Edit, FieldError> {
        if self.phase != Phase::Editing {
            return Ok(Edit::Locked);
        }
        Ok(edit(self.fields.remove_item(name, id)?))
    }

    /// Validate the current step and move forward if it passes
    pub fn go_next(&mut self) -> Advance {
        if self.phase != Phase::Editing {
            return Advance::Ignored;
        }

        let errors = self.validator.validate(self.index, &self.fields);
        if !errors.is_empty() {
            debug!(
                form = %self.definition.id,
                step = self.index,
                errors = errors.len(),
                "step blocked by validation"
            );
            self.errors = errors;
            return Advance::Blocked;
        }

        self.errors.clear();
        self.rejection = None;
        if self.is_last_step() {
            self.phase = Phase::Submitting;
            debug!(form = %self.definition.id, "ready to submit");
            return Advance::ReadyToSubmit;
        }

        let from = self.index;
        self.index = (self.index + 1).min(self.definition.last_index());
        debug!(form = %self.definition.id, from, to = self.index, "advanced");
        Advance::Moved { from, to: self.index }
    }

    /// Step back without validating. Returns whether the index moved.
    pub fn go_prev(&mut self) -> bool {
        if self.phase != Phase::Editing || self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.errors.clear();
        debug!(form = %self.definition.id, to = self.index, "went back");
        true
    }

    /// Return to an earlier, already-validated step
    pub fn jump_to(&mut self, target: usize) -> bool {
        if !self.can_jump_to(target) {
            return false;
        }
        self.index = target;
        self.errors.clear();
        debug!(form = %self.definition.id, to = target, "jumped");
        true
    }

    /// Run the submission handler
    ///
    /// From the last step this performs the final validation first. The
    /// session stays borrowed until the handler resolves, so a session can
    /// never have two submissions in flight.
    pub async fn submit(&mut self, handler: &dyn SubmissionHandler) -> Submission {
        match self.phase {
            Phase::Submitted => {
                if let Some(receipt) = &self.receipt {
                    return Submission::AlreadySubmitted(receipt.clone());
                }
            }
            Phase::Editing => {
                if !self.is_last_step() {
                    return Submission::NotReady { index: self.index };
                }
                if self.go_next() == Advance::Blocked {
                    return Submission::Blocked(self.errors.clone());
                }
            }
            Phase::Submitting => {}
        }

        info!(form = %self.definition.id, "submitting");
        match handler.submit(&self.definition, &self.fields).await {
            SubmissionOutcome::Accepted(receipt) => {
                self.phase = Phase::Submitted;
                self.receipt = Some(receipt.clone());
                Submission::Completed(receipt)
            }
            SubmissionOutcome::Rejected(reason) => {
                self.phase = Phase::Editing;
                self.rejection = Some(reason.clone());
                Submission::Rejected(reason)
            }
        }
    }

    /// Discard everything and start over at the first step
    pub fn reset(&mut self) {
        self.fields = self.definition.initial_store();
        self.index = 0;
        self.errors.clear();
        self.phase = Phase::Editing;
        self.receipt = None;
        self.rejection = None;
        debug!(form = %self.definition.id, "reset");
    }

    fn reset_dependents(&mut self, name: &str) -> Result<(), FieldError> {
        let Some(spec) = self.definition.field(name) else {
            return Ok(());
        };
        for dependent in &spec.resets {
            if let Some(dep) = self.definition.field(dependent) {
                self.fields.set(dependent, dep.default.clone())?;
            }
        }
        Ok(())
    }
}

fn edit(changed: bool) -> Edit {
    if changed {
        Edit::Applied
    } else {
        Edit::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::definition::Rule;
    use crate::wizard::field::FieldSpec;
    use crate::wizard::submission::{ManualClock, SimulatedSubmission};
    use async_trait::async_trait;
    use std::time::Duration;

    fn three_steps() -> Arc<WizardDefinition> {
        Arc::new(
            WizardDefinition::builder("demo", "Demo")
                .field(FieldSpec::text("name", "Name"))
                .field(FieldSpec::set("tags", "Tag"))
                .field(FieldSpec::text("category", "Category").resets(["subcategory"]))
                .field(FieldSpec::text("subcategory", "Subcategory"))
                .step(Step::new("One", "").fields(["name"]).rule(Rule::required("name")))
                .step(Step::new("Two", "").fields(["tags"]).rule(Rule::non_empty("tags")))
                .step(Step::new("Three", "").fields(["category", "subcategory"]))
                .build()
                .unwrap(),
        )
    }

    fn filled() -> WizardSession {
        let mut session = WizardSession::new(three_steps());
        session.set_field("name", "Ada".into()).unwrap();
        session.add_to_collection("tags", "x").unwrap();
        session
    }

    struct Refuse;

    #[async_trait]
    impl SubmissionHandler for Refuse {
        async fn submit(&self, _: &WizardDefinition, _: &FieldStore) -> SubmissionOutcome {
            SubmissionOutcome::Rejected("service unavailable".to_string())
        }
    }

    #[test]
    fn test_new_session_starts_editing_first_step() {
        let session = WizardSession::new(three_steps());
        assert_eq!(session.index(), 0);
        assert_eq!(session.phase(), Phase::Editing);
        assert!(session.errors().is_empty());
        assert_eq!(session.current_step().title, "One");
    }

    #[test]
    fn test_go_next_blocked_keeps_index() {
        let mut session = WizardSession::new(three_steps());
        assert_eq!(session.go_next(), Advance::Blocked);
        assert_eq!(session.index(), 0);
        assert_eq!(session.errors().get("name"), Some("Name is required"));
    }

    #[test]
    fn test_go_next_clears_errors_on_success() {
        let mut session = WizardSession::new(three_steps());
        session.go_next();
        session.set_field("name", "Ada".into()).unwrap();
        assert_eq!(session.go_next(), Advance::Moved { from: 0, to: 1 });
        assert!(session.errors().is_empty());
    }

    #[test]
    fn test_go_prev_is_unconditional() {
        let mut session = filled();
        session.go_next();
        session.go_next();
        assert_eq!(session.index(), 2);

        session.set_field("name", "".into()).unwrap();
        assert!(session.go_prev());
        assert_eq!(session.index(), 1);
        assert!(session.go_prev());
        assert!(!session.go_prev());
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn test_jump_only_backwards() {
        let mut session = filled();
        session.go_next();
        session.go_next();
        assert!(!session.jump_to(2));
        assert!(!session.jump_to(5));
        assert!(session.jump_to(0));
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn test_dependent_field_is_reset() {
        let mut session = WizardSession::new(three_steps());
        session.set_field("category", "Design".into()).unwrap();
        session.set_field("subcategory", "Brand Identity".into()).unwrap();

        assert_eq!(session.set_field("category", "Design".into()).unwrap(), Edit::Unchanged);
        assert_eq!(session.fields().text("subcategory"), "Brand Identity");

        assert_eq!(session.set_field("category", "Writing".into()).unwrap(), Edit::Applied);
        assert_eq!(session.fields().text("subcategory"), "");
    }

    #[test]
    fn test_progress() {
        let mut session = filled();
        assert!((session.progress() - 100.0 / 3.0).abs() < 1e-9);
        session.go_next();
        session.go_next();
        assert!((session.progress() - 100.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_submit_from_last_step_completes() {
        let mut session = filled();
        session.go_next();
        session.go_next();

        let handler = SimulatedSubmission::new(Arc::new(ManualClock::new()), Duration::ZERO);
        let result = session.submit(&handler).await;

        assert!(matches!(result, Submission::Completed(_)));
        assert!(session.is_submitted());
        assert!(session.receipt().is_some());
        assert_eq!(session.progress(), 100.0);
    }

    #[tokio::test]
    async fn test_submit_before_last_step_is_not_ready() {
        let mut session = filled();
        let handler = SimulatedSubmission::new(Arc::new(ManualClock::new()), Duration::ZERO);
        assert_eq!(session.submit(&handler).await, Submission::NotReady { index: 0 });
        assert_eq!(session.phase(), Phase::Editing);
    }

    #[tokio::test]
    async fn test_submitted_session_is_locked_until_reset() {
        let mut session = filled();
        session.go_next();
        session.go_next();
        let handler = SimulatedSubmission::new(Arc::new(ManualClock::new()), Duration::ZERO);
        session.submit(&handler).await;

        let snapshot = session.fields().clone();
        assert_eq!(session.set_field("name", "Bob".into()).unwrap(), Edit::Locked);
        assert_eq!(session.add_to_collection("tags", "y").unwrap(), Edit::Locked);
        assert_eq!(session.remove_from_collection("tags", "x").unwrap(), Edit::Locked);
        assert_eq!(session.go_next(), Advance::Ignored);
        assert!(!session.go_prev());
        assert!(!session.jump_to(0));
        assert!(matches!(session.submit(&handler).await, Submission::AlreadySubmitted(_)));
        assert_eq!(session.fields(), &snapshot);
        assert_eq!(session.index(), 2);

        session.reset();
        assert_eq!(session.phase(), Phase::Editing);
        assert_eq!(session.index(), 0);
        assert_eq!(session.fields().text("name"), "");
        assert!(session.receipt().is_none());
    }

    #[tokio::test]
    async fn test_rejected_submission_returns_to_editing() {
        let mut session = filled();
        session.go_next();
        session.go_next();

        let result = session.submit(&Refuse).await;
        assert_eq!(result, Submission::Rejected("service unavailable".to_string()));
        assert_eq!(session.phase(), Phase::Editing);
        assert_eq!(session.index(), 2);
        assert_eq!(session.rejection(), Some("service unavailable"));
        assert_eq!(session.set_field("name", "Bob".into()).unwrap(), Edit::Applied);
    }

    #[tokio::test]
    async fn test_submit_blocked_by_final_step_errors() {
        let def = Arc::new(
            WizardDefinition::builder("one", "One")
                .field(FieldSpec::flag("terms", "Terms"))
                .step(Step::new("Pay", "").rule(Rule::accepted("terms")))
                .build()
                .unwrap(),
        );
        let mut session = WizardSession::new(def);
        let handler = SimulatedSubmission::new(Arc::new(ManualClock::new()), Duration::ZERO);

        match session.submit(&handler).await {
            Submission::Blocked(errors) => assert!(errors.contains("terms")),
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(session.phase(), Phase::Editing);
    }
}
