//! Wizard engine - typed fields, step validation, navigation and submission

pub mod answers;
pub mod definition;
pub mod field;
pub mod session;
pub mod submission;
pub mod validator;

pub use answers::{AnswerError, Answers};
pub use definition::{DefinitionError, Rule, Step, WizardBuilder, WizardDefinition};
pub use field::{
    FieldError, FieldKind, FieldSpec, FieldStore, FieldValue, Item, Options, Priority,
};
pub use session::{Advance, Edit, Phase, Submission, WizardSession};
pub use submission::{
    Clock, ManualClock, Receipt, SimulatedSubmission, SubmissionHandler, SubmissionOutcome,
    TokioClock,
};
pub use validator::{ErrorMap, StepValidator};
