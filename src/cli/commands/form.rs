//! `bizc register|project|checkout|contact|feedback` - run one form end to end

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::cli::diagnostics::FormValidationError;
use crate::cli::helpers::require_state_dir;
use crate::cli::prompt::{FormPrompter, PromptOutcome};
use crate::cli::table::Table;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, OnboardingStore};
use crate::forms::FormKind;
use crate::render::Renderer;
use crate::wizard::{
    Advance, Answers, FieldStore, Receipt, SimulatedSubmission, Submission, WizardSession,
};

#[derive(clap::Args, Debug)]
pub struct FormArgs {
    /// YAML file of field answers; skips the interactive prompts
    #[arg(long, short = 'a')]
    pub answers: Option<PathBuf>,

    /// Validate every step and print the review without submitting
    #[arg(long)]
    pub no_submit: bool,
}

/// Structured output of a completed form
#[derive(Debug, Serialize)]
struct FormReport<'a> {
    form: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    receipt: Option<&'a Receipt>,
    fields: &'a FieldStore,
}

pub fn run(kind: FormKind, args: FormArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let format = global.output_format(config.default_format.as_deref());
    let renderer = Renderer::new().into_diagnostic()?;
    let definition = Arc::new(kind.definition().into_diagnostic()?);
    let mut session = WizardSession::new(Arc::clone(&definition));

    if !global.quiet {
        onboarding_hint(&config);
    }

    if let Some(path) = &args.answers {
        fill_from_answers(&mut session, path)?;
    } else if console::user_attended() {
        if FormPrompter::new(&renderer).run(&mut session)? == PromptOutcome::Cancelled {
            if !global.quiet {
                eprintln!("{} Cancelled, nothing was submitted", style("!").yellow());
            }
            return Ok(());
        }
    } else {
        return Err(miette::miette!(
            help = "pass --answers FILE to fill the form without a terminal",
            "No terminal attached for interactive prompts"
        ));
    }

    if args.no_submit {
        return print_review(&session, format, &renderer);
    }

    let delay = config.submit_delay(kind);
    submit(kind, &mut session, delay, global, format, &renderer)
}

fn submit(
    kind: FormKind,
    session: &mut WizardSession,
    delay: Duration,
    global: &GlobalOpts,
    format: OutputFormat,
    renderer: &Renderer,
) -> Result<()> {
    let handler = SimulatedSubmission::with_delay(delay);
    if !global.quiet {
        eprintln!(
            "{} Submitting {}...",
            style("◆").cyan(),
            session.definition().title
        );
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .into_diagnostic()?;
    let result = runtime.block_on(session.submit(&handler));

    match result {
        Submission::Completed(receipt) => {
            info!(form = %kind, reference = %receipt.reference, "form submitted");
            print_receipt(kind, session, &receipt, format, renderer)?;
            if kind.clears_after_submit() {
                session.reset();
                debug!(form = %kind, "cleared for the next response");
            }
            Ok(())
        }
        Submission::Blocked(errors) => {
            Err(FormValidationError::new(session.definition(), session.index(), &errors).into())
        }
        Submission::Rejected(reason) => Err(miette::miette!("Submission rejected: {}", reason)),
        Submission::NotReady { index } => Err(miette::miette!(
            "Form is still on step {} and cannot be submitted",
            index + 1
        )),
        Submission::AlreadySubmitted(receipt) => Err(miette::miette!(
            "Form was already submitted as {}",
            receipt.reference
        )),
    }
}

/// Apply an answers file, then advance through every step
fn fill_from_answers(session: &mut WizardSession, path: &Path) -> Result<()> {
    let answers = Answers::from_path(path).into_diagnostic()?;
    debug!(path = %path.display(), count = answers.len(), "applying answers");
    answers.apply(session).into_diagnostic()?;

    loop {
        let index = session.index();
        match session.go_next() {
            Advance::Moved { .. } => continue,
            Advance::ReadyToSubmit => return Ok(()),
            Advance::Blocked => {
                return Err(
                    FormValidationError::new(session.definition(), index, session.errors()).into(),
                )
            }
            Advance::Ignored => return Err(miette::miette!("Form is not accepting input")),
        }
    }
}

fn print_review(session: &WizardSession, format: OutputFormat, renderer: &Renderer) -> Result<()> {
    let report = FormReport {
        form: &session.definition().id,
        status: "validated",
        receipt: None,
        fields: session.fields(),
    };
    match format {
        OutputFormat::Yaml => print!("{}", serde_yml::to_string(&report).into_diagnostic()?),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?)
        }
        OutputFormat::Tsv | OutputFormat::Csv | OutputFormat::Md => {
            print!("{}", review_table(session).render(format)?)
        }
        _ => print!(
            "{}",
            renderer
                .review(session.definition(), session.fields())
                .into_diagnostic()?
        ),
    }
    Ok(())
}

/// One row per field, in step order, with masked values hidden
fn review_table(session: &WizardSession) -> Table {
    let definition = session.definition();
    let mut table = Table::new(&["field", "step", "label", "value"]);
    for step in definition.steps() {
        for name in &step.fields {
            let Some(spec) = definition.field(name) else {
                continue;
            };
            let value = session
                .fields()
                .get(name)
                .map(|value| spec.display(value))
                .unwrap_or_default();
            table.push_row(vec![
                name.clone(),
                (step.index() + 1).to_string(),
                spec.label.clone(),
                value,
            ]);
        }
    }
    table
}

fn print_receipt(
    kind: FormKind,
    session: &WizardSession,
    receipt: &Receipt,
    format: OutputFormat,
    renderer: &Renderer,
) -> Result<()> {
    let report = FormReport {
        form: &session.definition().id,
        status: "submitted",
        receipt: Some(receipt),
        fields: session.fields(),
    };
    match format {
        OutputFormat::Yaml => print!("{}", serde_yml::to_string(&report).into_diagnostic()?),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?)
        }
        OutputFormat::Id => println!("{}", receipt.reference),
        OutputFormat::Tsv | OutputFormat::Csv | OutputFormat::Md => {
            let mut table = Table::new(&["reference", "form", "submitted_at"]);
            table.push_row(vec![
                receipt.reference.clone(),
                receipt.form.clone(),
                receipt.submitted_at.to_rfc3339(),
            ]);
            print!("{}", table.render(format)?);
        }
        _ => print!("{}", renderer.receipt(kind, receipt).into_diagnostic()?),
    }
    Ok(())
}

/// Point first-time users at the tour; never fails the command
fn onboarding_hint(config: &Config) {
    let Ok(dir) = require_state_dir(config) else {
        return;
    };
    match OnboardingStore::open(&dir) {
        Ok(store) if !store.has_seen() => eprintln!(
            "{} New to BizConnect? Run {} for a quick tour.",
            style("i").blue(),
            style("bizc onboarding").cyan()
        ),
        Ok(_) => {}
        Err(e) => debug!(error = %e, "skipping onboarding hint"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_table_follows_steps_and_masks() {
        let definition = Arc::new(FormKind::Checkout.definition().unwrap());
        let mut session = WizardSession::new(definition);
        session.set_field("fullName", "Ada Lovelace".into()).unwrap();
        session.set_field("cardNumber", "4242424242421234".into()).unwrap();

        let out = review_table(&session).render(OutputFormat::Tsv).unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("field\tstep\tlabel\tvalue"));
        assert!(out.contains("fullName\t1\t"));
        assert!(out.contains("•••• 1234"));
        assert!(!out.contains("4242424242421234"));
    }
}
