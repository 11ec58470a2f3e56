//! Interactive terminal driver for a wizard session
//!
//! Prompts every field on the current step, then offers a navigation menu.
//! All state changes go through [`WizardSession`], so the prompts can never
//! skip validation or reach a step the user has not earned.

use chrono::NaiveDate;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::progress_bar;
use crate::render::Renderer;
use crate::wizard::{Advance, FieldKind, FieldSpec, FieldValue, Item, Priority, WizardSession};

/// Choice offered after a step's fields are filled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Next,
    Back,
    Jump,
    Cancel,
}

/// How an interactive run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    /// The last step validated; the session is ready to submit
    Ready,
    Cancelled,
}

pub struct FormPrompter<'a> {
    theme: ColorfulTheme,
    renderer: &'a Renderer,
}

impl<'a> FormPrompter<'a> {
    pub fn new(renderer: &'a Renderer) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            renderer,
        }
    }

    /// Drive the session until it is ready to submit or the user cancels
    pub fn run(&self, session: &mut WizardSession) -> Result<PromptOutcome> {
        println!();
        println!(
            "{} {}",
            style("◆").cyan(),
            style(&session.definition().title).bold()
        );

        loop {
            self.print_header(session);
            self.fill_step(session)?;

            if session.is_last_step() {
                let review = self
                    .renderer
                    .review(session.definition(), session.fields())
                    .into_diagnostic()?;
                println!();
                println!("{}", style("Review").bold().underlined());
                println!("{}", review);
            }

            match self.menu(session)? {
                MenuChoice::Next => match session.go_next() {
                    Advance::Moved { .. } => {}
                    Advance::ReadyToSubmit => return Ok(PromptOutcome::Ready),
                    Advance::Blocked => self.print_errors(session),
                    Advance::Ignored => return Ok(PromptOutcome::Cancelled),
                },
                MenuChoice::Back => {
                    session.go_prev();
                }
                MenuChoice::Jump => {
                    if let Some(target) = self.pick_step(session)? {
                        session.jump_to(target);
                    }
                }
                MenuChoice::Cancel => return Ok(PromptOutcome::Cancelled),
            }
        }
    }

    fn print_header(&self, session: &WizardSession) {
        let step = session.current_step();
        println!();
        println!(
            "{} Step {} of {}: {}",
            progress_bar(session.progress(), 20),
            session.index() + 1,
            session.definition().steps().len(),
            style(&step.title).bold()
        );
        if !step.description.is_empty() {
            println!("{}", style(&step.description).dim());
        }
        println!("{}", style("─".repeat(50)).dim());
    }

    fn print_errors(&self, session: &WizardSession) {
        println!();
        for (field, message) in session.errors().iter() {
            println!(
                "{} {}: {}",
                style("✗").red(),
                style(session.definition().label(field)).bold(),
                style(message).red()
            );
        }
    }

    /// Prompt each field on the current step, writing answers back immediately
    fn fill_step(&self, session: &mut WizardSession) -> Result<()> {
        let names = session.current_step().fields.clone();
        for name in names {
            let Some(spec) = session.definition().field(&name).cloned() else {
                continue;
            };
            let current = session
                .fields()
                .get(&name)
                .cloned()
                .unwrap_or_else(|| FieldValue::empty(spec.kind));
            let choices = spec
                .options
                .resolve(session.fields())
                .map(<[String]>::to_vec);

            let value = self.prompt_field(&spec, &current, choices.as_deref())?;
            session.set_field(&name, value).into_diagnostic()?;
        }
        Ok(())
    }

    fn prompt_field(
        &self,
        spec: &FieldSpec,
        current: &FieldValue,
        choices: Option<&[String]>,
    ) -> Result<FieldValue> {
        let prompt = self.format_prompt(spec);

        match (spec.kind, choices) {
            (FieldKind::Text, Some(choices)) if !choices.is_empty() => {
                let current = current.as_text().unwrap_or_default();
                let default_idx = choices.iter().position(|c| c == current).unwrap_or(0);
                let selection = Select::with_theme(&self.theme)
                    .with_prompt(&prompt)
                    .items(choices)
                    .default(default_idx)
                    .interact()
                    .into_diagnostic()?;
                Ok(FieldValue::Text(choices[selection].clone()))
            }

            (FieldKind::Text, _) => {
                let value: String = Input::with_theme(&self.theme)
                    .with_prompt(&prompt)
                    .with_initial_text(current.as_text().unwrap_or_default())
                    .allow_empty(true)
                    .interact_text()
                    .into_diagnostic()?;
                Ok(FieldValue::Text(value))
            }

            (FieldKind::Flag, _) => {
                let items = &["Yes", "No"];
                let default_idx = if current.as_flag().unwrap_or(false) { 0 } else { 1 };
                let selection = Select::with_theme(&self.theme)
                    .with_prompt(&prompt)
                    .items(items)
                    .default(default_idx)
                    .interact()
                    .into_diagnostic()?;
                Ok(FieldValue::Flag(selection == 0))
            }

            (FieldKind::Set, Some(choices)) if !choices.is_empty() => {
                let selected = current.as_set().unwrap_or_default();
                // Earlier free entries stay selectable
                let mut options = choices.to_vec();
                for item in selected {
                    if !options.contains(item) {
                        options.push(item.clone());
                    }
                }
                let defaults: Vec<bool> = options.iter().map(|c| selected.contains(c)).collect();
                let picked = MultiSelect::with_theme(&self.theme)
                    .with_prompt(format!("{} (space to toggle)", prompt))
                    .items(&options)
                    .defaults(&defaults)
                    .interact()
                    .into_diagnostic()?;
                let mut values: Vec<String> =
                    picked.into_iter().map(|i| options[i].clone()).collect();

                if spec.allow_other {
                    let other: String = Input::with_theme(&self.theme)
                        .with_prompt(format!("Other {} (comma-separated)", spec.label.to_lowercase()))
                        .allow_empty(true)
                        .interact_text()
                        .into_diagnostic()?;
                    values.extend(split_list(&other));
                }
                Ok(FieldValue::Set(values))
            }

            (FieldKind::Set, _) => {
                let initial = current.as_set().unwrap_or_default().join(", ");
                let value: String = Input::with_theme(&self.theme)
                    .with_prompt(format!("{} (comma-separated)", prompt))
                    .with_initial_text(initial)
                    .allow_empty(true)
                    .interact_text()
                    .into_diagnostic()?;
                Ok(FieldValue::Set(split_list(&value)))
            }

            (FieldKind::Items, _) => {
                let items = current.as_items().unwrap_or_default().to_vec();
                self.edit_items(&prompt, items).map(FieldValue::Items)
            }

            (FieldKind::Date, _) => {
                let initial = current
                    .as_date()
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                let value: String = Input::with_theme(&self.theme)
                    .with_prompt(format!("{} (YYYY-MM-DD)", prompt))
                    .with_initial_text(initial)
                    .allow_empty(true)
                    .validate_with(|input: &String| -> Result<(), &str> {
                        if input.trim().is_empty() || parse_date(input).is_some() {
                            Ok(())
                        } else {
                            Err("Use the YYYY-MM-DD format")
                        }
                    })
                    .interact_text()
                    .into_diagnostic()?;
                Ok(FieldValue::Date(parse_date(&value)))
            }
        }
    }

    /// Add and remove entries until the user is done
    fn edit_items(&self, prompt: &str, mut items: Vec<Item>) -> Result<Vec<Item>> {
        loop {
            println!("{}", style(prompt).bold());
            if items.is_empty() {
                println!("  {}", style("(none)").dim());
            }
            for item in &items {
                println!("  • {}: {}", item, style(&item.description).dim());
            }

            let mut actions = vec!["Add an entry"];
            if !items.is_empty() {
                actions.push("Remove an entry");
            }
            actions.push("Done");
            let action = Select::with_theme(&self.theme)
                .items(&actions)
                .default(actions.len() - 1)
                .interact()
                .into_diagnostic()?;

            match actions[action] {
                "Add an entry" => {
                    let title: String = Input::with_theme(&self.theme)
                        .with_prompt("Title")
                        .allow_empty(true)
                        .interact_text()
                        .into_diagnostic()?;
                    let description: String = Input::with_theme(&self.theme)
                        .with_prompt("Description")
                        .allow_empty(true)
                        .interact_text()
                        .into_diagnostic()?;
                    let priority = Select::with_theme(&self.theme)
                        .with_prompt("Priority")
                        .items(&Priority::ALL.map(|p| p.as_str()))
                        .default(1)
                        .interact()
                        .into_diagnostic()?;
                    match Item::new(&title, &description, Priority::ALL[priority]) {
                        Some(item) => items.push(item),
                        None => println!(
                            "{} An entry needs both a title and a description",
                            style("!").yellow()
                        ),
                    }
                }
                "Remove an entry" => {
                    let labels: Vec<String> = items.iter().map(Item::to_string).collect();
                    if let Some(i) = Select::with_theme(&self.theme)
                        .with_prompt("Remove")
                        .items(&labels)
                        .interact_opt()
                        .into_diagnostic()?
                    {
                        items.remove(i);
                    }
                }
                _ => return Ok(items),
            }
        }
    }

    fn format_prompt(&self, spec: &FieldSpec) -> String {
        match &spec.help {
            Some(help) => format!("{} ({})", spec.label, style(help).dim()),
            None => spec.label.clone(),
        }
    }

    fn menu(&self, session: &WizardSession) -> Result<MenuChoice> {
        let mut choices = vec![(
            if session.is_last_step() { "Submit" } else { "Next" },
            MenuChoice::Next,
        )];
        if session.index() > 0 {
            choices.push(("Back", MenuChoice::Back));
            choices.push(("Jump to an earlier step", MenuChoice::Jump));
        }
        choices.push(("Cancel", MenuChoice::Cancel));

        let labels: Vec<&str> = choices.iter().map(|(label, _)| *label).collect();
        let selection = Select::with_theme(&self.theme)
            .items(&labels)
            .default(0)
            .interact()
            .into_diagnostic()?;
        Ok(choices[selection].1)
    }

    /// Offer only the steps the session will accept a jump to
    fn pick_step(&self, session: &WizardSession) -> Result<Option<usize>> {
        let targets: Vec<(usize, String)> = session
            .definition()
            .steps()
            .iter()
            .filter(|step| session.can_jump_to(step.index()))
            .map(|step| (step.index(), format!("{}. {}", step.index() + 1, step.title)))
            .collect();
        if targets.is_empty() {
            return Ok(None);
        }

        let labels: Vec<&str> = targets.iter().map(|(_, label)| label.as_str()).collect();
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Go to step")
            .items(&labels)
            .default(0)
            .interact_opt()
            .into_diagnostic()?;
        Ok(selection.map(|i| targets[i].0))
    }
}

fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2026-03-01 "),
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
        assert_eq!(parse_date("03/01/2026"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_split_list_trims_and_drops_blanks() {
        assert_eq!(split_list(" Rust, ,Go ,"), ["Rust", "Go"]);
        assert!(split_list("  ").is_empty());
    }
}
