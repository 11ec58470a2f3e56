//! `bizc forms` - list forms and describe their steps

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::table::{print_list, Table};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::forms::FormKind;
use crate::wizard::{FieldSpec, Options, WizardDefinition};

#[derive(clap::Args, Debug)]
pub struct FormsArgs {
    /// Describe a single form in detail
    #[arg(value_enum)]
    pub name: Option<FormKind>,
}

#[derive(Debug, Serialize)]
struct FormSummary {
    name: String,
    title: String,
    steps: usize,
    fields: usize,
    reference_prefix: String,
}

#[derive(Debug, Serialize)]
struct FieldDetail {
    name: String,
    label: String,
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    choices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    choices_depend_on: Option<String>,
}

#[derive(Debug, Serialize)]
struct StepDetail {
    number: usize,
    title: String,
    description: String,
    fields: Vec<FieldDetail>,
}

#[derive(Debug, Serialize)]
struct FormDetail {
    name: String,
    title: String,
    reference_prefix: String,
    steps: Vec<StepDetail>,
}

pub fn run(args: FormsArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let format = global.output_format(config.default_format.as_deref());

    match args.name {
        Some(kind) => describe(kind, format),
        None => list(format),
    }
}

fn list(format: OutputFormat) -> Result<()> {
    let summaries = FormKind::all()
        .iter()
        .map(|kind| {
            let def = kind.definition().into_diagnostic()?;
            Ok(FormSummary {
                name: kind.as_str().to_string(),
                title: def.title.clone(),
                steps: def.steps().len(),
                fields: def.fields().len(),
                reference_prefix: def.reference_prefix.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    print_list(&summaries, format, |items| {
        let mut table = Table::new(&["name", "title", "steps", "fields", "prefix"]);
        for s in items {
            table.push_row(vec![
                s.name.clone(),
                s.title.clone(),
                s.steps.to_string(),
                s.fields.to_string(),
                s.reference_prefix.clone(),
            ]);
        }
        table
    })
}

fn describe(kind: FormKind, format: OutputFormat) -> Result<()> {
    let def = kind.definition().into_diagnostic()?;
    let detail = detail(kind, &def);

    match format {
        OutputFormat::Yaml => print!("{}", serde_yml::to_string(&detail).into_diagnostic()?),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&detail).into_diagnostic()?)
        }
        OutputFormat::Id => {
            for step in &detail.steps {
                for field in &step.fields {
                    println!("{}", field.name);
                }
            }
        }
        _ => {
            println!(
                "{} {} ({} steps)",
                style("◆").cyan(),
                style(&detail.title).bold(),
                detail.steps.len()
            );
            for step in &detail.steps {
                println!();
                println!("{}. {}", step.number, style(&step.title).bold());
                println!("   {}", style(&step.description).dim());
                for field in &step.fields {
                    let mut line = format!("   - {} [{}] {}", field.name, field.kind, field.label);
                    if !field.choices.is_empty() {
                        line.push_str(&format!(": {}", field.choices.join(" | ")));
                    }
                    if let Some(parent) = &field.choices_depend_on {
                        line.push_str(&format!(" (choices depend on {})", parent));
                    }
                    println!("{}", line);
                }
            }
        }
    }
    Ok(())
}

fn detail(kind: FormKind, def: &WizardDefinition) -> FormDetail {
    FormDetail {
        name: kind.as_str().to_string(),
        title: def.title.clone(),
        reference_prefix: def.reference_prefix.clone(),
        steps: def
            .steps()
            .iter()
            .map(|step| StepDetail {
                number: step.index() + 1,
                title: step.title.clone(),
                description: step.description.clone(),
                fields: step
                    .fields
                    .iter()
                    .filter_map(|name| def.field(name))
                    .map(field_detail)
                    .collect(),
            })
            .collect(),
    }
}

fn field_detail(spec: &FieldSpec) -> FieldDetail {
    let (choices, choices_depend_on) = match &spec.options {
        Options::None => (Vec::new(), None),
        Options::Fixed(choices) => (choices.clone(), None),
        Options::ByField { field, .. } => (Vec::new(), Some(field.clone())),
    };
    FieldDetail {
        name: spec.name.clone(),
        label: spec.label.clone(),
        kind: spec.kind.to_string(),
        help: spec.help.clone(),
        choices,
        choices_depend_on,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_covers_every_step_field() {
        let def = FormKind::Project.definition().unwrap();
        let detail = detail(FormKind::Project, &def);
        assert_eq!(detail.steps.len(), def.steps().len());
        let described: usize = detail.steps.iter().map(|s| s.fields.len()).sum();
        let declared: usize = def.steps().iter().map(|s| s.fields.len()).sum();
        assert_eq!(described, declared);

        let subcategory = detail
            .steps
            .iter()
            .flat_map(|s| &s.fields)
            .find(|f| f.name == "subcategory")
            .unwrap();
        assert_eq!(subcategory.choices_depend_on.as_deref(), Some("category"));
    }
}
