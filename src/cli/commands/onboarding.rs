//! `bizc onboarding` - the first-run tour and its persisted flag

use console::style;
use dialoguer::{theme::ColorfulTheme, Select};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::helpers::require_state_dir;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::onboarding::slides;
use crate::core::{Config, OnboardingStore};

#[derive(clap::Args, Debug)]
pub struct OnboardingArgs {
    /// Clear the seen flag so the tour is offered again
    #[arg(long, conflicts_with = "status")]
    pub reset: bool,

    /// Report whether the tour has been seen
    #[arg(long)]
    pub status: bool,
}

#[derive(Debug, Serialize)]
struct OnboardingStatus {
    seen: bool,
    state_file: String,
}

pub fn run(args: OnboardingArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let format = global.output_format(config.default_format.as_deref());
    let dir = require_state_dir(&config)?;
    let mut store = OnboardingStore::open(&dir).into_diagnostic()?;

    if args.reset {
        store.reset().into_diagnostic()?;
        if !global.quiet {
            println!("{} Onboarding will be shown again", style("✓").green());
        }
        return Ok(());
    }

    if args.status {
        let status = OnboardingStatus {
            seen: store.has_seen(),
            state_file: store.path().display().to_string(),
        };
        match format {
            OutputFormat::Yaml => print!("{}", serde_yml::to_string(&status).into_diagnostic()?),
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&status).into_diagnostic()?)
            }
            _ => println!("{}", if status.seen { "seen" } else { "not seen" }),
        }
        return Ok(());
    }

    if console::user_attended() {
        step_through()?;
    } else {
        print_all();
    }
    store.mark_seen().into_diagnostic()?;
    Ok(())
}

/// One slide at a time, with Next / Skip like the in-app carousel
fn step_through() -> Result<()> {
    let theme = ColorfulTheme::default();
    let slides = slides();
    for (i, slide) in slides.iter().enumerate() {
        println!();
        println!(
            "{} {}",
            style(format!("{}/{}", i + 1, slides.len())).dim(),
            style(&slide.title).bold()
        );
        println!("{}", slide.description);

        let last = i + 1 == slides.len();
        let items: &[&str] = if last { &["Get Started"] } else { &["Next", "Skip"] };
        let choice = Select::with_theme(&theme)
            .items(items)
            .default(0)
            .interact()
            .into_diagnostic()?;
        if choice == 1 {
            break;
        }
    }
    Ok(())
}

fn print_all() {
    for (i, slide) in slides().iter().enumerate() {
        println!("{}. {}", i + 1, slide.title);
        println!("   {}", slide.description);
    }
}
