//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    completions::CompletionsArgs, config::ConfigCommands, form::FormArgs, forms::FormsArgs,
    onboarding::OnboardingArgs, vendors::VendorsArgs,
};

#[derive(Parser)]
#[command(name = "bizc")]
#[command(author, version, about = "BizConnect business forms and vendor search")]
#[command(long_about = "Fill in BizConnect's multi-step forms from the terminal, interactively or from a YAML answers file, and search the vendor catalog.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format (default: config `default_format`, else auto)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl GlobalOpts {
    /// Resolve the output format against a configured default
    pub fn output_format(&self, configured: Option<&str>) -> OutputFormat {
        self.format
            .or_else(|| configured.and_then(|f| OutputFormat::from_str(f, true).ok()))
            .unwrap_or_default()
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a business (5 steps)
    Register(FormArgs),

    /// Post a project request (5 steps)
    Project(FormArgs),

    /// Check out the selected plan (2 steps)
    Checkout(FormArgs),

    /// Send a message to the BizConnect team
    Contact(FormArgs),

    /// Tell us about your BizConnect experience
    Feedback(FormArgs),

    /// List available forms and their steps
    Forms(FormsArgs),

    /// Search the vendor catalog
    Vendors(VendorsArgs),

    /// Show the onboarding tour or manage its seen flag
    Onboarding(OnboardingArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text for terminals, tables for lists
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::parse_from(["bizc", "-vv", "forms"]);
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn test_format_falls_back_to_config() {
        let cli = Cli::parse_from(["bizc", "forms"]);
        assert_eq!(cli.global.output_format(Some("json")), OutputFormat::Json);
        assert_eq!(cli.global.output_format(Some("bogus")), OutputFormat::Auto);
        assert_eq!(cli.global.output_format(None), OutputFormat::Auto);

        let cli = Cli::parse_from(["bizc", "--format", "yaml", "forms"]);
        assert_eq!(cli.global.output_format(Some("json")), OutputFormat::Yaml);
    }
}
