//! `bizc config` command - Configuration inspection

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration values
    Show(ShowArgs),

    /// Show the path to the global configuration file
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    (
        "submit_delay_ms",
        "Simulated submission delay in milliseconds (env BIZC_SUBMIT_DELAY_MS)",
    ),
    (
        "state_dir",
        "Directory for persisted state such as the onboarding flag (env BIZC_STATE_DIR)",
    ),
    (
        "default_format",
        "Default output format: auto, yaml, json, tsv, csv, md, id (env BIZC_FORMAT)",
    ),
];

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, global),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();

    if let Some(key) = &args.key {
        return match get_config_value(&config, key) {
            Some(v) => {
                println!("{}", v);
                Ok(())
            }
            None if VALID_KEYS.iter().any(|(k, _)| k == key) => {
                Err(miette::miette!("Key '{}' is not set", key))
            }
            None => Err(miette::miette!(
                help = "run `bizc config keys` to list valid keys",
                "Unknown configuration key '{}'",
                key
            )),
        };
    }

    match global.output_format(config.default_format.as_deref()) {
        OutputFormat::Yaml => print!("{}", serde_yml::to_string(&config).into_diagnostic()?),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config).into_diagnostic()?)
        }
        _ => {
            println!("{}", style("Effective Configuration").bold().underlined());
            println!();
            for (key, _) in VALID_KEYS {
                print_config_value(key, get_config_value(&config, key).as_deref());
            }
            println!();
            println!("{}", style("Config Sources (in priority order):").dim());
            println!("  1. Environment variables (BIZC_SUBMIT_DELAY_MS, BIZC_STATE_DIR, BIZC_FORMAT)");
            println!("  2. Global config (~/.config/bizconnect/config.yaml)");
        }
    }
    Ok(())
}

fn run_path() -> Result<()> {
    let path = Config::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine config directory"))?;
    println!("{}", path.display());
    Ok(())
}

fn run_keys() -> Result<()> {
    for (key, description) in VALID_KEYS {
        println!("{:<16} {}", style(key).cyan(), description);
    }
    Ok(())
}

fn get_config_value(config: &Config, key: &str) -> Option<String> {
    match key {
        "submit_delay_ms" => config.submit_delay_ms.map(|ms| ms.to_string()),
        "state_dir" => config.state_dir().map(|p| p.display().to_string()),
        "default_format" => config.default_format.clone(),
        _ => None,
    }
}

fn print_config_value(key: &str, value: Option<&str>) {
    match value {
        Some(v) => println!("  {} = {}", style(key).cyan(), v),
        None => println!("  {} = {}", style(key).cyan(), style("(not set)").dim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_get_config_value() {
        let config = Config {
            submit_delay_ms: Some(0),
            state_dir: Some(PathBuf::from("/tmp/bizc")),
            default_format: None,
        };
        assert_eq!(get_config_value(&config, "submit_delay_ms").as_deref(), Some("0"));
        assert_eq!(get_config_value(&config, "state_dir").as_deref(), Some("/tmp/bizc"));
        assert_eq!(get_config_value(&config, "default_format"), None);
        assert_eq!(get_config_value(&config, "editor"), None);
    }
}
