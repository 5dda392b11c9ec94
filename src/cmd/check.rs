//! `check`: validate a PR description from the command line.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use pr_template_check::checker::{TemplateChecker, ValidationResult};
use pr_template_check::config::{Config, PartialConfig};
use pr_template_check::diagnostics::Diagnostics;
use pr_template_check::paths::CONFIG_FILE;
use pr_template_check::report::ConsoleReporter;
use pr_template_check::template_source::{FileTemplateSource, StaticTemplateSource, TemplateSource};

use super::read_input;
use crate::cli::CheckArgs;

/// Run the check. Returns whether the description is valid.
pub fn cmd_check(args: &CheckArgs, diagnostics: &dyn Diagnostics) -> Result<bool> {
    let description = load_description(args)?;
    let config = resolve_config(args)?;

    let template = if config.enforce_template {
        template_source(args, &config, diagnostics)?
            .fetch()?
            .filter(|t| !t.trim().is_empty())
    } else {
        None
    };
    if config.enforce_template && template.is_none() {
        diagnostics.warn("No PR template found. Checking required sections only.");
    }

    let checker = TemplateChecker::new(config.checker_options(template));
    let result = checker.validate_with(&description, &args.title, diagnostics);

    print_result(&result, args.json)?;
    Ok(result.is_valid())
}

fn load_description(args: &CheckArgs) -> Result<String> {
    match (&args.description, &args.description_file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => read_input(path),
        (None, None) => anyhow::bail!("Provide --description or --description-file"),
    }
}

fn config_path(args: &CheckArgs) -> PathBuf {
    args.config
        .clone()
        .unwrap_or_else(|| args.root.join(CONFIG_FILE))
}

/// File layer, then command-line flags.
fn resolve_config(args: &CheckArgs) -> Result<Config> {
    let path = config_path(args);
    let file_layer = if args.config.is_some() {
        PartialConfig::load_from(&path)?
    } else {
        PartialConfig::load_optional(&path)?
    };

    Config::resolve([file_layer, cli_layer(args)])
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}

fn cli_layer(args: &CheckArgs) -> PartialConfig {
    let enforce_template = if args.no_template {
        Some(false)
    } else if args.template_file.is_some() {
        Some(true)
    } else {
        None
    };

    PartialConfig {
        required_sections: (!args.required_sections.is_empty())
            .then(|| args.required_sections.clone()),
        jira_pattern: args.jira_pattern.clone(),
        enforce_template,
        require_task_completion: args.require_task_completion.then_some(true),
        ..Default::default()
    }
}

fn template_source<'a>(
    args: &CheckArgs,
    config: &Config,
    diagnostics: &'a dyn Diagnostics,
) -> Result<Box<dyn TemplateSource + 'a>> {
    if let Some(path) = &args.template_file {
        let template = read_template(path)?;
        return Ok(Box::new(StaticTemplateSource::new(Some(template))));
    }

    Ok(Box::new(FileTemplateSource::new(
        &args.root,
        config.template_paths.clone(),
        diagnostics,
    )))
}

fn read_template(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read template {}", path.display()))
}

fn print_result(result: &ValidationResult, json: bool) -> Result<()> {
    if json {
        let output =
            serde_json::to_string_pretty(result).context("Failed to serialize result")?;
        println!("{}", output);
    } else {
        ConsoleReporter.print(result);
    }
    Ok(())
}
