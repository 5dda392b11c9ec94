//! `action`: run as a GitHub Actions step.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use pr_template_check::action::{ActionOutcome, ActionRunner};
use pr_template_check::config::{Config, PartialConfig};
use pr_template_check::diagnostics::Diagnostics;
use pr_template_check::event::ActionContext;
use pr_template_check::github::GitHubClient;
use pr_template_check::paths::CONFIG_FILE;

/// Run the action. Returns false when the step should fail.
pub fn cmd_action(config_path: Option<&Path>, diagnostics: &dyn Diagnostics) -> bool {
    match run(config_path, diagnostics) {
        Ok(outcome) => match outcome {
            ActionOutcome::Failed { message, .. } => {
                set_failed(&message);
                false
            }
            _ => true,
        },
        Err(e) => {
            set_failed(&format!("Action failed: {:#}", e));
            false
        }
    }
}

fn run(config_path: Option<&Path>, diagnostics: &dyn Diagnostics) -> Result<ActionOutcome> {
    let workspace = std::env::var("GITHUB_WORKSPACE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
    let config = load_config(config_path, &workspace, diagnostics)?;

    let client = GitHubClient::from_env()?;
    diagnostics.debug(&format!("Using GitHub API at {}", client.api_url()));

    let context = ActionContext::from_env()?;
    ActionRunner::new(&config, &client, workspace, diagnostics).run(&context)
}

/// Config file (if any), then action inputs.
fn load_config(
    config_path: Option<&Path>,
    workspace: &Path,
    diagnostics: &dyn Diagnostics,
) -> Result<Config> {
    let file_layer = match config_path {
        Some(path) => PartialConfig::load_from(path)?,
        None => PartialConfig::load_optional(&workspace.join(CONFIG_FILE))?,
    };
    let input_layer = PartialConfig::from_env(diagnostics)?;

    Config::resolve([file_layer, input_layer]).context("Invalid action configuration")
}

/// Report the step failure, as an error annotation when running on a runner.
fn set_failed(message: &str) {
    if std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true") {
        println!("::error::{}", message.replace('\n', "%0A"));
    } else {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }
}
