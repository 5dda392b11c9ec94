//! CLI argument definitions for pr-template-check.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pr-template-check")]
#[command(version)]
#[command(about = "Check pull request descriptions against the PR template", long_about = None)]
#[command(
    after_help = "EXAMPLES:\n    pr-template-check check --description-file body.md --title \"PROJ-1 Fix login\"\n    pr-template-check sections .github/PULL_REQUEST_TEMPLATE.md\n    pr-template-check action            Run as a GitHub Action step"
)]
pub struct Cli {
    /// Suppress all non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Show debug diagnostics and build details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a PR description locally
    ///
    /// Exits with status 1 when the description does not comply.
    Check(CheckArgs),
    /// Run as a GitHub Actions step
    ///
    /// Reads the pull request event and `INPUT_*` variables from the runner,
    /// then comments, labels and creates a check run on the pull request.
    Action {
        /// Project config file
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
    /// Show how a markdown file splits into sections
    Sections {
        /// Markdown file to parse (`-` for stdin)
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show version information (with --verbose, build details)
    Version,
    /// Generate shell completion script
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Generate man page
    Man {
        /// Output directory for the man page
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// PR description text
    #[arg(long, value_name = "TEXT", conflicts_with = "description_file")]
    pub description: Option<String>,

    /// File holding the PR description (`-` for stdin)
    #[arg(long, value_name = "PATH")]
    pub description_file: Option<PathBuf>,

    /// PR title, checked against the ticket pattern
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub title: String,

    /// Compare against this template instead of discovering one
    #[arg(long, value_name = "PATH", conflicts_with = "no_template")]
    pub template_file: Option<PathBuf>,

    /// Check required section names only, without a template
    #[arg(long)]
    pub no_template: bool,

    /// Repository root to discover the template and config in
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Required section name (can be specified multiple times)
    #[arg(long = "required-section", value_name = "NAME")]
    pub required_sections: Vec<String>,

    /// Regex the title must match
    #[arg(long, value_name = "REGEX")]
    pub jira_pattern: Option<String>,

    /// Require at least one checked item in template task lists
    #[arg(long)]
    pub require_task_completion: bool,

    /// Project config file (default: <root>/.github/pr-template-check.md)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,
}
