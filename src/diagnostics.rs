//! Diagnostic event sink for the validation core.
//!
//! Parsing and comparison never write to a process-wide logger. Callers pass
//! a `&dyn Diagnostics` in, so the core stays pure and tests can observe what
//! was logged without capturing stderr.

use colored::Colorize;
use std::sync::Mutex;

/// Severity of a diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warning,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
        }
    }
}

/// Trait for diagnostic sinks.
///
/// Implementations must not fail: logging is best-effort and can never
/// change a validation outcome.
pub trait Diagnostics {
    fn emit(&self, level: Level, message: &str);

    fn debug(&self, message: &str) {
        self.emit(Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.emit(Level::Warning, message);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn emit(&self, _level: Level, _message: &str) {}
}

/// Writes to stderr with terminal colors.
///
/// Inside a GitHub Actions runner warnings and debug lines are written as
/// workflow commands so they show up as annotations and in step debug logs.
#[derive(Debug, Clone)]
pub struct TerminalDiagnostics {
    quiet: bool,
    verbose: bool,
    workflow_commands: bool,
}

impl TerminalDiagnostics {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            workflow_commands: false,
        }
    }

    /// Build from CLI flags, OR-ing in `PR_TEMPLATE_CHECK_QUIET`,
    /// `PR_TEMPLATE_CHECK_DEBUG` and detecting `GITHUB_ACTIONS`.
    pub fn from_env(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet: quiet || crate::ui::is_quiet(),
            verbose: verbose || env_flag("PR_TEMPLATE_CHECK_DEBUG") || env_flag("RUNNER_DEBUG"),
            workflow_commands: env_flag("GITHUB_ACTIONS"),
        }
    }

    pub fn with_workflow_commands(mut self, enabled: bool) -> Self {
        self.workflow_commands = enabled;
        self
    }

    /// Format a line for output, or `None` if the level is filtered out.
    fn render(&self, level: Level, message: &str) -> Option<String> {
        match level {
            Level::Debug if !self.verbose || self.quiet => None,
            Level::Info if self.quiet => None,
            Level::Debug if self.workflow_commands => {
                Some(format!("::debug::{}", escape_workflow_data(message)))
            }
            Level::Warning if self.workflow_commands => {
                Some(format!("::warning::{}", escape_workflow_data(message)))
            }
            Level::Debug => Some(format!("{}", message.dimmed())),
            Level::Info => Some(message.to_string()),
            Level::Warning => Some(format!("{} {}", "⚠".yellow(), message.yellow())),
        }
    }
}

impl Diagnostics for TerminalDiagnostics {
    fn emit(&self, level: Level, message: &str) {
        if let Some(line) = self.render(level, message) {
            eprintln!("{}", line);
        }
    }
}

/// Collects every line in memory. Used by tests to assert on fail-soft paths.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    lines: Mutex<Vec<(Level, String)>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Messages recorded at exactly `level`.
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.messages_at(level).iter().any(|m| m.contains(needle))
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn emit(&self, level: Level, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, message.to_string()));
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Escape a message for a `::command::` line (percent, CR and LF).
fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
