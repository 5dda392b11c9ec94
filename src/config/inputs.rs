//! GitHub Actions inputs.
//!
//! The runner exposes each `with:` input as an `INPUT_<NAME>` environment
//! variable, upper-cased with spaces replaced by underscores. Hyphens are
//! kept, so `required-sections` arrives as `INPUT_REQUIRED-SECTIONS`.

use anyhow::Result;

use super::PartialConfig;
use crate::diagnostics::Diagnostics;

pub const INPUT_REQUIRED_SECTIONS: &str = "required-sections";
pub const INPUT_SKIP_USERS: &str = "skip-users";
pub const INPUT_SKIP_SERVICE_ACCOUNTS: &str = "skip-service-accounts";
pub const INPUT_JIRA_PATTERN: &str = "jira-pattern";
pub const INPUT_LABEL_NAME: &str = "label-name";
pub const INPUT_ENFORCE_TEMPLATE: &str = "enforce-template";
pub const INPUT_REQUIRE_TASK_COMPLETION: &str = "require-task-completion";
pub const INPUT_GITHUB_TOKEN: &str = "github-token";

/// Environment variable name for an action input.
pub fn input_env_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Read an action input from the environment. Blank values count as unset.
pub fn get_input(name: &str) -> Option<String> {
    std::env::var(input_env_name(name))
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a JSON array input. Malformed values are logged and ignored so the
/// lower configuration layers (or defaults) apply.
pub fn parse_list_input(
    name: &str,
    raw: &str,
    diagnostics: &dyn Diagnostics,
) -> Option<Vec<String>> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(list) => Some(list),
        Err(_) => {
            diagnostics.warn(&format!(
                "Invalid JSON format for input '{}': {}. Using default value.",
                name, raw
            ));
            None
        }
    }
}

/// Parse a boolean input using the YAML 1.2 core schema spellings the
/// Actions toolkit accepts.
pub fn parse_bool_input(name: &str, raw: &str) -> Result<bool> {
    match raw {
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" => Ok(false),
        _ => anyhow::bail!(
            "Input does not meet YAML 1.2 \"Core Schema\" specification: {}\n\
             Support boolean input list: `true | True | TRUE | false | False | FALSE`",
            name
        ),
    }
}

impl PartialConfig {
    /// Build a layer from the runner's `INPUT_*` environment.
    pub fn from_env(diagnostics: &dyn Diagnostics) -> Result<Self> {
        Self::from_action_inputs(&get_input, diagnostics)
    }

    /// Build a layer from action inputs supplied by `lookup`.
    pub fn from_action_inputs(
        lookup: &dyn Fn(&str) -> Option<String>,
        diagnostics: &dyn Diagnostics,
    ) -> Result<Self> {
        let list = |name: &str| {
            lookup(name).and_then(|raw| parse_list_input(name, &raw, diagnostics))
        };
        let flag = |name: &str| -> Result<Option<bool>> {
            lookup(name)
                .map(|raw| parse_bool_input(name, &raw))
                .transpose()
        };

        Ok(PartialConfig {
            required_sections: list(INPUT_REQUIRED_SECTIONS),
            jira_pattern: lookup(INPUT_JIRA_PATTERN),
            label_name: lookup(INPUT_LABEL_NAME),
            enforce_template: flag(INPUT_ENFORCE_TEMPLATE)?,
            require_task_completion: flag(INPUT_REQUIRE_TASK_COMPLETION)?,
            skip_users: list(INPUT_SKIP_USERS),
            skip_service_accounts: list(INPUT_SKIP_SERVICE_ACCOUNTS),
            template_paths: None,
        })
    }
}
