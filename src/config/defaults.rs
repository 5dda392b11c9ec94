//! Default values for configuration fields.

use crate::paths::TEMPLATE_PATHS;

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

/// Label applied to pull requests that fail validation.
pub const DEFAULT_LABEL_NAME: &str = "invalid-template";

default_fn!(default_label_name, String, DEFAULT_LABEL_NAME.to_string());
default_fn!(
    default_template_paths,
    Vec<String>,
    TEMPLATE_PATHS.iter().map(|p| p.to_string()).collect()
);
