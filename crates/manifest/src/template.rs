// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment variable interpolation

use regex::Regex;
use std::sync::LazyLock;

// Regex pattern for ${VAR} and ${VAR:-default} - this is a constant valid pattern
// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static ENV_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
        .expect("constant regex pattern is valid")
});

/// Expand `${VAR}` and `${VAR:-default}` from the environment
///
/// Variables that are unset and have no default are left as-is and their
/// names are pushed to `missing`.
pub fn interpolate_env(template: &str, missing: &mut Vec<String>) -> String {
    ENV_PATTERN
        .replace_all(template, |caps: &regex::Captures| {
            let var_name = &caps[1];
            match (std::env::var(var_name), caps.get(2)) {
                (Ok(value), _) => value,
                (Err(_), Some(default_value)) => default_value.as_str().to_string(),
                (Err(_), None) => {
                    missing.push(var_name.to_string());
                    caps[0].to_string()
                }
            }
        })
        .to_string()
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
