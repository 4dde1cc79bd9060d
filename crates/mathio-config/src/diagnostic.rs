// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostic error types for configuration failures.
//!
//! Parse and validation errors are collected (not fail-fast) and rendered
//! through miette so the operator sees every problem in one pass.

use miette::Diagnostic;
use thiserror::Error;

/// A single configuration problem.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum ConfigError {
    /// The TOML/env input could not be deserialized into the config model.
    #[error("{message}")]
    #[diagnostic(
        code(mathio::config::parse),
        help("check mathio.toml against the documented sections: agent, routing, search, knowledge, feedback")
    )]
    Parse { message: String },

    /// The config deserialized but violates a semantic constraint.
    #[error("{message}")]
    #[diagnostic(code(mathio::config::validation))]
    Validation { message: String },
}

/// Convert a figment extraction error into one [`ConfigError`] per problem.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter()
        .map(|e| ConfigError::Parse {
            message: e.to_string(),
        })
        .collect()
}

/// Render all collected errors to stderr via miette's fancy reporter.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprintln!("{:?}", miette::Report::new(error.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figment_error_becomes_parse_errors() {
        let err = crate::loader::load_config_from_str("routing = \"not a table\"")
            .expect_err("type mismatch must fail");
        let errors = figment_to_config_errors(err);
        assert!(!errors.is_empty());
        assert!(matches!(errors[0], ConfigError::Parse { .. }));
    }

    #[test]
    fn validation_error_displays_message() {
        let err = ConfigError::Validation {
            message: "routing.top_k must be at least 1, got 0".to_string(),
        };
        assert_eq!(err.to_string(), "routing.top_k must be at least 1, got 0");
    }
}
