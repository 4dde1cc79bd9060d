// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as threshold ranges and threshold ordering.

use crate::diagnostic::ConfigError;
use crate::model::MathioConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &MathioConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Log level must be a tracing level name.
    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level must be one of {LOG_LEVELS:?}, got `{}`",
                config.agent.log_level
            ),
        });
    }

    // All routing thresholds are confidence values in [0, 1].
    for (name, value) in [
        ("routing.confidence_threshold", config.routing.confidence_threshold),
        ("routing.hybrid_web_threshold", config.routing.hybrid_web_threshold),
        ("routing.hybrid_kb_floor", config.routing.hybrid_kb_floor),
    ] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ConfigError::Validation {
                message: format!("{name} must be within [0.0, 1.0], got {value}"),
            });
        }
    }

    // The hybrid floor must sit below the outright-KB threshold, otherwise
    // the hybrid route is unreachable.
    if config.routing.hybrid_kb_floor >= config.routing.confidence_threshold {
        errors.push(ConfigError::Validation {
            message: format!(
                "routing.hybrid_kb_floor ({}) must be below routing.confidence_threshold ({})",
                config.routing.hybrid_kb_floor, config.routing.confidence_threshold
            ),
        });
    }

    if config.routing.top_k == 0 {
        errors.push(ConfigError::Validation {
            message: "routing.top_k must be at least 1, got 0".to_string(),
        });
    }

    if config.routing.history_capacity == 0 {
        errors.push(ConfigError::Validation {
            message: "routing.history_capacity must be at least 1, got 0".to_string(),
        });
    }

    if config.search.max_results == 0 {
        errors.push(ConfigError::Validation {
            message: "search.max_results must be at least 1, got 0".to_string(),
        });
    }

    if config.search.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "search.timeout_secs must be at least 1, got 0".to_string(),
        });
    }

    if config.feedback.recent_window == 0 {
        errors.push(ConfigError::Validation {
            message: "feedback.recent_window must be at least 1, got 0".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&MathioConfig::default()).is_ok());
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let mut config = MathioConfig::default();
        config.routing.confidence_threshold = 1.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| e.to_string().contains("confidence_threshold"))
        );
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let mut config = MathioConfig::default();
        config.routing.hybrid_kb_floor = 0.9;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("hybrid_kb_floor")));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = MathioConfig::default();
        config.agent.log_level = "loud".to_string();
        config.routing.top_k = 0;
        config.search.max_results = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3, "validation must not fail fast");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = MathioConfig::default();
        config.search.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }
}
