// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./mathio.toml` > `~/.config/mathio/mathio.toml`
//! > `/etc/mathio/mathio.toml` with environment variable overrides via the
//! `MATHIO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::MathioConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/mathio/mathio.toml` (system-wide)
/// 3. `~/.config/mathio/mathio.toml` (user XDG config)
/// 4. `./mathio.toml` (local directory)
/// 5. `MATHIO_*` environment variables
pub fn load_config() -> Result<MathioConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MathioConfig::default()))
        .merge(Toml::file("/etc/mathio/mathio.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("mathio/mathio.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("mathio.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<MathioConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MathioConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MathioConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MathioConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` so underscore-containing key
/// names stay unambiguous: `MATHIO_ROUTING_CONFIDENCE_THRESHOLD` must map
/// to `routing.confidence_threshold`, not `routing.confidence.threshold`.
fn env_provider() -> Env {
    Env::prefixed("MATHIO_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("routing_", "routing.", 1)
            .replacen("search_", "search.", 1)
            .replacen("knowledge_", "knowledge.", 1)
            .replacen("feedback_", "feedback.", 1);
        mapped.into()
    })
}
