// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Mathio routing engine.

use thiserror::Error;

/// The primary error type used across collaborator traits and core operations.
#[derive(Debug, Error)]
pub enum MathioError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Knowledge base errors (dataset load failure, malformed documents).
    #[error("knowledge base error: {source}")]
    Knowledge {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Web lookup errors (provider failure, malformed results).
    #[error("web search error: {message}")]
    Search {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Solver errors (unparseable problem, template failure).
    #[error("solver error: {0}")]
    Solver(String),

    /// Persistence errors (snapshot serialization, temp-file write, rename).
    #[error("persistence error: {source}")]
    Persistence {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
