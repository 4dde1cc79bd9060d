// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Mathio routing engine.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the Mathio workspace. The routing engine
//! talks to its information sources (knowledge base, web lookup, solver)
//! exclusively through the traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::MathioError;
pub use types::{
    KbDocument, KbMatch, ResponseEnvelope, RouteDecision, RouteOutcome, RoutingMetadata,
    Solution, SourceRef, WebResult,
};

// Re-export all collaborator traits at crate root.
pub use traits::{KnowledgeLookup, SolverAgent, WebLookup};
