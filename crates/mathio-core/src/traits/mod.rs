// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions for the Mathio routing engine.
//!
//! The routing core talks to its information sources through these narrow
//! contracts. All traits use `#[async_trait]` for dynamic dispatch
//! compatibility, so the engine can hold `Arc<dyn ...>` handles.

pub mod knowledge;
pub mod solver;
pub mod web;

// Re-export all traits at the traits module level for convenience.
pub use knowledge::KnowledgeLookup;
pub use solver::SolverAgent;
pub use web::WebLookup;
