// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Template-based math solver for the Mathio routing engine.
//!
//! Implements the [`mathio_core::SolverAgent`] collaborator contract:
//! regex-table problem typing, fixed step templates per problem class, and
//! grounded solution formatting from knowledge base or web material.

pub mod agent;
pub mod classify;

pub use agent::TemplateSolver;
pub use classify::{ProblemType, identify_problem_type};
