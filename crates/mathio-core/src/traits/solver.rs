// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Solver trait: the opaque "solve(query) -> solution + steps + confidence"
//! capability the routing core delegates to.

use async_trait::async_trait;

use crate::error::MathioError;
use crate::types::{KbMatch, Solution, WebResult};

/// Produces step-by-step solutions, optionally grounded in retrieved material.
///
/// Deterministic given the same inputs and solver state.
#[async_trait]
pub trait SolverAgent: Send + Sync {
    /// Solve a query directly, without retrieved material (fallback route).
    async fn solve_direct(&self, query: &str) -> Result<Solution, MathioError>;

    /// Build a solution grounded in a knowledge base match.
    async fn solve_from_knowledge(
        &self,
        kb_match: &KbMatch,
        query: &str,
    ) -> Result<Solution, MathioError>;

    /// Build a solution grounded in web lookup results.
    async fn solve_from_web(
        &self,
        results: &[WebResult],
        query: &str,
    ) -> Result<Solution, MathioError>;
}
