// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge base lookup trait.

use async_trait::async_trait;

use crate::error::MathioError;
use crate::types::KbMatch;

/// Lookup into the curated mathematics knowledge base.
///
/// An empty result set means "no match" and is returned as `Ok(vec![])`;
/// an `Err` is reserved for true infrastructure failure (unreadable
/// dataset, poisoned store).
#[async_trait]
pub trait KnowledgeLookup: Send + Sync {
    /// Search the knowledge base, returning at most `top_k` matches
    /// ordered by descending relevance.
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<KbMatch>, MathioError>;
}
