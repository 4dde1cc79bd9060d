// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Web lookup trait.

use async_trait::async_trait;

use crate::error::MathioError;
use crate::types::WebResult;

/// Lookup into web-sourced mathematical reference material.
///
/// Same no-throw-on-empty contract as [`crate::traits::KnowledgeLookup`]:
/// "nothing relevant" is `Ok(vec![])`. The engine wraps each call in a
/// bounded timeout; implementations must not block indefinitely.
#[async_trait]
pub trait WebLookup: Send + Sync {
    /// Search the web for `query`, returning at most `max_results` results
    /// ordered by descending relevance.
    async fn search(&self, query: &str, max_results: usize)
    -> Result<Vec<WebResult>, MathioError>;
}
