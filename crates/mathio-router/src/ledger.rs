// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only routing history and routing statistics.
//!
//! The ledger keeps a bounded ring of recent decisions for inspection while
//! cumulative counters (totals, per-route distribution, confidence sums)
//! track all-time figures, so statistics never change when old entries
//! rotate out of the ring.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use mathio_core::types::{RouteDecision, RoutingMetadata};

/// Maximum characters of the query kept in a history entry.
const QUERY_EXCERPT_CHARS: usize = 100;

/// Number of recent entries included in a stats report.
const RECENT_REPORT_LEN: usize = 5;

/// One recorded routing decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingHistoryEntry {
    /// First 100 characters of the query.
    pub query_excerpt: String,
    /// The route that was chosen.
    pub route: RouteDecision,
    /// Snapshot of the confidence scores at decision time.
    pub confidence_scores: BTreeMap<String, f64>,
    /// The selector's reasoning string.
    pub reasoning: String,
}

/// Read-only routing statistics report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingStats {
    /// All-time number of recorded decisions.
    pub total_queries: u64,
    /// All-time decision count per route name.
    pub route_distribution: BTreeMap<String, u64>,
    /// All-time mean primary confidence per route name.
    pub average_confidence_by_route: BTreeMap<String, f64>,
    /// The most recent decisions, oldest first.
    pub recent_queries: Vec<RoutingHistoryEntry>,
}

#[derive(Debug, Default)]
struct LedgerInner {
    recent: VecDeque<RoutingHistoryEntry>,
    total_queries: u64,
    route_counts: BTreeMap<RouteDecision, u64>,
    // Per route: (sum of primary confidence scores, count of entries with one).
    confidence_sums: BTreeMap<RouteDecision, (f64, u64)>,
}

/// Shared, mutex-guarded store of routing decisions.
///
/// Constructed once per process and handed to the selector by `Arc`;
/// the append in [`RoutingLedger::record`] is the selector's only mutation.
#[derive(Debug)]
pub struct RoutingLedger {
    capacity: usize,
    inner: Mutex<LedgerInner>,
}

impl RoutingLedger {
    /// Create a ledger retaining at most `capacity` recent entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(LedgerInner::default()),
        }
    }

    /// Append one routing decision.
    pub fn record(&self, metadata: &RoutingMetadata) {
        let entry = RoutingHistoryEntry {
            query_excerpt: metadata.query.chars().take(QUERY_EXCERPT_CHARS).collect(),
            route: metadata.route_used,
            confidence_scores: metadata.confidence_scores.clone(),
            reasoning: metadata.reasoning.clone(),
        };

        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.total_queries += 1;
        *inner.route_counts.entry(entry.route).or_insert(0) += 1;

        // The knowledge base score is the primary confidence for averaging;
        // it is present for every non-degenerate decision.
        if let Some(primary) = entry
            .confidence_scores
            .get(RouteDecision::KnowledgeBase.to_string().as_str())
            .or_else(|| entry.confidence_scores.values().next())
            .copied()
        {
            let slot = inner.confidence_sums.entry(entry.route).or_insert((0.0, 0));
            slot.0 += primary;
            slot.1 += 1;
        }

        if inner.recent.len() == self.capacity {
            inner.recent.pop_front();
        }
        inner.recent.push_back(entry);
    }

    /// Build the routing statistics report.
    pub fn stats(&self) -> RoutingStats {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        let route_distribution = inner
            .route_counts
            .iter()
            .map(|(route, count)| (route.to_string(), *count))
            .collect();

        let average_confidence_by_route = inner
            .confidence_sums
            .iter()
            .map(|(route, (sum, count))| {
                let avg = if *count > 0 { sum / *count as f64 } else { 0.0 };
                (route.to_string(), avg)
            })
            .collect();

        let recent_queries = inner
            .recent
            .iter()
            .rev()
            .take(RECENT_REPORT_LEN)
            .rev()
            .cloned()
            .collect();

        RoutingStats {
            total_queries: inner.total_queries,
            route_distribution,
            average_confidence_by_route,
            recent_queries,
        }
    }

    /// Number of entries currently retained in the ring.
    pub fn retained_len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).recent.len()
    }
}
