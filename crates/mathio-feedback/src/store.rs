// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only feedback store with atomic id generation and best-effort
//! JSON snapshot persistence.
//!
//! All mutation happens inside one critical section per ingestion: the id
//! sequence, the entry append, the counter updates, and the suggestion
//! tallies cannot be observed out of sync. Snapshots are written via
//! temp-file-then-rename so no partial-write state is ever visible on disk;
//! a failed write is logged and the in-memory state stays authoritative.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::types::{
    FeedbackData, FeedbackEntry, FeedbackMetadata, FeedbackStats, ImprovementKind,
    ImprovementSuggestion, Priority, ResponseSnapshot,
};

/// Cumulative per-(priority, kind) suggestion frequency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SuggestionTally {
    pub priority: Priority,
    pub kind: ImprovementKind,
    pub count: u64,
}

/// Entry-level quality counts, for satisfaction metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityTallies {
    pub helpful: u64,
    pub correct: u64,
    pub clear: u64,
    pub complete: u64,
}

#[derive(Debug, Default)]
struct StoreInner {
    entries: Vec<FeedbackEntry>,
    index: HashMap<String, usize>,
    stats: FeedbackStats,
    suggestions: VecDeque<ImprovementSuggestion>,
    tallies: BTreeMap<(Priority, ImprovementKind), u64>,
    seq: u64,
}

/// On-disk snapshot shape.
#[derive(Debug, Serialize, Deserialize)]
struct StoreSnapshot {
    feedback: Vec<FeedbackEntry>,
    stats: FeedbackStats,
    suggestions: Vec<ImprovementSuggestion>,
    suggestion_tallies: Vec<SuggestionTally>,
    seq: u64,
    last_updated: chrono::DateTime<Utc>,
}

/// Shared, mutex-guarded feedback store.
///
/// Constructed once per process and handed to the aggregator by `Arc`.
#[derive(Debug)]
pub struct FeedbackStore {
    path: Option<PathBuf>,
    max_suggestions: usize,
    inner: Mutex<StoreInner>,
}

impl FeedbackStore {
    /// Create an in-memory store (no persistence).
    pub fn in_memory(max_suggestions: usize) -> Self {
        Self {
            path: None,
            max_suggestions: max_suggestions.max(1),
            inner: Mutex::new(StoreInner::default()),
        }
    }

    /// Open a store persisted at `path`, loading an existing snapshot when
    /// one is readable. A corrupt or missing snapshot starts fresh.
    pub fn open(path: impl Into<PathBuf>, max_suggestions: usize) -> Self {
        let path = path.into();
        let inner = match load_snapshot(&path) {
            Some(snapshot) => {
                info!(
                    entries = snapshot.feedback.len(),
                    path = %path.display(),
                    "loaded feedback snapshot"
                );
                inner_from_snapshot(snapshot)
            }
            None => {
                info!(path = %path.display(), "no existing feedback data found, starting fresh");
                StoreInner::default()
            }
        };
        Self {
            path: Some(path),
            max_suggestions: max_suggestions.max(1),
            inner: Mutex::new(inner),
        }
    }

    /// Ingest one feedback submission.
    ///
    /// Builds the immutable entry (including its unique id), updates every
    /// counter, records the suggestions, and persists, all atomically with
    /// respect to other submitters. Returns the new entry's id.
    pub fn ingest(
        &self,
        query: &str,
        response: ResponseSnapshot,
        route_confidence: BTreeMap<String, f64>,
        feedback: FeedbackData,
        suggestions: &[ImprovementSuggestion],
    ) -> String {
        let now = Utc::now();
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        // The sequence shares the critical section with the insertion, so
        // ids stay unique even for submissions within the same second.
        inner.seq += 1;
        let id = format!("feedback_{}_{:04}", now.format("%Y%m%d_%H%M%S"), inner.seq);

        update_stats(&mut inner.stats, &feedback, response.route_used);

        let entry = FeedbackEntry {
            id: id.clone(),
            timestamp: now,
            query: query.to_string(),
            metadata: FeedbackMetadata {
                route_confidence,
                user_satisfaction: feedback.rating,
            },
            response,
            feedback,
        };
        let slot = inner.entries.len();
        inner.index.insert(id.clone(), slot);
        inner.entries.push(entry);

        for suggestion in suggestions {
            *inner
                .tallies
                .entry((suggestion.priority, suggestion.kind))
                .or_insert(0) += 1;
            if inner.suggestions.len() == self.max_suggestions {
                inner.suggestions.pop_front();
            }
            inner.suggestions.push_back(suggestion.clone());
        }

        // Persisting under the lock keeps snapshots ordered; durability is
        // best-effort and a failure leaves memory authoritative.
        if let Some(path) = &self.path {
            if let Err(err) = write_snapshot(path, &inner) {
                warn!(error = %err, path = %path.display(), "failed to persist feedback snapshot");
            }
        }

        id
    }

    /// Copy of the current counter block.
    pub fn stats(&self) -> FeedbackStats {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).stats.clone()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).entries.len()
    }

    /// True when no feedback has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up one entry by id.
    pub fn get_by_id(&self, id: &str) -> Option<FeedbackEntry> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.index.get(id).map(|&slot| inner.entries[slot].clone())
    }

    /// Entries whose query contains `query` (case-insensitive), most recent
    /// first, capped at `limit`.
    pub fn find_by_query(&self, query: &str, limit: usize) -> Vec<FeedbackEntry> {
        let needle = query.to_lowercase();
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner
            .entries
            .iter()
            .rev()
            .filter(|entry| entry.query.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Ratings of the `n` most recent entries, in insertion order.
    pub fn recent_ratings(&self, n: usize) -> Vec<u8> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let start = inner.entries.len().saturating_sub(n);
        inner.entries[start..]
            .iter()
            .map(|entry| entry.feedback.rating)
            .collect()
    }

    /// Cumulative suggestion frequencies per (priority, kind).
    pub fn suggestion_tallies(&self) -> Vec<SuggestionTally> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner
            .tallies
            .iter()
            .map(|(&(priority, kind), &count)| SuggestionTally {
                priority,
                kind,
                count,
            })
            .collect()
    }

    /// Entry-level quality counts across the whole store.
    pub fn quality_tallies(&self) -> QualityTallies {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let mut tallies = QualityTallies::default();
        for entry in &inner.entries {
            if entry.feedback.helpful {
                tallies.helpful += 1;
            }
            if entry.feedback.correct {
                tallies.correct += 1;
            }
            if entry.feedback.clear {
                tallies.clear += 1;
            }
            if entry.feedback.complete {
                tallies.complete += 1;
            }
        }
        tallies
    }
}

/// Apply one feedback submission to the counter block.
fn update_stats(
    stats: &mut FeedbackStats,
    feedback: &FeedbackData,
    route: mathio_core::types::RouteDecision,
) {
    stats.total_feedback += 1;

    if (1..=5).contains(&feedback.rating) {
        stats.ratings[feedback.rating as usize - 1] += 1;
    }

    let counters = stats.routes.entry(route).or_default();
    counters.total += 1;
    if feedback.helpful {
        counters.helpful += 1;
    }
    if feedback.correct {
        counters.correct += 1;
    }

    // Mutually exclusive: a rating of 3 increments neither.
    if feedback.rating >= 4 {
        stats.high_satisfaction += 1;
    } else if feedback.rating <= 2 {
        stats.low_satisfaction += 1;
    }

    if !feedback.clear {
        stats.clarity_issues += 1;
    }
    if !feedback.complete {
        stats.completeness_issues += 1;
    }
}

fn load_snapshot(path: &Path) -> Option<StoreSnapshot> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            warn!(error = %err, path = %path.display(), "corrupt feedback snapshot, starting fresh");
            None
        }
    }
}

fn inner_from_snapshot(snapshot: StoreSnapshot) -> StoreInner {
    let index = snapshot
        .feedback
        .iter()
        .enumerate()
        .map(|(slot, entry)| (entry.id.clone(), slot))
        .collect();
    let tallies = snapshot
        .suggestion_tallies
        .iter()
        .map(|t| ((t.priority, t.kind), t.count))
        .collect();
    StoreInner {
        index,
        tallies,
        entries: snapshot.feedback,
        stats: snapshot.stats,
        suggestions: snapshot.suggestions.into(),
        seq: snapshot.seq,
    }
}

/// Scoped, all-or-nothing write: serialize to a sibling temp file, then
/// rename into place.
fn write_snapshot(path: &Path, inner: &StoreInner) -> std::io::Result<()> {
    let snapshot = StoreSnapshot {
        feedback: inner.entries.clone(),
        stats: inner.stats.clone(),
        suggestions: inner.suggestions.iter().cloned().collect(),
        suggestion_tallies: inner
            .tallies
            .iter()
            .map(|(&(priority, kind), &count)| SuggestionTally {
                priority,
                kind,
                count,
            })
            .collect(),
        seq: inner.seq,
        last_updated: Utc::now(),
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(&snapshot)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathio_core::types::RouteDecision;

    fn snapshot(route: RouteDecision, confidence: f64) -> ResponseSnapshot {
        ResponseSnapshot {
            solution: "x = 2 or x = 3".to_string(),
            steps: vec!["Step 1: factor".to_string()],
            route_used: route,
            confidence,
        }
    }

    fn rated(rating: u8) -> FeedbackData {
        FeedbackData {
            rating,
            helpful: rating >= 4,
            ..Default::default()
        }
    }

    fn ingest_one(store: &FeedbackStore, rating: u8) -> String {
        store.ingest(
            "solve x^2 - 5x + 6 = 0",
            snapshot(RouteDecision::KnowledgeBase, 0.9),
            BTreeMap::new(),
            rated(rating),
            &[],
        )
    }

    #[test]
    fn ingest_updates_all_counters() {
        let store = FeedbackStore::in_memory(100);
        ingest_one(&store, 5);
        ingest_one(&store, 2);
        ingest_one(&store, 3);

        let stats = store.stats();
        assert_eq!(stats.total_feedback, 3);
        assert_eq!(stats.ratings, [0, 1, 1, 0, 1]);
        assert_eq!(stats.high_satisfaction, 1);
        assert_eq!(stats.low_satisfaction, 1);
        assert_eq!(stats.routes[&RouteDecision::KnowledgeBase].total, 3);
        assert_eq!(stats.routes[&RouteDecision::KnowledgeBase].helpful, 1);
    }

    #[test]
    fn rating_three_counts_as_neither_satisfaction_bucket() {
        let store = FeedbackStore::in_memory(100);
        ingest_one(&store, 3);

        let stats = store.stats();
        assert_eq!(stats.high_satisfaction, 0);
        assert_eq!(stats.low_satisfaction, 0);
    }

    #[test]
    fn clarity_and_completeness_issues_counted() {
        let store = FeedbackStore::in_memory(100);
        let feedback = FeedbackData {
            rating: 3,
            clear: false,
            complete: false,
            ..Default::default()
        };
        store.ingest(
            "q",
            snapshot(RouteDecision::Fallback, 0.3),
            BTreeMap::new(),
            feedback,
            &[],
        );

        let stats = store.stats();
        assert_eq!(stats.clarity_issues, 1);
        assert_eq!(stats.completeness_issues, 1);
    }

    #[test]
    fn ids_are_unique_and_resolvable() {
        let store = FeedbackStore::in_memory(100);
        let a = ingest_one(&store, 4);
        let b = ingest_one(&store, 4);
        assert_ne!(a, b);
        assert_eq!(store.get_by_id(&a).unwrap().id, a);
        assert!(store.get_by_id("feedback_nope").is_none());
    }

    #[test]
    fn concurrent_ingestion_counts_exactly() {
        use std::sync::Arc;

        let store = Arc::new(FeedbackStore::in_memory(100));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || ingest_one(&store, 4)));
        }
        let ids: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // No dropped or double-counted updates, no duplicate ids.
        assert_eq!(store.stats().total_feedback, 8);
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 8);
    }

    #[test]
    fn find_by_query_matches_substring_most_recent_first() {
        let store = FeedbackStore::in_memory(100);
        store.ingest(
            "solve x^2 = 4",
            snapshot(RouteDecision::Fallback, 0.3),
            BTreeMap::new(),
            rated(3),
            &[],
        );
        store.ingest(
            "explain derivatives",
            snapshot(RouteDecision::WebSearch, 0.6),
            BTreeMap::new(),
            rated(4),
            &[],
        );
        store.ingest(
            "Solve x^2 - 5x + 6 = 0",
            snapshot(RouteDecision::KnowledgeBase, 0.9),
            BTreeMap::new(),
            rated(5),
            &[],
        );

        let matches = store.find_by_query("solve", 10);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].query, "Solve x^2 - 5x + 6 = 0");
    }

    #[test]
    fn suggestion_ring_caps_records_but_not_tallies() {
        let store = FeedbackStore::in_memory(2);
        let suggestion = ImprovementSuggestion {
            kind: ImprovementKind::Clarity,
            route: RouteDecision::Fallback,
            issue: "i".to_string(),
            suggestion: "s".to_string(),
            priority: Priority::Medium,
            user_correction: None,
        };
        for _ in 0..5 {
            store.ingest(
                "q",
                snapshot(RouteDecision::Fallback, 0.3),
                BTreeMap::new(),
                rated(2),
                std::slice::from_ref(&suggestion),
            );
        }

        let tallies = store.suggestion_tallies();
        assert_eq!(tallies.len(), 1);
        assert_eq!(tallies[0].count, 5, "tallies are cumulative past the ring cap");
    }

    #[test]
    fn recent_ratings_keep_insertion_order() {
        let store = FeedbackStore::in_memory(100);
        for rating in [1, 2, 3, 4, 5] {
            ingest_one(&store, rating);
        }
        assert_eq!(store.recent_ratings(3), vec![3, 4, 5]);
        assert_eq!(store.recent_ratings(100), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn snapshot_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback_data.json");

        {
            let store = FeedbackStore::open(&path, 100);
            ingest_one(&store, 5);
            ingest_one(&store, 2);
        }

        let reopened = FeedbackStore::open(&path, 100);
        assert_eq!(reopened.len(), 2);
        let stats = reopened.stats();
        assert_eq!(stats.total_feedback, 2);
        assert_eq!(stats.high_satisfaction, 1);

        // The sequence continues, so new ids stay unique across restarts.
        let id = ingest_one(&reopened, 4);
        assert!(id.ends_with("_0003"), "id was {id}");
    }

    #[test]
    fn corrupt_snapshot_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback_data.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FeedbackStore::open(&path, 100);
        assert!(store.is_empty());
    }

    #[test]
    fn no_partial_snapshot_is_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback_data.json");
        let store = FeedbackStore::open(&path, 100);
        ingest_one(&store, 4);

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }
}
