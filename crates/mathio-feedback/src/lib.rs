// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Human-in-the-loop feedback for the Mathio routing engine.
//!
//! This crate provides:
//! - [`FeedbackStore`]: Append-only entry store with atomic id generation,
//!   counter statistics, and temp-file-then-rename JSON persistence
//! - [`FeedbackAggregator`]: Ingestion with a table of independent
//!   improvement rules
//! - [`analysis`]: Route performance, prioritized improvements, and trend
//!   detection over the accumulated statistics
//!
//! Ratings arrive asynchronously, tied to a prior response; nothing here
//! participates in the routing decision itself.

pub mod aggregator;
pub mod analysis;
pub mod store;
pub mod types;

pub use aggregator::{FeedbackAggregator, derive_improvements};
pub use store::FeedbackStore;
pub use types::{
    FeedbackAnalysis, FeedbackData, FeedbackEntry, FeedbackResult, FeedbackStats,
    ImprovementKind, ImprovementSuggestion, Priority, SatisfactionMetrics, Trend, TrendReport,
};
