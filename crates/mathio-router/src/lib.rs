// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routing and confidence arbitration for the Mathio engine.
//!
//! This crate provides:
//! - [`scorer`]: Heuristic confidence scoring over explicit keyword tables
//! - [`RouteSelector`]: The four-way route decision (KB / web / hybrid / fallback)
//! - [`combiner`]: Hybrid result merging
//! - [`RoutingLedger`]: Append-only decision history and routing statistics
//! - [`QueryEngine`]: The process_query dispatcher over collaborator traits
//!
//! The scorers intercept every query before any lookup, selecting the
//! information-source strategy from KB candidate relevance and lexical
//! signals in the query text. All scoring is deterministic and zero-cost.

pub mod combiner;
pub mod engine;
pub mod ledger;
pub mod scorer;
pub mod selector;

pub use combiner::combine;
pub use engine::QueryEngine;
pub use ledger::{RoutingHistoryEntry, RoutingLedger, RoutingStats};
pub use selector::RouteSelector;
