// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Curated mathematics knowledge base for the Mathio routing engine.
//!
//! Implements the [`mathio_core::KnowledgeLookup`] collaborator contract
//! with a deterministic weighted keyword search over a small document set.
//! The dataset ships built-in and can be externalized to a JSON file via
//! `knowledge.dataset_path`.

pub mod dataset;
pub mod service;

pub use dataset::seed_documents;
pub use service::{KnowledgeBase, KnowledgeStats};
