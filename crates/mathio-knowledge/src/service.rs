// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge base service: dataset management and weighted keyword search.
//!
//! Search is a deterministic scoring pipeline: score every document against
//! the query, keep positive scores, sort descending, truncate to `top_k`.
//! Keyword hits weigh more than loose word overlap with the question and
//! answer text.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use mathio_config::model::KnowledgeConfig;
use mathio_core::MathioError;
use mathio_core::traits::KnowledgeLookup;
use mathio_core::types::{KbDocument, KbMatch};

use crate::dataset::seed_documents;

/// Score contribution of a document keyword found in the query.
const KEYWORD_WEIGHT: f64 = 0.5;

/// Score contribution of a query word found in the question or answer text.
const WORD_OVERLAP_WEIGHT: f64 = 0.2;

/// Knowledge base statistics report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeStats {
    pub total_documents: usize,
    pub topics: BTreeMap<String, usize>,
    pub difficulties: BTreeMap<String, usize>,
}

/// The curated mathematics knowledge base.
pub struct KnowledgeBase {
    documents: RwLock<Vec<KbDocument>>,
    dataset_path: Option<PathBuf>,
}

impl KnowledgeBase {
    /// Create a knowledge base holding the built-in seed dataset.
    pub fn with_seed() -> Self {
        Self {
            documents: RwLock::new(seed_documents()),
            dataset_path: None,
        }
    }

    /// Create a knowledge base from configuration.
    ///
    /// When `dataset_path` points at a readable JSON document list it is
    /// used; otherwise the seed dataset is loaded (and written to the path
    /// so the dataset is editable on disk afterwards).
    pub fn from_config(config: &KnowledgeConfig) -> Self {
        let Some(path) = config.dataset_path.as_deref() else {
            return Self::with_seed();
        };
        let path = PathBuf::from(path);

        let documents = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<KbDocument>>(&content) {
                Ok(documents) => {
                    info!(count = documents.len(), path = %path.display(), "loaded knowledge base");
                    documents
                }
                Err(err) => {
                    warn!(error = %err, path = %path.display(), "malformed dataset, using seed");
                    seed_documents()
                }
            },
            Err(_) => {
                let documents = seed_documents();
                if let Err(err) = save_documents(&path, &documents) {
                    warn!(error = %err, path = %path.display(), "could not write seed dataset");
                }
                documents
            }
        };

        Self {
            documents: RwLock::new(documents),
            dataset_path: Some(path),
        }
    }

    /// Add a document to the knowledge base.
    ///
    /// Rejects documents with empty required fields or a duplicate id.
    pub async fn add_document(&self, document: KbDocument) -> Result<(), MathioError> {
        if document.id.is_empty()
            || document.question.is_empty()
            || document.answer.is_empty()
            || document.topic.is_empty()
            || document.keywords.is_empty()
        {
            return Err(MathioError::Internal(
                "document missing required fields".to_string(),
            ));
        }

        let mut documents = self.documents.write().await;
        if documents.iter().any(|d| d.id == document.id) {
            return Err(MathioError::Internal(format!(
                "document with id `{}` already exists",
                document.id
            )));
        }

        info!(id = document.id.as_str(), "added knowledge base document");
        documents.push(document);

        if let Some(path) = &self.dataset_path
            && let Err(err) = save_documents(path, &documents)
        {
            // In-memory state stays authoritative.
            warn!(error = %err, "could not persist knowledge base dataset");
        }

        Ok(())
    }

    /// Fetch one document by id.
    pub async fn get_by_id(&self, id: &str) -> Option<KbDocument> {
        self.documents.read().await.iter().find(|d| d.id == id).cloned()
    }

    /// All documents for a topic (case-insensitive).
    pub async fn get_by_topic(&self, topic: &str) -> Vec<KbDocument> {
        self.documents
            .read()
            .await
            .iter()
            .filter(|d| d.topic.eq_ignore_ascii_case(topic))
            .cloned()
            .collect()
    }

    /// Dataset statistics.
    pub async fn stats(&self) -> KnowledgeStats {
        let documents = self.documents.read().await;
        let mut topics = BTreeMap::new();
        let mut difficulties = BTreeMap::new();
        for doc in documents.iter() {
            *topics.entry(doc.topic.clone()).or_insert(0) += 1;
            *difficulties.entry(doc.difficulty.clone()).or_insert(0) += 1;
        }
        KnowledgeStats {
            total_documents: documents.len(),
            topics,
            difficulties,
        }
    }
}

#[async_trait]
impl KnowledgeLookup for KnowledgeBase {
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<KbMatch>, MathioError> {
        let documents = self.documents.read().await;
        let mut results = score_documents(&documents, query);

        results.sort_by(|a, b| {
            b.relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);

        let excerpt: String = query.chars().take(50).collect();
        info!(count = results.len(), query = excerpt.as_str(), "knowledge base search");
        Ok(results)
    }
}

/// Score every document against the query; documents with no overlap at all
/// are excluded rather than returned with score zero.
fn score_documents(documents: &[KbDocument], query: &str) -> Vec<KbMatch> {
    let query_lower = query.to_lowercase();
    let query_words: Vec<&str> = query_lower.split_whitespace().collect();

    documents
        .iter()
        .filter_map(|doc| {
            let mut score = 0.0;

            for keyword in &doc.keywords {
                if query_lower.contains(&keyword.to_lowercase()) {
                    score += KEYWORD_WEIGHT;
                }
            }

            let doc_text = format!("{} {}", doc.question, doc.answer).to_lowercase();
            for word in &query_words {
                if doc_text.contains(word) {
                    score += WORD_OVERLAP_WEIGHT;
                }
            }

            (score > 0.0).then(|| KbMatch {
                document: doc.clone(),
                relevance: score,
            })
        })
        .collect()
}

fn save_documents(path: &std::path::Path, documents: &[KbDocument]) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(documents)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)
}
