// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engine wiring: builds the query engine and feedback aggregator from
//! configuration with the real collaborator implementations.

use std::sync::Arc;

use mathio_config::model::MathioConfig;
use mathio_core::MathioError;
use mathio_feedback::{FeedbackAggregator, FeedbackStore};
use mathio_knowledge::KnowledgeBase;
use mathio_router::QueryEngine;
use mathio_solver::TemplateSolver;
use mathio_websearch::ReferenceWebLookup;

/// The wired application: routing engine plus feedback loop.
pub struct MathioApp {
    pub engine: QueryEngine,
    pub aggregator: FeedbackAggregator,
}

/// Build the application from configuration.
pub fn build(config: MathioConfig) -> MathioApp {
    let knowledge = Arc::new(KnowledgeBase::from_config(&config.knowledge));
    let web = Arc::new(ReferenceWebLookup::new());
    let solver = Arc::new(TemplateSolver::new());

    let store = match &config.feedback.data_path {
        Some(path) => Arc::new(FeedbackStore::open(
            path,
            config.feedback.max_suggestions_retained,
        )),
        None => Arc::new(FeedbackStore::in_memory(
            config.feedback.max_suggestions_retained,
        )),
    };
    let aggregator = FeedbackAggregator::new(store, config.feedback.clone());

    let engine = QueryEngine::new(config, knowledge, web, solver);

    MathioApp { engine, aggregator }
}

/// One-shot query: process and print the response envelope as JSON.
pub async fn run_query(config: MathioConfig, query: &str) -> Result<(), MathioError> {
    let app = build(config);
    let response = app.engine.process_query(query, None).await;
    let json = serde_json::to_string_pretty(&response)
        .map_err(|e| MathioError::Internal(e.to_string()))?;
    println!("{json}");
    Ok(())
}
