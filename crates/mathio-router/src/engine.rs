// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query dispatch: turns a route decision into a complete response.
//!
//! Every collaborator path catches its own failure and degrades to a
//! zero-confidence outcome with an explanatory solution string. The engine
//! never lets a collaborator error abort a query; it always returns a
//! well-formed [`ResponseEnvelope`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use mathio_config::model::MathioConfig;
use mathio_core::traits::{KnowledgeLookup, SolverAgent, WebLookup};
use mathio_core::types::{
    ResponseEnvelope, RouteDecision, RouteOutcome, RoutingMetadata, SourceRef,
};

use crate::combiner;
use crate::ledger::{RoutingLedger, RoutingStats};
use crate::selector::RouteSelector;

/// Number of web results retained as provenance on a response.
const WEB_SOURCE_LIMIT: usize = 3;

/// The routing engine: scores, decides, dispatches, and records.
pub struct QueryEngine {
    config: MathioConfig,
    selector: RouteSelector,
    ledger: Arc<RoutingLedger>,
    knowledge: Arc<dyn KnowledgeLookup>,
    web: Arc<dyn WebLookup>,
    solver: Arc<dyn SolverAgent>,
}

impl QueryEngine {
    /// Wire an engine from configuration and collaborator handles.
    pub fn new(
        config: MathioConfig,
        knowledge: Arc<dyn KnowledgeLookup>,
        web: Arc<dyn WebLookup>,
        solver: Arc<dyn SolverAgent>,
    ) -> Self {
        let ledger = Arc::new(RoutingLedger::new(config.routing.history_capacity));
        let selector = RouteSelector::new(config.routing.clone(), Arc::clone(&ledger));
        Self {
            config,
            selector,
            ledger,
            knowledge,
            web,
            solver,
        }
    }

    /// Handle to the routing ledger, for stats reporting.
    pub fn ledger(&self) -> Arc<RoutingLedger> {
        Arc::clone(&self.ledger)
    }

    /// Routing statistics report.
    pub fn routing_stats(&self) -> RoutingStats {
        self.ledger.stats()
    }

    /// Process one query end to end.
    ///
    /// `metadata` is caller-supplied context passed through to the response
    /// pipeline; it does not participate in scoring.
    pub async fn process_query(
        &self,
        query: &str,
        _metadata: Option<serde_json::Value>,
    ) -> ResponseEnvelope {
        let (route, routing_metadata) =
            match self.knowledge.search(query, self.config.routing.top_k).await {
                Ok(candidates) => self.selector.decide(query, &candidates),
                Err(err) => self.selector.fallback_for_error(query, &err),
            };

        debug!(route = %route, "dispatching query");

        let outcome = match route {
            RouteDecision::KnowledgeBase => self.process_knowledge_base(query).await,
            RouteDecision::WebSearch => self.process_web_search(query).await,
            RouteDecision::Hybrid => {
                let kb = self.process_knowledge_base(query).await;
                let web = self.process_web_search(query).await;
                combiner::combine(&kb, &web)
            }
            RouteDecision::Fallback => self.process_fallback(query).await,
        };

        envelope(query, route, routing_metadata, outcome)
    }

    /// Answer from the knowledge base via the solver.
    async fn process_knowledge_base(&self, query: &str) -> RouteOutcome {
        let results = match self.knowledge.search(query, self.config.routing.top_k).await {
            Ok(results) => results,
            Err(err) => {
                warn!(error = %err, "knowledge base processing error");
                return RouteOutcome::degraded(
                    format!("Error accessing knowledge base: {err}"),
                    Some(err.to_string()),
                );
            }
        };

        let Some(best) = results.first() else {
            return RouteOutcome::degraded("No relevant information found in knowledge base.", None);
        };

        match self.solver.solve_from_knowledge(best, query).await {
            Ok(solution) => RouteOutcome {
                solution: solution.solution,
                steps: solution.steps,
                sources: vec![SourceRef::KnowledgeBase {
                    document: best.document.clone(),
                }],
                confidence: best.relevance.min(1.0),
                error: None,
            },
            Err(err) => {
                warn!(error = %err, "knowledge base processing error");
                RouteOutcome::degraded(
                    format!("Error accessing knowledge base: {err}"),
                    Some(err.to_string()),
                )
            }
        }
    }

    /// Answer from the web lookup via the solver, under the configured timeout.
    async fn process_web_search(&self, query: &str) -> RouteOutcome {
        if !self.config.search.enabled {
            return RouteOutcome::degraded(
                "No relevant information found through web search.",
                None,
            );
        }

        let timeout = Duration::from_secs(self.config.search.timeout_secs);
        let results = match tokio::time::timeout(
            timeout,
            self.web.search(query, self.config.search.max_results),
        )
        .await
        {
            Err(_) => {
                let err = mathio_core::MathioError::Timeout { duration: timeout };
                warn!(error = %err, "web search processing error");
                return RouteOutcome::degraded(
                    format!("Error during web search: {err}"),
                    Some(err.to_string()),
                );
            }
            Ok(Err(err)) => {
                warn!(error = %err, "web search processing error");
                return RouteOutcome::degraded(
                    format!("Error during web search: {err}"),
                    Some(err.to_string()),
                );
            }
            Ok(Ok(results)) => results,
        };

        if results.is_empty() {
            return RouteOutcome::degraded(
                "No relevant information found through web search.",
                None,
            );
        }

        match self.solver.solve_from_web(&results, query).await {
            Ok(solution) => RouteOutcome {
                solution: solution.solution,
                steps: solution.steps,
                sources: vec![SourceRef::WebSearch {
                    results: results.into_iter().take(WEB_SOURCE_LIMIT).collect(),
                }],
                confidence: solution.confidence,
                error: None,
            },
            Err(err) => {
                warn!(error = %err, "web search processing error");
                RouteOutcome::degraded(
                    format!("Error during web search: {err}"),
                    Some(err.to_string()),
                )
            }
        }
    }

    /// Answer via the direct solver.
    async fn process_fallback(&self, query: &str) -> RouteOutcome {
        match self.solver.solve_direct(query).await {
            Ok(solution) => RouteOutcome {
                solution: solution.solution,
                steps: solution.steps,
                sources: vec![SourceRef::DirectSolver {
                    method: "mathematical_analysis".to_string(),
                }],
                confidence: solution.confidence,
                error: None,
            },
            Err(err) => {
                warn!(error = %err, "fallback processing error");
                RouteOutcome {
                    solution: "I'm having trouble solving this problem. Could you please \
                               rephrase your question or provide more context?"
                        .to_string(),
                    steps: vec!["Unable to process the query with available methods".to_string()],
                    sources: Vec::new(),
                    confidence: 0.0,
                    error: Some(err.to_string()),
                }
            }
        }
    }
}

fn envelope(
    query: &str,
    route: RouteDecision,
    routing_metadata: RoutingMetadata,
    outcome: RouteOutcome,
) -> ResponseEnvelope {
    ResponseEnvelope {
        query: query.to_string(),
        route_used: route,
        routing_metadata,
        solution: outcome.solution,
        steps: outcome.steps,
        sources: outcome.sources,
        confidence: outcome.confidence,
        error: outcome.error,
    }
}
