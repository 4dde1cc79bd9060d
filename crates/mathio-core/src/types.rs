// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Mathio workspace.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The information-source strategy chosen for a query. Immutable once made.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    /// High-confidence match in the curated knowledge base.
    KnowledgeBase,
    /// Query needs fresh or explanatory material from the web.
    WebSearch,
    /// Moderate KB confidence plus web need: consult both and merge.
    Hybrid,
    /// No source confidently applicable; answer via direct computation.
    Fallback,
}

impl RouteDecision {
    /// All four variants, in decision-priority order.
    pub const ALL: [RouteDecision; 4] = [
        RouteDecision::KnowledgeBase,
        RouteDecision::WebSearch,
        RouteDecision::Hybrid,
        RouteDecision::Fallback,
    ];
}

/// Record of how a routing decision was made. Created once per query by the
/// selector; never mutated after the decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingMetadata {
    /// The original query text.
    pub query: String,
    /// Confidence score per route name ("knowledge_base", "web_search").
    pub confidence_scores: BTreeMap<String, f64>,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
    /// Whether the fallback route was forced (low scores or scoring failure).
    pub fallback_used: bool,
    /// The route that was chosen.
    pub route_used: RouteDecision,
}

/// A curated knowledge base document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KbDocument {
    /// Unique identifier within the dataset.
    pub id: String,
    /// The question this document answers.
    pub question: String,
    /// The canonical answer text.
    pub answer: String,
    /// Longer-form explanation of the answer.
    pub explanation: String,
    /// Topic label (algebra, calculus, geometry, ...).
    pub topic: String,
    /// Difficulty label (basic, intermediate, advanced).
    pub difficulty: String,
    /// Keywords used by the weighted keyword search.
    pub keywords: Vec<String>,
}

/// A knowledge base document paired with its retrieval relevance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KbMatch {
    /// The matched document.
    pub document: KbDocument,
    /// Raw relevance score from the search (unbounded above by keyword count).
    pub relevance: f64,
}

/// A single web lookup result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebResult {
    /// Result title.
    pub title: String,
    /// Short snippet describing the result.
    pub snippet: String,
    /// Source URL.
    pub url: String,
    /// Relevance score after math-focused ranking.
    pub relevance: f64,
    /// Extracted page content, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A solver result: solution text, ordered steps, and a confidence estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub solution: String,
    pub steps: Vec<String>,
    pub confidence: f64,
}

/// Provenance attached to a response: which collaborator produced it and
/// what material it used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceRef {
    /// Answer grounded in a knowledge base document.
    KnowledgeBase { document: KbDocument },
    /// Answer grounded in web lookup results.
    WebSearch { results: Vec<WebResult> },
    /// Answer produced by the direct solver.
    DirectSolver { method: String },
}

/// The per-collaborator result envelope assembled by the dispatcher.
///
/// A failed collaborator call degrades to an outcome with `confidence = 0.0`
/// and an explanatory solution string; it never surfaces as an error to the
/// caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteOutcome {
    pub solution: String,
    pub steps: Vec<String>,
    pub sources: Vec<SourceRef>,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RouteOutcome {
    /// An empty outcome carrying only an explanatory solution string.
    pub fn degraded(solution: impl Into<String>, error: Option<String>) -> Self {
        Self {
            solution: solution.into(),
            steps: Vec::new(),
            sources: Vec::new(),
            confidence: 0.0,
            error,
        }
    }
}

/// The complete caller-facing response for one processed query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// The original query text.
    pub query: String,
    /// The route that produced this response.
    pub route_used: RouteDecision,
    /// How the routing decision was made.
    pub routing_metadata: RoutingMetadata,
    /// The solution text.
    pub solution: String,
    /// Ordered solution steps.
    pub steps: Vec<String>,
    /// Provenance of the solution.
    pub sources: Vec<SourceRef>,
    /// Confidence in the solution (0.0-1.0).
    pub confidence: f64,
    /// Collaborator error text, if the route degraded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_decision_display_snake_case() {
        assert_eq!(RouteDecision::KnowledgeBase.to_string(), "knowledge_base");
        assert_eq!(RouteDecision::WebSearch.to_string(), "web_search");
        assert_eq!(RouteDecision::Hybrid.to_string(), "hybrid");
        assert_eq!(RouteDecision::Fallback.to_string(), "fallback");
    }

    #[test]
    fn route_decision_round_trips_through_strings() {
        use std::str::FromStr;

        for route in RouteDecision::ALL {
            let s = route.to_string();
            let parsed = RouteDecision::from_str(&s).expect("should parse back");
            assert_eq!(route, parsed);
        }
    }

    #[test]
    fn route_decision_serde_matches_display() {
        let json = serde_json::to_string(&RouteDecision::KnowledgeBase).unwrap();
        assert_eq!(json, "\"knowledge_base\"");
        let parsed: RouteDecision = serde_json::from_str("\"hybrid\"").unwrap();
        assert_eq!(parsed, RouteDecision::Hybrid);
    }

    #[test]
    fn source_ref_tagged_serialization() {
        let source = SourceRef::DirectSolver {
            method: "mathematical_analysis".to_string(),
        };
        let json = serde_json::to_value(&source).unwrap();
        assert_eq!(json["type"], "direct_solver");
        assert_eq!(json["method"], "mathematical_analysis");
    }

    #[test]
    fn degraded_outcome_has_zero_confidence() {
        let outcome = RouteOutcome::degraded("nothing found", None);
        assert_eq!(outcome.confidence, 0.0);
        assert!(outcome.steps.is_empty());
        assert!(outcome.sources.is_empty());
        assert!(outcome.error.is_none());
    }

    #[test]
    fn envelope_serializes_without_null_error() {
        let envelope = ResponseEnvelope {
            query: "what is 2+2".to_string(),
            route_used: RouteDecision::Fallback,
            routing_metadata: RoutingMetadata {
                query: "what is 2+2".to_string(),
                confidence_scores: BTreeMap::new(),
                reasoning: "test".to_string(),
                fallback_used: true,
                route_used: RouteDecision::Fallback,
            },
            solution: "4".to_string(),
            steps: vec![],
            sources: vec![],
            confidence: 0.5,
            error: None,
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["route_used"], "fallback");
    }
}
