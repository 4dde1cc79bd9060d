// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route selection over scorer outputs and configured thresholds.
//!
//! A single decision per call, first match wins:
//! 1. KB confidence at or above the threshold -> KnowledgeBase
//! 2. Else, web need >= hybrid_web_threshold:
//!    with moderate KB confidence -> Hybrid, otherwise -> WebSearch
//! 3. Else -> Fallback (direct solver)

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};

use mathio_config::model::RoutingConfig;
use mathio_core::MathioError;
use mathio_core::types::{KbMatch, RouteDecision, RoutingMetadata};

use crate::ledger::RoutingLedger;
use crate::scorer;

/// Applies scorer outputs and thresholds to choose a route.
///
/// Holds no state between calls other than the configured thresholds and
/// the ledger handle; appending a history entry is its only side effect.
pub struct RouteSelector {
    config: RoutingConfig,
    ledger: Arc<RoutingLedger>,
}

impl RouteSelector {
    /// Create a selector with the given thresholds and ledger handle.
    pub fn new(config: RoutingConfig, ledger: Arc<RoutingLedger>) -> Self {
        Self { config, ledger }
    }

    /// Decide the route for `query` given the retrieved KB candidates.
    ///
    /// Returns the decision together with the immutable metadata record.
    pub fn decide(&self, query: &str, candidates: &[KbMatch]) -> (RouteDecision, RoutingMetadata) {
        let kb_confidence = scorer::score_knowledge_base(candidates, query);

        let mut confidence_scores = BTreeMap::new();
        confidence_scores.insert(RouteDecision::KnowledgeBase.to_string(), kb_confidence);

        let (route, reasoning, fallback_used) =
            if kb_confidence >= self.config.confidence_threshold {
                (
                    RouteDecision::KnowledgeBase,
                    format!("High confidence match in knowledge base (score: {kb_confidence:.3})"),
                    false,
                )
            } else {
                let web_need = scorer::score_web_search_need(query);
                confidence_scores.insert(RouteDecision::WebSearch.to_string(), web_need);

                if web_need >= self.config.hybrid_web_threshold {
                    if kb_confidence > self.config.hybrid_kb_floor {
                        (
                            RouteDecision::Hybrid,
                            "Using hybrid approach - combining KB and web search".to_string(),
                            false,
                        )
                    } else {
                        (
                            RouteDecision::WebSearch,
                            format!("Using web search due to low KB confidence ({kb_confidence:.3})"),
                            false,
                        )
                    }
                } else {
                    (
                        RouteDecision::Fallback,
                        "Using fallback to math solver".to_string(),
                        true,
                    )
                }
            };

        info!(
            route = %route,
            kb_confidence,
            fallback_used,
            "routing decision"
        );

        let metadata = RoutingMetadata {
            query: query.to_string(),
            confidence_scores,
            reasoning,
            fallback_used,
            route_used: route,
        };

        self.ledger.record(&metadata);

        (route, metadata)
    }

    /// Convert a candidate-acquisition failure into a fallback decision.
    ///
    /// Scoring failures must never propagate to the caller: the error text
    /// is preserved in the reasoning field and the fallback flag is set.
    /// The failed decision is not recorded in the ledger.
    pub fn fallback_for_error(
        &self,
        query: &str,
        error: &MathioError,
    ) -> (RouteDecision, RoutingMetadata) {
        warn!(error = %error, "error in routing decision, using fallback");

        let metadata = RoutingMetadata {
            query: query.to_string(),
            confidence_scores: BTreeMap::new(),
            reasoning: format!("Error occurred, using fallback: {error}"),
            fallback_used: true,
            route_used: RouteDecision::Fallback,
        };

        (RouteDecision::Fallback, metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathio_core::types::KbDocument;

    fn selector() -> RouteSelector {
        RouteSelector::new(RoutingConfig::default(), Arc::new(RoutingLedger::new(64)))
    }

    fn kb_match(relevance: f64) -> KbMatch {
        KbMatch {
            document: KbDocument {
                id: "doc".to_string(),
                question: "q".to_string(),
                answer: "a".to_string(),
                explanation: String::new(),
                topic: "algebra".to_string(),
                difficulty: "basic".to_string(),
                keywords: vec![],
            },
            relevance,
        }
    }

    #[test]
    fn high_kb_confidence_wins_regardless_of_web_need() {
        let s = selector();
        // Relevance 0.85 + "solve" intent + "quadratic"/"equation" topics >= 0.7,
        // even though "explain" would also drive web need above 0.5.
        let (route, meta) =
            s.decide("explain and solve the quadratic equation x^2 - 5x + 6 = 0", &[kb_match(0.85)]);
        assert_eq!(route, RouteDecision::KnowledgeBase);
        assert!(!meta.fallback_used);
        assert!(meta.reasoning.contains("High confidence match"));
    }

    #[test]
    fn reasoning_includes_score_to_three_decimals() {
        let s = selector();
        let (_, meta) = s.decide("solve the quadratic equation", &[kb_match(0.85)]);
        // 0.85 + 0.1 (solve) + 0.2 (quadratic, equation) = 1.0 after clamping
        assert!(meta.reasoning.contains("1.000"), "reasoning: {}", meta.reasoning);
    }

    #[test]
    fn low_kb_and_low_web_need_falls_back() {
        let s = selector();
        let (route, meta) = s.decide("calculate 17 * 23", &[]);
        assert_eq!(route, RouteDecision::Fallback);
        assert!(meta.fallback_used);
    }

    #[test]
    fn web_need_without_kb_support_routes_to_web() {
        let s = selector();
        // Riemann scenario: no candidates, strong web signals.
        let (route, meta) = s.decide("Explain the Riemann hypothesis", &[]);
        assert_eq!(route, RouteDecision::WebSearch);
        assert!(!meta.fallback_used);
        assert!(meta.reasoning.contains("low KB confidence (0.000)"));
    }

    #[test]
    fn moderate_kb_with_web_need_goes_hybrid() {
        let s = selector();
        // kb_conf = 0.4, web_need >= 0.5 via "explain" + "theorem".
        let (route, _) = s.decide("explain the pythagorean theorem", &[kb_match(0.4)]);
        assert_eq!(route, RouteDecision::Hybrid);
    }

    #[test]
    fn decision_is_recorded_in_ledger() {
        let ledger = Arc::new(RoutingLedger::new(64));
        let s = RouteSelector::new(RoutingConfig::default(), Arc::clone(&ledger));
        s.decide("solve x + 1 = 2", &[kb_match(0.9)]);

        let stats = ledger.stats();
        assert_eq!(stats.total_queries, 1);
        assert_eq!(stats.route_distribution["knowledge_base"], 1);
    }

    #[test]
    fn error_fallback_sets_flag_and_keeps_error_text() {
        let s = selector();
        let err = MathioError::Internal("store poisoned".to_string());
        let (route, meta) = s.fallback_for_error("solve x", &err);
        assert_eq!(route, RouteDecision::Fallback);
        assert!(meta.fallback_used);
        assert!(meta.reasoning.contains("store poisoned"));
    }

    #[test]
    fn error_fallback_is_not_recorded() {
        let ledger = Arc::new(RoutingLedger::new(64));
        let s = RouteSelector::new(RoutingConfig::default(), Arc::clone(&ledger));
        s.fallback_for_error("solve x", &MathioError::Internal("boom".to_string()));
        assert_eq!(ledger.stats().total_queries, 0);
    }

    #[test]
    fn metadata_route_matches_decision() {
        let s = selector();
        for (query, candidates) in [
            ("solve the quadratic equation x^2 - 5x + 6 = 0", vec![kb_match(0.85)]),
            ("Explain the Riemann hypothesis", vec![]),
            ("calculate 2 + 2", vec![]),
        ] {
            let (route, meta) = s.decide(query, &candidates);
            assert_eq!(route, meta.route_used);
        }
    }
}
