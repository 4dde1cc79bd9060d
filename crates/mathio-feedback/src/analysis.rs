// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feedback analysis: route performance, improvement prioritization, and
//! trend detection.

use std::collections::BTreeMap;

use crate::aggregator::FeedbackAggregator;
use crate::store::SuggestionTally;
use crate::types::{
    AnalysisOverview, CommonIssues, FeedbackAnalysis, ImprovementKind, PrioritizedImprovement,
    Priority, QualityMetrics, RatingBucket, RoutePerformance, SatisfactionMetrics, Trend,
    TrendReport,
};

/// Maximum rows in the prioritized improvement list.
const PRIORITY_REPORT_LEN: usize = 10;

/// Recommended action per improvement kind.
const RECOMMENDED_ACTIONS: &[(ImprovementKind, &str)] = &[
    (
        ImprovementKind::Correctness,
        "Review mathematical computation logic and verify solutions against known answers",
    ),
    (
        ImprovementKind::Clarity,
        "Improve step-by-step explanations and use simpler language",
    ),
    (
        ImprovementKind::Completeness,
        "Ensure all solution steps are included and properly explained",
    ),
    (
        ImprovementKind::LowSatisfaction,
        "Conduct detailed review of user experience and solution quality",
    ),
    (
        ImprovementKind::ConfidenceAccuracy,
        "Calibrate routing confidence scores and improve decision thresholds",
    ),
];

const GENERIC_ACTION: &str = "Investigate specific issues and implement targeted improvements";

fn recommended_action(kind: ImprovementKind) -> &'static str {
    RECOMMENDED_ACTIONS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, action)| *action)
        .unwrap_or(GENERIC_ACTION)
}

/// Tier order for the prioritized list: a low-frequency critical item
/// always outranks a high-frequency low item.
const TIER_ORDER: [Priority; 4] = [
    Priority::Critical,
    Priority::High,
    Priority::Medium,
    Priority::Low,
];

/// Group tallies by tier (fixed order), then by descending frequency within
/// a tier, and cap the list.
pub fn prioritize(tallies: &[SuggestionTally]) -> Vec<PrioritizedImprovement> {
    let mut prioritized = Vec::new();

    for tier in TIER_ORDER {
        let mut in_tier: Vec<&SuggestionTally> =
            tallies.iter().filter(|t| t.priority == tier).collect();
        // Descending frequency; kind as a deterministic tie-break.
        in_tier.sort_by(|a, b| b.count.cmp(&a.count).then(a.kind.cmp(&b.kind)));

        for tally in in_tier {
            prioritized.push(PrioritizedImprovement {
                kind: tally.kind,
                priority: tally.priority,
                frequency: tally.count,
                recommended_action: recommended_action(tally.kind).to_string(),
            });
        }
    }

    prioritized.truncate(PRIORITY_REPORT_LEN);
    prioritized
}

impl FeedbackAggregator {
    /// Comprehensive feedback analysis; `None` until any feedback exists.
    pub fn analysis(&self) -> Option<FeedbackAnalysis> {
        let store = self.store();
        let stats = store.stats();
        if stats.total_feedback == 0 {
            return None;
        }

        let total = stats.total_feedback as f64;

        let route_performance: BTreeMap<String, RoutePerformance> = stats
            .routes
            .iter()
            .filter(|(_, counters)| counters.total > 0)
            .map(|(route, counters)| {
                let route_total = counters.total as f64;
                (
                    route.to_string(),
                    RoutePerformance {
                        total_usage: counters.total,
                        helpful_rate: counters.helpful as f64 / route_total,
                        correct_rate: counters.correct as f64 / route_total,
                        effectiveness_score: (counters.helpful + counters.correct) as f64
                            / (2.0 * route_total),
                    },
                )
            })
            .collect();

        Some(FeedbackAnalysis {
            overview: AnalysisOverview {
                total_feedback_entries: stats.total_feedback,
                average_rating: stats.average_rating(),
                high_satisfaction_rate: stats.high_satisfaction as f64 / total,
                low_satisfaction_rate: stats.low_satisfaction as f64 / total,
            },
            route_performance,
            common_issues: CommonIssues {
                clarity_rate: stats.clarity_issues as f64 / total,
                completeness_rate: stats.completeness_issues as f64 / total,
            },
            improvement_priorities: prioritize(&store.suggestion_tallies()),
            recent_trends: self.recent_trends()?,
        })
    }

    /// Prioritized improvement list; empty until any rules have fired.
    pub fn prioritize_improvements(&self) -> Vec<PrioritizedImprovement> {
        prioritize(&self.store().suggestion_tallies())
    }

    /// Recent-versus-overall rating comparison over the configured window;
    /// `None` until any feedback exists.
    pub fn recent_trends(&self) -> Option<TrendReport> {
        let store = self.store();
        let recent = store.recent_ratings(self.recent_window());
        if recent.is_empty() {
            return None;
        }

        let recent_average_rating =
            recent.iter().map(|&r| r as f64).sum::<f64>() / recent.len() as f64;
        let overall_average_rating = store.stats().average_rating();

        let trend = if recent_average_rating > overall_average_rating {
            Trend::Improving
        } else if recent_average_rating < overall_average_rating {
            Trend::Declining
        } else {
            Trend::Stable
        };

        Some(TrendReport {
            recent_average_rating,
            overall_average_rating,
            trend,
            recent_feedback_count: recent.len(),
        })
    }

    /// Detailed satisfaction metrics; `None` until any feedback exists.
    pub fn satisfaction_metrics(&self) -> Option<SatisfactionMetrics> {
        let store = self.store();
        let stats = store.stats();
        if stats.total_feedback == 0 {
            return None;
        }

        let total = stats.total_feedback as f64;

        let rating_distribution = stats
            .ratings
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                (
                    format!("rating_{}", i + 1),
                    RatingBucket {
                        count,
                        percentage: (count as f64 / total) * 100.0,
                    },
                )
            })
            .collect();

        let quality = store.quality_tallies();

        Some(SatisfactionMetrics {
            average_rating: stats.average_rating(),
            rating_distribution,
            quality_metrics: QualityMetrics {
                helpfulness: quality.helpful as f64 / total,
                correctness: quality.correct as f64 / total,
                clarity: quality.clear as f64 / total,
                completeness: quality.complete as f64 / total,
            },
            satisfaction_trend: self.recent_trends()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FeedbackStore;
    use crate::types::{FeedbackData, ResponseSnapshot};
    use mathio_config::model::FeedbackConfig;
    use mathio_core::types::{ResponseEnvelope, RouteDecision, RoutingMetadata};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn aggregator() -> FeedbackAggregator {
        FeedbackAggregator::new(
            Arc::new(FeedbackStore::in_memory(1000)),
            FeedbackConfig::default(),
        )
    }

    fn envelope(route: RouteDecision, confidence: f64) -> ResponseEnvelope {
        ResponseEnvelope {
            query: "q".to_string(),
            route_used: route,
            routing_metadata: RoutingMetadata {
                query: "q".to_string(),
                confidence_scores: BTreeMap::new(),
                reasoning: String::new(),
                fallback_used: false,
                route_used: route,
            },
            solution: "s".to_string(),
            steps: vec![],
            sources: vec![],
            confidence,
            error: None,
        }
    }

    fn submit(agg: &FeedbackAggregator, route: RouteDecision, rating: u8, helpful: bool) {
        let feedback = FeedbackData {
            rating,
            helpful,
            ..Default::default()
        };
        agg.collect_feedback("q", &envelope(route, 0.9), feedback);
    }

    #[test]
    fn empty_store_analysis_is_none_not_division_by_zero() {
        let agg = aggregator();
        assert!(agg.analysis().is_none());
        assert!(agg.recent_trends().is_none());
        assert!(agg.satisfaction_metrics().is_none());
        assert!(agg.prioritize_improvements().is_empty());
    }

    #[test]
    fn analysis_overview_and_route_performance() {
        let agg = aggregator();
        submit(&agg, RouteDecision::KnowledgeBase, 5, true);
        submit(&agg, RouteDecision::KnowledgeBase, 4, true);
        submit(&agg, RouteDecision::Fallback, 1, false);

        let analysis = agg.analysis().unwrap();
        assert_eq!(analysis.overview.total_feedback_entries, 3);
        assert!((analysis.overview.average_rating - 10.0 / 3.0).abs() < 1e-9);
        assert!((analysis.overview.high_satisfaction_rate - 2.0 / 3.0).abs() < 1e-9);

        let kb = &analysis.route_performance["knowledge_base"];
        assert_eq!(kb.total_usage, 2);
        assert_eq!(kb.helpful_rate, 1.0);
        assert_eq!(kb.correct_rate, 1.0);
        assert_eq!(kb.effectiveness_score, 1.0);

        // Routes with no feedback are absent, not zero-filled.
        assert!(!analysis.route_performance.contains_key("web_search"));
        assert!(!analysis.route_performance.contains_key("hybrid"));
    }

    #[test]
    fn effectiveness_score_formula() {
        let agg = aggregator();
        // helpful=true, correct defaults true -> (1 + 1) / (2 * 1) = 1.0
        submit(&agg, RouteDecision::WebSearch, 3, true);
        // helpful=false, correct=true -> route totals: helpful 1, correct 2, total 2
        submit(&agg, RouteDecision::WebSearch, 3, false);

        let analysis = agg.analysis().unwrap();
        let web = &analysis.route_performance["web_search"];
        assert!((web.effectiveness_score - 3.0 / 4.0).abs() < 1e-9);
    }

    #[test]
    fn tier_order_beats_frequency() {
        let tallies = vec![
            SuggestionTally {
                priority: Priority::Low,
                kind: ImprovementKind::Clarity,
                count: 50,
            },
            SuggestionTally {
                priority: Priority::Critical,
                kind: ImprovementKind::Correctness,
                count: 1,
            },
        ];
        let prioritized = prioritize(&tallies);
        assert_eq!(prioritized[0].kind, ImprovementKind::Correctness);
        assert_eq!(prioritized[0].frequency, 1);
        assert_eq!(prioritized[1].kind, ImprovementKind::Clarity);
    }

    #[test]
    fn within_tier_sorted_by_descending_frequency() {
        let tallies = vec![
            SuggestionTally {
                priority: Priority::Medium,
                kind: ImprovementKind::Clarity,
                count: 2,
            },
            SuggestionTally {
                priority: Priority::Medium,
                kind: ImprovementKind::Completeness,
                count: 7,
            },
        ];
        let prioritized = prioritize(&tallies);
        assert_eq!(prioritized[0].kind, ImprovementKind::Completeness);
        assert_eq!(prioritized[1].kind, ImprovementKind::Clarity);
    }

    #[test]
    fn prioritized_list_is_capped_at_ten() {
        // More distinct (priority, kind) rows than the cap.
        let mut tallies = Vec::new();
        for priority in [Priority::Critical, Priority::High, Priority::Medium] {
            for kind in [
                ImprovementKind::LowSatisfaction,
                ImprovementKind::Correctness,
                ImprovementKind::Clarity,
                ImprovementKind::Completeness,
                ImprovementKind::ConfidenceAccuracy,
            ] {
                tallies.push(SuggestionTally {
                    priority,
                    kind,
                    count: 1,
                });
            }
        }
        assert_eq!(prioritize(&tallies).len(), 10);
    }

    #[test]
    fn every_known_kind_has_a_specific_action() {
        for kind in [
            ImprovementKind::LowSatisfaction,
            ImprovementKind::Correctness,
            ImprovementKind::Clarity,
            ImprovementKind::Completeness,
            ImprovementKind::ConfidenceAccuracy,
        ] {
            assert_ne!(recommended_action(kind), GENERIC_ACTION);
        }
    }

    #[test]
    fn trend_detection_over_recent_window() {
        let agg = aggregator();
        // Old poor ratings followed by a strong recent run. The window (20)
        // still spans everything here, so craft the split explicitly: 25
        // poor entries push the early ones out of the recent window.
        for _ in 0..25 {
            submit(&agg, RouteDecision::Fallback, 1, false);
        }
        for _ in 0..20 {
            submit(&agg, RouteDecision::Fallback, 5, true);
        }

        let trend = agg.recent_trends().unwrap();
        assert_eq!(trend.recent_feedback_count, 20);
        assert_eq!(trend.recent_average_rating, 5.0);
        assert!(trend.recent_average_rating > trend.overall_average_rating);
        assert_eq!(trend.trend, Trend::Improving);
    }

    #[test]
    fn uniform_ratings_are_stable() {
        let agg = aggregator();
        for _ in 0..5 {
            submit(&agg, RouteDecision::Hybrid, 3, true);
        }
        let trend = agg.recent_trends().unwrap();
        assert_eq!(trend.trend, Trend::Stable);
    }

    #[test]
    fn satisfaction_metrics_distribution_and_quality() {
        let agg = aggregator();
        submit(&agg, RouteDecision::KnowledgeBase, 5, true);
        submit(&agg, RouteDecision::KnowledgeBase, 5, true);
        submit(&agg, RouteDecision::KnowledgeBase, 1, false);

        let metrics = agg.satisfaction_metrics().unwrap();
        assert_eq!(metrics.rating_distribution["rating_5"].count, 2);
        assert!((metrics.rating_distribution["rating_5"].percentage - 200.0 / 3.0).abs() < 1e-9);
        assert!((metrics.quality_metrics.helpfulness - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(metrics.quality_metrics.correctness, 1.0);
    }
}
