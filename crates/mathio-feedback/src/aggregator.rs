// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feedback ingestion and improvement derivation.
//!
//! Improvement opportunities are derived by a table of independent
//! predicate -> record rules. Rules are not mutually exclusive: one entry
//! can fire several of them.

use std::sync::Arc;

use tracing::info;

use mathio_config::model::FeedbackConfig;
use mathio_core::types::ResponseEnvelope;

use crate::store::FeedbackStore;
use crate::types::{
    FeedbackData, FeedbackResult, ImprovementKind, ImprovementSuggestion, Priority,
    ResponseSnapshot,
};

/// Response confidence below which a poor rating implicates the router.
const LOW_CONFIDENCE_BOUND: f64 = 0.5;

/// One ingestion rule: when `applies` holds, a suggestion with the given
/// shape is recorded.
struct ImprovementRule {
    applies: fn(&ResponseSnapshot, &FeedbackData) -> bool,
    kind: ImprovementKind,
    priority: Priority,
    issue: &'static str,
    suggestion: &'static str,
    carries_correction: bool,
}

const IMPROVEMENT_RULES: &[ImprovementRule] = &[
    ImprovementRule {
        applies: |_, feedback| feedback.rating <= 2,
        kind: ImprovementKind::LowSatisfaction,
        priority: Priority::High,
        issue: "User gave low rating",
        suggestion: "Review solution quality and approach",
        carries_correction: false,
    },
    ImprovementRule {
        applies: |_, feedback| !feedback.correct,
        kind: ImprovementKind::Correctness,
        priority: Priority::Critical,
        issue: "Solution marked as incorrect",
        suggestion: "Verify computational accuracy and logic",
        carries_correction: true,
    },
    ImprovementRule {
        applies: |_, feedback| !feedback.clear,
        kind: ImprovementKind::Clarity,
        priority: Priority::Medium,
        issue: "Solution not clear to user",
        suggestion: "Improve explanation and step-by-step breakdown",
        carries_correction: false,
    },
    ImprovementRule {
        applies: |_, feedback| !feedback.complete,
        kind: ImprovementKind::Completeness,
        priority: Priority::Medium,
        issue: "Solution incomplete",
        suggestion: "Provide more comprehensive solution steps",
        carries_correction: false,
    },
    ImprovementRule {
        applies: |response, feedback| {
            response.confidence < LOW_CONFIDENCE_BOUND && feedback.rating <= 3
        },
        kind: ImprovementKind::ConfidenceAccuracy,
        priority: Priority::High,
        issue: "Low confidence correlated with poor user experience",
        suggestion: "Improve routing decision accuracy",
        carries_correction: false,
    },
];

/// Evaluate every rule against one (response, feedback) pair.
pub fn derive_improvements(
    response: &ResponseSnapshot,
    feedback: &FeedbackData,
) -> Vec<ImprovementSuggestion> {
    IMPROVEMENT_RULES
        .iter()
        .filter(|rule| (rule.applies)(response, feedback))
        .map(|rule| ImprovementSuggestion {
            kind: rule.kind,
            route: response.route_used,
            issue: rule.issue.to_string(),
            suggestion: rule.suggestion.to_string(),
            priority: rule.priority,
            user_correction: (rule.carries_correction
                && !feedback.alternative_solution.is_empty())
            .then(|| feedback.alternative_solution.clone()),
        })
        .collect()
}

/// Ingests post-hoc user ratings tied to prior route decisions and
/// accumulates statistics for later analysis.
pub struct FeedbackAggregator {
    store: Arc<FeedbackStore>,
    config: FeedbackConfig,
}

impl FeedbackAggregator {
    /// Create an aggregator over a shared store.
    pub fn new(store: Arc<FeedbackStore>, config: FeedbackConfig) -> Self {
        Self { store, config }
    }

    /// Handle to the underlying store.
    pub fn store(&self) -> Arc<FeedbackStore> {
        Arc::clone(&self.store)
    }

    /// The configured trend window length.
    pub(crate) fn recent_window(&self) -> usize {
        self.config.recent_window
    }

    /// Collect and process one user feedback submission.
    pub fn collect_feedback(
        &self,
        query: &str,
        response: &ResponseEnvelope,
        feedback: FeedbackData,
    ) -> FeedbackResult {
        let snapshot = ResponseSnapshot {
            solution: response.solution.clone(),
            steps: response.steps.clone(),
            route_used: response.route_used,
            confidence: response.confidence,
        };

        let suggestions = derive_improvements(&snapshot, &feedback);

        let feedback_id = self.store.ingest(
            query,
            snapshot,
            response.routing_metadata.confidence_scores.clone(),
            feedback,
            &suggestions,
        );

        info!(
            feedback_id = feedback_id.as_str(),
            improvements = suggestions.len(),
            "feedback collected"
        );

        FeedbackResult {
            feedback_id,
            status: "collected".to_string(),
            improvements_identified: suggestions.len(),
            suggestions,
        }
    }
}
