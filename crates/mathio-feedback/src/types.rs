// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feedback domain types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use mathio_core::types::RouteDecision;

/// Priority tier of an improvement suggestion.
///
/// Declaration order is the ordering: `Low < Medium < High < Critical`, so
/// prioritization can sort on the variant directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Category of an improvement suggestion, one per ingestion rule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ImprovementKind {
    LowSatisfaction,
    Correctness,
    Clarity,
    Completeness,
    ConfidenceAccuracy,
}

/// One improvement opportunity derived from a feedback entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImprovementSuggestion {
    pub kind: ImprovementKind,
    /// The route the criticized response came from.
    pub route: RouteDecision,
    pub issue: String,
    pub suggestion: String,
    pub priority: Priority,
    /// The user's corrected solution, when a correctness rule fired with one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_correction: Option<String>,
}

/// Structured user feedback as submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackData {
    /// User rating on a 1-5 scale.
    pub rating: u8,
    pub helpful: bool,
    pub correct: bool,
    pub clear: bool,
    pub complete: bool,
    pub comments: String,
    pub suggested_improvement: String,
    pub alternative_solution: String,
}

impl Default for FeedbackData {
    fn default() -> Self {
        Self {
            rating: 0,
            helpful: false,
            correct: true,
            clear: true,
            complete: true,
            comments: String::new(),
            suggested_improvement: String::new(),
            alternative_solution: String::new(),
        }
    }
}

/// The slice of a response preserved inside a feedback entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSnapshot {
    pub solution: String,
    pub steps: Vec<String>,
    pub route_used: RouteDecision,
    pub confidence: f64,
}

/// Context recorded alongside an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackMetadata {
    /// The routing confidence-score map at decision time.
    pub route_confidence: BTreeMap<String, f64>,
    /// Mirror of the rating, for satisfaction reporting.
    pub user_satisfaction: u8,
}

/// An immutable record of one user-supplied quality judgment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEntry {
    /// Unique within the store's lifetime.
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub query: String,
    pub response: ResponseSnapshot,
    pub feedback: FeedbackData,
    pub metadata: FeedbackMetadata,
}

/// Result returned to the submitter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResult {
    pub feedback_id: String,
    pub status: String,
    pub improvements_identified: usize,
    pub suggestions: Vec<ImprovementSuggestion>,
}

/// Per-route feedback counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RouteCounters {
    pub total: u64,
    pub helpful: u64,
    pub correct: u64,
}

/// The named counter block mutated on every ingestion.
///
/// Counters are never reset except at fresh initialization, and always
/// agree with the count of stored entries satisfying each predicate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackStats {
    pub total_feedback: u64,
    /// Counts for ratings 1..=5 (index 0 is rating 1).
    pub ratings: [u64; 5],
    pub routes: BTreeMap<RouteDecision, RouteCounters>,
    pub high_satisfaction: u64,
    pub low_satisfaction: u64,
    pub clarity_issues: u64,
    pub completeness_issues: u64,
}

impl FeedbackStats {
    /// Mean rating over the five buckets; 0.0 when no ratings recorded.
    pub fn average_rating(&self) -> f64 {
        let mut total_ratings = 0u64;
        let mut total_count = 0u64;
        for (i, count) in self.ratings.iter().enumerate() {
            total_ratings += (i as u64 + 1) * count;
            total_count += count;
        }
        if total_count > 0 {
            total_ratings as f64 / total_count as f64
        } else {
            0.0
        }
    }
}

// ---- Analysis report types ----

/// Overall direction of recent feedback versus the all-time mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

/// Recent-versus-overall rating comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendReport {
    pub recent_average_rating: f64,
    pub overall_average_rating: f64,
    pub trend: Trend,
    pub recent_feedback_count: usize,
}

/// Headline numbers of a feedback analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOverview {
    pub total_feedback_entries: u64,
    pub average_rating: f64,
    pub high_satisfaction_rate: f64,
    pub low_satisfaction_rate: f64,
}

/// Performance of one route as judged by users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePerformance {
    pub total_usage: u64,
    pub helpful_rate: f64,
    pub correct_rate: f64,
    /// (helpful + correct) / (2 * total).
    pub effectiveness_score: f64,
}

/// Rates of the two structural quality complaints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommonIssues {
    pub clarity_rate: f64,
    pub completeness_rate: f64,
}

/// One row of the prioritized improvement list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrioritizedImprovement {
    pub kind: ImprovementKind,
    pub priority: Priority,
    pub frequency: u64,
    pub recommended_action: String,
}

/// The comprehensive feedback analysis report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackAnalysis {
    pub overview: AnalysisOverview,
    pub route_performance: BTreeMap<String, RoutePerformance>,
    pub common_issues: CommonIssues,
    pub improvement_priorities: Vec<PrioritizedImprovement>,
    pub recent_trends: TrendReport,
}

/// One bucket of the rating distribution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RatingBucket {
    pub count: u64,
    pub percentage: f64,
}

/// Entry-level quality rates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub helpfulness: f64,
    pub correctness: f64,
    pub clarity: f64,
    pub completeness: f64,
}

/// Detailed user satisfaction report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatisfactionMetrics {
    pub average_rating: f64,
    pub rating_distribution: BTreeMap<String, RatingBucket>,
    pub quality_metrics: QualityMetrics,
    pub satisfaction_trend: TrendReport,
}
