// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Human-readable and JSON reports for routing stats and feedback analysis.

use colored::Colorize;

use mathio_config::model::MathioConfig;
use mathio_core::MathioError;
use mathio_feedback::FeedbackAnalysis;
use mathio_router::RoutingStats;

use crate::app;

/// Run the `mathio analysis` command against the persisted feedback store.
pub fn run_analysis(config: MathioConfig, json: bool) -> Result<(), MathioError> {
    let app = app::build(config);
    let analysis = app.aggregator.analysis();

    if json {
        let json = serde_json::to_string_pretty(&analysis)
            .map_err(|e| MathioError::Internal(e.to_string()))?;
        println!("{json}");
    } else {
        print_analysis(analysis.as_ref());
    }
    Ok(())
}

/// Pretty-print a feedback analysis, or the empty-store message.
pub fn print_analysis(analysis: Option<&FeedbackAnalysis>) {
    let Some(analysis) = analysis else {
        println!("No feedback data available yet");
        return;
    };

    println!("{}", "feedback analysis".bold());
    println!(
        "  entries: {}  avg rating: {:.2}  high satisfaction: {:.0}%  low: {:.0}%",
        analysis.overview.total_feedback_entries,
        analysis.overview.average_rating,
        analysis.overview.high_satisfaction_rate * 100.0,
        analysis.overview.low_satisfaction_rate * 100.0,
    );

    if !analysis.route_performance.is_empty() {
        println!("{}", "route performance".bold());
        for (route, perf) in &analysis.route_performance {
            println!(
                "  {:<16} used {:>4}  helpful {:.0}%  correct {:.0}%  effectiveness {:.2}",
                route.cyan(),
                perf.total_usage,
                perf.helpful_rate * 100.0,
                perf.correct_rate * 100.0,
                perf.effectiveness_score,
            );
        }
    }

    println!(
        "{}  clarity issues {:.0}%  completeness issues {:.0}%",
        "common issues".bold(),
        analysis.common_issues.clarity_rate * 100.0,
        analysis.common_issues.completeness_rate * 100.0,
    );

    if !analysis.improvement_priorities.is_empty() {
        println!("{}", "improvement priorities".bold());
        for item in &analysis.improvement_priorities {
            println!(
                "  [{}] {} (x{}): {}",
                item.priority.to_string().red(),
                item.kind,
                item.frequency,
                item.recommended_action,
            );
        }
    }

    let trend = &analysis.recent_trends;
    println!(
        "{}  recent {:.2} vs overall {:.2} -> {}",
        "trend".bold(),
        trend.recent_average_rating,
        trend.overall_average_rating,
        trend.trend,
    );
}

/// Pretty-print routing statistics.
pub fn print_routing_stats(stats: &RoutingStats) {
    println!("{}", "routing stats".bold());
    println!("  total queries: {}", stats.total_queries);

    for (route, count) in &stats.route_distribution {
        let avg = stats
            .average_confidence_by_route
            .get(route)
            .copied()
            .unwrap_or(0.0);
        println!("  {:<16} {:>4}  avg confidence {avg:.3}", route.cyan(), count);
    }

    if !stats.recent_queries.is_empty() {
        println!("{}", "recent".bold());
        for entry in &stats.recent_queries {
            println!("  [{}] {}", entry.route.to_string().cyan(), entry.query_excerpt);
        }
    }
}
