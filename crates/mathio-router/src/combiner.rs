// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Merges knowledge base and web outcomes for the hybrid route.

use mathio_core::types::RouteOutcome;

/// Combine a knowledge base outcome with a web outcome into one response.
///
/// The KB solution leads under a labeled preamble; the web solution is
/// appended only when it differs (exact string inequality). Steps and
/// sources are concatenated KB-then-web with both orders preserved, no
/// de-duplication. Confidence is the arithmetic mean of the two inputs --
/// no weighting by source reliability, a documented simplification.
pub fn combine(kb: &RouteOutcome, web: &RouteOutcome) -> RouteOutcome {
    let mut solution = format!("Based on my knowledge base: {}\n\n", kb.solution);

    if !web.solution.is_empty() && web.solution != kb.solution {
        solution.push_str(&format!(
            "Additional information from web search: {}",
            web.solution
        ));
    }

    let mut steps = kb.steps.clone();
    steps.extend(web.steps.iter().cloned());

    let mut sources = kb.sources.clone();
    sources.extend(web.sources.iter().cloned());

    RouteOutcome {
        solution,
        steps,
        sources,
        confidence: (kb.confidence + web.confidence) / 2.0,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathio_core::types::SourceRef;

    fn outcome(solution: &str, steps: &[&str], confidence: f64) -> RouteOutcome {
        RouteOutcome {
            solution: solution.to_string(),
            steps: steps.iter().map(|s| s.to_string()).collect(),
            sources: vec![SourceRef::DirectSolver {
                method: "test".to_string(),
            }],
            confidence,
            error: None,
        }
    }

    #[test]
    fn confidence_is_exact_arithmetic_mean() {
        let kb = outcome("a", &[], 0.9);
        let web = outcome("b", &[], 0.5);
        let combined = combine(&kb, &web);
        assert_eq!(combined.confidence, (0.9 + 0.5) / 2.0);
    }

    #[test]
    fn differing_web_solution_is_appended() {
        let kb = outcome("KB answer", &[], 0.8);
        let web = outcome("web answer", &[], 0.6);
        let combined = combine(&kb, &web);
        assert!(combined.solution.starts_with("Based on my knowledge base: KB answer"));
        assert!(combined.solution.contains("Additional information from web search: web answer"));
    }

    #[test]
    fn identical_web_solution_is_skipped() {
        let kb = outcome("same answer", &[], 0.8);
        let web = outcome("same answer", &[], 0.6);
        let combined = combine(&kb, &web);
        assert!(!combined.solution.contains("Additional information"));
    }

    #[test]
    fn empty_web_solution_is_skipped() {
        let kb = outcome("KB answer", &[], 0.8);
        let web = outcome("", &[], 0.0);
        let combined = combine(&kb, &web);
        assert!(!combined.solution.contains("Additional information"));
    }

    #[test]
    fn steps_concatenate_kb_then_web_without_dedup() {
        let kb = outcome("a", &["Step 1: x", "Step 2: y"], 0.8);
        let web = outcome("b", &["Step 1: x", "Step 2: z"], 0.6);
        let combined = combine(&kb, &web);
        assert_eq!(
            combined.steps,
            vec!["Step 1: x", "Step 2: y", "Step 1: x", "Step 2: z"]
        );
    }

    #[test]
    fn sources_concatenate_in_order() {
        let kb = outcome("a", &[], 0.8);
        let web = outcome("b", &[], 0.6);
        let combined = combine(&kb, &web);
        assert_eq!(combined.sources.len(), 2);
    }
}
