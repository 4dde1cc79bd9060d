// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic confidence scoring over explicit keyword tables.
//!
//! Both scorers are pure lexical classifiers: deterministic given the fixed
//! tables below, no model calls, no network, no latency. The tables are the
//! routing policy -- tune weights here, not in the selector's control flow.

use mathio_core::types::KbMatch;

/// Math-topic keywords. Each keyword found in the query adds its weight to
/// the knowledge base confidence (once per keyword, however often it occurs).
const MATH_TOPIC_BOOSTS: &[(&str, f64)] = &[
    ("derivative", 0.1),
    ("integral", 0.1),
    ("quadratic", 0.1),
    ("linear", 0.1),
    ("equation", 0.1),
    ("formula", 0.1),
];

/// Computational-intent keywords. Any hit adds a single flat boost.
const COMPUTE_INTENT_KEYWORDS: &[&str] = &["solve", "calculate", "find", "compute"];

const COMPUTE_INTENT_BOOST: f64 = 0.1;

/// Freshness and explanatory indicators favoring web search.
const WEB_INDICATOR_BOOSTS: &[(&str, f64)] = &[
    ("latest", 0.2),
    ("recent", 0.2),
    ("new", 0.2),
    ("current", 0.2),
    ("today", 0.2),
    ("2024", 0.2),
    ("2025", 0.2),
    ("research", 0.2),
    ("paper", 0.2),
    ("study", 0.2),
    ("theorem", 0.2),
    ("conjecture", 0.2),
    ("explain", 0.2),
    ("what is", 0.2),
    ("definition", 0.2),
    ("concept", 0.2),
];

/// Advanced topics (named mathematicians, famous conjectures) that the
/// curated knowledge base is unlikely to cover.
const ADVANCED_TOPIC_BOOSTS: &[(&str, f64)] = &[
    ("riemann", 0.3),
    ("fermat", 0.3),
    ("basel", 0.3),
    ("euler", 0.3),
    ("gauss", 0.3),
    ("newton", 0.3),
    ("hypothesis", 0.3),
    ("conjecture", 0.3),
    ("problem", 0.3),
    ("paradox", 0.3),
];

/// Phrases marking an explanation-seeking query.
const EXPLANATION_PHRASES: &[&str] = &["explain", "what is", "how does", "why"];

const EXPLANATION_BOOST: f64 = 0.3;

/// Small baseline for computational queries, which the KB often covers.
const COMPUTATIONAL_BASELINE: f64 = 0.1;

/// Token count above which a query is considered long-form.
const LONG_QUERY_TOKENS: usize = 10;

const LONG_QUERY_BOOST: f64 = 0.2;

/// Confidence that the knowledge base can answer `query` given the
/// retrieved `candidates`.
///
/// The best raw relevance among candidates is boosted by topic and
/// computational-intent keyword hits, then clamped to 1.0. No candidates
/// means no KB answer regardless of query wording, so the score is 0.0.
pub fn score_knowledge_base(candidates: &[KbMatch], query: &str) -> f64 {
    if candidates.is_empty() {
        return 0.0;
    }

    let best_score = candidates.iter().map(|c| c.relevance).fold(0.0, f64::max);

    let query_lower = query.to_lowercase();

    let mut topic_boost = 0.0;
    for (keyword, weight) in MATH_TOPIC_BOOSTS {
        if query_lower.contains(keyword) {
            topic_boost += weight;
        }
    }

    if COMPUTE_INTENT_KEYWORDS.iter().any(|w| query_lower.contains(w)) {
        topic_boost += COMPUTE_INTENT_BOOST;
    }

    (best_score + topic_boost).min(1.0)
}

/// How much `query` would benefit from a live web search, in [0, 1].
///
/// Accumulates four independent signals: freshness/explanatory keywords,
/// advanced-topic keywords, query length, and explanation-seeking phrasing
/// (computational queries get a small baseline instead).
pub fn score_web_search_need(query: &str) -> f64 {
    let query_lower = query.to_lowercase();
    let mut score = 0.0;

    for (indicator, weight) in WEB_INDICATOR_BOOSTS {
        if query_lower.contains(indicator) {
            score += weight;
        }
    }

    for (topic, weight) in ADVANCED_TOPIC_BOOSTS {
        if query_lower.contains(topic) {
            score += weight;
        }
    }

    if query.split_whitespace().count() > LONG_QUERY_TOKENS {
        score += LONG_QUERY_BOOST;
    }

    if EXPLANATION_PHRASES.iter().any(|p| query_lower.contains(p)) {
        score += EXPLANATION_BOOST;
    } else {
        score += COMPUTATIONAL_BASELINE;
    }

    score.min(1.0)
}
