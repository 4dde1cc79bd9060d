// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Math-focused relevance ranking for web lookup results.
//!
//! Deterministic scoring rules: reputable-domain bonus, title and snippet
//! keyword bonuses, proportional query-term overlap, and a penalty for
//! commercial content. Results below the relevance floor are dropped.

/// Domains with a reputation for reliable mathematical content.
pub const MATH_DOMAINS: &[&str] = &[
    "mathworld.wolfram.com",
    "en.wikipedia.org",
    "khanacademy.org",
    "mathstackexchange.com",
    "brilliant.org",
    "mit.edu",
    "stanford.edu",
];

const TITLE_KEYWORDS: &[&str] = &["math", "formula", "equation", "theorem", "proof"];

const SNIPPET_KEYWORDS: &[&str] = &["solve", "formula", "equation", "calculate"];

const COMMERCE_TERMS: &[&str] = &["shopping", "buy", "price", "sale"];

const DOMAIN_WEIGHT: f64 = 2.0;
const TITLE_WEIGHT: f64 = 1.0;
const SNIPPET_WEIGHT: f64 = 0.5;
const OVERLAP_WEIGHT: f64 = 1.5;
const COMMERCE_PENALTY: f64 = 1.0;

/// Minimum relevance for a result to be kept at all.
pub const MIN_RELEVANCE: f64 = 0.5;

/// Add mathematical context to definition-style queries that lack explicit
/// math markers, so general-knowledge results rank below math ones.
pub fn enhance_math_query(query: &str) -> String {
    let query_lower = query.to_lowercase();

    let has_math_marker = ["math", "formula", "equation", "solve"]
        .iter()
        .any(|w| query_lower.contains(w));
    let is_definition_style = ["what is", "define", "explain"]
        .iter()
        .any(|w| query_lower.contains(w));

    if !has_math_marker && is_definition_style {
        format!("{query} mathematics")
    } else {
        query.to_string()
    }
}

/// Score one (title, snippet, url) candidate against the query.
pub fn score_result(title: &str, snippet: &str, url: &str, query: &str) -> f64 {
    let mut score = 0.0;
    let query_lower = query.to_lowercase();
    let title_lower = title.to_lowercase();
    let snippet_lower = snippet.to_lowercase();
    let url_lower = url.to_lowercase();

    if MATH_DOMAINS.iter().any(|d| url_lower.contains(d)) {
        score += DOMAIN_WEIGHT;
    }

    if TITLE_KEYWORDS.iter().any(|w| title_lower.contains(w)) {
        score += TITLE_WEIGHT;
    }

    if SNIPPET_KEYWORDS.iter().any(|w| snippet_lower.contains(w)) {
        score += SNIPPET_WEIGHT;
    }

    let content = format!("{title_lower} {snippet_lower}");
    let query_words: Vec<&str> = query_lower.split_whitespace().collect();
    if !query_words.is_empty() {
        let matching = query_words.iter().filter(|w| content.contains(*w)).count();
        score += (matching as f64 / query_words.len() as f64) * OVERLAP_WEIGHT;
    }

    if COMMERCE_TERMS.iter().any(|t| content.contains(t)) {
        score -= COMMERCE_PENALTY;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reputable_domain_scores_higher() {
        let on_domain = score_result(
            "Quadratic equation",
            "solve ax^2 + bx + c = 0",
            "https://en.wikipedia.org/wiki/Quadratic_equation",
            "quadratic equation",
        );
        let off_domain = score_result(
            "Quadratic equation",
            "solve ax^2 + bx + c = 0",
            "https://example.com/quadratic",
            "quadratic equation",
        );
        assert!((on_domain - off_domain - DOMAIN_WEIGHT).abs() < 1e-9);
    }

    #[test]
    fn full_overlap_contributes_entire_weight() {
        // No domain, no title/snippet keywords, full word overlap.
        let score = score_result("alpha beta", "", "https://example.com", "alpha beta");
        assert!((score - OVERLAP_WEIGHT).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn commerce_content_is_penalized() {
        let clean = score_result("Math theorem", "solve it", "https://example.com", "theorem");
        let commercial = score_result(
            "Math theorem",
            "solve it, best price today",
            "https://example.com",
            "theorem",
        );
        assert!((clean - commercial - COMMERCE_PENALTY).abs() < 1e-9);
    }

    #[test]
    fn enhance_appends_mathematics_to_definition_queries() {
        assert_eq!(
            enhance_math_query("what is a limit"),
            "what is a limit mathematics"
        );
        // Queries with explicit math markers stay untouched.
        assert_eq!(
            enhance_math_query("what is the quadratic formula"),
            "what is the quadratic formula"
        );
        // Non-definition queries stay untouched.
        assert_eq!(enhance_math_query("riemann zeta zeros"), "riemann zeta zeros");
    }
}
