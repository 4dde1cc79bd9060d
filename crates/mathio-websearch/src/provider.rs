// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offline web reference provider.
//!
//! Serves a curated library of mathematical reference entries through the
//! [`WebLookup`] contract. Candidate entries are keyword-gated on the query
//! (a live search engine would only return query-relevant pages), then
//! ranked by the same relevance rules a live result set would go through.
//! Live scraping stays outside this crate; swapping in an HTTP-backed
//! provider only requires implementing the same trait.

use async_trait::async_trait;
use tracing::info;

use mathio_core::MathioError;
use mathio_core::traits::WebLookup;
use mathio_core::types::WebResult;

use crate::ranking::{MIN_RELEVANCE, enhance_math_query, score_result};

/// One curated reference entry. `triggers` are the lowercased query
/// fragments that make the entry a candidate at all.
#[derive(Debug, Clone)]
struct ReferenceEntry {
    title: &'static str,
    snippet: &'static str,
    url: &'static str,
    content: &'static str,
    triggers: &'static [&'static str],
}

const REFERENCE_LIBRARY: &[ReferenceEntry] = &[
    ReferenceEntry {
        title: "Quadratic Formula",
        snippet: "The quadratic formula is x = (-b ± √(b²-4ac)) / (2a) for equations ax² + bx + c = 0",
        url: "https://mathworld.wolfram.com/QuadraticFormula.html",
        content: "Use the quadratic formula when factoring is difficult or impossible. \
                  Step 1: identify a, b, c. Step 2: compute the discriminant b² - 4ac. \
                  Step 3: substitute into the formula and simplify.",
        triggers: &["quadratic"],
    },
    ReferenceEntry {
        title: "Basic Derivative Rules",
        snippet: "Power rule: d/dx(x^n) = nx^(n-1), product rule and chain rule are fundamental",
        url: "https://www.khanacademy.org/math/ap-calculus-ab/ab-differentiation-1-new",
        content: "Derivatives measure the rate of change of functions. \
                  Step 1: identify the function type. Step 2: apply the matching rule. \
                  Step 3: simplify the result.",
        triggers: &["derivative", "differentiat"],
    },
    ReferenceEntry {
        title: "Integration Techniques",
        snippet: "Integrals can be evaluated by substitution, integration by parts, or standard formula tables",
        url: "https://mathworld.wolfram.com/Integral.html",
        content: "Integration reverses differentiation and computes areas under curves. \
                  Common techniques: substitution, integration by parts, partial fractions.",
        triggers: &["integral", "integrat"],
    },
    ReferenceEntry {
        title: "Solving Equations",
        snippet: "Mathematical equations can be solved using various algebraic techniques",
        url: "https://en.wikipedia.org/wiki/Equation_solving",
        content: "Isolate the variable by performing the same operations on both sides. \
                  Check candidate solutions against the original equation.",
        triggers: &["solve", "equation"],
    },
    ReferenceEntry {
        title: "Riemann Hypothesis",
        snippet: "The Riemann hypothesis conjectures that all non-trivial zeros of the zeta function lie on the critical line",
        url: "https://en.wikipedia.org/wiki/Riemann_hypothesis",
        content: "One of the Millennium Prize Problems. It concerns the zeros of the \
                  Riemann zeta function and the distribution of prime numbers.",
        triggers: &["riemann", "zeta"],
    },
    ReferenceEntry {
        title: "Fermat's Last Theorem",
        snippet: "No three positive integers satisfy a^n + b^n = c^n for any integer n greater than 2",
        url: "https://en.wikipedia.org/wiki/Fermat%27s_Last_Theorem",
        content: "Conjectured by Fermat in 1637 and proved by Andrew Wiles in 1994 \
                  using elliptic curves and modular forms.",
        triggers: &["fermat"],
    },
    ReferenceEntry {
        title: "Euler's Identity",
        snippet: "e^(iπ) + 1 = 0 links five fundamental mathematical constants in one equation",
        url: "https://en.wikipedia.org/wiki/Euler%27s_identity",
        content: "A special case of Euler's formula e^(ix) = cos x + i sin x evaluated at x = π.",
        triggers: &["euler"],
    },
    ReferenceEntry {
        title: "Pythagorean Theorem",
        snippet: "In a right triangle the square of the hypotenuse equals the sum of the squares of the legs",
        url: "https://www.khanacademy.org/math/geometry/hs-geo-trig/hs-geo-pythagorean-theorem",
        content: "a² + b² = c². Step 1: identify the legs and hypotenuse. \
                  Step 2: substitute the known sides. Step 3: solve for the unknown.",
        triggers: &["pythagorean", "hypotenuse", "right triangle"],
    },
    ReferenceEntry {
        title: "Trigonometric Identities",
        snippet: "sin²θ + cos²θ = 1 and related identities connect the trigonometric functions",
        url: "https://mathworld.wolfram.com/TrigonometricIdentities.html",
        content: "The Pythagorean identity, angle-sum formulas, and double-angle \
                  formulas are the workhorses for simplifying trigonometric expressions.",
        triggers: &["trigonometr", "identit"],
    },
    ReferenceEntry {
        title: "Limits in Calculus",
        snippet: "A limit describes the value a function approaches as the input approaches a point",
        url: "https://brilliant.org/wiki/limits-of-functions/",
        content: "Limits underpin both derivatives and integrals. Evaluate by direct \
                  substitution, factoring, or rationalization when indeterminate.",
        triggers: &["limit"],
    },
];

/// Curated reference library serving the [`WebLookup`] contract.
#[derive(Debug, Default)]
pub struct ReferenceWebLookup;

impl ReferenceWebLookup {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WebLookup for ReferenceWebLookup {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<WebResult>, MathioError> {
        let enhanced = enhance_math_query(query);
        let enhanced_lower = enhanced.to_lowercase();

        let mut results: Vec<WebResult> = REFERENCE_LIBRARY
            .iter()
            .filter(|entry| entry.triggers.iter().any(|t| enhanced_lower.contains(t)))
            .filter_map(|entry| {
                let relevance = score_result(entry.title, entry.snippet, entry.url, &enhanced);
                (relevance > MIN_RELEVANCE).then(|| WebResult {
                    title: entry.title.to_string(),
                    snippet: entry.snippet.to_string(),
                    url: entry.url.to_string(),
                    relevance,
                    content: Some(entry.content.to_string()),
                })
            })
            .collect();

        results.sort_by(|a, b| {
            b.relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(max_results);

        info!(count = results.len(), "web reference lookup");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn riemann_query_surfaces_the_hypothesis_entry() {
        let lookup = ReferenceWebLookup::new();
        let results = lookup.search("Explain the Riemann hypothesis", 5).await.unwrap();
        assert!(!results.is_empty());
        assert_eq!(results[0].title, "Riemann Hypothesis");
        assert!(results[0].content.is_some());
    }

    #[tokio::test]
    async fn unrelated_query_returns_empty_not_error() {
        let lookup = ReferenceWebLookup::new();
        let results = lookup.search("zzz qqq xyzzy", 5).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn untriggered_entries_never_pollute_results() {
        let lookup = ReferenceWebLookup::new();
        let results = lookup.search("derivative of a polynomial", 10).await.unwrap();
        assert!(results.iter().all(|r| r.title == "Basic Derivative Rules"));
    }

    #[tokio::test]
    async fn results_are_capped_and_sorted() {
        let lookup = ReferenceWebLookup::new();
        let results = lookup
            .search("solve the equation for the limit of the integral", 2)
            .await
            .unwrap();
        assert!(results.len() <= 2);
        for pair in results.windows(2) {
            assert!(pair[0].relevance >= pair[1].relevance);
        }
    }

    #[tokio::test]
    async fn every_library_entry_sits_on_a_reputable_domain() {
        use crate::ranking::MATH_DOMAINS;
        for entry in REFERENCE_LIBRARY {
            assert!(
                MATH_DOMAINS.iter().any(|d| entry.url.contains(d)),
                "{} is off-domain",
                entry.url
            );
        }
    }

    #[tokio::test]
    async fn triggers_are_lowercase_fragments() {
        for entry in REFERENCE_LIBRARY {
            for trigger in entry.triggers {
                assert_eq!(
                    *trigger,
                    trigger.to_lowercase().as_str(),
                    "trigger `{trigger}` must be lowercase for substring matching"
                );
            }
        }
    }
}
