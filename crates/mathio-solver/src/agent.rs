// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Template-based solver.
//!
//! Each problem type maps to a fixed solution template with ordered steps
//! and a confidence value. Grounded variants build solutions from knowledge
//! base matches or web content instead of templates. Symbolic computation
//! itself is out of scope; this solver is the deterministic capability the
//! routing engine treats as opaque.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use mathio_core::MathioError;
use mathio_core::traits::SolverAgent;
use mathio_core::types::{KbMatch, Solution, WebResult};

use crate::classify::{ProblemType, identify_problem_type};

/// Max characters of web content quoted into a solution.
const WEB_QUOTE_CHARS: usize = 300;

/// Max steps lifted out of web content.
const WEB_STEP_LIMIT: usize = 5;

/// Number of contentful web results merged into one answer.
const WEB_MERGE_LIMIT: usize = 3;

static WEB_STEP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)step\s*\d+[:\-.]?\s*([^.!?]*[.!?])").unwrap_or_else(|e| {
        panic!("invalid step pattern: {e}")
    })
});

/// The deterministic template solver.
#[derive(Debug, Default)]
pub struct TemplateSolver;

impl TemplateSolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SolverAgent for TemplateSolver {
    async fn solve_direct(&self, query: &str) -> Result<Solution, MathioError> {
        let problem_type = identify_problem_type(query);
        debug!(?problem_type, "direct solve");
        Ok(template_solution(problem_type, query))
    }

    async fn solve_from_knowledge(
        &self,
        kb_match: &KbMatch,
        query: &str,
    ) -> Result<Solution, MathioError> {
        let steps = steps_from_knowledge(kb_match, query);
        let solution = format_solution(
            &kb_match.document.answer,
            &kb_match.document.explanation,
            &steps,
        );
        Ok(Solution {
            solution,
            steps,
            confidence: kb_match.relevance.min(1.0),
        })
    }

    async fn solve_from_web(
        &self,
        results: &[WebResult],
        query: &str,
    ) -> Result<Solution, MathioError> {
        let Some(best) = results.first() else {
            return Ok(Solution {
                solution: "I couldn't find specific information about this problem online. \
                           Please provide more details or try a different approach to the question."
                    .to_string(),
                steps: vec![
                    "No relevant search results found".to_string(),
                    "Consider rephrasing the question".to_string(),
                    "Provide more specific mathematical details".to_string(),
                ],
                confidence: 0.0,
            });
        };

        let content = merge_content(results);
        let steps = steps_from_web(&content, query);
        let solution = web_solution_text(&best.title, &content);

        // The ranking scale tops out at 5.0 (domain 2.0 + title 1.0 +
        // snippet 0.5 + overlap 1.5); normalize it into a confidence.
        let confidence = (best.relevance / 5.0).clamp(0.0, 1.0);

        Ok(Solution {
            solution,
            steps,
            confidence,
        })
    }
}

/// Fixed template per problem type.
fn template_solution(problem_type: ProblemType, query: &str) -> Solution {
    match problem_type {
        ProblemType::Quadratic => Solution {
            solution: "For quadratic equations ax² + bx + c = 0, use the quadratic formula: \
                       x = (-b ± √(b²-4ac)) / (2a)"
                .to_string(),
            steps: vec![
                "Step 1: Identify coefficients a, b, and c".to_string(),
                "Step 2: Calculate discriminant b² - 4ac".to_string(),
                "Step 3: Apply quadratic formula".to_string(),
                "Step 4: Simplify to get solutions".to_string(),
            ],
            confidence: 0.7,
        },
        ProblemType::Linear => Solution {
            solution: "For linear equations ax + b = c, solve by isolating x: x = (c - b) / a"
                .to_string(),
            steps: vec![
                "Step 1: Subtract b from both sides".to_string(),
                "Step 2: Divide both sides by a".to_string(),
                "Step 3: x = (c - b) / a".to_string(),
            ],
            confidence: 0.7,
        },
        ProblemType::Derivative => Solution {
            solution: "Use differentiation rules: power rule, product rule, chain rule as appropriate"
                .to_string(),
            steps: vec![
                "Step 1: Identify the function type".to_string(),
                "Step 2: Apply appropriate differentiation rule".to_string(),
                "Step 3: Simplify the result".to_string(),
            ],
            confidence: 0.6,
        },
        ProblemType::Integral => Solution {
            solution: "Use integration techniques: substitution, integration by parts, or standard formulas"
                .to_string(),
            steps: vec![
                "Step 1: Identify the function type".to_string(),
                "Step 2: Choose appropriate integration method".to_string(),
                "Step 3: Apply the method and add constant C".to_string(),
            ],
            confidence: 0.6,
        },
        ProblemType::Simplify => Solution {
            solution: "To simplify expressions, combine like terms, factor common elements, and apply algebraic rules"
                .to_string(),
            steps: vec![
                "Step 1: Identify like terms".to_string(),
                "Step 2: Combine and factor where possible".to_string(),
                "Step 3: Write in simplest form".to_string(),
            ],
            confidence: 0.6,
        },
        ProblemType::Factor => Solution {
            solution: "To factor expressions, look for common factors, difference of squares, or trinomial patterns"
                .to_string(),
            steps: vec![
                "Step 1: Look for greatest common factor".to_string(),
                "Step 2: Check for special patterns".to_string(),
                "Step 3: Factor completely".to_string(),
            ],
            confidence: 0.6,
        },
        ProblemType::Equation | ProblemType::General => Solution {
            solution: contextual_help(query),
            steps: vec![
                "Step 1: Analyzing the mathematical problem".to_string(),
                "Step 2: Identifying relevant mathematical concepts".to_string(),
                "Step 3: Applying appropriate solution methods".to_string(),
            ],
            confidence: 0.5,
        },
    }
}

/// Topic-directed hint for queries without a specific template.
fn contextual_help(query: &str) -> String {
    let query_lower = query.to_lowercase();

    if ["quadratic", "x^2", "x²"].iter().any(|w| query_lower.contains(w)) {
        "For quadratic equations, you can use the quadratic formula: \
         x = (-b ± √(b²-4ac)) / (2a), or try factoring if possible."
            .to_string()
    } else if ["derivative", "differentiate"].iter().any(|w| query_lower.contains(w)) {
        "To find derivatives, use rules like: power rule d/dx(x^n) = nx^(n-1), \
         product rule, and chain rule."
            .to_string()
    } else if ["integral", "integrate"].iter().any(|w| query_lower.contains(w)) {
        "For integration, try substitution method, integration by parts, \
         or look up standard integral formulas."
            .to_string()
    } else if ["solve", "equation"].iter().any(|w| query_lower.contains(w)) {
        "To solve equations: isolate the variable by performing the same operations \
         on both sides, or use specific methods for different equation types."
            .to_string()
    } else {
        "Please provide more specific details about your mathematical problem \
         so I can give you a detailed step-by-step solution."
            .to_string()
    }
}

/// Build KB-grounded steps: problem identification first, then a
/// pattern-specific walkthrough.
fn steps_from_knowledge(kb_match: &KbMatch, query: &str) -> Vec<String> {
    let question_lower = kb_match.document.question.to_lowercase();
    let query_lower = query.to_lowercase();

    let mut steps = vec![format!(
        "Problem Type: This is a {} problem.",
        kb_match.document.topic
    )];

    if question_lower.contains("quadratic") && question_lower.contains("formula") {
        steps.extend([
            "Step 1: Identify the quadratic equation in the form ax² + bx + c = 0".to_string(),
            "Step 2: Apply the quadratic formula: x = (-b ± √(b²-4ac)) / (2a)".to_string(),
            "Step 3: Substitute the values of a, b, and c".to_string(),
            "Step 4: Simplify to find the solutions".to_string(),
        ]);
    } else if question_lower.contains("derivative") {
        steps.extend([
            "Step 1: Identify the function to differentiate".to_string(),
            "Step 2: Apply appropriate differentiation rules".to_string(),
            "Step 3: Simplify the result".to_string(),
        ]);
    } else if query_lower.contains("solve") {
        steps.extend([
            "Step 1: Write the equation in standard form".to_string(),
            "Step 2: Apply appropriate solving technique".to_string(),
            "Step 3: Verify the solution".to_string(),
        ]);
    } else {
        steps.extend([
            "Step 1: Understand the problem requirements".to_string(),
            "Step 2: Apply relevant mathematical principles".to_string(),
            "Step 3: Calculate the result".to_string(),
        ]);
    }

    steps
}

/// Answer / Explanation / Detailed Steps formatting.
fn format_solution(answer: &str, explanation: &str, steps: &[String]) -> String {
    let mut parts = Vec::new();

    if !answer.is_empty() {
        parts.push(format!("Answer: {answer}"));
    }
    if !explanation.is_empty() {
        parts.push(format!("\nExplanation: {explanation}"));
    }
    if !steps.is_empty() {
        parts.push(format!("\nDetailed Steps:\n{}", steps.join("\n")));
    }

    parts.join("\n")
}

/// Concatenate content of the top contentful results.
fn merge_content(results: &[WebResult]) -> String {
    let mut combined = String::new();
    for result in results.iter().take(WEB_MERGE_LIMIT) {
        if let Some(content) = &result.content
            && !content.is_empty()
        {
            combined.push_str(content);
            combined.push(' ');
        }
    }
    combined.trim().to_string()
}

/// Lift "Step N:" sentences out of web content when present; otherwise fall
/// back to generic steps keyed on the query's intent.
fn steps_from_web(content: &str, query: &str) -> Vec<String> {
    let mut steps = Vec::new();

    if content.to_lowercase().contains("step") {
        for (i, capture) in WEB_STEP_PATTERN
            .captures_iter(content)
            .take(WEB_STEP_LIMIT)
            .enumerate()
        {
            if let Some(text) = capture.get(1) {
                steps.push(format!("Step {}: {}", i + 1, text.as_str().trim()));
            }
        }
    }

    if steps.is_empty() {
        if query.to_lowercase().contains("solve") {
            steps = vec![
                "Step 1: Identify the type of equation or problem".to_string(),
                "Step 2: Choose the appropriate solution method".to_string(),
                "Step 3: Apply the method systematically".to_string(),
                "Step 4: Check and verify the solution".to_string(),
            ];
        } else {
            steps = vec![
                "Step 1: Understand the mathematical concept".to_string(),
                "Step 2: Apply relevant formulas or theorems".to_string(),
                "Step 3: Simplify and present the result".to_string(),
            ];
        }
    }

    steps
}

fn web_solution_text(title: &str, content: &str) -> String {
    if content.is_empty() {
        format!(
            "Found information about '{title}', but specific solution steps need to be \
             worked out based on the mathematical principles involved."
        )
    } else {
        let quoted: String = content.chars().take(WEB_QUOTE_CHARS).collect();
        format!("Based on search results about '{title}':\n\n{quoted}...")
    }
}
