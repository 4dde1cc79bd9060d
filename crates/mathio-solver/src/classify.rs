// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Problem-type identification by regex table, first match wins.

use std::sync::LazyLock;

use regex::Regex;

/// The problem classes the solver has templates for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemType {
    Quadratic,
    Derivative,
    Integral,
    Equation,
    Simplify,
    Factor,
    Linear,
    General,
}

/// Pattern table in match-priority order. Quadratic outranks the generic
/// equation pattern so "solve x^2 = 4" classifies as quadratic.
static PROBLEM_PATTERNS: LazyLock<Vec<(ProblemType, Regex)>> = LazyLock::new(|| {
    [
        (ProblemType::Quadratic, r"[x-z]\^?2|[x-z]²|quadratic"),
        (ProblemType::Derivative, r"derivative|d/dx|differentiat"),
        (ProblemType::Integral, r"integral|∫|integrat"),
        (ProblemType::Equation, r"=.*[x-z]|solve.*for"),
        (ProblemType::Simplify, r"simplify|expand"),
        (ProblemType::Factor, r"factor|factorize"),
        (ProblemType::Linear, r"[x-z]\s*=|linear"),
    ]
    .into_iter()
    .map(|(kind, pattern)| {
        let regex = Regex::new(pattern).unwrap_or_else(|e| {
            // Patterns are compile-time constants; a bad one is a programmer error.
            panic!("invalid problem pattern `{pattern}`: {e}")
        });
        (kind, regex)
    })
    .collect()
});

/// Identify the problem type of a query.
pub fn identify_problem_type(query: &str) -> ProblemType {
    let query_lower = query.to_lowercase();
    PROBLEM_PATTERNS
        .iter()
        .find(|(_, regex)| regex.is_match(&query_lower))
        .map(|(kind, _)| *kind)
        .unwrap_or(ProblemType::General)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_patterns() {
        assert_eq!(identify_problem_type("solve x^2 - 5x + 6 = 0"), ProblemType::Quadratic);
        assert_eq!(identify_problem_type("Solve x² + 1 = 0"), ProblemType::Quadratic);
        assert_eq!(identify_problem_type("quadratic roots"), ProblemType::Quadratic);
    }

    #[test]
    fn calculus_patterns() {
        // "x^3" does not match the quadratic pattern; the keyword decides.
        assert_eq!(identify_problem_type("derivative of x^3"), ProblemType::Derivative);
        assert_eq!(identify_problem_type("differentiate sin(t)"), ProblemType::Derivative);
        assert_eq!(identify_problem_type("integral of 1/u"), ProblemType::Integral);
        assert_eq!(identify_problem_type("∫ f du"), ProblemType::Integral);
    }

    #[test]
    fn algebra_patterns() {
        assert_eq!(identify_problem_type("solve for y in 3y + 4 = 10"), ProblemType::Equation);
        assert_eq!(identify_problem_type("simplify (a+b)(a-b)"), ProblemType::Simplify);
        assert_eq!(identify_problem_type("factorize the polynomial"), ProblemType::Factor);
        assert_eq!(identify_problem_type("linear system"), ProblemType::Linear);
    }

    #[test]
    fn unmatched_queries_are_general() {
        assert_eq!(identify_problem_type("why is pi irrational"), ProblemType::General);
        assert_eq!(identify_problem_type(""), ProblemType::General);
    }

    #[test]
    fn first_match_wins() {
        // Matches both quadratic and equation patterns.
        assert_eq!(identify_problem_type("x^2 = 16"), ProblemType::Quadratic);
        // Matches both derivative and equation patterns.
        assert_eq!(
            identify_problem_type("derivative of y = 3x"),
            ProblemType::Derivative
        );
    }
}
