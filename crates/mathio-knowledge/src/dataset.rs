// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in seed dataset of curated mathematics documents.

use mathio_core::types::KbDocument;

fn doc(
    id: &str,
    question: &str,
    answer: &str,
    explanation: &str,
    topic: &str,
    difficulty: &str,
    keywords: &[&str],
) -> KbDocument {
    KbDocument {
        id: id.to_string(),
        question: question.to_string(),
        answer: answer.to_string(),
        explanation: explanation.to_string(),
        topic: topic.to_string(),
        difficulty: difficulty.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

/// The curated documents shipped with the engine.
pub fn seed_documents() -> Vec<KbDocument> {
    vec![
        doc(
            "quad_formula",
            "What is the quadratic formula?",
            "The quadratic formula is x = (-b ± √(b²-4ac)) / (2a)",
            "This formula solves quadratic equations of the form ax² + bx + c = 0",
            "algebra",
            "intermediate",
            &["quadratic", "formula", "equation", "roots"],
        ),
        doc(
            "derivative_rules",
            "What are the basic derivative rules?",
            "Power rule: d/dx(x^n) = nx^(n-1), Product rule: d/dx(uv) = u'v + uv', Chain rule: d/dx(f(g(x))) = f'(g(x))g'(x)",
            "These are the fundamental rules for finding derivatives in calculus",
            "calculus",
            "intermediate",
            &["derivative", "calculus", "power rule", "product rule", "chain rule"],
        ),
        doc(
            "pythagorean_theorem",
            "What is the Pythagorean theorem?",
            "In a right triangle, a² + b² = c², where c is the hypotenuse",
            "The square of the hypotenuse equals the sum of squares of the other two sides",
            "geometry",
            "basic",
            &["pythagorean", "theorem", "triangle", "hypotenuse", "geometry"],
        ),
        doc(
            "integration_basic",
            "What is integration?",
            "Integration is the reverse process of differentiation, used to find areas under curves",
            "The integral ∫f(x)dx represents the antiderivative of f(x) plus a constant",
            "calculus",
            "intermediate",
            &["integration", "integral", "antiderivative", "calculus"],
        ),
        doc(
            "linear_equation",
            "How to solve linear equations?",
            "For ax + b = c, solve by isolating x: x = (c - b) / a",
            "Linear equations have the form ax + b = c and can be solved by algebraic manipulation",
            "algebra",
            "basic",
            &["linear", "equation", "algebra", "solve"],
        ),
        doc(
            "trig_identities",
            "What are basic trigonometric identities?",
            "sin²θ + cos²θ = 1, tan θ = sin θ / cos θ, sin(2θ) = 2sin θ cos θ",
            "These identities are fundamental relationships between trigonometric functions",
            "trigonometry",
            "intermediate",
            &["trigonometry", "identities", "sin", "cos", "tan"],
        ),
        doc(
            "factorial",
            "What is a factorial?",
            "n! = n × (n-1) × (n-2) × ... × 1, with 0! = 1",
            "Factorial is the product of all positive integers up to n",
            "combinatorics",
            "basic",
            &["factorial", "combinatorics", "multiplication"],
        ),
        doc(
            "slope_formula",
            "What is the slope formula?",
            "slope = (y₂ - y₁) / (x₂ - x₁) for points (x₁,y₁) and (x₂,y₂)",
            "Slope measures the rate of change between two points on a line",
            "algebra",
            "basic",
            &["slope", "formula", "line", "rate", "change"],
        ),
        doc(
            "area_circle",
            "What is the area of a circle?",
            "Area = πr², where r is the radius",
            "The area of a circle is pi times the square of its radius",
            "geometry",
            "basic",
            &["area", "circle", "radius", "pi", "geometry"],
        ),
        doc(
            "solve_quadratic",
            "How to solve x² - 5x + 6 = 0?",
            "x = 2 or x = 3",
            "Factor as (x-2)(x-3) = 0 or use quadratic formula",
            "algebra",
            "intermediate",
            &["quadratic", "solve", "factoring", "equation"],
        ),
    ]
}
