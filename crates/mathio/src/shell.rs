// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `mathio shell` command implementation.
//!
//! Launches an interactive REPL with colored prompt and readline history.
//! Every answer can be rated in place with `/rate`, feeding the feedback
//! loop the same way an API caller would.

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::info;

use mathio_config::model::MathioConfig;
use mathio_core::MathioError;
use mathio_core::types::ResponseEnvelope;
use mathio_feedback::FeedbackData;

use crate::app::{self, MathioApp};
use crate::report;

/// Runs the `mathio shell` interactive REPL.
pub async fn run_shell(config: MathioConfig) -> Result<(), MathioError> {
    let app = app::build(config);

    let mut rl = DefaultEditor::new()
        .map_err(|e| MathioError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "mathio shell".bold().green());
    println!(
        "Ask a math question. {} rates the last answer, {} to exit.\n",
        "/rate <1-5>".yellow(),
        "/quit".yellow()
    );

    let prompt = format!("{}> ", "mathio".green());
    let mut last_response: Option<ResponseEnvelope> = None;

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                if trimmed == "/help" {
                    print_help();
                } else if trimmed == "/stats" {
                    report::print_routing_stats(&app.engine.routing_stats());
                } else if trimmed == "/analysis" {
                    report::print_analysis(app.aggregator.analysis().as_ref());
                } else if let Some(rest) = trimmed.strip_prefix("/rate") {
                    rate_last_response(&app, last_response.as_ref(), rest.trim());
                } else if trimmed.starts_with('/') {
                    println!("unknown command; {} lists commands", "/help".yellow());
                } else {
                    let response = app.engine.process_query(trimmed, None).await;
                    print_response(&response);
                    last_response = Some(response);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("readline error: {e}");
                break;
            }
        }
    }

    println!("bye");
    Ok(())
}

fn print_help() {
    println!("  {}               show routing statistics", "/stats".yellow());
    println!("  {}            show feedback analysis", "/analysis".yellow());
    println!(
        "  {}  rate the last answer (marks it incorrect below 3)",
        "/rate <1-5> [note]".yellow()
    );
    println!("  {}                exit", "/quit".yellow());
}

fn print_response(response: &ResponseEnvelope) {
    println!();
    println!("{}", response.solution);
    if !response.steps.is_empty() {
        println!();
        for step in &response.steps {
            println!("  {}", step.dimmed());
        }
    }
    println!(
        "\n[route: {} | confidence: {:.2}]",
        response.route_used.to_string().cyan(),
        response.confidence
    );
    if let Some(error) = &response.error {
        println!("{} {}", "degraded:".red(), error);
    }
    println!();
}

/// Parse `/rate <1-5> [comment]` and submit feedback for the last answer.
fn rate_last_response(app: &MathioApp, last: Option<&ResponseEnvelope>, args: &str) {
    let Some(response) = last else {
        println!("nothing to rate yet; ask a question first");
        return;
    };

    let mut parts = args.splitn(2, char::is_whitespace);
    let rating = match parts.next().and_then(|r| r.parse::<u8>().ok()) {
        Some(rating @ 1..=5) => rating,
        _ => {
            println!("usage: /rate <1-5> [comment]");
            return;
        }
    };
    let comments = parts.next().unwrap_or_default().trim().to_string();

    let feedback = FeedbackData {
        rating,
        helpful: rating >= 3,
        correct: rating >= 3,
        comments,
        ..Default::default()
    };

    let result = app
        .aggregator
        .collect_feedback(&response.query, response, feedback);

    info!(feedback_id = result.feedback_id.as_str(), "shell feedback recorded");
    println!(
        "thanks! recorded {} ({} improvement suggestion{})",
        result.feedback_id.cyan(),
        result.improvements_identified,
        if result.improvements_identified == 1 { "" } else { "s" }
    );
}
