// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration data model with strict validation.
//!
//! All sections use `deny_unknown_fields` so typos in TOML keys surface as
//! errors instead of being silently ignored. Every field has a compiled
//! default, so an empty config file (or none at all) is valid.

use serde::{Deserialize, Serialize};

/// Root configuration for the Mathio routing engine.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MathioConfig {
    /// Agent identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Routing thresholds and ledger settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Web lookup settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Knowledge base settings.
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Feedback store settings.
    #[serde(default)]
    pub feedback: FeedbackConfig,
}

/// Agent identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "mathio".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Routing thresholds.
///
/// Controls the confidence arbitration between knowledge base, web search,
/// hybrid, and fallback routes. The thresholds are an explicit, inspectable
/// policy: tune them here, not in the selector's control flow.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// KB confidence at or above which the knowledge base route wins outright.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Web-search-need score at or above which web search is considered.
    #[serde(default = "default_hybrid_web_threshold")]
    pub hybrid_web_threshold: f64,

    /// KB confidence above which a web-worthy query becomes hybrid
    /// instead of pure web search.
    #[serde(default = "default_hybrid_kb_floor")]
    pub hybrid_kb_floor: f64,

    /// Number of knowledge base candidates fetched per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Maximum routing history entries retained in the ledger ring.
    /// Cumulative counters are unaffected by this cap.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            hybrid_web_threshold: default_hybrid_web_threshold(),
            hybrid_kb_floor: default_hybrid_kb_floor(),
            top_k: default_top_k(),
            history_capacity: default_history_capacity(),
        }
    }
}

fn default_confidence_threshold() -> f64 {
    0.7
}

fn default_hybrid_web_threshold() -> f64 {
    0.5
}

fn default_hybrid_kb_floor() -> f64 {
    0.3
}

fn default_top_k() -> usize {
    3
}

fn default_history_capacity() -> usize {
    1024
}

/// Web lookup configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Enable the web lookup collaborator. When false, web and hybrid
    /// routes degrade to their no-results responses.
    #[serde(default = "default_search_enabled")]
    pub enabled: bool,

    /// Maximum results requested per lookup.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Per-lookup timeout in seconds, enforced by the engine.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: default_search_enabled(),
            max_results: default_max_results(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_search_enabled() -> bool {
    true
}

fn default_max_results() -> usize {
    5
}

fn default_timeout_secs() -> u64 {
    10
}

/// Knowledge base configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeConfig {
    /// Path to a JSON dataset of documents. When unset (or unreadable),
    /// the built-in seed dataset is used.
    #[serde(default)]
    pub dataset_path: Option<String>,
}

/// Feedback store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FeedbackConfig {
    /// Path for the JSON snapshot written after each mutation. When unset,
    /// the store is in-memory only.
    #[serde(default)]
    pub data_path: Option<String>,

    /// Number of most-recent entries used for trend analysis.
    #[serde(default = "default_recent_window")]
    pub recent_window: usize,

    /// Maximum raw improvement-suggestion records retained. Grouped
    /// frequency counts used for prioritization are cumulative and
    /// unaffected by this cap.
    #[serde(default = "default_max_suggestions_retained")]
    pub max_suggestions_retained: usize,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            recent_window: default_recent_window(),
            max_suggestions_retained: default_max_suggestions_retained(),
        }
    }
}

fn default_recent_window() -> usize {
    20
}

fn default_max_suggestions_retained() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_routing_policy() {
        let config = MathioConfig::default();
        assert_eq!(config.routing.confidence_threshold, 0.7);
        assert_eq!(config.routing.hybrid_web_threshold, 0.5);
        assert_eq!(config.routing.hybrid_kb_floor, 0.3);
        assert_eq!(config.routing.top_k, 3);
    }

    #[test]
    fn defaults_for_ambient_sections() {
        let config = MathioConfig::default();
        assert_eq!(config.agent.name, "mathio");
        assert_eq!(config.agent.log_level, "info");
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.timeout_secs, 10);
        assert!(config.search.enabled);
        assert!(config.knowledge.dataset_path.is_none());
        assert!(config.feedback.data_path.is_none());
        assert_eq!(config.feedback.recent_window, 20);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let toml = r#"
            [routing]
            confidence_treshold = 0.8
        "#;
        let result: Result<MathioConfig, _> = toml::from_str(toml);
        assert!(result.is_err(), "misspelled key must not be ignored");
    }

    #[test]
    fn partial_section_fills_defaults() {
        let toml = r#"
            [routing]
            confidence_threshold = 0.6
        "#;
        let config: MathioConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.routing.confidence_threshold, 0.6);
        assert_eq!(config.routing.hybrid_kb_floor, 0.3);
    }
}
