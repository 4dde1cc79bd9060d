// SPDX-FileCopyrightText: 2026 Mathio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Math-focused web reference lookup for the Mathio routing engine.
//!
//! Implements the [`mathio_core::WebLookup`] collaborator contract over a
//! curated offline reference library, ranked with the same deterministic
//! relevance rules (reputable domains, math keywords, query overlap,
//! commerce penalty) a live result set would be filtered with.

pub mod provider;
pub mod ranking;

pub use provider::ReferenceWebLookup;
pub use ranking::{enhance_math_query, score_result};
