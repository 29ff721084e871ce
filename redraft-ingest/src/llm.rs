//! Parse a structured extraction payload (an LLM's JSON reply) into a
//! statement.
//!
//! The model call itself happens elsewhere; this only handles the reply
//! text. Replies are frequently wrapped in markdown fences or prose, so the
//! payload is cleaned before parsing. A reply that still will not parse is an
//! extraction failure — the caller's signal to fall back to the offline
//! extractor.

use anyhow::{Context, Result};

use redraft_core::statement::Statement;

/// Parse a reply into a statement, cleaning markdown fences and surrounding
/// prose first.
pub fn parse_llm_response(raw: &str) -> Result<Statement> {
    let content = strip_code_fences(raw.trim());

    if let Ok(statement) = serde_json::from_str::<Statement>(content) {
        return Ok(statement);
    }

    // Second attempt: drop anything outside the outermost braces.
    let trimmed = trim_to_braces(content).unwrap_or(content);
    serde_json::from_str(trimmed)
        .with_context(|| format!("structured payload is not a valid statement ({} bytes)", raw.len()))
}

fn strip_code_fences(content: &str) -> &str {
    let mut s = content;
    if let Some(rest) = s.strip_prefix("```json") {
        s = rest;
    } else if let Some(rest) = s.strip_prefix("```") {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

fn trim_to_braces(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if start < end {
        Some(&content[start..=end])
    } else {
        None
    }
}
