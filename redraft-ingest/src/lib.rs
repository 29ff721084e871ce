//! redraft-ingest: turning raw statement input into a `Statement`.
//!
//! Two paths into the model: a structured payload from an LLM extraction
//! step (primary), and regex/heuristic extraction from plain text
//! (fallback). Upstream file parsing and OCR hand this crate a single text
//! blob; nothing here touches files or the network.

pub mod columns;
pub mod llm;
pub mod offline;

pub use columns::{canonical_name, stash_extras};
pub use llm::parse_llm_response;
pub use offline::{extract_statement, parse_amount};

use anyhow::Result;
use redraft_core::statement::Statement;

/// Structure raw statement text, preferring the LLM payload when given.
///
/// A missing or unparseable payload falls back to the offline extractor,
/// which always produces a structurally valid statement.
pub fn structure_text(raw_text: &str, llm_response: Option<&str>) -> Result<Statement> {
    if let Some(response) = llm_response {
        if let Ok(statement) = llm::parse_llm_response(response) {
            return Ok(statement);
        }
    }
    offline::extract_statement(raw_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW_TEXT: &str =
        "Account Holder: Jane Smith\nAccount Number: 987654321\n2024-02-01 Transfer 250.00";

    #[test]
    fn test_prefers_structured_payload() {
        let payload = r#"{
            "header": {"account_holder": "John Doe", "account_number": "123456789"},
            "transactions": [{"date": "2024-01-01", "description": "Salary", "credit": 1000.0, "debit": 0.0}]
        }"#;

        let stmt = structure_text(RAW_TEXT, Some(payload)).unwrap();
        assert_eq!(stmt.header.account_holder, "John Doe");
    }

    #[test]
    fn test_bad_payload_falls_back_offline() {
        let stmt = structure_text(RAW_TEXT, Some("not json at all")).unwrap();
        assert_eq!(stmt.header.account_holder, "Jane Smith");
        assert_eq!(stmt.transactions[0].credit(), 250.0);
    }

    #[test]
    fn test_no_payload_goes_offline() {
        let stmt = structure_text(RAW_TEXT, None).unwrap();
        assert_eq!(stmt.header.account_number, "987654321");
    }
}
