//! Append-only audit trail of field-level statement changes.
//!
//! The trail records exactly what the caller logs — it infers and validates
//! nothing. Append is the only mutation; prior entries are never edited or
//! removed. Persistence happens elsewhere; [`AuditTrail::to_jsonl`] renders
//! the append-log format (one JSON record per line).

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What kind of field a change touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Header,
    Transaction,
    Calculation,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Header => "header",
            ChangeType::Transaction => "transaction",
            ChangeType::Calculation => "calculation",
        }
    }
}

/// One recorded field change: old value, new value, where and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    pub field_name: String,
    pub old_value: Value,
    pub new_value: Value,
    pub transaction_index: Option<usize>,
    pub change_type: ChangeType,
}

/// Aggregated view of a trail: how many changes, grouped by type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub total_changes: usize,
    pub changes_by_type: BTreeMap<String, usize>,
}

/// Ordered, append-only sequence of change records for one edit session.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditTrail {
    user_id: String,
    entries: Vec<AuditEntry>,
}

impl AuditTrail {
    pub fn new() -> Self {
        Self::for_user("system")
    }

    /// A trail whose entries are attributed to `user_id`.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            entries: Vec::new(),
        }
    }

    /// Append one change record. The caller logs once per logical field
    /// change; a forgotten call leaves the trail silently incomplete.
    pub fn log_change(
        &mut self,
        field_name: &str,
        old_value: Value,
        new_value: Value,
        change_type: ChangeType,
        transaction_index: Option<usize>,
    ) {
        self.entries.push(AuditEntry {
            timestamp: Utc::now(),
            user_id: self.user_id.clone(),
            field_name: field_name.to_string(),
            old_value,
            new_value,
            transaction_index,
            change_type,
        });
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> AuditSummary {
        let mut changes_by_type = BTreeMap::new();
        for entry in &self.entries {
            *changes_by_type
                .entry(entry.change_type.as_str().to_string())
                .or_insert(0) += 1;
        }
        AuditSummary {
            total_changes: self.entries.len(),
            changes_by_type,
        }
    }

    /// Render the trail as JSONL, one record per line — the format the
    /// audit log is persisted in.
    pub fn to_jsonl(&self) -> Result<String> {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&serde_json::to_string(entry)?);
            out.push('\n');
        }
        Ok(out)
    }
}

impl Default for AuditTrail {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn trail_with_changes() -> AuditTrail {
        let mut trail = AuditTrail::new();
        trail.log_change(
            "account_holder",
            json!("Unknown"),
            json!("John Doe"),
            ChangeType::Header,
            None,
        );
        trail.log_change(
            "ifsc",
            json!(null),
            json!("SBIN0001234"),
            ChangeType::Header,
            None,
        );
        trail.log_change(
            "credit",
            json!(0.0),
            json!(1000.0),
            ChangeType::Transaction,
            Some(0),
        );
        trail
    }

    #[test]
    fn test_entries_keep_append_order() {
        let trail = trail_with_changes();
        let fields: Vec<_> = trail.entries().iter().map(|e| e.field_name.as_str()).collect();
        assert_eq!(fields, vec!["account_holder", "ifsc", "credit"]);
        assert_eq!(trail.entries()[2].transaction_index, Some(0));
    }

    #[test]
    fn test_summary_groups_by_change_type() {
        let summary = trail_with_changes().summary();
        assert_eq!(summary.total_changes, 3);
        assert_eq!(summary.changes_by_type.get("header"), Some(&2));
        assert_eq!(summary.changes_by_type.get("transaction"), Some(&1));
        assert_eq!(summary.changes_by_type.get("calculation"), None);
    }

    #[test]
    fn test_jsonl_one_record_per_line() {
        let jsonl = trail_with_changes().to_jsonl().unwrap();
        let lines: Vec<_> = jsonl.lines().collect();
        assert_eq!(lines.len(), 3);

        let first: AuditEntry = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.field_name, "account_holder");
        assert_eq!(first.user_id, "system");
        assert!(lines[0].contains(r#""change_type":"header""#));
    }

    #[test]
    fn test_for_user_attribution() {
        let mut trail = AuditTrail::for_user("auditor-7");
        trail.log_change("branch", json!(null), json!("Main"), ChangeType::Header, None);
        assert_eq!(trail.entries()[0].user_id, "auditor-7");
    }

    #[test]
    fn test_empty_trail() {
        let trail = AuditTrail::new();
        assert!(trail.is_empty());
        assert_eq!(trail.summary().total_changes, 0);
        assert_eq!(trail.to_jsonl().unwrap(), "");
    }
}
