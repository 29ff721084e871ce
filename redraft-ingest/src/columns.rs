//! Column-alias normalization for extracted tables.
//!
//! Source statements name the same columns many ways ("Particulars",
//! "Narration", "Withdrawal"...). Known aliases map onto the canonical
//! column set; everything else is stashed untouched on the statement for the
//! rendering collaborator.

use std::collections::BTreeMap;

use serde_json::Value;

use redraft_core::statement::Statement;

/// The columns the model understands.
pub const CANONICAL_COLUMNS: &[&str] = &["date", "description", "credit", "debit", "balance", "ref"];

const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("particulars", "description"),
    ("narration", "description"),
    ("cheque no", "ref"),
    ("chq no", "ref"),
    ("reference", "ref"),
    ("withdrawal", "debit"),
    ("deposit", "credit"),
];

/// Canonical column name for a source label, if it maps to one.
pub fn canonical_name(label: &str) -> Option<&'static str> {
    let key = label.trim().to_lowercase();
    if let Some(canonical) = CANONICAL_COLUMNS.iter().find(|c| **c == key) {
        return Some(canonical);
    }
    COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| *canonical)
}

/// Move columns with no canonical mapping into `extra_columns`, keeping
/// their source labels.
pub fn stash_extras(statement: &mut Statement, columns: BTreeMap<String, Vec<Value>>) {
    for (label, values) in columns {
        if canonical_name(&label).is_none() {
            statement.extra_columns.insert(label, values);
        }
    }
}
