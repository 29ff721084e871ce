//! Date re-sequencing: remap transaction dates onto a target window.
//!
//! Two algorithms — proportional spacing (default) and uniform distribution.
//! Order is positional: the Nth transaction in the slice stays the Nth in
//! time; only the dates are rewritten. Each call records the pre-call date
//! into `original_date`, so exactly one generation of history is kept.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::statement::Transaction;

/// How dates are distributed over the target window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceMethod {
    /// Scale the original gaps to fit the new window.
    PreserveSpacing,
    /// Spread transactions evenly, ignoring original gaps.
    Uniform,
}

impl Default for SequenceMethod {
    fn default() -> Self {
        SequenceMethod::PreserveSpacing
    }
}

/// Reassign every transaction's date into `[start, end]` (inclusive).
///
/// The caller is responsible for `start <= end` (see
/// [`crate::validate::validate_date_range`]). A zero-width original span
/// cannot be scaled and falls back to uniform distribution. Integer
/// truncation of scaled offsets can land distinct originals on the same new
/// date; that is accepted.
pub fn sequence_dates(
    transactions: &mut [Transaction],
    start: NaiveDate,
    end: NaiveDate,
    method: SequenceMethod,
) {
    if transactions.is_empty() {
        return;
    }

    for txn in transactions.iter_mut() {
        txn.original_date = Some(txn.date);
    }

    match method {
        SequenceMethod::PreserveSpacing => preserve_spacing(transactions, start, end),
        SequenceMethod::Uniform => uniform_distribution(transactions, start, end),
    }
}

fn preserve_spacing(transactions: &mut [Transaction], start: NaiveDate, end: NaiveDate) {
    let Some(min_orig) = transactions.iter().map(|t| t.date).min() else {
        return;
    };
    let Some(max_orig) = transactions.iter().map(|t| t.date).max() else {
        return;
    };

    let orig_range = (max_orig - min_orig).num_days();
    if orig_range == 0 {
        // All dates identical; nothing to scale.
        uniform_distribution(transactions, start, end);
        return;
    }

    let new_range = (end - start).num_days();
    let scale = new_range as f64 / orig_range as f64;

    for txn in transactions.iter_mut() {
        let days_from_start = (txn.date - min_orig).num_days();
        let new_days = (days_from_start as f64 * scale) as i64;
        txn.date = start + Duration::days(new_days);
    }
}

fn uniform_distribution(transactions: &mut [Transaction], start: NaiveDate, end: NaiveDate) {
    let count = transactions.len();
    if count == 1 {
        transactions[0].date = start;
        return;
    }

    let total_days = (end - start).num_days();
    let interval = total_days as f64 / (count - 1) as f64;

    for (i, txn) in transactions.iter_mut().enumerate() {
        let offset = (i as f64 * interval) as i64;
        txn.date = start + Duration::days(offset);
    }
}
