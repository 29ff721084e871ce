//! Edit application: one request in, a consistent statement out.
//!
//! Applies header and transaction field edits, optional date sequencing and
//! salary insertion, then always recalculates balances before returning.
//! Every field change is mirrored into the audit trail.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::audit::{AuditTrail, ChangeType};
use crate::balance;
use crate::sequencer::{self, SequenceMethod};
use crate::statement::{Statement, Transaction};

/// One transaction's field edits, addressed by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionEdit {
    pub index: usize,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub credit: Option<f64>,
    #[serde(default)]
    pub debit: Option<f64>,
    #[serde(default, rename = "ref")]
    pub ref_no: Option<String>,
}

impl TransactionEdit {
    pub fn at(index: usize) -> Self {
        Self {
            index,
            date: None,
            description: None,
            credit: None,
            debit: None,
            ref_no: None,
        }
    }
}

/// A full edit request against one statement. Absent fields are left alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditRequest {
    pub account_holder: Option<String>,
    pub account_number: Option<String>,
    pub ifsc: Option<String>,
    pub micr: Option<String>,
    pub branch: Option<String>,

    pub transaction_edits: Vec<TransactionEdit>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub apply_date_sequencing: bool,
    pub date_distribution_method: SequenceMethod,

    pub salary_amount: Option<f64>,
    pub salary_date: Option<NaiveDate>,
    pub salary_description: String,
}

impl Default for EditRequest {
    fn default() -> Self {
        Self {
            account_holder: None,
            account_number: None,
            ifsc: None,
            micr: None,
            branch: None,
            transaction_edits: Vec::new(),
            start_date: None,
            end_date: None,
            apply_date_sequencing: false,
            date_distribution_method: SequenceMethod::default(),
            salary_amount: None,
            salary_date: None,
            salary_description: "Salary Credit".to_string(),
        }
    }
}

/// Apply `request` to `statement`, logging every change into `trail`.
///
/// Out-of-range transaction indexes are skipped. Balances are recomputed
/// unconditionally at the end, so the aggregate is consistent when this
/// returns; a moved closing balance is logged as a calculation change.
pub fn apply_edits(statement: &mut Statement, request: &EditRequest, trail: &mut AuditTrail) {
    apply_header_edits(statement, request, trail);
    apply_transaction_edits(statement, request, trail);

    if request.apply_date_sequencing {
        if let (Some(start), Some(end)) = (request.start_date, request.end_date) {
            sequencer::sequence_dates(
                &mut statement.transactions,
                start,
                end,
                request.date_distribution_method,
            );
            for (i, txn) in statement.transactions.iter().enumerate() {
                if let Some(original) = txn.original_date {
                    if original != txn.date {
                        trail.log_change(
                            "date",
                            json!(original),
                            json!(txn.date),
                            ChangeType::Transaction,
                            Some(i),
                        );
                    }
                }
            }
        }
    }

    if let (Some(amount), Some(date)) = (request.salary_amount, request.salary_date) {
        if amount > 0.0 {
            let salary = Transaction::new(date, request.salary_description.clone(), amount, 0.0);
            statement.transactions.push(salary);
            statement.transactions.sort_by_key(|t| t.date);
            trail.log_change("salary", json!(null), json!(amount), ChangeType::Transaction, None);
        }
    }

    let closing_before = statement.closing_balance;
    balance::recalculate(statement);
    if statement.closing_balance != closing_before {
        trail.log_change(
            "closing_balance",
            json!(closing_before),
            json!(statement.closing_balance),
            ChangeType::Calculation,
            None,
        );
    }
}

fn apply_header_edits(statement: &mut Statement, request: &EditRequest, trail: &mut AuditTrail) {
    let header = &mut statement.header;

    if let Some(value) = non_empty(&request.account_holder) {
        trail.log_change(
            "account_holder",
            json!(header.account_holder),
            json!(value),
            ChangeType::Header,
            None,
        );
        header.account_holder = value.to_string();
    }
    if let Some(value) = non_empty(&request.account_number) {
        trail.log_change(
            "account_number",
            json!(header.account_number),
            json!(value),
            ChangeType::Header,
            None,
        );
        header.account_number = value.to_string();
    }
    if let Some(value) = non_empty(&request.ifsc) {
        trail.log_change("ifsc", json!(header.ifsc), json!(value), ChangeType::Header, None);
        header.ifsc = Some(value.to_string());
    }
    if let Some(value) = non_empty(&request.micr) {
        trail.log_change("micr", json!(header.micr), json!(value), ChangeType::Header, None);
        header.micr = Some(value.to_string());
    }
    if let Some(value) = non_empty(&request.branch) {
        trail.log_change("branch", json!(header.branch), json!(value), ChangeType::Header, None);
        header.branch = Some(value.to_string());
    }
}

fn apply_transaction_edits(
    statement: &mut Statement,
    request: &EditRequest,
    trail: &mut AuditTrail,
) {
    for edit in &request.transaction_edits {
        let index = edit.index;
        let Some(txn) = statement.transactions.get_mut(index) else {
            continue;
        };

        if let Some(date) = edit.date {
            trail.log_change("date", json!(txn.date), json!(date), ChangeType::Transaction, Some(index));
            txn.date = date;
        }
        if let Some(description) = &edit.description {
            trail.log_change(
                "description",
                json!(txn.description),
                json!(description),
                ChangeType::Transaction,
                Some(index),
            );
            txn.description = description.clone();
        }
        if let Some(credit) = edit.credit {
            trail.log_change(
                "credit",
                json!(txn.credit()),
                json!(credit),
                ChangeType::Transaction,
                Some(index),
            );
            txn.set_credit(credit);
        }
        if let Some(debit) = edit.debit {
            trail.log_change(
                "debit",
                json!(txn.debit()),
                json!(debit),
                ChangeType::Transaction,
                Some(index),
            );
            txn.set_debit(debit);
        }
        if let Some(ref_no) = &edit.ref_no {
            trail.log_change("ref", json!(txn.ref_no), json!(ref_no), ChangeType::Transaction, Some(index));
            txn.ref_no = Some(ref_no.clone());
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
