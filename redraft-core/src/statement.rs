//! Statement document model: header, transactions, page ranges, and the
//! aggregate the rest of the crates operate on.
//!
//! Plain data carriers; the only behavior is value normalization — monetary
//! amounts are rounded to 2 decimal places on every write path (constructor,
//! setter, deserialization).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Round a monetary amount to 2 decimal places.
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

fn de_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(round2)
}

/// Statement header metadata. Free text, no uniqueness constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    #[serde(default)]
    pub bank_name: Option<String>,
    pub account_holder: String,
    pub account_number: String,
    #[serde(default)]
    pub ifsc: Option<String>,
    #[serde(default)]
    pub micr: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub statement_period: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Header {
    pub fn new(account_holder: impl Into<String>, account_number: impl Into<String>) -> Self {
        Self {
            bank_name: None,
            account_holder: account_holder.into(),
            account_number: account_number.into(),
            ifsc: None,
            micr: None,
            branch: None,
            statement_period: None,
            address: None,
        }
    }
}

/// Classification of a source page, assigned upstream during page
/// extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Statement,
    Attachment,
    Promotional,
    Blank,
}

impl Default for PageType {
    fn default() -> Self {
        PageType::Statement
    }
}

/// Inclusive 1-indexed page span with a single classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
    #[serde(default)]
    pub page_type: PageType,
}

impl PageRange {
    pub fn new(start: u32, end: u32, page_type: PageType) -> Self {
        Self { start, end, page_type }
    }
}

/// A single statement row.
///
/// Credit, debit and balance are kept private so every write goes through the
/// rounding setters; `balance` is derived and owned by the balance
/// calculator. `original_date` is set only by date sequencing and preserves
/// the pre-sequencing date for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    #[serde(default, deserialize_with = "de_amount")]
    credit: f64,
    #[serde(default, deserialize_with = "de_amount")]
    debit: f64,
    #[serde(default, deserialize_with = "de_amount")]
    balance: f64,
    #[serde(default, rename = "ref")]
    pub ref_no: Option<String>,
    #[serde(default)]
    pub original_date: Option<NaiveDate>,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        credit: f64,
        debit: f64,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            credit: round2(credit),
            debit: round2(debit),
            balance: 0.0,
            ref_no: None,
            original_date: None,
        }
    }

    pub fn with_ref(mut self, ref_no: impl Into<String>) -> Self {
        self.ref_no = Some(ref_no.into());
        self
    }

    pub fn with_balance(mut self, balance: f64) -> Self {
        self.balance = round2(balance);
        self
    }

    pub fn credit(&self) -> f64 {
        self.credit
    }

    pub fn debit(&self) -> f64 {
        self.debit
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn set_credit(&mut self, credit: f64) {
        self.credit = round2(credit);
    }

    pub fn set_debit(&mut self, debit: f64) {
        self.debit = round2(debit);
    }

    pub fn set_balance(&mut self, balance: f64) {
        self.balance = round2(balance);
    }
}

/// The aggregate root: one account's statement over a period.
///
/// `closing_balance`, `total_credits` and `total_debits` are derived; only
/// the balance calculator writes them. Transaction order is significant and
/// assumed chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub header: Header,
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub original_page_ranges: Vec<PageRange>,
    /// Unmapped source columns, passed through untouched for rendering.
    #[serde(default)]
    pub extra_columns: BTreeMap<String, Vec<serde_json::Value>>,
    #[serde(default)]
    pub opening_balance: f64,
    #[serde(default)]
    pub closing_balance: f64,
    #[serde(default)]
    pub total_credits: f64,
    #[serde(default)]
    pub total_debits: f64,
}

impl Statement {
    pub fn new(header: Header, transactions: Vec<Transaction>) -> Self {
        Self {
            header,
            transactions,
            original_page_ranges: Vec::new(),
            extra_columns: BTreeMap::new(),
            opening_balance: 0.0,
            closing_balance: 0.0,
            total_credits: 0.0,
            total_debits: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_amounts_rounded_on_construction() {
        let txn = Transaction::new(d(2024, 1, 1), "Salary", 1000.009, 0.001);
        assert_eq!(txn.credit(), 1000.01);
        assert_eq!(txn.debit(), 0.0);
    }

    #[test]
    fn test_amounts_rounded_on_set() {
        let mut txn = Transaction::new(d(2024, 1, 1), "ATM", 0.0, 0.0);
        txn.set_debit(199.999);
        txn.set_balance(1800.004);
        assert_eq!(txn.debit(), 200.0);
        assert_eq!(txn.balance(), 1800.0);
    }

    #[test]
    fn test_amounts_rounded_on_deserialize() {
        let txn: Transaction = serde_json::from_str(
            r#"{"date":"2024-01-01","description":"Salary","credit":1000.009,"debit":0.0}"#,
        )
        .unwrap();
        assert_eq!(txn.credit(), 1000.01);
        assert_eq!(txn.balance(), 0.0);
        assert_eq!(txn.ref_no, None);
    }

    #[test]
    fn test_ref_serialized_as_ref() {
        let txn = Transaction::new(d(2024, 1, 5), "Cheque", 0.0, 50.0).with_ref("CHQ-42");
        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains(r#""ref":"CHQ-42""#));

        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, txn);
    }

    #[test]
    fn test_statement_defaults() {
        let stmt = Statement::new(Header::new("John Doe", "123456789"), Vec::new());
        assert_eq!(stmt.opening_balance, 0.0);
        assert!(stmt.original_page_ranges.is_empty());
        assert!(stmt.extra_columns.is_empty());
    }

    #[test]
    fn test_page_type_defaults_to_statement() {
        let pr: PageRange = serde_json::from_str(r#"{"start":1,"end":3}"#).unwrap();
        assert_eq!(pr.page_type, PageType::Statement);
    }
}
