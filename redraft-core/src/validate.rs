//! Field validators for callers that want to reject a request up front.
//!
//! The computation passes in this crate do not validate their inputs (an
//! invalid window degrades, it does not error); rejecting bad input is the
//! caller's choice, made with these helpers.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use regex::Regex;

use crate::statement::Transaction;

/// Longest accepted sequencing window, in days.
const MAX_RANGE_DAYS: i64 = 3650;

const MAX_DESCRIPTION_LEN: usize = 500;

/// Check a sequencing window: ordered, not in the future, at most 10 years.
pub fn validate_date_range(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Result<()> {
    if start > end {
        bail!("start date {start} is after end date {end}");
    }
    if end > today {
        bail!("end date {end} is in the future");
    }
    if (end - start).num_days() > MAX_RANGE_DAYS {
        bail!("date range exceeds {MAX_RANGE_DAYS} days");
    }
    Ok(())
}

/// Account numbers are 9-18 digits once spaces and hyphens are stripped.
pub fn validate_account_number(account_number: &str) -> Result<()> {
    let cleaned: String = account_number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if cleaned.is_empty() {
        bail!("account number is required");
    }
    if cleaned.len() < 9 || cleaned.len() > 18 {
        bail!("account number must be 9-18 digits, got {}", cleaned.len());
    }
    if !cleaned.chars().all(|c| c.is_ascii_digit()) {
        bail!("account number must contain only digits: {account_number}");
    }
    Ok(())
}

/// IFSC is optional; when present it must be 4 letters, a zero, then 6
/// alphanumerics (e.g. SBIN0001234).
pub fn validate_ifsc(ifsc: &str) -> Result<()> {
    if ifsc.is_empty() {
        return Ok(());
    }
    let pattern = Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$")?;
    if !pattern.is_match(&ifsc.to_uppercase()) {
        bail!("invalid IFSC '{ifsc}', expected XXXX0XXXXXX");
    }
    Ok(())
}

/// MICR is optional; when present it must be exactly 9 digits.
pub fn validate_micr(micr: &str) -> Result<()> {
    if micr.is_empty() {
        return Ok(());
    }
    let cleaned: String = micr
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if cleaned.len() != 9 || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        bail!("MICR must be 9 digits: {micr}");
    }
    Ok(())
}

/// Reject transactions the model knowingly tolerates: negative amounts, a
/// simultaneous credit and debit, or a missing/oversized description.
pub fn validate_transaction(txn: &Transaction) -> Result<()> {
    if txn.credit() < 0.0 || txn.debit() < 0.0 {
        bail!("credit and debit amounts cannot be negative");
    }
    if txn.credit() > 0.0 && txn.debit() > 0.0 {
        bail!("transaction cannot carry both a credit and a debit");
    }
    if txn.description.trim().is_empty() {
        bail!("description cannot be empty");
    }
    if txn.description.chars().count() > MAX_DESCRIPTION_LEN {
        bail!("description too long (max {MAX_DESCRIPTION_LEN} characters)");
    }
    Ok(())
}

/// Strip control characters, trim, and cap length.
pub fn sanitize_string(text: &str, max_length: usize) -> String {
    let cleaned: String = text.chars().filter(|c| !c.is_control()).collect();
    cleaned.trim().chars().take(max_length).collect()
}
