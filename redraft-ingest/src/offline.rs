//! Offline heuristic extractor: unstructured statement text to a statement.
//!
//! The fallback when no structured payload is available. Best effort by
//! contract: every sub-step degrades to a documented default and the output
//! is always a structurally valid statement — malformed input can never fail.
//!
//! Structural assumptions of this mode: one transaction per line, a leading
//! ISO date (YYYY-MM-DD), then a description, then up to three trailing
//! numeric tokens (credit, debit, balance). Multi-line entries and non-ISO
//! dates are undetectable here; such lines are silently skipped.
//!
//! Expected shape:
//!   Account Holder: John Doe
//!   Account Number: 123456789
//!   Opening Balance: 1000.00
//!   2024-01-01 Salary Credit 1000.00 0.00 2000.00
//!   2024-01-05 ATM Withdrawal 0.00 200.00 1800.00

use anyhow::Result;
use chrono::{Local, NaiveDate};
use regex::Regex;

use redraft_core::statement::{Header, Statement, Transaction, round2};

const ACCOUNT_HOLDER_LABELS: &[&str] = &[r"account\s*holder", r"customer\s*name", r"a/?c\s*name"];
const ACCOUNT_NUMBER_LABELS: &[&str] = &[r"account\s*number", r"account\s*no\.?", r"a/?c\s*no\.?"];
const BANK_NAME_LABELS: &[&str] = &[r"bank\s*name", r"bank"];
const IFSC_LABELS: &[&str] = &[r"ifsc\s*code", r"ifsc"];
const BRANCH_LABELS: &[&str] = &[r"branch\s*name", r"branch"];
const OPENING_BALANCE_LABELS: &[&str] = &[
    r"opening\s*balance",
    r"balance\s*brought\s*forward",
    r"balance\s*b/f",
    r"b/f",
];

/// Extract a complete statement from raw text.
///
/// `Err` only if an internal pattern fails to compile; no input text causes
/// an error. Missing header fields fall back to "Unknown" / "Unknown Bank" /
/// "0000000000"; an unparseable opening balance is 0.0; zero matching rows
/// yield one placeholder transaction dated today.
pub fn extract_statement(text: &str) -> Result<Statement> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

    let header = Header {
        bank_name: Some(
            scan_label(&lines, BANK_NAME_LABELS)?.unwrap_or_else(|| "Unknown Bank".to_string()),
        ),
        account_holder: scan_label(&lines, ACCOUNT_HOLDER_LABELS)?
            .unwrap_or_else(|| "Unknown".to_string()),
        account_number: scan_label(&lines, ACCOUNT_NUMBER_LABELS)?
            .unwrap_or_else(|| "0000000000".to_string()),
        ifsc: scan_label(&lines, IFSC_LABELS)?,
        micr: None,
        branch: scan_label(&lines, BRANCH_LABELS)?,
        statement_period: None,
        address: None,
    };

    let opening_balance = scan_label(&lines, OPENING_BALANCE_LABELS)?
        .map(|s| parse_amount(&s))
        .unwrap_or(0.0);

    let (transactions, closing_balance) = extract_rows(&lines, opening_balance)?;

    let mut statement = Statement::new(header, transactions);
    statement.opening_balance = round2(opening_balance);
    statement.closing_balance = closing_balance;
    Ok(statement)
}

/// Scan every line against an ordered list of label patterns; first match
/// wins. Captures the text after the label and its separator.
fn scan_label(lines: &[&str], labels: &[&str]) -> Result<Option<String>> {
    for label in labels {
        let re = Regex::new(&format!(r"(?i)^\s*{label}\s*[:\-]\s*(\S.*)$"))?;
        for line in lines {
            if let Some(caps) = re.captures(line) {
                return Ok(Some(caps[1].trim().to_string()));
            }
        }
    }
    Ok(None)
}

/// Parse transaction rows and backfill balances.
///
/// Returns the rows plus the final running balance (the closing balance).
fn extract_rows(lines: &[&str], opening_balance: f64) -> Result<(Vec<Transaction>, f64)> {
    let row_re = Regex::new(r"^\s*(?P<date>\d{4}-\d{2}-\d{2})\s+(?P<rest>\S.*)$")?;

    let mut parsed: Vec<(Transaction, Option<f64>)> = Vec::new();

    for line in lines {
        let Some(caps) = row_re.captures(line) else {
            continue;
        };
        let Some(date) = NaiveDate::parse_from_str(&caps["date"], "%Y-%m-%d").ok() else {
            continue;
        };

        let mut tokens: Vec<&str> = caps["rest"].split_whitespace().collect();

        // Peel up to three numeric tokens off the right: credit, debit, balance.
        let mut amounts: Vec<&str> = Vec::new();
        while amounts.len() < 3 {
            match tokens.last().copied() {
                Some(last) if is_amount_token(last) => {
                    amounts.push(last);
                    tokens.pop();
                }
                _ => break,
            }
        }
        amounts.reverse();

        if tokens.is_empty() {
            // No description left over; not a transaction row.
            continue;
        }

        let description = tokens.join(" ");
        let (credit, debit) = split_amounts(amounts.first().copied(), amounts.get(1).copied());
        let balance = amounts.get(2).map(|t| parse_amount(t));

        parsed.push((Transaction::new(date, description, credit, debit), balance));
    }

    // Backfill balances: a captured balance reseeds the running total, a
    // missing one is computed from it.
    let mut running = opening_balance;
    let mut transactions = Vec::with_capacity(parsed.len());
    for (mut txn, captured) in parsed {
        match captured {
            Some(balance) => {
                txn.set_balance(balance);
                running = balance;
            }
            None => {
                running += txn.credit() - txn.debit();
                txn.set_balance(running);
            }
        }
        transactions.push(txn);
    }

    if transactions.is_empty() {
        let placeholder = Transaction::new(
            Local::now().date_naive(),
            "Placeholder entry - no transactions detected",
            0.0,
            0.0,
        )
        .with_balance(opening_balance);
        transactions.push(placeholder);
    }

    Ok((transactions, round2(running)))
}

/// Resolve the two leading amount tokens into (credit, debit).
///
/// One present-and-nonzero token is a credit in first position, a debit in
/// second. When both are nonzero the source's column order is trusted:
/// first is credit, second is debit.
fn split_amounts(first: Option<&str>, second: Option<&str>) -> (f64, f64) {
    let credit = first.map(parse_amount).unwrap_or(0.0);
    let debit = second.map(parse_amount).unwrap_or(0.0);
    (credit, debit)
}

/// Strip currency symbols, separators and signs, then parse; anything
/// unparsable is 0.0, never an error.
pub fn parse_amount(token: &str) -> f64 {
    let cleaned: String = token
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse().map(round2).unwrap_or(0.0)
}

/// A token counts as an amount if it has digits, no letters, and survives
/// currency stripping as a single number.
fn is_amount_token(token: &str) -> bool {
    if token.chars().any(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    let cleaned: String = token
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    !cleaned.is_empty() && cleaned.parse::<f64>().is_ok()
}
