//! Running-balance and totals recomputation.
//!
//! The single writer of `balance`, `closing_balance`, `total_credits` and
//! `total_debits`: after any transaction-affecting edit, callers run
//! [`recalculate`] before handing the statement on.

use crate::statement::{Statement, round2};

/// Recompute every running balance and the statement totals in one pass.
///
/// Seeds from `opening_balance`, applies `credit - debit` per row in order,
/// and rounds each stored balance to 2 decimals. Totals accumulate unrounded
/// and are rounded once at the end, so per-row rounding never drifts into
/// them. Running it twice on the same input is a no-op.
pub fn recalculate(statement: &mut Statement) {
    let mut running = statement.opening_balance;
    let mut total_credits = 0.0;
    let mut total_debits = 0.0;

    for txn in &mut statement.transactions {
        running += txn.credit();
        running -= txn.debit();
        txn.set_balance(running);

        total_credits += txn.credit();
        total_debits += txn.debit();
    }

    statement.total_credits = round2(total_credits);
    statement.total_debits = round2(total_debits);
    statement.closing_balance = round2(running);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::{Header, Transaction};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample_statement() -> Statement {
        let mut stmt = Statement::new(
            Header::new("John Doe", "123456789"),
            vec![
                Transaction::new(d(2024, 1, 1), "Salary Credit", 1000.0, 0.0),
                Transaction::new(d(2024, 1, 5), "ATM Withdrawal", 0.0, 200.0),
            ],
        );
        stmt.opening_balance = 1000.0;
        stmt
    }

    #[test]
    fn test_running_balances_and_totals() {
        let mut stmt = sample_statement();
        recalculate(&mut stmt);

        assert_eq!(stmt.transactions[0].balance(), 2000.0);
        assert_eq!(stmt.transactions[1].balance(), 1800.0);
        assert_eq!(stmt.total_credits, 1000.0);
        assert_eq!(stmt.total_debits, 200.0);
        assert_eq!(stmt.closing_balance, 1800.0);
    }

    #[test]
    fn test_closing_equals_opening_plus_net() {
        let mut stmt = sample_statement();
        recalculate(&mut stmt);
        assert_eq!(
            stmt.closing_balance,
            round2(stmt.opening_balance + stmt.total_credits - stmt.total_debits)
        );
    }

    #[test]
    fn test_each_balance_chains_from_previous() {
        let mut stmt = sample_statement();
        stmt.transactions
            .push(Transaction::new(d(2024, 1, 9), "Groceries", 0.0, 42.5));
        recalculate(&mut stmt);

        let mut prev = stmt.opening_balance;
        for txn in &stmt.transactions {
            assert_eq!(txn.balance(), round2(prev + txn.credit() - txn.debit()));
            prev = txn.balance();
        }
    }

    #[test]
    fn test_idempotent() {
        let mut stmt = sample_statement();
        recalculate(&mut stmt);
        let first = stmt.clone();
        recalculate(&mut stmt);
        assert_eq!(stmt, first);
    }

    #[test]
    fn test_empty_statement() {
        let mut stmt = Statement::new(Header::new("John Doe", "123456789"), Vec::new());
        stmt.opening_balance = 500.0;
        recalculate(&mut stmt);

        assert_eq!(stmt.closing_balance, 500.0);
        assert_eq!(stmt.total_credits, 0.0);
        assert_eq!(stmt.total_debits, 0.0);
    }

    #[test]
    fn test_overwrites_source_balances() {
        let mut stmt = Statement::new(
            Header::new("John Doe", "123456789"),
            vec![Transaction::new(d(2024, 1, 1), "Deposit", 100.0, 0.0).with_balance(9999.0)],
        );
        stmt.opening_balance = 50.0;
        recalculate(&mut stmt);
        assert_eq!(stmt.transactions[0].balance(), 150.0);
    }
}
