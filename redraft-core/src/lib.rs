//! redraft-core: statement document model and editing computation.
//!
//! The in-memory core of a bank-statement editing pipeline: the statement
//! aggregate, running-balance recalculation, date re-sequencing, edit
//! application, field validation, and the audit trail. Parsing raw sources
//! into a statement lives in `redraft-ingest`; file I/O, rendering and
//! serving live outside this workspace.

pub mod audit;
pub mod balance;
pub mod edit;
pub mod pages;
pub mod sequencer;
pub mod statement;
pub mod validate;

pub use audit::{AuditEntry, AuditSummary, AuditTrail, ChangeType};
pub use balance::recalculate;
pub use edit::{EditRequest, TransactionEdit, apply_edits};
pub use sequencer::{SequenceMethod, sequence_dates};
pub use statement::{Header, PageRange, PageType, Statement, Transaction, round2};
