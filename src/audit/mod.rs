//! Audit trail for the expense tracker
//!
//! Records every expense create, update and delete, and every budget
//! overwrite, with before/after snapshots in an append-only JSONL file.
//!
//! ```rust,ignore
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(EntityType::Expense, "1", None, &expense))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
