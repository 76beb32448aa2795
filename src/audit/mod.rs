//! Audit trail of generated work orders.

pub mod export;
pub mod handlers;
pub mod models;

pub use export::export_audit_csv;
pub use models::{AuditEntry, AuditFilter, AuditStats, NewAuditEntry};
