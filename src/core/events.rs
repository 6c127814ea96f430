//! Domain events the notification layer may subscribe to.
//!
//! The engine records each event durably in the audit log and moves
//! on; it never waits on a subscriber. Consumers (email, payslip PDF)
//! tail the log table or wrap [`emit`] with their own sink.

use crate::db;
use crate::errors::AppResult;
use crate::models::advance::CashAdvance;
use crate::models::payroll::PayrollRecord;
use rusqlite::Connection;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(tag = "event")]
pub enum DomainEvent<'a> {
    PayrollGenerated { record: &'a PayrollRecord },
    CashAdvanceApproved { advance: &'a CashAdvance },
}

impl DomainEvent<'_> {
    fn name(&self) -> &'static str {
        match self {
            DomainEvent::PayrollGenerated { .. } => "PayrollGenerated",
            DomainEvent::CashAdvanceApproved { .. } => "CashAdvanceApproved",
        }
    }

    fn target(&self) -> String {
        match self {
            DomainEvent::PayrollGenerated { record } => format!("payroll {}", record.id),
            DomainEvent::CashAdvanceApproved { advance } => format!("advance {}", advance.id),
        }
    }
}

pub fn emit(conn: &Connection, event: DomainEvent<'_>) -> AppResult<()> {
    let payload = serde_json::to_string(&event).unwrap_or_else(|_| "{}".to_string());
    db::log::audit(conn, event.name(), &event.target(), &payload)
}
