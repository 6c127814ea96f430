use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum AdvanceStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl AdvanceStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AdvanceStatus::Pending => "pending",
            AdvanceStatus::Approved => "approved",
            AdvanceStatus::Rejected => "rejected",
            AdvanceStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(AdvanceStatus::Pending),
            "approved" => Some(AdvanceStatus::Approved),
            "rejected" => Some(AdvanceStatus::Rejected),
            "cancelled" => Some(AdvanceStatus::Cancelled),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdvanceStatus::Pending => "Pending",
            AdvanceStatus::Approved => "Approved",
            AdvanceStatus::Rejected => "Rejected",
            AdvanceStatus::Cancelled => "Cancelled",
        }
    }
}

/// One cash-advance request plus its repayment position.
/// `remaining_balance` is always amount − Σ payments, recomputed from
/// the payments table at load time, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct CashAdvance {
    pub id: i64,
    pub employee_id: i64,
    pub amount: f64,
    pub purpose: String,
    pub status: AdvanceStatus,
    pub request_date: NaiveDate,
    pub decided_by: Option<String>,
    pub remaining_balance: f64,
    pub created_at: String, // ISO8601
}

/// A partial repayment posted by a payroll run.
#[derive(Debug, Clone, Serialize)]
pub struct AdvancePayment {
    pub id: i64,
    pub advance_id: i64,
    pub amount: f64,
    pub payroll_id: i64,
    pub date: NaiveDate,
}
