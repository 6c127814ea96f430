use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum PayrollStatus {
    Draft,
    Processed,
    Approved,
    Paid,
}

impl PayrollStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PayrollStatus::Draft => "draft",
            PayrollStatus::Processed => "processed",
            PayrollStatus::Approved => "approved",
            PayrollStatus::Paid => "paid",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(PayrollStatus::Draft),
            "processed" => Some(PayrollStatus::Processed),
            "approved" => Some(PayrollStatus::Approved),
            "paid" => Some(PayrollStatus::Paid),
            _ => None,
        }
    }
}

/// One payroll line per (employee, Mon–Sat pay period). A read-only
/// aggregate over the attendance records and advance ledger as they
/// stood at generation time.
#[derive(Debug, Clone, Serialize)]
pub struct PayrollRecord {
    pub id: i64,
    pub employee_id: i64,
    pub period_start: NaiveDate, // always a Monday
    pub period_end: NaiveDate,   // always the Saturday of the same week
    pub gross_pay: f64,
    pub overtime_pay: f64,
    pub cash_advance_deduction: f64,
    pub other_deductions: f64,
    /// gross − deductions. Deliberately not clamped at zero: a period
    /// where deductions exceed gross carries the shortfall visibly.
    pub net_pay: f64,
    pub status: PayrollStatus,
    pub generated_at: String, // ISO8601
}

/// Result of a bulk generation run. One employee's failure never aborts
/// the batch; it is collected here instead.
#[derive(Debug, Default, Serialize)]
pub struct PayrollBatch {
    pub generated: Vec<PayrollRecord>,
    pub failures: Vec<PayrollFailure>,
}

#[derive(Debug, Serialize)]
pub struct PayrollFailure {
    pub employee_id: i64,
    pub error: String,
}
