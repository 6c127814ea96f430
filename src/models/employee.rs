use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub hire_date: NaiveDate, // ⇔ employees.hire_date (TEXT "YYYY-MM-DD")
    pub active: bool,
    /// Maximum combined outstanding cash-advance balance this employee
    /// may carry. None falls back to the configured default limit.
    pub advance_limit: Option<f64>,
    pub created_at: String, // ISO8601
}
