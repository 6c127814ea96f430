use super::day_type::{CloseMethod, DayType};
use chrono::{Local, NaiveDate, NaiveTime};
use serde::Serialize;

/// One attendance record per (employee, calendar day), Manila local time.
///
/// Created on the first valid time-in of the day; mutated exactly once
/// when the shift is closed (manual clock-out or auto-close sweep).
/// Never deleted, only archived.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDate,            // ⇔ attendance.date (TEXT "YYYY-MM-DD")
    pub time_in: NaiveTime,         // ⇔ attendance.time_in (TEXT "HH:MM")
    pub time_out: Option<NaiveTime>,
    pub day_type: DayType,
    pub worked_minutes: i64,
    pub overtime_minutes: i64,
    pub day_salary: f64,
    pub overtime_pay: f64,
    pub total_pay: f64,
    pub is_valid_day: bool,
    pub validation_reason: String,
    pub closed_by: Option<CloseMethod>,
    /// Set when the auto-close sweep could not classify the record;
    /// an admin has to resolve it by hand.
    pub needs_review: bool,
    pub archived: bool,
    pub created_at: String, // ISO8601
}

impl AttendanceRecord {
    /// New open record for a validated time-in. Pay fields stay zeroed
    /// until classification.
    pub fn open(employee_id: i64, date: NaiveDate, time_in: NaiveTime) -> Self {
        Self {
            id: 0,
            employee_id,
            date,
            time_in,
            time_out: None,
            day_type: DayType::Incomplete,
            worked_minutes: 0,
            overtime_minutes: 0,
            day_salary: 0.0,
            overtime_pay: 0.0,
            total_pay: 0.0,
            is_valid_day: false,
            validation_reason: String::new(),
            closed_by: None,
            needs_review: false,
            archived: false,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.time_out.is_none()
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
