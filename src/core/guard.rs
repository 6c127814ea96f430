//! Attendance guard: fraud and policy validation for proposed time-in
//! and time-out events. The guard only inspects; it never mutates
//! state, so a failed check leaves the day exactly as it was.

use crate::config::Config;
use crate::core::calendar;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::employee::Employee;
use chrono::{NaiveDate, NaiveTime, Timelike};

#[derive(Debug, Default)]
pub struct GuardVerdict {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl GuardVerdict {
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    /// Collapse a failed verdict into the policy error surfaced to the
    /// caller. The specific reasons are preserved verbatim.
    pub fn into_result(self) -> AppResult<Vec<String>> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(AppError::Policy(self.errors.join("; ")))
        }
    }
}

pub fn validate_time_in(
    cfg: &Config,
    employee: &Employee,
    date: NaiveDate,
    time: NaiveTime,
    existing: Option<&AttendanceRecord>,
) -> GuardVerdict {
    let mut verdict = GuardVerdict::default();

    if !calendar::is_workday(date) {
        verdict
            .errors
            .push("Sunday is not a valid work day".to_string());
    }

    if !calendar::is_within_hire_window(date, employee.hire_date) {
        verdict.errors.push(format!(
            "attendance date {} is before hire date {}",
            date.format("%Y-%m-%d"),
            employee.hire_date.format("%Y-%m-%d"),
        ));
    }

    if time.hour() >= cfg.time_in_cutoff_hour {
        verdict.errors.push(format!(
            "time-in at {} is past the {}:00 cutoff",
            time.format("%H:%M"),
            cfg.time_in_cutoff_hour,
        ));
    }

    // A second time-in the same day is a duplicate-shift condition,
    // never silently converted into a time-out.
    match existing {
        Some(rec) if rec.is_open() => verdict.errors.push(format!(
            "a shift is already open for {}; duplicate time-in rejected",
            date.format("%Y-%m-%d"),
        )),
        Some(_) => verdict.errors.push(format!(
            "shift already completed for {}",
            date.format("%Y-%m-%d"),
        )),
        None => {}
    }

    verdict
}

pub fn validate_time_out(
    cfg: &Config,
    record: &AttendanceRecord,
    time: NaiveTime,
) -> GuardVerdict {
    let mut verdict = GuardVerdict::default();

    if !record.is_open() {
        verdict.errors.push(format!(
            "shift already completed for {}",
            record.date.format("%Y-%m-%d"),
        ));
        return verdict;
    }

    if time <= record.time_in {
        verdict.errors.push(format!(
            "time-out {} is not after time-in {}",
            time.format("%H:%M"),
            record.time_in.format("%H:%M"),
        ));
    }

    if time.hour() < cfg.time_out_window_start || time.hour() >= cfg.time_out_window_end {
        verdict.errors.push(format!(
            "manual time-out is only accepted between {}:00 and {}:00",
            cfg.time_out_window_start, cfg.time_out_window_end,
        ));
    }

    verdict
}
