//! Attendance record state machine.
//!
//! One inbound entry point decides time-in vs time-out from the
//! current state of the (employee, day) record:
//!
//! ```text
//! NoRecord --(valid time-in, hour < 16)---------> Open
//! Open     --(valid time-out, hour in [16,18))--> Classified(manual)
//! Open     --(auto-close sweep at 20:00)--------> Classified(auto)
//! Classified --(terminal)
//! ```
//!
//! A rejected transition leaves the record untouched and surfaces the
//! specific policy reason.

use crate::config::Config;
use crate::core::calculator;
use crate::core::guard;
use crate::core::rates;
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::day_type::CloseMethod;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ClockAction {
    TimeIn,
    TimeOut,
}

/// What a time event did, returned to the biometric/UI layer.
#[derive(Debug, Serialize)]
pub struct ClockOutcome {
    pub action: ClockAction,
    pub record: AttendanceRecord,
    pub warnings: Vec<String>,
}

/// Handle one verified time event for an employee. The caller supplies
/// an already-authenticated identity plus the Manila-local date/time.
pub fn record_time_event(
    pool: &mut DbPool,
    cfg: &Config,
    employee_id: i64,
    date: NaiveDate,
    time: NaiveTime,
) -> AppResult<ClockOutcome> {
    let employee = db::employees::find(&pool.conn, employee_id)?;
    if !employee.active {
        return Err(AppError::Policy(format!(
            "employee {} is not active",
            employee_id
        )));
    }

    let existing = db::attendance::find_by_employee_date(&pool.conn, employee_id, date)?;

    match existing {
        None => {
            let warnings =
                guard::validate_time_in(cfg, &employee, date, time, None).into_result()?;

            let mut rec = AttendanceRecord::open(employee_id, date, time);
            rec.id = db::attendance::insert_open(&pool.conn, &rec)?;

            db::log::audit(
                &pool.conn,
                "time_in",
                &format!("employee {}", employee_id),
                &format!("{} {}", rec.date_str(), time.format("%H:%M")),
            )?;

            Ok(ClockOutcome {
                action: ClockAction::TimeIn,
                record: rec,
                warnings,
            })
        }
        Some(rec) if rec.is_open() => {
            let warnings = guard::validate_time_out(cfg, &rec, time).into_result()?;
            let rate = rates::resolve_rate(pool, date)?;

            let calc =
                calculator::calculate(cfg, rec.time_in, time, &rate, CloseMethod::Manual)?;
            let closed = apply_classification(rec, time, CloseMethod::Manual, &calc);
            db::attendance::update_classification(&pool.conn, &closed)?;

            db::log::audit(
                &pool.conn,
                "time_out",
                &format!("employee {}", employee_id),
                &format!(
                    "{} {} -> {} ({:.2})",
                    closed.date_str(),
                    time.format("%H:%M"),
                    closed.day_type.label(),
                    closed.total_pay,
                ),
            )?;

            Ok(ClockOutcome {
                action: ClockAction::TimeOut,
                record: closed,
                warnings,
            })
        }
        // Classified is terminal; the stored record stays intact.
        Some(rec) => Err(AppError::Policy(format!(
            "shift already completed for {}",
            rec.date_str()
        ))),
    }
}

/// Archive a record: hide it from payroll aggregation without deleting
/// it. Corrections happen via compensating records, so this is the only
/// mutation allowed after classification.
pub fn archive_record(pool: &mut DbPool, record_id: i64) -> AppResult<AttendanceRecord> {
    let rec = db::attendance::find(&pool.conn, record_id)?;
    if rec.archived {
        return Err(AppError::Policy(format!(
            "attendance record {} is already archived",
            record_id
        )));
    }

    db::attendance::archive(&pool.conn, record_id)?;
    db::log::audit(
        &pool.conn,
        "record_archived",
        &format!("record {}", record_id),
        &format!("employee {} {}", rec.employee_id, rec.date_str()),
    )?;

    db::attendance::find(&pool.conn, record_id)
}

/// Fold a calculator verdict into the record. The pay fields are
/// computed once here and cached; they are never re-derived later.
pub fn apply_classification(
    mut rec: AttendanceRecord,
    time_out: NaiveTime,
    close: CloseMethod,
    calc: &calculator::DayCalculation,
) -> AttendanceRecord {
    rec.time_out = Some(time_out);
    rec.day_type = calc.day_type;
    rec.worked_minutes = calc.worked_minutes;
    rec.overtime_minutes = calc.overtime_minutes;
    rec.day_salary = calc.day_salary;
    rec.overtime_pay = calc.overtime_pay;
    rec.total_pay = calc.total_pay;
    rec.is_valid_day = calc.is_valid;
    rec.validation_reason = calc.reason.clone();
    rec.closed_by = Some(close);
    rec
}
