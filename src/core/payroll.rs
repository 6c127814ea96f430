//! Payroll aggregator: rolls a Mon–Sat week of classified attendance
//! plus cash-advance deductions into one payroll line per employee.

use crate::config::Config;
use crate::core::advances;
use crate::core::calendar;
use crate::core::events::{self, DomainEvent};
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::payroll::{PayrollBatch, PayrollFailure, PayrollRecord, PayrollStatus};
use crate::utils::money::round2;
use chrono::{Datelike, Local, NaiveDate, Weekday};

/// Generate the payroll line for one employee and one Mon–Sat period.
///
/// The advance repayment is posted in the same transaction as the
/// payroll insert; the UNIQUE(employee_id, period_start) index makes
/// re-generation fail before anything is deducted twice.
pub fn generate_for_period(
    pool: &mut DbPool,
    cfg: &Config,
    employee_id: i64,
    period_start: NaiveDate,
    period_end: NaiveDate,
    other_deductions: f64,
) -> AppResult<PayrollRecord> {
    if !calendar::is_pay_period(period_start, period_end) {
        return Err(AppError::Validation(format!(
            "pay period must be one Monday–Saturday week, got {} to {}",
            period_start.format("%Y-%m-%d"),
            period_end.format("%Y-%m-%d"),
        )));
    }

    let employee = db::employees::find(&pool.conn, employee_id)?;

    if let Some(existing) =
        db::payroll::find_by_period(&pool.conn, employee_id, period_start)?
    {
        return Err(AppError::Conflict(format!(
            "payroll already generated for employee {} week starting {} (record {})",
            employee_id,
            period_start.format("%Y-%m-%d"),
            existing.id,
        )));
    }

    // Read-only snapshot of the period's classified days.
    let records = db::attendance::list_classified_for_period(
        &pool.conn,
        employee_id,
        period_start,
        period_end,
    )?;

    let gross_pay = round2(records.iter().map(|r| r.total_pay).sum());
    let overtime_pay = round2(records.iter().map(|r| r.overtime_pay).sum());

    // Deduct up to the outstanding balance, optionally capped per run.
    let outstanding = advances::outstanding_balance(&pool.conn, employee_id)?;
    let cap = cfg.advance_deduction_cap.unwrap_or(outstanding);
    let deduction = round2(outstanding.min(cap));

    let mut record = PayrollRecord {
        id: 0,
        employee_id,
        period_start,
        period_end,
        gross_pay,
        overtime_pay,
        cash_advance_deduction: deduction,
        other_deductions: round2(other_deductions),
        // Negative nets are allowed: a week where deductions exceed
        // gross carries the shortfall visibly instead of hiding it.
        net_pay: round2(gross_pay - deduction - other_deductions),
        status: PayrollStatus::Processed,
        generated_at: Local::now().to_rfc3339(),
    };

    let tx = pool.conn.transaction()?;

    record.id = db::payroll::insert(&tx, &record)?;

    // Walk approved advances oldest-first until the deduction is spent.
    let mut remaining = deduction;
    for advance in db::advances::list_outstanding(&tx, employee_id)? {
        if remaining <= 0.0 {
            break;
        }
        let payment = round2(remaining.min(advance.remaining_balance));
        advances::add_payment(&tx, advance.id, payment, record.id, period_end)?;
        remaining = round2(remaining - payment);
    }

    db::log::audit(
        &tx,
        "payroll_generated",
        &format!("payroll {}", record.id),
        &format!(
            "employee {} ({}) week {}: gross {:.2}, advance deduction {:.2}, net {:.2}",
            employee_id,
            employee.name,
            period_start.format("%Y-%m-%d"),
            gross_pay,
            deduction,
            record.net_pay,
        ),
    )?;
    events::emit(&tx, DomainEvent::PayrollGenerated { record: &record })?;

    tx.commit()?;

    Ok(record)
}

/// Generate for every active employee. One employee's failure is
/// collected and the batch continues.
pub fn generate_for_all(
    pool: &mut DbPool,
    cfg: &Config,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> AppResult<PayrollBatch> {
    if !calendar::is_pay_period(period_start, period_end) {
        return Err(AppError::Validation(format!(
            "pay period must be one Monday–Saturday week, got {} to {}",
            period_start.format("%Y-%m-%d"),
            period_end.format("%Y-%m-%d"),
        )));
    }

    let employees = db::employees::list_active(&pool.conn)?;
    let mut batch = PayrollBatch::default();

    for employee in employees {
        match generate_for_period(pool, cfg, employee.id, period_start, period_end, 0.0) {
            Ok(rec) => batch.generated.push(rec),
            Err(e) => batch.failures.push(PayrollFailure {
                employee_id: employee.id,
                error: e.to_string(),
            }),
        }
    }

    Ok(batch)
}

/// Scheduler entry point for the weekly run: `week_ending` is the
/// Saturday closing the period.
pub fn run_weekly_payroll(
    pool: &mut DbPool,
    cfg: &Config,
    week_ending: NaiveDate,
) -> AppResult<PayrollBatch> {
    if week_ending.weekday() != Weekday::Sat {
        return Err(AppError::Validation(format!(
            "week ending {} is not a Saturday",
            week_ending.format("%Y-%m-%d"),
        )));
    }
    let (monday, saturday) = calendar::week_bounds(week_ending);
    generate_for_all(pool, cfg, monday, saturday)
}
