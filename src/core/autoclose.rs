//! Auto-close sweep: force a time-out on every shift still open past
//! the cutoff. Invoked by an external scheduler (nightly cron) or on
//! demand; the engine only owns this idempotent entry point.

use crate::config::Config;
use crate::core::calculator;
use crate::core::clock::apply_classification;
use crate::core::rates;
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::day_type::CloseMethod;
use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

#[derive(Debug, Default, Serialize)]
pub struct SweepReport {
    pub closed: i64,
    pub skipped: i64,
    /// Records the sweep could not classify; each is flagged for
    /// manual review rather than aborting the run.
    pub failed: Vec<SweepFailure>,
}

#[derive(Debug, Serialize)]
pub struct SweepFailure {
    pub record_id: i64,
    pub employee_id: i64,
    pub error: String,
}

/// Close every open record whose auto-close instant (its date at the
/// configured hour) has passed by `now`. Safe to re-run: records that
/// are no longer open never enter the working set.
pub fn run_auto_close(pool: &mut DbPool, cfg: &Config, now: NaiveDateTime) -> AppResult<SweepReport> {
    let cutoff_time = NaiveTime::from_hms_opt(cfg.auto_close_hour, 0, 0).ok_or_else(|| {
        crate::errors::AppError::Configuration(format!(
            "auto-close hour {} is not a valid hour",
            cfg.auto_close_hour
        ))
    })?;
    let open = db::attendance::list_open_up_to(&pool.conn, now.date())?;

    let mut report = SweepReport::default();

    for rec in open {
        // Today's shifts stay open until the cutoff hour passes.
        if rec.date == now.date() && now.time().hour() < cfg.auto_close_hour {
            report.skipped += 1;
            continue;
        }

        let rate = rates::resolve_rate(pool, rec.date)?;
        match calculator::calculate(cfg, rec.time_in, cutoff_time, &rate, CloseMethod::Auto) {
            Ok(calc) => {
                let employee_id = rec.employee_id;
                let closed = apply_classification(rec, cutoff_time, CloseMethod::Auto, &calc);
                db::attendance::update_classification(&pool.conn, &closed)?;
                db::log::audit(
                    &pool.conn,
                    "auto_close",
                    &format!("employee {}", employee_id),
                    &format!(
                        "{} closed at {} -> {} ({:.2})",
                        closed.date_str(),
                        cutoff_time.format("%H:%M"),
                        closed.day_type.label(),
                        closed.total_pay,
                    ),
                )?;
                report.closed += 1;
            }
            Err(e) => {
                // One bad record must not abort the sweep.
                let reason = format!("auto-close failed: {}", e);
                db::attendance::mark_needs_review(&pool.conn, rec.id, &reason)?;
                db::log::audit(
                    &pool.conn,
                    "auto_close_failed",
                    &format!("record {}", rec.id),
                    &reason,
                )?;
                report.failed.push(SweepFailure {
                    record_id: rec.id,
                    employee_id: rec.employee_id,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}
