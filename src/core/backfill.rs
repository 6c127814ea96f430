//! One-time backfill for legacy records imported with a time-out but
//! no classification. Runs the same single classifier code path as a
//! live close; there is no runtime re-derivation branch anywhere else.

use crate::config::Config;
use crate::core::calculator;
use crate::core::clock::apply_classification;
use crate::core::rates;
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::day_type::CloseMethod;
use serde::Serialize;

#[derive(Debug, Default, Serialize)]
pub struct BackfillReport {
    pub classified: i64,
    pub failed: Vec<(i64, String)>,
}

/// Classify every completed-but-unclassified record. Imported closes
/// carry no close method, so they are treated as auto closes and never
/// granted overtime retroactively.
pub fn run_backfill(pool: &mut DbPool, cfg: &Config) -> AppResult<BackfillReport> {
    let pending = db::attendance::list_unclassified_completed(&pool.conn)?;
    let mut report = BackfillReport::default();

    for rec in pending {
        let Some(time_out) = rec.time_out else {
            continue;
        };
        let close = rec.closed_by.unwrap_or(CloseMethod::Auto);
        let rate = rates::resolve_rate(pool, rec.date)?;

        match calculator::calculate(cfg, rec.time_in, time_out, &rate, close) {
            Ok(calc) => {
                let id = rec.id;
                let closed = apply_classification(rec, time_out, close, &calc);
                db::attendance::update_classification(&pool.conn, &closed)?;
                db::log::audit(
                    &pool.conn,
                    "backfill",
                    &format!("record {}", id),
                    &format!("classified as {}", closed.day_type.label()),
                )?;
                report.classified += 1;
            }
            Err(e) => {
                let reason = format!("backfill failed: {}", e);
                db::attendance::mark_needs_review(&pool.conn, rec.id, &reason)?;
                report.failed.push((rec.id, e.to_string()));
            }
        }
    }

    Ok(report)
}
