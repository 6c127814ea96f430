//! Salary rate registry: time-versioned global pay rates and the
//! weekly rollover resolution rule.

use crate::core::calendar::monday_on_or_before;
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::rate::{RateCard, SalaryRate};
use chrono::{Local, NaiveDate};

const MIN_REASON_LEN: usize = 5;

/// Append a new rate version. Hourly and overtime rates are derived
/// here; the caller only supplies the daily amount.
pub fn create_rate(
    pool: &mut DbPool,
    daily_rate: f64,
    effective_date: NaiveDate,
    reason: &str,
    actor: &str,
) -> AppResult<SalaryRate> {
    if !daily_rate.is_finite() || daily_rate <= 0.0 {
        return Err(AppError::Validation(format!(
            "daily rate must be positive, got {}",
            daily_rate
        )));
    }
    let reason = reason.trim();
    if reason.len() < MIN_REASON_LEN {
        return Err(AppError::Validation(format!(
            "a rate change reason of at least {} characters is required",
            MIN_REASON_LEN
        )));
    }

    let mut rate = SalaryRate {
        id: 0,
        card: RateCard::from_daily(daily_rate),
        effective_date,
        created_by: actor.to_string(),
        reason: reason.to_string(),
        created_at: Local::now().to_rfc3339(),
    };
    rate.id = db::rates::insert(&pool.conn, &rate)?;

    db::log::audit(
        &pool.conn,
        "rate_created",
        &format!("rate {}", rate.id),
        &format!(
            "daily {:.2} effective {} by {}: {}",
            rate.card.daily_rate,
            effective_date.format("%Y-%m-%d"),
            actor,
            reason
        ),
    )?;

    Ok(rate)
}

/// Resolve the rate in effect for `date` under the weekly rollover
/// rule: among rates effective on or before `date`, take the latest
/// one not displaced by a newer rate that was already effective by the
/// Monday of `date`'s week. A rate created mid-week therefore governs
/// the remaining days of that week, with the next rate taking over
/// strictly on a Monday boundary.
///
/// Falls back to the built-in default card when the registry is empty.
pub fn resolve_rate(pool: &mut DbPool, date: NaiveDate) -> AppResult<RateCard> {
    let candidates = db::rates::list_effective_up_to(&pool.conn, date)?;
    if candidates.is_empty() {
        return Ok(RateCard::fallback());
    }

    let monday = monday_on_or_before(date);

    for rate in &candidates {
        let displaced = candidates.iter().any(|newer| {
            newer.effective_date > rate.effective_date && newer.effective_date <= monday
        });
        if !displaced {
            return Ok(rate.card);
        }
    }

    // Unreachable with a totally ordered registry; the newest candidate
    // is never displaced.
    Ok(candidates[0].card)
}

pub fn history(pool: &mut DbPool) -> AppResult<Vec<SalaryRate>> {
    db::rates::history(&pool.conn)
}
