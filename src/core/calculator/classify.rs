use crate::config::Config;
use crate::core::calculator::lunch::lunch_overlap_minutes;
use crate::errors::{AppError, AppResult};
use crate::models::day_type::{CloseMethod, DayType};
use crate::models::rate::RateCard;
use crate::utils::money::round2;
use crate::utils::time::minutes_between;
use chrono::{NaiveTime, Timelike};
use serde::Serialize;

/// Classification brackets, in worked minutes. Lower bounds inclusive.
const HALF_DAY_MIN: i64 = 240; // 4h
const FULL_DAY_MIN: i64 = 390; // 6.5h
const FULL_DAY_MAX: i64 = 480; // 8h

/// The classified outcome for one completed day.
#[derive(Debug, Clone, Serialize)]
pub struct DayCalculation {
    pub worked_minutes: i64,
    pub overtime_minutes: i64,
    pub day_type: DayType,
    pub day_salary: f64,
    pub overtime_pay: f64,
    pub total_pay: f64,
    pub is_valid: bool,
    /// Human-readable audit note explaining the verdict.
    pub reason: String,
}

/// Overtime is granted only when all three hold: at least a full-day's
/// worth of hours, the clock-out at or past the overtime hour, and a
/// manual close. An auto-closed shift never earns overtime.
fn overtime_eligible(
    cfg: &Config,
    worked_minutes: i64,
    time_out: NaiveTime,
    close: CloseMethod,
) -> bool {
    worked_minutes >= FULL_DAY_MIN
        && time_out.hour() >= cfg.overtime_after_hour
        && close.is_manual()
}

/// Turn a completed (time-in, time-out) pair into hours, a day type and
/// a pay breakdown under the given rate.
pub fn calculate(
    cfg: &Config,
    time_in: NaiveTime,
    time_out: NaiveTime,
    rate: &RateCard,
    close: CloseMethod,
) -> AppResult<DayCalculation> {
    if time_out <= time_in {
        return Err(AppError::Calculation(format!(
            "time-out {} is not after time-in {}",
            time_out.format("%H:%M"),
            time_in.format("%H:%M"),
        )));
    }

    let raw_minutes = minutes_between(time_in, time_out);
    let lunch = lunch_overlap_minutes(cfg, time_in, time_out);
    let worked = raw_minutes - lunch;

    let hours = worked as f64 / 60.0;

    if worked < HALF_DAY_MIN {
        return Ok(DayCalculation {
            worked_minutes: worked,
            overtime_minutes: 0,
            day_type: DayType::Invalid,
            day_salary: 0.0,
            overtime_pay: 0.0,
            total_pay: 0.0,
            is_valid: false,
            reason: format!("worked {:.2}h, below the 4-hour minimum; unpaid", hours),
        });
    }

    if worked < FULL_DAY_MIN {
        // Base half-day plus linear pay for hours beyond the 4-hour floor.
        let extra_hours = (worked - HALF_DAY_MIN) as f64 / 60.0;
        let day_salary = round2(rate.daily_rate / 2.0 + rate.hourly_rate * extra_hours);
        return Ok(DayCalculation {
            worked_minutes: worked,
            overtime_minutes: 0,
            day_type: DayType::HalfDay,
            day_salary,
            overtime_pay: 0.0,
            total_pay: day_salary,
            is_valid: true,
            reason: format!("worked {:.2}h, half day ({} lunch min excluded)", hours, lunch),
        });
    }

    if worked <= FULL_DAY_MAX {
        return Ok(DayCalculation {
            worked_minutes: worked,
            overtime_minutes: 0,
            day_type: DayType::FullDay,
            day_salary: rate.daily_rate,
            overtime_pay: 0.0,
            total_pay: rate.daily_rate,
            is_valid: true,
            reason: format!("worked {:.2}h, full day ({} lunch min excluded)", hours, lunch),
        });
    }

    // Beyond 8h: overtime only if eligible, otherwise capped at full day.
    if overtime_eligible(cfg, worked, time_out, close) {
        // Eligibility gates at 6.5h; accrual is measured from the
        // 8-hour mark.
        let ot_minutes = worked - FULL_DAY_MAX;
        let overtime_pay = round2(ot_minutes as f64 / 60.0 * rate.overtime_rate);
        let total_pay = round2(rate.daily_rate + overtime_pay);
        return Ok(DayCalculation {
            worked_minutes: worked,
            overtime_minutes: ot_minutes,
            day_type: DayType::Overtime,
            day_salary: rate.daily_rate,
            overtime_pay,
            total_pay,
            is_valid: true,
            reason: format!(
                "worked {:.2}h, full day plus {:.2}h overtime",
                hours,
                ot_minutes as f64 / 60.0
            ),
        });
    }

    let why = if !close.is_manual() {
        "auto-closed shift"
    } else {
        "clock-out before the overtime hour"
    };
    Ok(DayCalculation {
        worked_minutes: worked,
        overtime_minutes: 0,
        day_type: DayType::FullDay,
        day_salary: rate.daily_rate,
        overtime_pay: 0.0,
        total_pay: rate.daily_rate,
        is_valid: true,
        reason: format!(
            "worked {:.2}h, capped at full day ({} is not overtime-eligible)",
            hours, why
        ),
    })
}
