use crate::utils::money::round2;
use chrono::NaiveDate;
use serde::Serialize;

/// Registry fallback when no rate has ever been created.
pub const DEFAULT_DAILY_RATE: f64 = 550.0;

const WORKDAY_HOURS: f64 = 8.0;
const OVERTIME_MULTIPLIER: f64 = 1.25;

/// The three amounts needed to price a day. Hourly and overtime are
/// always derived from the daily rate, never entered independently.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct RateCard {
    pub daily_rate: f64,
    pub hourly_rate: f64,
    pub overtime_rate: f64,
}

impl RateCard {
    pub fn from_daily(daily_rate: f64) -> Self {
        let hourly = round2(daily_rate / WORKDAY_HOURS);
        Self {
            daily_rate: round2(daily_rate),
            hourly_rate: hourly,
            overtime_rate: round2(hourly * OVERTIME_MULTIPLIER),
        }
    }

    pub fn fallback() -> Self {
        Self::from_daily(DEFAULT_DAILY_RATE)
    }
}

/// One immutable version of the global salary rate. Corrections create
/// a new version; existing rows are never edited or deleted.
#[derive(Debug, Clone, Serialize)]
pub struct SalaryRate {
    pub id: i64,
    pub card: RateCard,
    pub effective_date: NaiveDate, // ⇔ salary_rates.effective_date (TEXT "YYYY-MM-DD")
    pub created_by: String,
    pub reason: String,
    pub created_at: String, // ISO8601
}
