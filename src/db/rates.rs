use crate::errors::{AppError, AppResult};
use crate::models::rate::{RateCard, SalaryRate};
use chrono::NaiveDate;
use rusqlite::{Connection, ErrorCode, Row, params};

pub fn map_row(row: &Row) -> rusqlite::Result<SalaryRate> {
    let eff_str: String = row.get("effective_date")?;
    let effective_date = NaiveDate::parse_from_str(&eff_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(eff_str.clone())),
        )
    })?;

    Ok(SalaryRate {
        id: row.get("id")?,
        card: RateCard {
            daily_rate: row.get("daily_rate")?,
            hourly_rate: row.get("hourly_rate")?,
            overtime_rate: row.get("overtime_rate")?,
        },
        effective_date,
        created_by: row.get("created_by")?,
        reason: row.get("reason")?,
        created_at: row.get("created_at")?,
    })
}

/// Append one immutable rate version. One rate per effective date.
pub fn insert(conn: &Connection, rate: &SalaryRate) -> AppResult<i64> {
    let res = conn.execute(
        "INSERT INTO salary_rates
         (daily_rate, hourly_rate, overtime_rate, effective_date, created_by, reason, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            rate.card.daily_rate,
            rate.card.hourly_rate,
            rate.card.overtime_rate,
            rate.effective_date.format("%Y-%m-%d").to_string(),
            rate.created_by,
            rate.reason,
            rate.created_at,
        ],
    );

    match res {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == ErrorCode::ConstraintViolation =>
        {
            Err(AppError::Conflict(format!(
                "a salary rate effective {} already exists",
                rate.effective_date.format("%Y-%m-%d")
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// All rates with effective_date ≤ `date`, newest first.
pub fn list_effective_up_to(conn: &Connection, date: NaiveDate) -> AppResult<Vec<SalaryRate>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM salary_rates
         WHERE effective_date <= ?1
         ORDER BY effective_date DESC",
    )?;
    let rows = stmt.query_map([date.format("%Y-%m-%d").to_string()], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn history(conn: &Connection) -> AppResult<Vec<SalaryRate>> {
    let mut stmt =
        conn.prepare_cached("SELECT * FROM salary_rates ORDER BY effective_date ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
