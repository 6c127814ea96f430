use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::day_type::{CloseMethod, DayType};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};

pub fn map_row(row: &Row) -> rusqlite::Result<AttendanceRecord> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let in_str: String = row.get("time_in")?;
    let time_in = NaiveTime::parse_from_str(&in_str, "%H:%M").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(in_str.clone())),
        )
    })?;

    let out_str: Option<String> = row.get("time_out")?;
    let time_out = match out_str {
        Some(s) => Some(NaiveTime::parse_from_str(&s, "%H:%M").map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidTime(s.clone())),
            )
        })?),
        None => None,
    };

    let day_type_str: String = row.get("day_type")?;
    let day_type = DayType::from_db_str(&day_type_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Validation(format!(
                "Invalid day type: {}",
                day_type_str
            ))),
        )
    })?;

    let closed_by_str: Option<String> = row.get("closed_by")?;
    let closed_by = closed_by_str.as_deref().and_then(CloseMethod::from_db_str);

    Ok(AttendanceRecord {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        date,
        time_in,
        time_out,
        day_type,
        worked_minutes: row.get("worked_minutes")?,
        overtime_minutes: row.get("overtime_minutes")?,
        day_salary: row.get("day_salary")?,
        overtime_pay: row.get("overtime_pay")?,
        total_pay: row.get("total_pay")?,
        is_valid_day: row.get::<_, i64>("is_valid_day")? == 1,
        validation_reason: row.get("validation_reason")?,
        closed_by,
        needs_review: row.get::<_, i64>("needs_review")? == 1,
        archived: row.get::<_, i64>("archived")? == 1,
        created_at: row.get("created_at")?,
    })
}

/// Insert a freshly opened record. The UNIQUE(employee_id, date) index
/// is the duplicate-shift race guard: a losing concurrent insert comes
/// back as a Conflict, never a silent overwrite.
pub fn insert_open(conn: &Connection, rec: &AttendanceRecord) -> AppResult<i64> {
    let res = conn.execute(
        "INSERT INTO attendance (employee_id, date, time_in, day_type, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            rec.employee_id,
            rec.date_str(),
            rec.time_in.format("%H:%M").to_string(),
            rec.day_type.to_db_str(),
            rec.created_at,
        ],
    );

    match res {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == ErrorCode::ConstraintViolation =>
        {
            Err(AppError::Conflict(format!(
                "attendance record already exists for employee {} on {}",
                rec.employee_id,
                rec.date_str()
            )))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn find(conn: &Connection, id: i64) -> AppResult<AttendanceRecord> {
    let mut stmt = conn.prepare_cached("SELECT * FROM attendance WHERE id = ?1")?;
    stmt.query_row([id], map_row)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("attendance record {}", id)))
}

pub fn find_by_employee_date(
    conn: &Connection,
    employee_id: i64,
    date: NaiveDate,
) -> AppResult<Option<AttendanceRecord>> {
    let mut stmt = conn
        .prepare_cached("SELECT * FROM attendance WHERE employee_id = ?1 AND date = ?2")?;
    let rec = stmt
        .query_row(
            params![employee_id, date.format("%Y-%m-%d").to_string()],
            map_row,
        )
        .optional()?;
    Ok(rec)
}

/// Write the one-and-only classification mutation for a record.
pub fn update_classification(conn: &Connection, rec: &AttendanceRecord) -> AppResult<()> {
    let time_out = rec
        .time_out
        .map(|t| t.format("%H:%M").to_string())
        .ok_or_else(|| {
            AppError::Calculation(format!("record {} has no time-out to store", rec.id))
        })?;

    conn.execute(
        "UPDATE attendance
         SET time_out = ?1, day_type = ?2,
             worked_minutes = ?3, overtime_minutes = ?4,
             day_salary = ?5, overtime_pay = ?6, total_pay = ?7,
             is_valid_day = ?8, validation_reason = ?9, closed_by = ?10
         WHERE id = ?11",
        params![
            time_out,
            rec.day_type.to_db_str(),
            rec.worked_minutes,
            rec.overtime_minutes,
            rec.day_salary,
            rec.overtime_pay,
            rec.total_pay,
            if rec.is_valid_day { 1 } else { 0 },
            rec.validation_reason,
            rec.closed_by.map(|c| c.to_db_str()),
            rec.id,
        ],
    )?;
    Ok(())
}

/// Open records (no time-out) dated on or before `date`.
/// The auto-close sweep's working set.
pub fn list_open_up_to(conn: &Connection, date: NaiveDate) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM attendance
         WHERE time_out IS NULL AND date <= ?1
         ORDER BY date ASC, employee_id ASC",
    )?;
    let rows = stmt.query_map([date.format("%Y-%m-%d").to_string()], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Classified, non-archived records for one employee in [start, end].
pub fn list_classified_for_period(
    conn: &Connection,
    employee_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM attendance
         WHERE employee_id = ?1
           AND date >= ?2 AND date <= ?3
           AND day_type != 'incomplete'
           AND archived = 0
         ORDER BY date ASC",
    )?;
    let rows = stmt.query_map(
        params![
            employee_id,
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string(),
        ],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_by_dates(conn: &Connection, dates: &[NaiveDate]) -> AppResult<Vec<AttendanceRecord>> {
    if dates.is_empty() {
        return Ok(Vec::new());
    }

    let date_strings: Vec<String> = dates
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    let placeholders = vec!["?"; date_strings.len()].join(",");
    let sql = format!(
        "SELECT * FROM attendance WHERE date IN ({}) ORDER BY date ASC, employee_id ASC",
        placeholders
    );

    let params_vec: Vec<&dyn rusqlite::ToSql> = date_strings
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params_vec), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Completed records still carrying the legacy 'incomplete' marker;
/// the backfill command's working set.
pub fn list_unclassified_completed(conn: &Connection) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM attendance
         WHERE time_out IS NOT NULL AND day_type = 'incomplete'
         ORDER BY date ASC",
    )?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn mark_needs_review(conn: &Connection, id: i64, reason: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE attendance SET needs_review = 1, validation_reason = ?1 WHERE id = ?2",
        params![reason, id],
    )?;
    Ok(())
}

/// Records are never deleted; archiving hides them from aggregation.
pub fn archive(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("UPDATE attendance SET archived = 1 WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("attendance record {}", id)));
    }
    Ok(())
}
