use crate::errors::{AppError, AppResult};
use crate::models::payroll::{PayrollRecord, PayrollStatus};
use chrono::NaiveDate;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};

pub fn map_row(row: &Row) -> rusqlite::Result<PayrollRecord> {
    let parse_date = |s: String| {
        NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(s.clone())),
            )
        })
    };

    let period_start = parse_date(row.get("period_start")?)?;
    let period_end = parse_date(row.get("period_end")?)?;

    let status_str: String = row.get("status")?;
    let status = PayrollStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Validation(format!(
                "Invalid payroll status: {}",
                status_str
            ))),
        )
    })?;

    Ok(PayrollRecord {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        period_start,
        period_end,
        gross_pay: row.get("gross_pay")?,
        overtime_pay: row.get("overtime_pay")?,
        cash_advance_deduction: row.get("cash_advance_deduction")?,
        other_deductions: row.get("other_deductions")?,
        net_pay: row.get("net_pay")?,
        status,
        generated_at: row.get("generated_at")?,
    })
}

/// Insert a payroll line. UNIQUE(employee_id, period_start) is the
/// idempotency guard: re-generation for the same period fails instead
/// of double-deducting the advance ledger.
pub fn insert(conn: &Connection, rec: &PayrollRecord) -> AppResult<i64> {
    let res = conn.execute(
        "INSERT INTO payroll
         (employee_id, period_start, period_end, gross_pay, overtime_pay,
          cash_advance_deduction, other_deductions, net_pay, status, generated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            rec.employee_id,
            rec.period_start.format("%Y-%m-%d").to_string(),
            rec.period_end.format("%Y-%m-%d").to_string(),
            rec.gross_pay,
            rec.overtime_pay,
            rec.cash_advance_deduction,
            rec.other_deductions,
            rec.net_pay,
            rec.status.to_db_str(),
            rec.generated_at,
        ],
    );

    match res {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == ErrorCode::ConstraintViolation =>
        {
            Err(AppError::Conflict(format!(
                "payroll already generated for employee {} week starting {}",
                rec.employee_id,
                rec.period_start.format("%Y-%m-%d")
            )))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn find(conn: &Connection, id: i64) -> AppResult<PayrollRecord> {
    let mut stmt = conn.prepare_cached("SELECT * FROM payroll WHERE id = ?1")?;
    stmt.query_row([id], map_row)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("payroll record {}", id)))
}

pub fn find_by_period(
    conn: &Connection,
    employee_id: i64,
    period_start: NaiveDate,
) -> AppResult<Option<PayrollRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM payroll WHERE employee_id = ?1 AND period_start = ?2",
    )?;
    let rec = stmt
        .query_row(
            params![employee_id, period_start.format("%Y-%m-%d").to_string()],
            map_row,
        )
        .optional()?;
    Ok(rec)
}

pub fn list(conn: &Connection, employee_id: Option<i64>) -> AppResult<Vec<PayrollRecord>> {
    let mut out = Vec::new();

    match employee_id {
        Some(id) => {
            let mut stmt = conn.prepare_cached(
                "SELECT * FROM payroll WHERE employee_id = ?1
                 ORDER BY period_start DESC",
            )?;
            let rows = stmt.query_map([id], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare_cached(
                "SELECT * FROM payroll ORDER BY period_start DESC, employee_id ASC",
            )?;
            let rows = stmt.query_map([], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}
