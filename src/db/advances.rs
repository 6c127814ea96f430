use crate::errors::{AppError, AppResult};
use crate::models::advance::{AdvancePayment, AdvanceStatus, CashAdvance};
use crate::utils::money::round2;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};

/// Maps a row from the joined advance query. Expects a `paid` column
/// with the payment total so the remaining balance is always
/// amount − Σ payments.
fn map_row(row: &Row) -> rusqlite::Result<CashAdvance> {
    let date_str: String = row.get("request_date")?;
    let request_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let status_str: String = row.get("status")?;
    let status = AdvanceStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Validation(format!(
                "Invalid advance status: {}",
                status_str
            ))),
        )
    })?;

    let amount: f64 = row.get("amount")?;
    let paid: f64 = row.get("paid")?;

    Ok(CashAdvance {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        amount,
        purpose: row.get("purpose")?,
        status,
        request_date,
        decided_by: row.get("decided_by")?,
        remaining_balance: round2(amount - paid),
        created_at: row.get("created_at")?,
    })
}

const SELECT_WITH_PAID: &str = "SELECT a.*, COALESCE((
        SELECT SUM(p.amount) FROM advance_payments p WHERE p.advance_id = a.id
    ), 0) AS paid
    FROM cash_advances a";

pub fn insert(
    conn: &Connection,
    employee_id: i64,
    amount: f64,
    purpose: &str,
    request_date: NaiveDate,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO cash_advances (employee_id, amount, purpose, status, request_date, created_at)
         VALUES (?1, ?2, ?3, 'pending', ?4, ?5)",
        params![
            employee_id,
            amount,
            purpose,
            request_date.format("%Y-%m-%d").to_string(),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find(conn: &Connection, id: i64) -> AppResult<CashAdvance> {
    let sql = format!("{} WHERE a.id = ?1", SELECT_WITH_PAID);
    let mut stmt = conn.prepare_cached(&sql)?;
    stmt.query_row([id], map_row)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("cash advance {}", id)))
}

pub fn list_by_employee(conn: &Connection, employee_id: i64) -> AppResult<Vec<CashAdvance>> {
    let sql = format!(
        "{} WHERE a.employee_id = ?1 ORDER BY a.id ASC",
        SELECT_WITH_PAID
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([employee_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Approved advances still carrying a balance, oldest first —
/// repayment order for payroll deductions.
pub fn list_outstanding(conn: &Connection, employee_id: i64) -> AppResult<Vec<CashAdvance>> {
    let all = list_by_employee(conn, employee_id)?;
    Ok(all
        .into_iter()
        .filter(|a| a.status == AdvanceStatus::Approved && a.remaining_balance > 0.0)
        .collect())
}

pub fn update_status(
    conn: &Connection,
    id: i64,
    status: AdvanceStatus,
    decided_by: Option<&str>,
) -> AppResult<()> {
    conn.execute(
        "UPDATE cash_advances SET status = ?1, decided_by = ?2 WHERE id = ?3",
        params![status.to_db_str(), decided_by, id],
    )?;
    Ok(())
}

pub fn insert_payment(
    conn: &Connection,
    advance_id: i64,
    amount: f64,
    payroll_id: i64,
    date: NaiveDate,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO advance_payments (advance_id, amount, payroll_id, date)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            advance_id,
            amount,
            payroll_id,
            date.format("%Y-%m-%d").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_payments(conn: &Connection, advance_id: i64) -> AppResult<Vec<AdvancePayment>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, advance_id, amount, payroll_id, date
         FROM advance_payments WHERE advance_id = ?1 ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([advance_id], |row| {
        let date_str: String = row.get("date")?;
        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(date_str.clone())),
            )
        })?;
        Ok(AdvancePayment {
            id: row.get("id")?,
            advance_id: row.get("advance_id")?,
            amount: row.get("amount")?,
            payroll_id: row.get("payroll_id")?,
            date,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
