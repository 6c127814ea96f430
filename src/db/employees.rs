use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};

pub fn map_row(row: &Row) -> rusqlite::Result<Employee> {
    let hire_str: String = row.get("hire_date")?;
    let hire_date = NaiveDate::parse_from_str(&hire_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(hire_str.clone())),
        )
    })?;

    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        hire_date,
        active: row.get::<_, i64>("active")? == 1,
        advance_limit: row.get("advance_limit")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert(
    conn: &Connection,
    name: &str,
    hire_date: NaiveDate,
    advance_limit: Option<f64>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO employees (name, hire_date, active, advance_limit, created_at)
         VALUES (?1, ?2, 1, ?3, ?4)",
        params![
            name,
            hire_date.format("%Y-%m-%d").to_string(),
            advance_limit,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find(conn: &Connection, id: i64) -> AppResult<Employee> {
    let mut stmt = conn.prepare_cached("SELECT * FROM employees WHERE id = ?1")?;
    stmt.query_row([id], map_row)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("employee {}", id)))
}

pub fn list_active(conn: &Connection) -> AppResult<Vec<Employee>> {
    let mut stmt =
        conn.prepare_cached("SELECT * FROM employees WHERE active = 1 ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_all(conn: &Connection) -> AppResult<Vec<Employee>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM employees ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn deactivate(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("UPDATE employees SET active = 0 WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("employee {}", id)));
    }
    Ok(())
}
