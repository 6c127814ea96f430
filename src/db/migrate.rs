//! Schema migration engine. All schema creation and upgrades go
//! through here; nothing else issues CREATE TABLE.

use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};

/// Ensure the audit `log` table exists before anything else; migrations
/// themselves are logged into it.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn ensure_migrations_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn current_version(conn: &Connection) -> AppResult<i64> {
    let v: Option<i64> = conn
        .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
            row.get(0)
        })
        .optional()?
        .flatten();
    Ok(v.unwrap_or(0))
}

fn record_version(conn: &Connection, version: i64) -> AppResult<()> {
    conn.execute(
        "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
        rusqlite::params![version, chrono::Local::now().to_rfc3339()],
    )?;
    Ok(())
}

/// v1: the full engine schema.
///
/// The UNIQUE(employee_id, date) index on attendance is the concurrency
/// story for duplicate time-ins: insert-or-fail, no application lock.
fn migration_v1(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            name          TEXT NOT NULL,
            hire_date     TEXT NOT NULL,
            active        INTEGER NOT NULL DEFAULT 1,
            advance_limit REAL,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS salary_rates (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            daily_rate     REAL NOT NULL,
            hourly_rate    REAL NOT NULL,
            overtime_rate  REAL NOT NULL,
            effective_date TEXT NOT NULL UNIQUE,
            created_by     TEXT NOT NULL,
            reason         TEXT NOT NULL,
            created_at     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS attendance (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id       INTEGER NOT NULL REFERENCES employees(id),
            date              TEXT NOT NULL,
            time_in           TEXT NOT NULL,
            time_out          TEXT,
            day_type          TEXT NOT NULL DEFAULT 'incomplete',
            worked_minutes    INTEGER NOT NULL DEFAULT 0,
            overtime_minutes  INTEGER NOT NULL DEFAULT 0,
            day_salary        REAL NOT NULL DEFAULT 0,
            overtime_pay      REAL NOT NULL DEFAULT 0,
            total_pay         REAL NOT NULL DEFAULT 0,
            is_valid_day      INTEGER NOT NULL DEFAULT 0,
            validation_reason TEXT NOT NULL DEFAULT '',
            closed_by         TEXT,
            needs_review      INTEGER NOT NULL DEFAULT 0,
            archived          INTEGER NOT NULL DEFAULT 0,
            created_at        TEXT NOT NULL,
            UNIQUE(employee_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance(date);
        CREATE INDEX IF NOT EXISTS idx_attendance_open
            ON attendance(date) WHERE time_out IS NULL;

        CREATE TABLE IF NOT EXISTS cash_advances (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id  INTEGER NOT NULL REFERENCES employees(id),
            amount       REAL NOT NULL,
            purpose      TEXT NOT NULL DEFAULT '',
            status       TEXT NOT NULL DEFAULT 'pending'
                         CHECK(status IN ('pending','approved','rejected','cancelled')),
            request_date TEXT NOT NULL,
            decided_by   TEXT,
            created_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS advance_payments (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            advance_id INTEGER NOT NULL REFERENCES cash_advances(id),
            amount     REAL NOT NULL,
            payroll_id INTEGER NOT NULL,
            date       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS payroll (
            id                     INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id            INTEGER NOT NULL REFERENCES employees(id),
            period_start           TEXT NOT NULL,
            period_end             TEXT NOT NULL,
            gross_pay              REAL NOT NULL DEFAULT 0,
            overtime_pay           REAL NOT NULL DEFAULT 0,
            cash_advance_deduction REAL NOT NULL DEFAULT 0,
            other_deductions       REAL NOT NULL DEFAULT 0,
            net_pay                REAL NOT NULL DEFAULT 0,
            status                 TEXT NOT NULL DEFAULT 'draft'
                                   CHECK(status IN ('draft','processed','approved','paid')),
            generated_at           TEXT NOT NULL,
            UNIQUE(employee_id, period_start)
        );
        "#,
    )?;
    Ok(())
}

/// Run all migrations newer than the recorded schema version.
/// Safe to call on every startup; applied versions are skipped.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;
    ensure_migrations_table(conn)?;

    let migrations: &[(i64, fn(&Connection) -> AppResult<()>)] = &[(1, migration_v1)];

    let mut version = current_version(conn)?;

    for (v, f) in migrations {
        if *v <= version {
            continue;
        }
        f(conn).map_err(|e| AppError::Migration(format!("migration v{} failed: {}", v, e)))?;
        record_version(conn, *v)?;
        crate::db::log::audit(
            conn,
            "migration_applied",
            &format!("v{}", v),
            "schema migration applied",
        )?;
        version = *v;
    }

    Ok(())
}

/// Run PRAGMA integrity_check and report the result.
pub fn integrity_check(conn: &Connection) -> AppResult<String> {
    let res: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
    Ok(res)
}
