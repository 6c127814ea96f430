use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date::{parse_date, today};
use crate::utils::money::fmt_peso;
use crate::utils::time::format_minutes;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Status {
        employee,
        date,
        json,
    } = cmd
    else {
        return Ok(());
    };

    let d = match date {
        Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
        None => today(),
    };

    let pool = DbPool::new(&cfg.database)?;
    let rec = db::attendance::find_by_employee_date(&pool.conn, *employee, d)?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "no attendance record for employee {} on {}",
                employee,
                d.format("%Y-%m-%d")
            ))
        })?;

    if *json {
        println!("{}", serde_json::to_string_pretty(&rec).unwrap_or_default());
        return Ok(());
    }

    println!(
        "Employee {} on {}: {}",
        rec.employee_id,
        rec.date.format("%Y-%m-%d"),
        rec.day_type.label(),
    );
    println!("  Time-in  : {}", rec.time_in.format("%H:%M"));
    match rec.time_out {
        Some(t) => println!("  Time-out : {}", t.format("%H:%M")),
        None => println!("  Time-out : (still open)"),
    }
    println!("  Hours    : {}", format_minutes(rec.worked_minutes));
    println!("  Pay      : {}", fmt_peso(rec.total_pay));
    if !rec.validation_reason.is_empty() {
        println!("  Note     : {}", rec.validation_reason);
    }
    if rec.needs_review {
        println!("  ⚠ flagged for manual review");
    }

    Ok(())
}
