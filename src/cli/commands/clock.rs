use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::{ClockAction, record_time_event};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::date::{parse_date, today};
use crate::utils::money::fmt_peso;
use crate::utils::time::{format_minutes, parse_time};

/// Record one time event; the engine decides in vs out.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Clock {
        employee,
        date,
        time,
    } = cmd
    else {
        return Ok(());
    };

    let d = match date {
        Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
        None => today(),
    };
    let t = match time {
        Some(s) => parse_time(s).ok_or_else(|| AppError::InvalidTime(s.clone()))?,
        None => chrono::Local::now().time(),
    };

    let mut pool = DbPool::new(&cfg.database)?;
    let outcome = record_time_event(&mut pool, cfg, *employee, d, t)?;

    for w in &outcome.warnings {
        warning(w);
    }

    let rec = &outcome.record;
    match outcome.action {
        ClockAction::TimeIn => {
            success(format!(
                "Time-in recorded for employee {} on {} at {}",
                employee,
                rec.date.format("%Y-%m-%d"),
                rec.time_in.format("%H:%M"),
            ));
        }
        ClockAction::TimeOut => {
            success(format!(
                "Time-out recorded for employee {} on {}",
                employee,
                rec.date.format("%Y-%m-%d"),
            ));
            println!("  Day type : {}", rec.day_type.label());
            println!("  Hours    : {}", format_minutes(rec.worked_minutes));
            if rec.overtime_minutes > 0 {
                println!("  Overtime : {}", format_minutes(rec.overtime_minutes));
            }
            println!("  Pay      : {}", fmt_peso(rec.total_pay));
            println!("  Note     : {}", rec.validation_reason);
        }
    }

    Ok(())
}
