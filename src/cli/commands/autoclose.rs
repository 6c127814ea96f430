use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::autoclose::run_auto_close;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use chrono::NaiveDateTime;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Autoclose { now } = cmd else {
        return Ok(());
    };

    let instant = match now {
        Some(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
            .map_err(|_| AppError::InvalidTime(s.clone()))?,
        None => chrono::Local::now().naive_local(),
    };

    let mut pool = DbPool::new(&cfg.database)?;
    let report = run_auto_close(&mut pool, cfg, instant)?;

    success(format!(
        "Auto-close sweep: {} closed, {} skipped, {} flagged for review",
        report.closed,
        report.skipped,
        report.failed.len(),
    ));
    for f in &report.failed {
        warning(format!(
            "record {} (employee {}): {}",
            f.record_id, f.employee_id, f.error
        ));
    }

    Ok(())
}
