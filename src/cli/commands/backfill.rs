use crate::config::Config;
use crate::core::backfill::run_backfill;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;
    let report = run_backfill(&mut pool, cfg)?;

    success(format!(
        "Backfill: {} record(s) classified, {} flagged for review",
        report.classified,
        report.failed.len(),
    ));
    for (id, err) in &report.failed {
        warning(format!("record {}: {}", id, err));
    }

    Ok(())
}
