use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::archive_record;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Archive { record } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;
    let rec = archive_record(&mut pool, *record)?;

    success(format!(
        "Record {} archived (employee {} on {}); it no longer counts toward payroll",
        rec.id,
        rec.employee_id,
        rec.date_str(),
    ));

    Ok(())
}
