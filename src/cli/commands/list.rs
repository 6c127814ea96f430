use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date::{generate_from_period, today};
use crate::utils::money::fmt_peso;
use crate::utils::time::format_minutes;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::List { period } = cmd else {
        return Ok(());
    };

    let dates = match period {
        Some(p) => generate_from_period(p).map_err(AppError::InvalidDate)?,
        None => vec![today()],
    };

    let pool = DbPool::new(&cfg.database)?;
    let records = db::attendance::list_by_dates(&pool.conn, &dates)?;

    for rec in records {
        let time_out = rec
            .time_out
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string());

        println!(
            "{}  emp {:>4}  {} → {}  {:>6}  {:<10}  {:>9}",
            rec.date.format("%Y-%m-%d"),
            rec.employee_id,
            rec.time_in.format("%H:%M"),
            time_out,
            format_minutes(rec.worked_minutes),
            rec.day_type.label(),
            fmt_peso(rec.total_pay),
        );
    }

    Ok(())
}
