use crate::cli::parser::{Commands, RateAction};
use crate::config::Config;
use crate::core::rates;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date::{parse_date, today};
use crate::utils::money::fmt_peso;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Rate { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        RateAction::Set {
            daily,
            effective,
            reason,
            actor,
        } => {
            let eff = match effective {
                Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
                None => today(),
            };
            let rate = rates::create_rate(&mut pool, *daily, eff, reason, actor)?;
            success(format!(
                "Rate {} created: daily {} / hourly {} / overtime {} effective {}",
                rate.id,
                fmt_peso(rate.card.daily_rate),
                fmt_peso(rate.card.hourly_rate),
                fmt_peso(rate.card.overtime_rate),
                rate.effective_date.format("%Y-%m-%d"),
            ));
        }

        RateAction::Show { date } => {
            let d = match date {
                Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
                None => today(),
            };
            let card = rates::resolve_rate(&mut pool, d)?;
            println!(
                "Rate for {}: daily {} / hourly {} / overtime {}",
                d.format("%Y-%m-%d"),
                fmt_peso(card.daily_rate),
                fmt_peso(card.hourly_rate),
                fmt_peso(card.overtime_rate),
            );
        }

        RateAction::History => {
            for rate in rates::history(&mut pool)? {
                println!(
                    "{:>4}  effective {}  daily {:>9}  by {}: {}",
                    rate.id,
                    rate.effective_date.format("%Y-%m-%d"),
                    fmt_peso(rate.card.daily_rate),
                    rate.created_by,
                    rate.reason,
                );
            }
        }
    }

    Ok(())
}
