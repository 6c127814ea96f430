use crate::cli::parser::{AdvanceAction, Commands};
use crate::config::Config;
use crate::core::advances;
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::today;
use crate::utils::money::fmt_peso;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Advance { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        AdvanceAction::Request {
            employee,
            amount,
            purpose,
        } => {
            let advance =
                advances::request(&mut pool, cfg, *employee, *amount, purpose, today())?;
            success(format!(
                "Advance {} requested: {} for employee {} (pending approval)",
                advance.id,
                fmt_peso(advance.amount),
                employee,
            ));
        }

        AdvanceAction::Approve { id, actor } => {
            let advance = advances::approve(&mut pool, *id, actor)?;
            success(format!(
                "Advance {} approved; outstanding balance {}",
                advance.id,
                fmt_peso(advance.remaining_balance),
            ));
        }

        AdvanceAction::Reject { id, actor } => {
            let advance = advances::reject(&mut pool, *id, actor)?;
            success(format!("Advance {} rejected", advance.id));
        }

        AdvanceAction::Cancel { id } => {
            let advance = advances::cancel(&mut pool, *id)?;
            success(format!("Advance {} cancelled", advance.id));
        }

        AdvanceAction::List { employee } => {
            for a in db::advances::list_by_employee(&pool.conn, *employee)? {
                println!(
                    "{:>4}  {}  {:>9}  remaining {:>9}  {:<9}  {}",
                    a.id,
                    a.request_date.format("%Y-%m-%d"),
                    fmt_peso(a.amount),
                    fmt_peso(a.remaining_balance),
                    a.status.label(),
                    a.purpose,
                );
            }
        }

        AdvanceAction::Balance { employee } => {
            let outstanding = advances::outstanding_balance(&pool.conn, *employee)?;
            println!(
                "Outstanding balance for employee {}: {}",
                employee,
                fmt_peso(outstanding),
            );
        }
    }

    Ok(())
}
