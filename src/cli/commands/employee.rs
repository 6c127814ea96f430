use crate::cli::parser::{Commands, EmployeeAction};
use crate::config::Config;
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date::{parse_date, today};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Employee { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;

    match action {
        EmployeeAction::Add {
            name,
            hire_date,
            advance_limit,
        } => {
            let hire = match hire_date {
                Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
                None => today(),
            };
            let id = db::employees::insert(&pool.conn, name, hire, *advance_limit)?;
            db::log::audit(
                &pool.conn,
                "employee_added",
                &format!("employee {}", id),
                &format!("{} hired {}", name, hire.format("%Y-%m-%d")),
            )?;
            success(format!("Employee {} registered with id {}", name, id));
        }

        EmployeeAction::List => {
            let employees = db::employees::list_all(&pool.conn)?;
            for e in employees {
                let state = if e.active { "active" } else { "inactive" };
                println!(
                    "{:>4}  {:<24}  hired {}  {}",
                    e.id,
                    e.name,
                    e.hire_date.format("%Y-%m-%d"),
                    state,
                );
            }
        }

        EmployeeAction::Deactivate { id } => {
            db::employees::deactivate(&pool.conn, *id)?;
            db::log::audit(
                &pool.conn,
                "employee_deactivated",
                &format!("employee {}", id),
                "deactivated",
            )?;
            success(format!("Employee {} deactivated", id));
        }
    }

    Ok(())
}
