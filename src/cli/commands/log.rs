use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::header;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print } = cmd {
        if *print {
            let pool = DbPool::new(&cfg.database)?;
            let entries = load_log(&pool.conn)?;

            header("Audit log");

            for (id, date, operation, target, message) in entries {
                let date = chrono::DateTime::parse_from_rfc3339(&date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(date);

                let op_target = if target.is_empty() {
                    operation
                } else {
                    format!("{} ({})", operation, target)
                };

                println!("{:>4}  {}  {:<32}  {}", id, date, op_target, message);
            }
        }
    }
    Ok(())
}
