use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{integrity_check, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success};
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        info: show_info,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        if *migrate {
            info("Running migrations…");
            run_pending_migrations(&pool.conn)?;
            success("Migration completed");
        }

        if *check {
            info("Running integrity check…");
            let res = integrity_check(&pool.conn)?;
            if res == "ok" {
                success("Database integrity: ok");
            } else {
                error(format!("Database integrity: {}", res));
            }
        }

        if *show_info {
            print_db_info(&mut pool, &cfg.database)?;
        }
    }
    Ok(())
}

fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("• File: {}", db_path);
    println!("• Size: {:.2} MB", file_mb);

    for (label, table) in [
        ("Employees", "employees"),
        ("Attendance records", "attendance"),
        ("Salary rates", "salary_rates"),
        ("Cash advances", "cash_advances"),
        ("Payroll lines", "payroll"),
    ] {
        let count: i64 =
            pool.conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                    row.get(0)
                })?;
        println!("• {}: {}", label, count);
    }

    Ok(())
}
