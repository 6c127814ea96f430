use crate::cli::parser::{Commands, PayrollAction};
use crate::config::Config;
use crate::core::calendar;
use crate::core::payroll;
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::payroll::PayrollRecord;
use crate::ui::messages::{success, warning};
use crate::utils::date::parse_date;
use crate::utils::money::fmt_peso;
use chrono::{Datelike, Weekday};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Payroll { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        PayrollAction::Generate {
            employee,
            all,
            week_ending,
            deduct,
        } => {
            let saturday = parse_date(week_ending)
                .ok_or_else(|| AppError::InvalidDate(week_ending.clone()))?;
            if saturday.weekday() != Weekday::Sat {
                return Err(AppError::Validation(format!(
                    "week ending {} is not a Saturday",
                    saturday.format("%Y-%m-%d"),
                )));
            }
            let (monday, saturday) = calendar::week_bounds(saturday);

            match (employee, all) {
                (Some(id), false) => {
                    let rec = payroll::generate_for_period(
                        &mut pool, cfg, *id, monday, saturday, *deduct,
                    )?;
                    print_record(&rec);
                }
                (None, true) => {
                    let batch = payroll::generate_for_all(&mut pool, cfg, monday, saturday)?;
                    for rec in &batch.generated {
                        print_record(rec);
                    }
                    success(format!("{} payroll line(s) generated", batch.generated.len()));
                    for f in &batch.failures {
                        warning(format!("employee {}: {}", f.employee_id, f.error));
                    }
                }
                _ => {
                    return Err(AppError::Validation(
                        "pass exactly one of --employee or --all".to_string(),
                    ));
                }
            }
        }

        PayrollAction::List { employee } => {
            for rec in db::payroll::list(&pool.conn, *employee)? {
                println!(
                    "{:>4}  emp {:>4}  {} to {}  gross {:>9}  net {:>9}",
                    rec.id,
                    rec.employee_id,
                    rec.period_start.format("%Y-%m-%d"),
                    rec.period_end.format("%Y-%m-%d"),
                    fmt_peso(rec.gross_pay),
                    fmt_peso(rec.net_pay),
                );
            }
        }

        PayrollAction::Show { id, json } => {
            let rec = db::payroll::find(&pool.conn, *id)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&rec).unwrap_or_default());
            } else {
                print_record(&rec);
            }
        }
    }

    Ok(())
}

fn print_record(rec: &PayrollRecord) {
    println!(
        "Payroll {}: employee {}, week {} to {}",
        rec.id,
        rec.employee_id,
        rec.period_start.format("%Y-%m-%d"),
        rec.period_end.format("%Y-%m-%d"),
    );
    println!("  Gross pay         : {}", fmt_peso(rec.gross_pay));
    println!("  of which overtime : {}", fmt_peso(rec.overtime_pay));
    println!(
        "  Advance deduction : {}",
        fmt_peso(rec.cash_advance_deduction)
    );
    println!("  Other deductions  : {}", fmt_peso(rec.other_deductions));
    println!("  Net pay           : {}", fmt_peso(rec.net_pay));
}
