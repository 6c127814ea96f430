mod common;
use common::{date, open_pool, seed_employee, setup_test_db, time};
use chrono::NaiveDateTime;
use sweldo::config::Config;
use sweldo::core::{advances, autoclose, clock, payroll};
use sweldo::errors::AppError;

fn sweep_at(pool: &mut sweldo::db::pool::DbPool, cfg: &Config, s: &str) {
    let now = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").expect("valid instant");
    autoclose::run_auto_close(pool, cfg, now).expect("sweep");
}

/// Mon-Fri full days at the default rate plus a Saturday afternoon
/// shift closed by the sweep.
fn seed_week(pool: &mut sweldo::db::pool::DbPool, cfg: &Config, emp: i64) {
    for day in ["2025-06-02", "2025-06-03", "2025-06-04", "2025-06-05", "2025-06-06"] {
        clock::record_time_event(pool, cfg, emp, date(day), time("08:00")).expect("in");
        clock::record_time_event(pool, cfg, emp, date(day), time("17:00")).expect("out");
    }
    clock::record_time_event(pool, cfg, emp, date("2025-06-07"), time("14:00")).expect("sat in");
    sweep_at(pool, cfg, "2025-06-07 20:30");
}

#[test]
fn weekly_generation_sums_classified_days_and_deducts_advances() {
    let db = setup_test_db("payroll_week");
    let mut pool = open_pool(&db);
    let cfg = Config::default();
    let emp = seed_employee(&pool, "Maria Santos", "2025-01-06");

    seed_week(&mut pool, &cfg, emp);

    let adv = advances::request(&mut pool, &cfg, emp, 1000.0, "tuition", date("2025-06-02"))
        .expect("request");
    advances::approve(&mut pool, adv.id, "admin").expect("approve");

    let rec = payroll::generate_for_period(
        &mut pool,
        &cfg,
        emp,
        date("2025-06-02"),
        date("2025-06-07"),
        0.0,
    )
    .expect("generate");

    // 5 x 550 full days + 412.50 for the swept Saturday half day
    assert_eq!(rec.gross_pay, 3162.50);
    assert_eq!(rec.overtime_pay, 0.0);
    assert_eq!(rec.cash_advance_deduction, 1000.0);
    assert_eq!(rec.net_pay, 2162.50);

    assert_eq!(
        advances::outstanding_balance(&pool.conn, emp).expect("balance"),
        0.0
    );
}

#[test]
fn regeneration_for_the_same_period_fails_without_double_deducting() {
    let db = setup_test_db("payroll_idempotent");
    let mut pool = open_pool(&db);
    let cfg = Config::default();
    let emp = seed_employee(&pool, "Maria Santos", "2025-01-06");

    seed_week(&mut pool, &cfg, emp);

    let adv = advances::request(&mut pool, &cfg, emp, 500.0, "tuition", date("2025-06-02"))
        .expect("request");
    advances::approve(&mut pool, adv.id, "admin").expect("approve");

    payroll::generate_for_period(&mut pool, &cfg, emp, date("2025-06-02"), date("2025-06-07"), 0.0)
        .expect("first run");

    let second = payroll::generate_for_period(
        &mut pool,
        &cfg,
        emp,
        date("2025-06-02"),
        date("2025-06-07"),
        0.0,
    );
    assert!(matches!(second, Err(AppError::Conflict(_))));

    // Exactly one payment was ever posted.
    let payments = sweldo::db::advances::list_payments(&pool.conn, adv.id).expect("payments");
    assert_eq!(payments.len(), 1);
    assert_eq!(
        advances::outstanding_balance(&pool.conn, emp).expect("balance"),
        0.0
    );
}

#[test]
fn an_archived_day_is_excluded_from_aggregation() {
    let db = setup_test_db("payroll_archived");
    let mut pool = open_pool(&db);
    let cfg = Config::default();
    let emp = seed_employee(&pool, "Maria Santos", "2025-01-06");

    // Two full days, then archive the first one.
    for day in ["2025-06-02", "2025-06-03"] {
        clock::record_time_event(&mut pool, &cfg, emp, date(day), time("08:00")).expect("in");
        clock::record_time_event(&mut pool, &cfg, emp, date(day), time("17:00")).expect("out");
    }
    let monday = sweldo::db::attendance::find_by_employee_date(&pool.conn, emp, date("2025-06-02"))
        .expect("lookup")
        .expect("monday record");
    let archived = clock::archive_record(&mut pool, monday.id).expect("archive");
    assert!(archived.archived);

    let rec = payroll::generate_for_period(
        &mut pool,
        &cfg,
        emp,
        date("2025-06-02"),
        date("2025-06-07"),
        0.0,
    )
    .expect("generate");

    // Only the Tuesday shift counts.
    assert_eq!(rec.gross_pay, 550.0);

    // Archiving twice is rejected, the row is kept for audit.
    let again = clock::archive_record(&mut pool, monday.id);
    assert!(matches!(again, Err(AppError::Policy(_))));
}

#[test]
fn the_deduction_cap_limits_one_run() {
    let db = setup_test_db("payroll_cap");
    let mut pool = open_pool(&db);
    let mut cfg = Config::default();
    cfg.advance_deduction_cap = Some(400.0);
    let emp = seed_employee(&pool, "Maria Santos", "2025-01-06");

    seed_week(&mut pool, &cfg, emp);

    let adv = advances::request(&mut pool, &cfg, emp, 1000.0, "tuition", date("2025-06-02"))
        .expect("request");
    advances::approve(&mut pool, adv.id, "admin").expect("approve");

    let rec = payroll::generate_for_period(
        &mut pool,
        &cfg,
        emp,
        date("2025-06-02"),
        date("2025-06-07"),
        0.0,
    )
    .expect("generate");

    assert_eq!(rec.cash_advance_deduction, 400.0);
    assert_eq!(
        advances::outstanding_balance(&pool.conn, emp).expect("balance"),
        600.0
    );
}

#[test]
fn other_deductions_can_push_net_pay_negative() {
    let db = setup_test_db("payroll_negative_net");
    let mut pool = open_pool(&db);
    let cfg = Config::default();
    let emp = seed_employee(&pool, "Maria Santos", "2025-01-06");

    // Only one half day this week.
    clock::record_time_event(&mut pool, &cfg, emp, date("2025-06-02"), time("08:00")).expect("in");
    clock::record_time_event(&mut pool, &cfg, emp, date("2025-06-02"), time("16:00")).expect("out");

    let rec = payroll::generate_for_period(
        &mut pool,
        &cfg,
        emp,
        date("2025-06-02"),
        date("2025-06-07"),
        600.0,
    )
    .expect("generate");

    // 08:00-16:00 less lunch is 7h: a full day at 550.
    assert_eq!(rec.gross_pay, 550.0);
    assert_eq!(rec.net_pay, -50.0);
}

#[test]
fn a_pay_period_must_be_one_monday_to_saturday_week() {
    let db = setup_test_db("payroll_period_shape");
    let mut pool = open_pool(&db);
    let cfg = Config::default();
    let emp = seed_employee(&pool, "Maria Santos", "2025-01-06");

    // Tuesday start
    let res = payroll::generate_for_period(
        &mut pool,
        &cfg,
        emp,
        date("2025-06-03"),
        date("2025-06-07"),
        0.0,
    );
    assert!(matches!(res, Err(AppError::Validation(_))));

    // Two-week span
    let res = payroll::generate_for_period(
        &mut pool,
        &cfg,
        emp,
        date("2025-06-02"),
        date("2025-06-14"),
        0.0,
    );
    assert!(matches!(res, Err(AppError::Validation(_))));
}

#[test]
fn the_weekly_run_rejects_a_non_saturday_week_ending() {
    let db = setup_test_db("payroll_week_ending");
    let mut pool = open_pool(&db);
    let cfg = Config::default();

    let res = payroll::run_weekly_payroll(&mut pool, &cfg, date("2025-06-06"));
    assert!(matches!(res, Err(AppError::Validation(_))));
}

#[test]
fn batch_generation_covers_every_active_employee() {
    let db = setup_test_db("payroll_batch");
    let mut pool = open_pool(&db);
    let cfg = Config::default();
    let emp_a = seed_employee(&pool, "Maria Santos", "2025-01-06");
    let emp_b = seed_employee(&pool, "Jose Cruz", "2025-01-06");

    clock::record_time_event(&mut pool, &cfg, emp_a, date("2025-06-02"), time("08:00"))
        .expect("in");
    clock::record_time_event(&mut pool, &cfg, emp_a, date("2025-06-02"), time("17:00"))
        .expect("out");

    let batch = payroll::run_weekly_payroll(&mut pool, &cfg, date("2025-06-07")).expect("batch");
    assert_eq!(batch.generated.len(), 2);
    assert!(batch.failures.is_empty());

    let a = batch.generated.iter().find(|r| r.employee_id == emp_a).expect("a");
    let b = batch.generated.iter().find(|r| r.employee_id == emp_b).expect("b");
    assert_eq!(a.gross_pay, 550.0);
    assert_eq!(b.gross_pay, 0.0);
}
