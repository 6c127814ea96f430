mod common;
use common::{date, open_pool, seed_employee, setup_test_db, time};
use rusqlite::params;
use sweldo::config::Config;
use sweldo::core::backfill::run_backfill;
use sweldo::models::attendance::AttendanceRecord;
use sweldo::models::day_type::DayType;

/// Seed a legacy import: time-out present, never classified.
fn seed_legacy(pool: &sweldo::db::pool::DbPool, emp: i64, day: &str, out: &str) -> i64 {
    let rec = AttendanceRecord::open(emp, date(day), time("08:00"));
    let id = sweldo::db::attendance::insert_open(&pool.conn, &rec).expect("seed");
    pool.conn
        .execute(
            "UPDATE attendance SET time_out = ?1 WHERE id = ?2",
            params![out, id],
        )
        .expect("set time_out");
    id
}

#[test]
fn backfill_classifies_legacy_records_through_the_calculator() {
    let db = setup_test_db("backfill_basic");
    let mut pool = open_pool(&db);
    let cfg = Config::default();
    let emp = seed_employee(&pool, "Maria Santos", "2025-01-06");

    seed_legacy(&pool, emp, "2025-06-02", "17:00");
    seed_legacy(&pool, emp, "2025-06-03", "12:00");

    let report = run_backfill(&mut pool, &cfg).expect("backfill");
    assert_eq!(report.classified, 2);
    assert!(report.failed.is_empty());

    let full = sweldo::db::attendance::find_by_employee_date(&pool.conn, emp, date("2025-06-02"))
        .expect("query")
        .expect("record");
    assert_eq!(full.day_type, DayType::FullDay);
    assert_eq!(full.total_pay, 550.0);

    let half = sweldo::db::attendance::find_by_employee_date(&pool.conn, emp, date("2025-06-03"))
        .expect("query")
        .expect("record");
    assert_eq!(half.day_type, DayType::HalfDay);
    assert_eq!(half.total_pay, 275.0);
}

#[test]
fn backfill_treats_unknown_closes_as_auto_and_grants_no_overtime() {
    let db = setup_test_db("backfill_no_ot");
    let mut pool = open_pool(&db);
    let cfg = Config::default();
    let emp = seed_employee(&pool, "Maria Santos", "2025-01-06");

    // 08:00-19:00 would be overtime on a manual close.
    seed_legacy(&pool, emp, "2025-06-02", "19:00");

    run_backfill(&mut pool, &cfg).expect("backfill");

    let rec = sweldo::db::attendance::find_by_employee_date(&pool.conn, emp, date("2025-06-02"))
        .expect("query")
        .expect("record");
    assert_eq!(rec.day_type, DayType::FullDay);
    assert_eq!(rec.overtime_minutes, 0);
    assert_eq!(rec.total_pay, 550.0);
}

#[test]
fn backfill_is_idempotent() {
    let db = setup_test_db("backfill_idempotent");
    let mut pool = open_pool(&db);
    let cfg = Config::default();
    let emp = seed_employee(&pool, "Maria Santos", "2025-01-06");

    seed_legacy(&pool, emp, "2025-06-02", "17:00");

    run_backfill(&mut pool, &cfg).expect("first");
    let report = run_backfill(&mut pool, &cfg).expect("second");
    assert_eq!(report.classified, 0);
    assert!(report.failed.is_empty());
}
