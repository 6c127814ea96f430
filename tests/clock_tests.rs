use predicates::str::contains;

mod common;
use common::{init_via_cli, setup_test_db, swd};

fn add_employee(db: &str) {
    swd()
        .args([
            "--db",
            db,
            "employee",
            "add",
            "Maria Santos",
            "--hire-date",
            "2025-01-06",
        ])
        .assert()
        .success()
        .stdout(contains("registered with id 1"));
}

#[test]
fn time_in_opens_a_record() {
    let db = setup_test_db("clock_time_in");
    init_via_cli(&db);
    add_employee(&db);

    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "08:00"])
        .assert()
        .success()
        .stdout(contains("Time-in recorded"));
}

#[test]
fn a_second_morning_tap_is_rejected_and_keeps_the_first_record() {
    let db = setup_test_db("clock_duplicate");
    init_via_cli(&db);
    add_employee(&db);

    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "08:00"])
        .assert()
        .success();

    // With the record open the engine reads this as a time-out attempt,
    // which fails the window check; nothing is overwritten.
    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "08:05"])
        .assert()
        .failure()
        .stderr(contains("manual time-out is only accepted"));

    swd()
        .args(["--db", &db, "status", "1", "--date", "2025-06-02"])
        .assert()
        .success()
        .stdout(contains("Time-in  : 08:00"));
}

#[test]
fn sunday_time_in_is_rejected() {
    let db = setup_test_db("clock_sunday");
    init_via_cli(&db);
    add_employee(&db);

    // 2025-06-01 is a Sunday.
    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-01", "--time", "08:00"])
        .assert()
        .failure()
        .stderr(contains("Sunday"));
}

#[test]
fn time_in_past_the_cutoff_is_rejected() {
    let db = setup_test_db("clock_cutoff");
    init_via_cli(&db);
    add_employee(&db);

    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "16:00"])
        .assert()
        .failure()
        .stderr(contains("cutoff"));
}

#[test]
fn time_in_before_hire_date_is_rejected() {
    let db = setup_test_db("clock_hire_window");
    init_via_cli(&db);
    add_employee(&db);

    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-01-03", "--time", "08:00"])
        .assert()
        .failure()
        .stderr(contains("before hire date"));
}

#[test]
fn time_out_outside_the_window_is_rejected() {
    let db = setup_test_db("clock_out_window");
    init_via_cli(&db);
    add_employee(&db);

    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "08:00"])
        .assert()
        .success();

    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "15:00"])
        .assert()
        .failure()
        .stderr(contains("manual time-out is only accepted"));
}

#[test]
fn full_day_clock_cycle_reports_the_pay() {
    let db = setup_test_db("clock_full_day");
    init_via_cli(&db);
    add_employee(&db);

    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "08:00"])
        .assert()
        .success();

    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "17:00"])
        .assert()
        .success()
        .stdout(contains("Time-out recorded"))
        .stdout(contains("Full Day"))
        .stdout(contains("550.00"));
}

#[test]
fn overtime_clock_cycle_reports_the_breakdown() {
    let db = setup_test_db("clock_overtime");
    init_via_cli(&db);
    add_employee(&db);

    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "08:00"])
        .assert()
        .success();

    // 08:00-17:30 less lunch = 8.5h worked; 30 min beyond the 8h mark.
    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "17:30"])
        .assert()
        .success()
        .stdout(contains("Overtime"))
        .stdout(contains("592.97"));
}

#[test]
fn events_on_a_classified_day_are_rejected() {
    let db = setup_test_db("clock_terminal");
    init_via_cli(&db);
    add_employee(&db);

    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "08:00"])
        .assert()
        .success();
    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "17:00"])
        .assert()
        .success();

    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "17:10"])
        .assert()
        .failure()
        .stderr(contains("already completed"));
}

#[test]
fn inactive_employee_cannot_clock_in() {
    let db = setup_test_db("clock_inactive");
    init_via_cli(&db);
    add_employee(&db);

    swd()
        .args(["--db", &db, "employee", "deactivate", "1"])
        .assert()
        .success();

    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "08:00"])
        .assert()
        .failure()
        .stderr(contains("not active"));
}
