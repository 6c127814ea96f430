use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_via_cli, setup_test_db, swd};

#[test]
fn init_creates_a_working_database() {
    let db = setup_test_db("cli_init");

    swd()
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    swd()
        .args(["--db", &db, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("integrity: ok"));
}

#[test]
fn employee_roster_round_trip() {
    let db = setup_test_db("cli_roster");
    init_via_cli(&db);

    swd()
        .args(["--db", &db, "employee", "add", "Maria Santos", "--hire-date", "2025-01-06"])
        .assert()
        .success();
    swd()
        .args(["--db", &db, "employee", "add", "Jose Cruz", "--hire-date", "2025-02-03"])
        .assert()
        .success();

    swd()
        .args(["--db", &db, "employee", "list"])
        .assert()
        .success()
        .stdout(contains("Maria Santos").and(contains("Jose Cruz")));

    swd()
        .args(["--db", &db, "employee", "deactivate", "2"])
        .assert()
        .success();

    swd()
        .args(["--db", &db, "employee", "list"])
        .assert()
        .success()
        .stdout(contains("inactive"));
}

#[test]
fn rate_commands_show_the_derived_amounts() {
    let db = setup_test_db("cli_rates");
    init_via_cli(&db);

    swd()
        .args([
            "--db", &db, "rate", "set", "600", "--effective", "2025-06-02",
            "--reason", "annual adjustment",
        ])
        .assert()
        .success()
        .stdout(contains("daily 600.00").and(contains("hourly 75.00")).and(contains("overtime 93.75")));

    swd()
        .args(["--db", &db, "rate", "show", "--date", "2025-06-04"])
        .assert()
        .success()
        .stdout(contains("daily 600.00"));

    // Before any rate was effective, the built-in default applies.
    swd()
        .args(["--db", &db, "rate", "show", "--date", "2025-05-01"])
        .assert()
        .success()
        .stdout(contains("daily 550.00"));

    swd()
        .args(["--db", &db, "rate", "history"])
        .assert()
        .success()
        .stdout(contains("annual adjustment"));
}

#[test]
fn rate_set_without_a_real_reason_fails() {
    let db = setup_test_db("cli_rate_reason");
    init_via_cli(&db);

    swd()
        .args(["--db", &db, "rate", "set", "600", "--effective", "2025-06-02", "--reason", "up"])
        .assert()
        .failure()
        .stderr(contains("reason"));
}

#[test]
fn status_emits_json_when_asked() {
    let db = setup_test_db("cli_status_json");
    init_via_cli(&db);

    swd()
        .args(["--db", &db, "employee", "add", "Maria Santos", "--hire-date", "2025-01-06"])
        .assert()
        .success();
    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "08:00"])
        .assert()
        .success();
    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "17:00"])
        .assert()
        .success();

    swd()
        .args(["--db", &db, "status", "1", "--date", "2025-06-02", "--json"])
        .assert()
        .success()
        .stdout(contains("\"day_type\": \"FullDay\"").and(contains("\"total_pay\": 550.0")));
}

#[test]
fn status_for_a_missing_day_is_not_found() {
    let db = setup_test_db("cli_status_missing");
    init_via_cli(&db);

    swd()
        .args(["--db", &db, "employee", "add", "Maria Santos", "--hire-date", "2025-01-06"])
        .assert()
        .success();

    swd()
        .args(["--db", &db, "status", "1", "--date", "2025-06-02"])
        .assert()
        .failure()
        .stderr(contains("no attendance record"));
}

#[test]
fn list_filters_by_period() {
    let db = setup_test_db("cli_list");
    init_via_cli(&db);

    swd()
        .args(["--db", &db, "employee", "add", "Maria Santos", "--hire-date", "2025-01-06"])
        .assert()
        .success();
    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "08:00"])
        .assert()
        .success();
    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-07-01", "--time", "08:00"])
        .assert()
        .success();

    swd()
        .args(["--db", &db, "list", "--period", "2025-06"])
        .assert()
        .success()
        .stdout(contains("2025-06-02").and(contains("2025-07-01").not()));
}

#[test]
fn payroll_generation_via_the_cli() {
    let db = setup_test_db("cli_payroll");
    init_via_cli(&db);

    swd()
        .args(["--db", &db, "employee", "add", "Maria Santos", "--hire-date", "2025-01-06"])
        .assert()
        .success();
    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "08:00"])
        .assert()
        .success();
    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "17:00"])
        .assert()
        .success();

    swd()
        .args([
            "--db", &db, "payroll", "generate", "--employee", "1",
            "--week-ending", "2025-06-07",
        ])
        .assert()
        .success()
        .stdout(contains("Gross pay         : 550.00").and(contains("Net pay           : 550.00")));

    swd()
        .args(["--db", &db, "payroll", "list"])
        .assert()
        .success()
        .stdout(contains("2025-06-02"));

    swd()
        .args(["--db", &db, "payroll", "show", "1", "--json"])
        .assert()
        .success()
        .stdout(contains("\"gross_pay\": 550.0"));

    // A mid-week date is not a valid week ending.
    swd()
        .args([
            "--db", &db, "payroll", "generate", "--employee", "1",
            "--week-ending", "2025-06-04",
        ])
        .assert()
        .failure()
        .stderr(contains("not a Saturday"));
}

#[test]
fn archiving_a_record_removes_it_from_payroll() {
    let db = setup_test_db("cli_archive");
    init_via_cli(&db);

    swd()
        .args(["--db", &db, "employee", "add", "Maria Santos", "--hire-date", "2025-01-06"])
        .assert()
        .success();
    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "08:00"])
        .assert()
        .success();
    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "17:00"])
        .assert()
        .success();

    swd()
        .args(["--db", &db, "archive", "1"])
        .assert()
        .success()
        .stdout(contains("Record 1 archived"));

    swd()
        .args(["--db", &db, "archive", "1"])
        .assert()
        .failure()
        .stderr(contains("already archived"));

    swd()
        .args([
            "--db", &db, "payroll", "generate", "--employee", "1",
            "--week-ending", "2025-06-07",
        ])
        .assert()
        .success()
        .stdout(contains("Gross pay         : 0.00"));
}

#[test]
fn the_audit_log_records_engine_operations() {
    let db = setup_test_db("cli_log");
    init_via_cli(&db);

    swd()
        .args(["--db", &db, "employee", "add", "Maria Santos", "--hire-date", "2025-01-06"])
        .assert()
        .success();
    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "08:00"])
        .assert()
        .success();

    swd()
        .args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("employee_added").and(contains("time_in")));
}

#[test]
fn db_info_reports_table_counts() {
    let db = setup_test_db("cli_db_info");
    init_via_cli(&db);

    swd()
        .args(["--db", &db, "employee", "add", "Maria Santos", "--hire-date", "2025-01-06"])
        .assert()
        .success();

    swd()
        .args(["--db", &db, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Employees: 1"));
}

#[test]
fn autoclose_and_backfill_run_from_the_cli() {
    let db = setup_test_db("cli_sweeps");
    init_via_cli(&db);

    swd()
        .args(["--db", &db, "employee", "add", "Maria Santos", "--hire-date", "2025-01-06"])
        .assert()
        .success();
    swd()
        .args(["--db", &db, "clock", "1", "--date", "2025-06-02", "--time", "14:00"])
        .assert()
        .success();

    swd()
        .args(["--db", &db, "autoclose", "--now", "2025-06-02 20:30"])
        .assert()
        .success()
        .stdout(contains("1 closed"));

    swd()
        .args(["--db", &db, "backfill"])
        .assert()
        .success()
        .stdout(contains("0 record(s) classified"));
}
