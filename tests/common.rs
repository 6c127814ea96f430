#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use std::env;
use std::fs;
use std::path::PathBuf;
use sweldo::db::pool::DbPool;

pub fn swd() -> Command {
    cargo_bin_cmd!("sweldo")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_sweldo.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize the schema through the CLI, test mode (no config file write)
pub fn init_via_cli(db_path: &str) {
    swd()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Open a pool on an initialized database for direct library calls
pub fn open_pool(db_path: &str) -> DbPool {
    let pool = DbPool::new(db_path).expect("open db");
    sweldo::db::initialize::init_db(&pool.conn).expect("init db");
    pool
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

pub fn time(s: &str) -> chrono::NaiveTime {
    chrono::NaiveTime::parse_from_str(s, "%H:%M").expect("valid time")
}

/// Seed one active employee and return its id
pub fn seed_employee(pool: &DbPool, name: &str, hire_date: &str) -> i64 {
    sweldo::db::employees::insert(&pool.conn, name, date(hire_date), None).expect("insert employee")
}
