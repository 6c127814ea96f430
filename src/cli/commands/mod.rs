pub mod advance;
pub mod archive;
pub mod autoclose;
pub mod backfill;
pub mod clock;
pub mod config;
pub mod db;
pub mod employee;
pub mod init;
pub mod list;
pub mod log;
pub mod payroll;
pub mod rate;
pub mod status;
