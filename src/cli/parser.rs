use clap::{Parser, Subcommand};

/// Command-line interface definition for sweldo
/// Attendance classification and payroll calculation over SQLite
#[derive(Parser)]
#[command(
    name = "sweldo",
    version = env!("CARGO_PKG_VERSION"),
    about = "Employee attendance and payroll engine: classify shifts, version salary rates, settle cash advances",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the audit log table
    Log {
        #[arg(long = "print", help = "Print rows from the audit log table")]
        print: bool,
    },

    /// Manage the employee roster
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Record a time event for an employee; the engine decides
    /// time-in vs time-out from the day's current state
    Clock {
        /// Employee id (verified upstream by the biometric device)
        employee: i64,

        /// Date of the event (YYYY-MM-DD, default today)
        #[arg(long = "date")]
        date: Option<String>,

        /// Time of the event (HH:MM, default now)
        #[arg(long = "time")]
        time: Option<String>,
    },

    /// Show an employee's attendance record for a day
    Status {
        employee: i64,

        #[arg(long = "date", help = "Date to show (default today)")]
        date: Option<String>,

        #[arg(long = "json", help = "Emit the record as JSON")]
        json: bool,
    },

    /// List attendance records
    List {
        #[arg(long, short, help = "Filter by day (YYYY-MM-DD), month (YYYY-MM) or year")]
        period: Option<String>,
    },

    /// Archive an attendance record (kept for audit, excluded from payroll)
    Archive {
        /// Attendance record id
        record: i64,
    },

    /// Manage the salary rate registry
    Rate {
        #[command(subcommand)]
        action: RateAction,
    },

    /// Manage the cash advance ledger
    Advance {
        #[command(subcommand)]
        action: AdvanceAction,
    },

    /// Generate and inspect payroll lines
    Payroll {
        #[command(subcommand)]
        action: PayrollAction,
    },

    /// Close all shifts still open past the cutoff (scheduler entry point)
    Autoclose {
        #[arg(
            long = "now",
            help = "Sweep reference instant \"YYYY-MM-DD HH:MM\" (default now)"
        )]
        now: Option<String>,
    },

    /// One-time classification of imported records without pay fields
    Backfill,
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    /// Register a new employee
    Add {
        name: String,

        #[arg(long = "hire-date", help = "Hire date (YYYY-MM-DD, default today)")]
        hire_date: Option<String>,

        #[arg(long = "advance-limit", help = "Per-employee cash advance limit")]
        advance_limit: Option<f64>,
    },

    /// List employees
    List,

    /// Deactivate an employee (kept for history, excluded from payroll)
    Deactivate { id: i64 },
}

#[derive(Subcommand)]
pub enum RateAction {
    /// Create a new rate version (hourly and overtime rates are derived)
    Set {
        /// Daily rate in pesos
        daily: f64,

        #[arg(long = "effective", help = "Effective date (YYYY-MM-DD, default today)")]
        effective: Option<String>,

        #[arg(long = "reason", help = "Why the rate changed (required, audited)")]
        reason: String,

        #[arg(long = "actor", default_value = "admin")]
        actor: String,
    },

    /// Show the rate in effect for a date
    Show {
        #[arg(long = "date", help = "Date to resolve (default today)")]
        date: Option<String>,
    },

    /// Print every rate version ever created
    History,
}

#[derive(Subcommand)]
pub enum AdvanceAction {
    /// Request a cash advance
    Request {
        employee: i64,
        amount: f64,

        #[arg(long = "purpose", default_value = "")]
        purpose: String,
    },

    /// Approve a pending advance
    Approve {
        id: i64,

        #[arg(long = "actor", default_value = "admin")]
        actor: String,
    },

    /// Reject a pending advance
    Reject {
        id: i64,

        #[arg(long = "actor", default_value = "admin")]
        actor: String,
    },

    /// Cancel a pending advance
    Cancel { id: i64 },

    /// List an employee's advances
    List { employee: i64 },

    /// Show an employee's outstanding balance
    Balance { employee: i64 },
}

#[derive(Subcommand)]
pub enum PayrollAction {
    /// Generate payroll for one week (Monday–Saturday)
    Generate {
        #[arg(long = "employee", help = "Generate for one employee")]
        employee: Option<i64>,

        #[arg(long = "all", help = "Generate for every active employee")]
        all: bool,

        #[arg(long = "week-ending", help = "Saturday closing the period (YYYY-MM-DD)")]
        week_ending: String,

        #[arg(long = "deduct", default_value_t = 0.0, help = "Other deductions")]
        deduct: f64,
    },

    /// List payroll records
    List {
        #[arg(long = "employee")]
        employee: Option<i64>,
    },

    /// Show one payroll record
    Show {
        id: i64,

        #[arg(long = "json", help = "Emit the record as JSON")]
        json: bool,
    },
}
