use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Engine configuration: database location plus the attendance policy
/// knobs. All clock-hour values are Manila wall-clock, matching how
/// times are stored.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,

    /// Time-ins at or after this hour are rejected outright.
    #[serde(default = "default_time_in_cutoff")]
    pub time_in_cutoff_hour: u32,

    /// Manual time-outs are accepted in [start, end).
    #[serde(default = "default_time_out_open")]
    pub time_out_window_start: u32,
    #[serde(default = "default_time_out_close")]
    pub time_out_window_end: u32,

    /// The sweep closes any still-open shift at this hour.
    #[serde(default = "default_auto_close")]
    pub auto_close_hour: u32,

    /// Overtime requires a manual clock-out at or after this hour.
    #[serde(default = "default_overtime_hour")]
    pub overtime_after_hour: u32,

    /// Unpaid lunch window excluded from worked time, [start, end).
    #[serde(default = "default_lunch_start")]
    pub lunch_start_hour: u32,
    #[serde(default = "default_lunch_end")]
    pub lunch_end_hour: u32,

    /// Cap on combined outstanding advances for employees without a
    /// per-employee limit.
    #[serde(default = "default_advance_limit")]
    pub default_advance_limit: f64,

    /// Maximum advance repayment deducted in one payroll run.
    /// None deducts the full outstanding balance.
    #[serde(default)]
    pub advance_deduction_cap: Option<f64>,
}

fn default_time_in_cutoff() -> u32 {
    16
}
fn default_time_out_open() -> u32 {
    16
}
fn default_time_out_close() -> u32 {
    18
}
fn default_auto_close() -> u32 {
    20
}
fn default_overtime_hour() -> u32 {
    17
}
fn default_lunch_start() -> u32 {
    12
}
fn default_lunch_end() -> u32 {
    13
}
fn default_advance_limit() -> f64 {
    5000.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            time_in_cutoff_hour: default_time_in_cutoff(),
            time_out_window_start: default_time_out_open(),
            time_out_window_end: default_time_out_close(),
            auto_close_hour: default_auto_close(),
            overtime_after_hour: default_overtime_hour(),
            lunch_start_hour: default_lunch_start(),
            lunch_end_hour: default_lunch_end(),
            default_advance_limit: default_advance_limit(),
            advance_deduction_cap: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("sweldo")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".sweldo")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("sweldo.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("sweldo.sqlite")
    }

    /// Resolve a user-supplied database path the same way `init_all`
    /// does: `~/` expanded, absolute paths as-is, relative ones under
    /// the config dir.
    pub fn resolve_db_path(name: &str) -> String {
        if name.starts_with("~/")
            && let Some(home) = dirs::home_dir()
        {
            return home
                .join(name.trim_start_matches("~/"))
                .to_string_lossy()
                .to_string();
        }
        let p = std::path::Path::new(name);
        if p.is_absolute() {
            name.to_string()
        } else {
            Self::config_dir().join(p).to_string_lossy().to_string()
        }
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
                Err(_) => Config::default(),
            }
        } else {
            Config::default()
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> io::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => std::path::PathBuf::from(Self::resolve_db_path(&name)),
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(())
    }

    /// Effective advance limit for one employee.
    pub fn advance_limit_for(&self, per_employee: Option<f64>) -> f64 {
        per_employee.unwrap_or(self.default_advance_limit)
    }
}
