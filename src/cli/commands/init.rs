use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command: config directory, configuration file,
/// the SQLite database and all pending migrations.
pub fn handle(cli: &Cli) -> AppResult<()> {
    Config::init_all(cli.db.clone(), cli.test)?;

    let db_path = match &cli.db {
        Some(custom) => Config::resolve_db_path(custom),
        None => Config::database_file().to_string_lossy().to_string(),
    };

    let pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;

    if let Err(e) = log::audit(
        &pool.conn,
        "init",
        "database",
        &format!("Database initialized at {}", &db_path),
    ) {
        warning(format!("Failed to write audit log: {}", e));
    }

    success(format!("Database initialized at {}", &db_path));
    Ok(())
}
