//! SQLite connection wrapper (lightweight for CLI usage).
//!
//! Constructed once per invocation and passed by reference into every
//! engine call; there is no ambient global connection.

use rusqlite::{Connection, Result};

use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }
}
