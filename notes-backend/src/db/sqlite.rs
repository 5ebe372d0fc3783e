//! SQLite-backed document store for notes.
//!
//! Connections come from an r2d2 pool; every connection is opened with WAL
//! journaling and a busy timeout so concurrent writers queue instead of failing.

use r2d2_sqlite::SqliteConnectionManager;
use std::time::Duration;

use crate::notes::NoteResult;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Open (or create) the database at `database_url` and ensure the schema exists
    pub fn new(database_url: &str, pool_size: u32) -> NoteResult<Self> {
        let manager = SqliteConnectionManager::file(database_url).with_init(|conn| {
            conn.busy_timeout(BUSY_TIMEOUT)?;
            conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON;")
        });

        let pool = r2d2::Pool::builder()
            .max_size(pool_size)
            .build(manager)?;

        let db = Self { pool };
        db.init()?;
        Ok(db)
    }

    /// Check out a pooled connection
    pub fn conn(&self) -> NoteResult<DbConn> {
        Ok(self.pool.get()?)
    }

    fn init(&self) -> NoteResult<()> {
        let conn = self.conn()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS notes (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                text TEXT NOT NULL CHECK (length(text) > 0),
                color TEXT NOT NULL CHECK (length(color) > 0),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        log::info!("[NOTES_DB] Schema ready");
        Ok(())
    }
}
