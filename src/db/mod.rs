pub mod kv;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod session_store;

use crate::errors::AppResult;
use rusqlite::Connection;

pub use kv::{KvStore, MemoryStore, NullStore, SqliteStore};
pub use session_store::SessionStore;

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    migrate::run_pending_migrations(conn)?;
    Ok(())
}
