use rusqlite::{Connection, OptionalExtension, Result, params};

/// Current schema version, stored in `kv` under [`SCHEMA_VERSION_KEY`].
pub const SCHEMA_VERSION: i64 = 2;
pub const SCHEMA_VERSION_KEY: &str = "schema.version";

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if the `kv` table has an `updated_at` column (added in version 2).
fn kv_has_updated_at(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('kv')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == "updated_at" {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the key-value table with the current schema.
fn create_kv_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS kv (
            key        TEXT PRIMARY KEY,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT ''
        );
        "#,
    )?;
    Ok(())
}

/// Version 1 stores had no `updated_at` column.
fn migrate_add_updated_at(conn: &Connection) -> Result<()> {
    log::info!("adding 'updated_at' column to kv table");
    conn.execute_batch("ALTER TABLE kv ADD COLUMN updated_at TEXT NOT NULL DEFAULT '';")?;
    Ok(())
}

fn stored_version(conn: &Connection) -> Result<i64> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM kv WHERE key = ?1",
            [SCHEMA_VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;
    Ok(raw.and_then(|v| v.parse().ok()).unwrap_or(0))
}

fn record_version(conn: &Connection, version: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![SCHEMA_VERSION_KEY, version.to_string()],
    )?;
    Ok(())
}

/// Public entry point: run all pending migrations. Safe to call on every open.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "kv")? {
        create_kv_table(conn)?;
        log::debug!("created kv table");
    } else if !kv_has_updated_at(conn)? {
        migrate_add_updated_at(conn)?;
    }

    let from = stored_version(conn)?;
    if from < SCHEMA_VERSION {
        record_version(conn, SCHEMA_VERSION)?;
        log::info!("schema migrated from version {from} to {SCHEMA_VERSION}");
    }

    Ok(())
}
