use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            username    TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- seq keeps insertion order independent of the entry date
        CREATE TABLE IF NOT EXISTS entries (
            seq           INTEGER PRIMARY KEY AUTOINCREMENT,
            id            TEXT NOT NULL UNIQUE,
            owner         TEXT NOT NULL REFERENCES users(username),
            date          TEXT NOT NULL,
            activity      TEXT NOT NULL,
            category      TEXT NOT NULL,
            co2_amount    REAL NOT NULL,
            quantity      REAL,
            distance      REAL,
            duration      REAL,
            participants  INTEGER,
            location      TEXT,
            weather       TEXT,
            purpose       TEXT,
            efficiency    TEXT,
            notes         TEXT NOT NULL DEFAULT '',
            entry_type    TEXT NOT NULL,
            attributes    TEXT NOT NULL DEFAULT '{}',
            created_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_entries_owner
            ON entries(owner, seq);

        CREATE TABLE IF NOT EXISTS rewards (
            username    TEXT PRIMARY KEY REFERENCES users(username),
            state       TEXT NOT NULL,
            updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
