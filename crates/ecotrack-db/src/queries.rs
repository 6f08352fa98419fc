use crate::Database;
use crate::models::{EntryRow, UserRow};
use anyhow::{Context, Result};
use ecotrack_core::leaderboard::UserTotals;
use ecotrack_types::models::{Entry, RewardsState};
use rusqlite::Connection;
use tracing::warn;
use uuid::Uuid;

impl Database {
    // -- Users --

    /// Returns false when the username is already taken.
    pub fn create_user(&self, id: &str, username: &str, password_hash: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT INTO users (id, username, password) VALUES (?1, ?2, ?3)",
                (id, username, password_hash),
            );
            match inserted {
                Ok(_) => Ok(true),
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
                {
                    Ok(false)
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    /// Entry totals for every registered user, including users with no
    /// entries (count 0).
    pub fn user_totals(&self) -> Result<Vec<UserTotals>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT u.username, COALESCE(SUM(e.co2_amount), 0.0), COUNT(e.id)
                 FROM users u
                 LEFT JOIN entries e ON e.owner = u.username
                 GROUP BY u.username",
            )?;

            let rows = stmt
                .query_map([], |row| {
                    Ok(UserTotals {
                        username: row.get(0)?,
                        total_co2: row.get(1)?,
                        entry_count: row.get::<_, i64>(2)?.max(0) as u64,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    // -- Entries --

    pub fn add_entry(&self, entry: &Entry) -> Result<()> {
        let row = EntryRow::from_entry(entry)?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO entries (
                    id, owner, date, activity, category, co2_amount, quantity, distance,
                    duration, participants, location, weather, purpose, efficiency, notes,
                    entry_type, attributes, created_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
                rusqlite::params![
                    row.id,
                    row.owner,
                    row.date,
                    row.activity,
                    row.category,
                    row.co2_amount,
                    row.quantity,
                    row.distance,
                    row.duration,
                    row.participants,
                    row.location,
                    row.weather,
                    row.purpose,
                    row.efficiency,
                    row.notes,
                    row.entry_type,
                    row.attributes,
                    row.created_at,
                ],
            )?;
            Ok(())
        })
    }

    /// All of `owner`'s entries in insertion order. Rows that no longer
    /// decode are logged and skipped.
    pub fn get_entries(&self, owner: &str) -> Result<Vec<Entry>> {
        let rows = self.with_conn(|conn| query_entries(conn, owner))?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            let id = row.id.clone();
            match row.into_entry() {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(entry = %id, "Skipping unreadable entry: {:#}", e),
            }
        }
        Ok(entries)
    }

    /// Returns false when the entry doesn't exist or belongs to someone else.
    pub fn delete_entry(&self, id: &Uuid, owner: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let removed = conn.execute(
                "DELETE FROM entries WHERE id = ?1 AND owner = ?2",
                (id.to_string(), owner),
            )?;
            Ok(removed > 0)
        })
    }

    pub fn clear_entries(&self, owner: &str) -> Result<usize> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM entries WHERE owner = ?1", [owner])?;
            Ok(removed)
        })
    }

    // -- Rewards --

    /// Stored rewards for `username`, or a fresh level-1 record.
    pub fn get_rewards(&self, username: &str) -> Result<RewardsState> {
        let stored: Option<String> = self.with_conn(|conn| {
            conn.query_row(
                "SELECT state FROM rewards WHERE username = ?1",
                [username],
                |row| row.get(0),
            )
            .optional()
        })?;

        match stored {
            Some(json) => serde_json::from_str(&json)
                .with_context(|| format!("decoding rewards for {}", username)),
            None => Ok(RewardsState::default()),
        }
    }

    pub fn save_rewards(&self, username: &str, state: &RewardsState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO rewards (username, state) VALUES (?1, ?2)
                 ON CONFLICT(username) DO UPDATE
                    SET state = excluded.state, updated_at = datetime('now')",
                (username, json),
            )?;
            Ok(())
        })
    }
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, username, password, created_at FROM users WHERE username = ?1")?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_entries(conn: &Connection, owner: &str) -> Result<Vec<EntryRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, owner, date, activity, category, co2_amount, quantity, distance,
                duration, participants, location, weather, purpose, efficiency, notes,
                entry_type, attributes, created_at
         FROM entries
         WHERE owner = ?1
         ORDER BY seq",
    )?;

    let rows = stmt
        .query_map([owner], |row| {
            Ok(EntryRow {
                id: row.get(0)?,
                owner: row.get(1)?,
                date: row.get(2)?,
                activity: row.get(3)?,
                category: row.get(4)?,
                co2_amount: row.get(5)?,
                quantity: row.get(6)?,
                distance: row.get(7)?,
                duration: row.get(8)?,
                participants: row.get(9)?,
                location: row.get(10)?,
                weather: row.get(11)?,
                purpose: row.get(12)?,
                efficiency: row.get(13)?,
                notes: row.get(14)?,
                entry_type: row.get(15)?,
                attributes: row.get(16)?,
                created_at: row.get(17)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
