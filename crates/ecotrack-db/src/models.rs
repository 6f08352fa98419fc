//! Database row types. These map directly to SQLite rows and are kept apart
//! from the ecotrack-types models so the schema can drift independently.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use ecotrack_types::models::{Attributes, Category, Entry, EntryType, User};
use uuid::Uuid;

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password: String,
    pub created_at: String,
}

impl UserRow {
    /// Public view of the account, without the password hash.
    pub fn to_user(&self) -> Result<User> {
        // SQLite's datetime('now') format, always UTC
        let created_at = NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%d %H:%M:%S")
            .with_context(|| format!("created_at of user {}", self.username))?
            .and_utc();
        Ok(User {
            id: Uuid::parse_str(&self.id)?,
            username: self.username.clone(),
            created_at,
        })
    }
}

pub struct EntryRow {
    pub id: String,
    pub owner: String,
    pub date: String,
    pub activity: String,
    pub category: String,
    pub co2_amount: f64,
    pub quantity: Option<f64>,
    pub distance: Option<f64>,
    pub duration: Option<f64>,
    pub participants: Option<u32>,
    pub location: Option<String>,
    pub weather: Option<String>,
    pub purpose: Option<String>,
    pub efficiency: Option<String>,
    pub notes: String,
    pub entry_type: String,
    pub attributes: String,
    pub created_at: String,
}

impl EntryRow {
    pub fn from_entry(entry: &Entry) -> Result<Self> {
        Ok(Self {
            id: entry.id.to_string(),
            owner: entry.owner.clone(),
            date: entry.date.format("%Y-%m-%d").to_string(),
            activity: entry.activity.clone(),
            category: entry.category.as_str().to_string(),
            co2_amount: entry.co2_amount,
            quantity: entry.quantity,
            distance: entry.distance,
            duration: entry.duration,
            participants: entry.participants,
            location: entry.location.clone(),
            weather: entry.weather.clone(),
            purpose: entry.purpose.clone(),
            efficiency: entry.efficiency.clone(),
            notes: entry.notes.clone(),
            entry_type: entry.entry_type.as_str().to_string(),
            attributes: serde_json::to_string(&entry.attributes)?,
            created_at: entry.created_at.to_rfc3339(),
        })
    }

    pub fn into_entry(self) -> Result<Entry> {
        let attributes: Attributes = serde_json::from_str(&self.attributes)
            .with_context(|| format!("attributes of entry {}", self.id))?;
        Ok(Entry {
            id: Uuid::parse_str(&self.id)?,
            date: NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")?,
            category: self.category.parse::<Category>().map_err(|e: String| anyhow!(e))?,
            entry_type: self.entry_type.parse::<EntryType>().map_err(|e: String| anyhow!(e))?,
            created_at: DateTime::parse_from_rfc3339(&self.created_at)?.with_timezone(&Utc),
            owner: self.owner,
            activity: self.activity,
            co2_amount: self.co2_amount,
            quantity: self.quantity,
            distance: self.distance,
            duration: self.duration,
            participants: self.participants,
            location: self.location,
            weather: self.weather,
            purpose: self.purpose,
            efficiency: self.efficiency,
            notes: self.notes,
            attributes,
        })
    }
}
