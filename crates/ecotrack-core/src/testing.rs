use chrono::{NaiveDate, TimeZone, Utc};
use ecotrack_types::models::{Attributes, Category, Entry, EntryType};
use uuid::Uuid;

pub fn entry_on(date: NaiveDate, category: Category, co2_amount: f64) -> Entry {
    Entry {
        id: Uuid::new_v4(),
        owner: "tester".to_string(),
        date,
        activity: format!("{} activity", category),
        category,
        co2_amount,
        quantity: None,
        distance: None,
        duration: None,
        participants: None,
        location: None,
        weather: None,
        purpose: None,
        efficiency: None,
        notes: String::new(),
        entry_type: EntryType::Detailed,
        attributes: Attributes::new(),
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
    }
}

/// An entry on the given day of March 2026.
pub fn entry(day: u32, category: Category, co2_amount: f64) -> Entry {
    entry_on(date(2026, 3, day), category, co2_amount)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
