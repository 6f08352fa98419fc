//! Turning submitted activities into stored [`Entry`] records.

use chrono::{DateTime, NaiveDate, Utc};
use ecotrack_types::models::{Attributes, Category, Entry, EntryType};
use serde::Deserialize;
use uuid::Uuid;

use crate::calculator::{Activity, round_kg};
use crate::error::{Error, Result};

/// Optional context shared by every kind of submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EntryDetails {
    pub location: Option<String>,
    pub weather: Option<String>,
    pub purpose: Option<String>,
    pub duration: Option<f64>,
    pub notes: String,
}

/// An activity priced by the calculator.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggedActivity {
    pub date: NaiveDate,
    pub activity: Activity,
    #[serde(default)]
    pub details: EntryDetails,
}

/// A free-form entry where the user supplies the CO₂ amount.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailedEntry {
    pub date: NaiveDate,
    pub activity: String,
    pub category: Category,
    pub co2_amount: f64,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub participants: Option<u32>,
    #[serde(default)]
    pub efficiency: Option<String>,
    #[serde(default)]
    pub details: EntryDetails,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NewEntry {
    Activity(LoggedActivity),
    Detailed(DetailedEntry),
}

impl NewEntry {
    /// Validate the submission and build the record to persist.
    pub fn into_entry(self, owner: &str, now: DateTime<Utc>) -> Result<Entry> {
        match self {
            Self::Activity(logged) => from_activity(logged, owner, now),
            Self::Detailed(detailed) => from_detailed(detailed, owner, now),
        }
    }
}

/// Reject magnitudes the calculator would silently clamp.
pub fn validate_activity(activity: &Activity) -> Result<()> {
    match activity {
        Activity::Transportation(trip) => {
            positive("distance_km", trip.distance_km)?;
            if trip.passengers == 0 {
                return Err(Error::validation("passengers must be at least 1"));
            }
        }
        Activity::Diet(meal) => {
            positive("quantity", meal.quantity)?;
            percent("waste_percent", meal.waste_percent)?;
        }
        Activity::Electricity(usage) => {
            let kwh = usage
                .usage_kwh()
                .ok_or_else(|| Error::validation("either kwh or appliance is required"))?;
            positive("kwh", kwh)?;
            percent("renewable_mix_percent", usage.renewable_mix_percent)?;
        }
        Activity::Other(other) => {
            positive("quantity", other.quantity)?;
            if other.participants == 0 {
                return Err(Error::validation("participants must be at least 1"));
            }
        }
    }
    Ok(())
}

fn positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::validation(format!("{} must be greater than 0", field)))
    }
}

fn percent(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::validation(format!("{} must be between 0 and 100", field)))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Fields every kind of submission shares.
struct Stamp<'a> {
    owner: &'a str,
    date: NaiveDate,
    details: EntryDetails,
    now: DateTime<Utc>,
}

fn blank_entry(
    stamp: Stamp<'_>,
    activity: String,
    category: Category,
    entry_type: EntryType,
    co2_kg: f64,
) -> Entry {
    let Stamp {
        owner,
        date,
        details,
        now,
    } = stamp;
    Entry {
        id: Uuid::new_v4(),
        owner: owner.to_string(),
        date,
        activity,
        category,
        co2_amount: round_kg(co2_kg),
        quantity: None,
        distance: None,
        duration: details.duration.filter(|d| *d > 0.0),
        participants: None,
        location: non_empty(details.location),
        weather: non_empty(details.weather),
        purpose: non_empty(details.purpose),
        efficiency: None,
        notes: details.notes,
        entry_type,
        attributes: Attributes::new(),
        created_at: now,
    }
}

fn from_activity(logged: LoggedActivity, owner: &str, now: DateTime<Utc>) -> Result<Entry> {
    let LoggedActivity {
        date,
        activity,
        details,
    } = logged;
    validate_activity(&activity)?;
    let co2 = activity.co2_kg();

    let entry = match activity {
        Activity::Transportation(trip) => {
            let mut entry = blank_entry(
                Stamp {
                    owner,
                    date,
                    details,
                    now,
                },
                trip.mode.label().to_string(),
                Category::Transportation,
                EntryType::Transportation,
                co2,
            );
            entry.distance = Some(trip.distance_km);
            entry.participants = Some(trip.passengers);
            entry.efficiency = Some(trip.efficiency.label().to_string());
            entry
                .attributes
                .insert("fuel_efficiency".into(), trip.efficiency.label().into());
            entry
                .attributes
                .insert("base_co2_per_km".into(), trip.mode.factor().into());
            entry
        }
        Activity::Diet(meal) => {
            let mut entry = blank_entry(
                Stamp {
                    owner,
                    date,
                    details,
                    now,
                },
                meal.food.label().to_string(),
                Category::Diet,
                EntryType::Diet,
                co2,
            );
            entry.quantity = Some(meal.quantity);
            let attrs = &mut entry.attributes;
            attrs.insert("preparation".into(), meal.preparation.label().into());
            attrs.insert("origin".into(), meal.origin.label().into());
            attrs.insert("organic".into(), meal.organic.into());
            attrs.insert("waste_percent".into(), meal.waste_percent.into());
            attrs.insert("base_co2_per_unit".into(), meal.food.factor().into());
            entry
        }
        Activity::Electricity(usage) => {
            let label = match usage.appliance {
                Some(appliance) => format!("{} ({})", appliance.label(), usage.source.label()),
                None => usage.source.label().to_string(),
            };
            let mut entry = blank_entry(
                Stamp {
                    owner,
                    date,
                    details,
                    now,
                },
                label,
                Category::Energy,
                EntryType::Energy,
                co2,
            );
            entry.quantity = usage.usage_kwh();
            entry.efficiency = Some(usage.efficiency.label().to_string());
            let attrs = &mut entry.attributes;
            attrs.insert("energy_source".into(), usage.source.label().into());
            if let Some(appliance) = usage.appliance {
                attrs.insert("appliance".into(), appliance.label().into());
            }
            attrs.insert("time_of_use".into(), usage.time_of_use.label().into());
            attrs.insert("renewable_mix".into(), usage.renewable_mix_percent.into());
            attrs.insert("base_co2_per_kwh".into(), usage.source.factor().into());
            entry
        }
        Activity::Other(other) => {
            let mut entry = blank_entry(
                Stamp {
                    owner,
                    date,
                    details,
                    now,
                },
                other.kind.label().to_string(),
                other.sub_category,
                EntryType::Other,
                co2,
            );
            entry.quantity = Some(other.quantity);
            entry.participants = Some(other.participants);
            entry
                .attributes
                .insert("sustainability".into(), other.sustainability.label().into());
            entry
                .attributes
                .insert("base_co2_per_unit".into(), other.kind.factor().into());
            entry
        }
    };

    Ok(entry)
}

fn from_detailed(detailed: DetailedEntry, owner: &str, now: DateTime<Utc>) -> Result<Entry> {
    let activity = detailed.activity.trim();
    if activity.is_empty() {
        return Err(Error::validation("please provide an activity description"));
    }
    // Checked after rounding, since the rounded value is what gets stored.
    if !(detailed.co2_amount.is_finite() && round_kg(detailed.co2_amount) > 0.0) {
        return Err(Error::validation("CO₂ amount must be greater than 0"));
    }

    let mut entry = blank_entry(
        Stamp {
            owner,
            date: detailed.date,
            details: detailed.details,
            now,
        },
        activity.to_string(),
        detailed.category,
        EntryType::Detailed,
        detailed.co2_amount,
    );
    entry.distance = detailed.distance.filter(|d| *d > 0.0);
    entry.participants = detailed.participants;
    entry.efficiency = non_empty(detailed.efficiency);
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{FuelEfficiency, TransportMode, Trip};
    use ecotrack_types::models::AttributeValue;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn detailed(activity: &str, co2_amount: f64) -> NewEntry {
        NewEntry::Detailed(DetailedEntry {
            date: day(2),
            activity: activity.to_string(),
            category: Category::Home,
            co2_amount,
            distance: Some(0.0),
            participants: Some(2),
            efficiency: Some("".into()),
            details: EntryDetails::default(),
        })
    }

    #[test]
    fn car_trip_becomes_rounded_transport_entry() {
        let entry = NewEntry::Activity(LoggedActivity {
            date: day(1),
            activity: Activity::Transportation(Trip {
                mode: TransportMode::GasolineCar,
                distance_km: 10.0,
                passengers: 1,
                efficiency: FuelEfficiency::Average,
            }),
            details: EntryDetails {
                location: Some("  ".into()),
                purpose: Some("Commute".into()),
                ..Default::default()
            },
        })
        .into_entry("alice", Utc::now())
        .unwrap();

        assert_eq!(entry.co2_amount, 2.31);
        assert_eq!(entry.category, Category::Transportation);
        assert_eq!(entry.entry_type, EntryType::Transportation);
        assert_eq!(entry.activity, "Car (Gasoline)");
        assert_eq!(entry.distance, Some(10.0));
        assert_eq!(entry.location, None);
        assert_eq!(entry.purpose.as_deref(), Some("Commute"));
        assert_eq!(
            entry.attributes["base_co2_per_km"],
            AttributeValue::Number(0.231)
        );
    }

    #[test]
    fn detailed_entry_requires_a_description() {
        let err = detailed("   ", 3.0).into_entry("alice", Utc::now()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn detailed_entry_requires_positive_amount() {
        assert!(detailed("Drove to work", 0.0).into_entry("alice", Utc::now()).is_err());
        assert!(detailed("Drove to work", -2.0).into_entry("alice", Utc::now()).is_err());
        assert!(
            detailed("Drove to work", f64::INFINITY)
                .into_entry("alice", Utc::now())
                .is_err()
        );
    }

    #[test]
    fn detailed_amount_that_rounds_to_zero_is_rejected() {
        let err = detailed("Boiled an egg", 0.004)
            .into_entry("alice", Utc::now())
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let entry = detailed("Boiled an egg", 0.005)
            .into_entry("alice", Utc::now())
            .unwrap();
        assert_eq!(entry.co2_amount, 0.01);
    }

    #[test]
    fn detailed_entry_drops_empty_optionals() {
        let entry = detailed(" Drove to work ", 4.567)
            .into_entry("bob", Utc::now())
            .unwrap();
        assert_eq!(entry.activity, "Drove to work");
        assert_eq!(entry.co2_amount, 4.57);
        assert_eq!(entry.distance, None);
        assert_eq!(entry.efficiency, None);
        assert_eq!(entry.participants, Some(2));
        assert_eq!(entry.owner, "bob");
    }

    #[test]
    fn zero_distance_trip_is_rejected() {
        let activity = Activity::Transportation(Trip {
            mode: TransportMode::Bus,
            distance_km: 0.0,
            passengers: 1,
            efficiency: FuelEfficiency::Average,
        });
        assert!(validate_activity(&activity).is_err());
    }

    #[test]
    fn submission_parses_from_json() {
        let new: NewEntry = serde_json::from_str(
            r#"{
                "kind": "activity",
                "date": "2026-03-04",
                "activity": {
                    "category": "other",
                    "kind": "gym",
                    "quantity": 1.0,
                    "sub_category": "Health"
                }
            }"#,
        )
        .unwrap();
        let entry = new.into_entry("carol", Utc::now()).unwrap();
        assert_eq!(entry.category, Category::Health);
        assert_eq!(entry.co2_amount, 2.1);
    }
}
