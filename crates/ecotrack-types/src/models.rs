use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Emission categories an entry can be filed under.
///
/// Declaration order doubles as the tiebreak order when the dashboard picks
/// a most common category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Transportation,
    #[serde(alias = "Food")]
    Diet,
    #[serde(alias = "Electricity")]
    Energy,
    Shopping,
    Work,
    Entertainment,
    Health,
    Home,
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Transportation,
        Category::Diet,
        Category::Energy,
        Category::Shopping,
        Category::Work,
        Category::Entertainment,
        Category::Health,
        Category::Home,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transportation => "Transportation",
            Self::Diet => "Diet",
            Self::Energy => "Energy",
            Self::Shopping => "Shopping",
            Self::Work => "Work",
            Self::Entertainment => "Entertainment",
            Self::Health => "Health",
            Self::Home => "Home",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Food" => Ok(Self::Diet),
            "Electricity" => Ok(Self::Energy),
            other => Self::ALL
                .into_iter()
                .find(|c| c.as_str() == other)
                .ok_or_else(|| format!("unknown category '{}'", other)),
        }
    }
}

/// Which form produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Transportation,
    Diet,
    Energy,
    Other,
    Detailed,
    Quick,
}

impl EntryType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transportation => "transportation",
            Self::Diet => "diet",
            Self::Energy => "energy",
            Self::Other => "other",
            Self::Detailed => "detailed",
            Self::Quick => "quick",
        }
    }
}

impl FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transportation" => Ok(Self::Transportation),
            "diet" => Ok(Self::Diet),
            "energy" => Ok(Self::Energy),
            "other" => Ok(Self::Other),
            "detailed" => Ok(Self::Detailed),
            "quick" => Ok(Self::Quick),
            other => Err(format!("unknown entry type '{}'", other)),
        }
    }
}

/// A primitive value in an entry's open attribute map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

pub type Attributes = BTreeMap<String, AttributeValue>;

/// One logged activity. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub owner: String,
    pub date: NaiveDate,
    pub activity: String,
    pub category: Category,
    pub co2_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<String>,
    #[serde(default)]
    pub notes: String,
    pub entry_type: EntryType,
    #[serde(default)]
    pub attributes: Attributes,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BestWeek {
    pub week_id: Option<String>,
    pub reduction_percent: f64,
}

/// Per-user gamification scoreboard.
///
/// `level` is a snapshot of the level function applied to `total_points`
/// at the last recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardsState {
    pub total_points: u64,
    pub level: u32,
    pub achievements: BTreeSet<String>,
    pub badges: BTreeMap<String, u32>,
    pub streak_days: u32,
    pub last_login: Option<NaiveDate>,
    /// Target kg CO₂ keyed by "YYYY-MM".
    pub monthly_goals: BTreeMap<String, f64>,
    pub best_week: BestWeek,
    pub last_improvement_week: Option<String>,
}

impl Default for RewardsState {
    fn default() -> Self {
        Self {
            total_points: 0,
            level: 1,
            achievements: BTreeSet::new(),
            badges: BTreeMap::new(),
            streak_days: 0,
            last_login: None,
            monthly_goals: BTreeMap::new(),
            best_week: BestWeek::default(),
            last_improvement_week: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_accepts_legacy_names() {
        assert_eq!("Food".parse::<Category>().unwrap(), Category::Diet);
        assert_eq!("Electricity".parse::<Category>().unwrap(), Category::Energy);
        let parsed: Category = serde_json::from_str("\"Food\"").unwrap();
        assert_eq!(parsed, Category::Diet);
        assert!("Spaceflight".parse::<Category>().is_err());
    }

    #[test]
    fn attribute_values_keep_their_primitive_kind() {
        let attrs: Attributes =
            serde_json::from_str(r#"{"organic": true, "waste_percent": 10, "origin": "Local"}"#)
                .unwrap();
        assert_eq!(attrs["organic"], AttributeValue::Flag(true));
        assert_eq!(attrs["waste_percent"], AttributeValue::Number(10.0));
        assert_eq!(attrs["origin"], AttributeValue::Text("Local".into()));
    }

    #[test]
    fn rewards_state_fills_missing_fields() {
        let state: RewardsState = serde_json::from_str(r#"{"total_points": 120}"#).unwrap();
        assert_eq!(state.total_points, 120);
        assert_eq!(state.level, 1);
        assert!(state.achievements.is_empty());
        assert_eq!(state.best_week, BestWeek::default());
    }
}
