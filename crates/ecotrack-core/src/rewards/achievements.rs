//! One-time achievements, expressed as a single rule table.

use std::collections::HashSet;

use ecotrack_types::models::{Entry, RewardsState};
use serde::Serialize;

use super::level::level_for;

pub const ECO_WARRIOR_THRESHOLD: usize = 30;
pub const LOW_CARBON_LIMIT_KG: f64 = 5.0;

/// Facts about an entry history that the rules are evaluated against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryStats {
    pub entry_count: usize,
    pub low_carbon_count: usize,
    pub distinct_categories: usize,
}

impl HistoryStats {
    pub fn from_entries(entries: &[Entry]) -> Self {
        let categories: HashSet<_> = entries.iter().map(|e| e.category).collect();
        Self {
            entry_count: entries.len(),
            low_carbon_count: entries
                .iter()
                .filter(|e| e.co2_amount < LOW_CARBON_LIMIT_KG)
                .count(),
            distinct_categories: categories.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub points: u64,
    #[serde(skip)]
    pub unlocked_by: fn(&HistoryStats) -> bool,
}

pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "first_entry",
        name: "Getting Started",
        description: "Added your first CO₂ entry",
        points: 50,
        unlocked_by: |h| h.entry_count >= 1,
    },
    Achievement {
        id: "consistent_tracker",
        name: "Consistent Tracker",
        description: "Logged 7 CO₂ entries",
        points: 100,
        unlocked_by: |h| h.entry_count >= 7,
    },
    Achievement {
        id: "eco_warrior",
        name: "Eco Warrior",
        description: "Logged 30 CO₂ entries",
        points: 200,
        unlocked_by: |h| h.entry_count >= ECO_WARRIOR_THRESHOLD,
    },
    Achievement {
        id: "low_carbon",
        name: "Low Carbon Champion",
        description: "Logged 5 entries under 5 kg CO₂",
        points: 150,
        unlocked_by: |h| h.low_carbon_count >= 5,
    },
    Achievement {
        id: "category_master",
        name: "Category Master",
        description: "Tracked emissions in 4+ categories",
        points: 120,
        unlocked_by: |h| h.distinct_categories >= 4,
    },
];

/// An achievement unlocked by the latest check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unlock {
    pub id: &'static str,
    pub name: &'static str,
    pub points: u64,
}

/// Award every satisfied achievement not yet held. Running it again on the
/// same history is a no-op.
pub fn check_achievements(state: &mut RewardsState, entries: &[Entry]) -> Vec<Unlock> {
    let stats = HistoryStats::from_entries(entries);
    let mut unlocked = Vec::new();

    for rule in ACHIEVEMENTS {
        if state.achievements.contains(rule.id) || !(rule.unlocked_by)(&stats) {
            continue;
        }
        state.achievements.insert(rule.id.to_string());
        state.total_points += rule.points;
        unlocked.push(Unlock {
            id: rule.id,
            name: rule.name,
            points: rule.points,
        });
    }

    state.level = level_for(state.total_points);
    unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::entry;
    use ecotrack_types::models::Category;

    fn heavy_entries(n: usize) -> Vec<Entry> {
        (0..n)
            .map(|i| entry(1 + (i % 28) as u32, Category::Transportation, 12.0))
            .collect()
    }

    #[test]
    fn empty_history_unlocks_nothing() {
        let mut state = RewardsState::default();
        assert!(check_achievements(&mut state, &[]).is_empty());
        assert_eq!(state.total_points, 0);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn first_entry_unlocks_once() {
        let mut state = RewardsState::default();
        let history = heavy_entries(1);

        let first = check_achievements(&mut state, &history);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, "first_entry");
        assert_eq!(state.total_points, 50);

        let second = check_achievements(&mut state, &history);
        assert!(second.is_empty());
        assert_eq!(state.total_points, 50);
    }

    #[test]
    fn seventh_entry_awards_consistent_tracker_exactly_once() {
        let mut state = RewardsState::default();
        check_achievements(&mut state, &heavy_entries(6));
        let before = state.total_points;

        let history = heavy_entries(7);
        let unlocked = check_achievements(&mut state, &history);
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].id, "consistent_tracker");
        assert_eq!(state.total_points, before + 100);

        check_achievements(&mut state, &history);
        assert_eq!(state.total_points, before + 100);
        assert_eq!(
            state
                .achievements
                .iter()
                .filter(|id| *id == "consistent_tracker")
                .count(),
            1
        );
    }

    #[test]
    fn low_carbon_needs_five_light_entries() {
        let mut state = RewardsState::default();
        let mut history: Vec<Entry> = (1..=4)
            .map(|d| entry(d, Category::Diet, 4.99))
            .collect();
        history.push(entry(5, Category::Diet, 5.0));
        check_achievements(&mut state, &history);
        assert!(!state.achievements.contains("low_carbon"));

        history.push(entry(6, Category::Diet, 0.5));
        check_achievements(&mut state, &history);
        assert!(state.achievements.contains("low_carbon"));
    }

    #[test]
    fn category_master_counts_distinct_categories() {
        let mut state = RewardsState::default();
        let history = vec![
            entry(1, Category::Transportation, 10.0),
            entry(2, Category::Diet, 10.0),
            entry(3, Category::Energy, 10.0),
            entry(4, Category::Energy, 10.0),
        ];
        check_achievements(&mut state, &history);
        assert!(!state.achievements.contains("category_master"));

        let mut history = history;
        history.push(entry(5, Category::Shopping, 10.0));
        check_achievements(&mut state, &history);
        assert!(state.achievements.contains("category_master"));
    }

    #[test]
    fn achievements_never_shrink_as_history_grows() {
        let mut state = RewardsState::default();
        let mut previous = state.achievements.clone();
        for n in 0..=35 {
            check_achievements(&mut state, &heavy_entries(n));
            assert!(previous.is_subset(&state.achievements));
            previous = state.achievements.clone();
        }
        assert!(state.achievements.contains("eco_warrior"));
        assert_eq!(state.total_points, 50 + 100 + 200);
        assert_eq!(state.level, level_for(350));
    }
}
