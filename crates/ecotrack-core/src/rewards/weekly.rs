use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use ecotrack_types::models::{BestWeek, Entry, RewardsState};
use serde::Serialize;

use super::level::level_for;

/// Stand-in for "two weeks of data" before improvements are evaluated.
pub const MIN_ENTRIES_FOR_WEEKLY: usize = 14;

/// ISO week (Monday start) as a sortable key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

impl WeekKey {
    pub fn of(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// e.g. `2026-W07`.
    pub fn id(self) -> String {
        format!("{:04}-W{:02}", self.year, self.week)
    }
}

/// Sum CO₂ per ISO week.
pub fn weekly_totals(entries: &[Entry]) -> BTreeMap<WeekKey, f64> {
    let mut totals = BTreeMap::new();
    for entry in entries {
        *totals.entry(WeekKey::of(entry.date)).or_insert(0.0) += entry.co2_amount;
    }
    totals
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyImprovement {
    pub week_id: String,
    pub previous_kg: f64,
    pub current_kg: f64,
    pub reduction_percent: f64,
    pub points_earned: u64,
}

/// Award the reduction bonus when the latest finished week beat the one
/// before it. Each week can earn the bonus once.
pub fn check_weekly_improvement(
    state: &mut RewardsState,
    entries: &[Entry],
    today: NaiveDate,
) -> Option<WeeklyImprovement> {
    if entries.len() < MIN_ENTRIES_FOR_WEEKLY {
        return None;
    }

    let this_week = WeekKey::of(today);
    let totals = weekly_totals(entries);
    let mut finished = totals.range(..this_week).rev();
    let (&current_key, &current) = finished.next()?;
    let (_, &previous) = finished.next()?;

    if current >= previous {
        return None;
    }

    let week_id = current_key.id();
    if state.last_improvement_week.as_deref() == Some(week_id.as_str()) {
        return None;
    }

    let reduction_percent = (previous - current) / previous * 100.0;
    let points_earned = (reduction_percent * 2.0).round() as u64;

    state.total_points += points_earned;
    state.level = level_for(state.total_points);
    state.last_improvement_week = Some(week_id.clone());
    if reduction_percent > state.best_week.reduction_percent {
        state.best_week = BestWeek {
            week_id: Some(week_id.clone()),
            reduction_percent,
        };
    }

    Some(WeeklyImprovement {
        week_id,
        previous_kg: previous,
        current_kg: current,
        reduction_percent,
        points_earned,
    })
}
