//! The rewards engine: a per-user scoreboard that only ever accumulates.
//!
//! Achievements and the weekly reduction bonus are derived from the entry
//! history and recomputed on every rewards view; the login streak is
//! advanced by [`record_login`] on each successful sign-in.

pub mod achievements;
pub mod level;
pub mod streak;
pub mod weekly;

use chrono::NaiveDate;
use ecotrack_types::models::{Entry, RewardsState};
use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};

pub use achievements::{ACHIEVEMENTS, Achievement, Unlock, check_achievements};
pub use level::{LevelProgress, MAX_LEVEL, level_for};
pub use streak::{BADGE_TIERS, BadgeTier, LoginOutcome, record_login};
pub use weekly::{WeeklyImprovement, check_weekly_improvement};

/// What changed during a refresh, for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardsReport {
    pub unlocked: Vec<Unlock>,
    pub improvement: Option<WeeklyImprovement>,
    pub progress: LevelProgress,
}

/// Re-evaluate achievements and the weekly bonus against `entries`.
pub fn refresh(state: &mut RewardsState, entries: &[Entry], today: NaiveDate) -> RewardsReport {
    let unlocked = check_achievements(state, entries);
    let improvement = check_weekly_improvement(state, entries, today);
    // Keep the stored snapshot honest even if nothing was awarded.
    state.level = level_for(state.total_points);

    for unlock in &unlocked {
        info!(achievement = unlock.id, points = unlock.points, "Achievement unlocked");
    }
    if let Some(improvement) = &improvement {
        info!(
            week = %improvement.week_id,
            points = improvement.points_earned,
            "Weekly reduction bonus awarded"
        );
    }

    RewardsReport {
        unlocked,
        improvement,
        progress: LevelProgress::for_points(state.total_points),
    }
}

/// Parse a "YYYY-MM" month key.
pub fn parse_month(month: &str) -> Result<NaiveDate> {
    if month.len() != 7 {
        return Err(Error::InvalidMonth(month.to_string()));
    }
    NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
        .map_err(|_| Error::InvalidMonth(month.to_string()))
}

/// Set or replace the CO₂ target for a month.
pub fn set_monthly_goal(state: &mut RewardsState, month: &str, target_kg: f64) -> Result<()> {
    parse_month(month)?;
    if !(target_kg.is_finite() && target_kg > 0.0) {
        return Err(Error::validation("monthly goal must be greater than 0 kg"));
    }
    state.monthly_goals.insert(month.to_string(), target_kg);
    Ok(())
}
