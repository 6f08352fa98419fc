use chrono::NaiveDate;
use ecotrack_types::models::RewardsState;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BadgeTier {
    pub days: u32,
    pub id: &'static str,
    pub name: &'static str,
}

/// Streak milestones. A badge is earned again every time the streak hits
/// another multiple of its `days`.
pub const BADGE_TIERS: &[BadgeTier] = &[
    BadgeTier { days: 7, id: "streak_7", name: "Week Streak" },
    BadgeTier { days: 14, id: "streak_14", name: "Fortnight Streak" },
    BadgeTier { days: 21, id: "streak_21", name: "Habit Former" },
    BadgeTier { days: 30, id: "streak_30", name: "Monthly Devotee" },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginOutcome {
    pub streak_days: u32,
    pub badges_awarded: Vec<&'static str>,
    /// False when this was a repeat login on the same day.
    pub changed: bool,
}

/// Update the daily login streak for a login on `today`.
pub fn record_login(state: &mut RewardsState, today: NaiveDate) -> LoginOutcome {
    let streak = match state.last_login {
        Some(last) if last == today => {
            return LoginOutcome {
                streak_days: state.streak_days,
                badges_awarded: Vec::new(),
                changed: false,
            };
        }
        Some(last) if last.succ_opt() == Some(today) => state.streak_days + 1,
        _ => 1,
    };

    state.streak_days = streak;
    state.last_login = Some(today);

    let mut badges_awarded = Vec::new();
    for tier in BADGE_TIERS {
        if streak % tier.days == 0 {
            *state.badges.entry(tier.id.to_string()).or_insert(0) += 1;
            badges_awarded.push(tier.id);
        }
    }
    debug!(streak, ?badges_awarded, "Login streak updated");

    LoginOutcome {
        streak_days: streak,
        badges_awarded,
        changed: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[test]
    fn first_login_starts_streak() {
        let mut state = RewardsState::default();
        let outcome = record_login(&mut state, start());
        assert_eq!(outcome.streak_days, 1);
        assert!(outcome.changed);
        assert_eq!(state.last_login, Some(start()));
    }

    #[test]
    fn same_day_login_is_noop() {
        let mut state = RewardsState::default();
        record_login(&mut state, start());
        let before = state.clone();
        let outcome = record_login(&mut state, start());
        assert!(!outcome.changed);
        assert_eq!(state, before);
    }

    #[test]
    fn eight_consecutive_days_then_a_gap() {
        let mut state = RewardsState::default();
        for offset in 0..8 {
            record_login(&mut state, start() + Duration::days(offset));
        }
        assert_eq!(state.streak_days, 8);

        // Day 9 skipped.
        let outcome = record_login(&mut state, start() + Duration::days(9));
        assert_eq!(outcome.streak_days, 1);
        assert_eq!(state.streak_days, 1);
    }

    #[test]
    fn badges_are_awarded_on_every_multiple() {
        let mut state = RewardsState::default();
        let mut awarded_on_14 = Vec::new();
        for offset in 0..28 {
            let outcome = record_login(&mut state, start() + Duration::days(offset));
            if offset == 13 {
                awarded_on_14 = outcome.badges_awarded.clone();
            }
        }
        assert_eq!(awarded_on_14, vec!["streak_7", "streak_14"]);
        assert_eq!(state.badges["streak_7"], 4);
        assert_eq!(state.badges["streak_14"], 2);
        assert_eq!(state.badges["streak_21"], 1);
        assert!(!state.badges.contains_key("streak_30"));
    }

    #[test]
    fn repeated_same_day_logins_do_not_rebadge() {
        let mut state = RewardsState::default();
        for offset in 0..7 {
            record_login(&mut state, start() + Duration::days(offset));
        }
        record_login(&mut state, start() + Duration::days(6));
        assert_eq!(state.badges["streak_7"], 1);
    }

    #[test]
    fn clock_moving_backwards_restarts_streak() {
        let mut state = RewardsState::default();
        record_login(&mut state, start() + Duration::days(3));
        record_login(&mut state, start() + Duration::days(4));
        let outcome = record_login(&mut state, start());
        assert_eq!(outcome.streak_days, 1);
    }
}
