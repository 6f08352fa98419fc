use serde::{Deserialize, Serialize};

/// Aggregate emissions for one user, as read from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTotals {
    pub username: String,
    pub total_co2: f64,
    pub entry_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Gold,
    Silver,
    Bronze,
}

impl Tier {
    fn for_rank(rank: usize) -> Option<Self> {
        match rank {
            1 => Some(Self::Gold),
            2 => Some(Self::Silver),
            3 => Some(Self::Bronze),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub username: String,
    pub average_co2: f64,
    pub total_co2: f64,
    pub entry_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
}

/// Rank users by average CO₂ per entry, lowest first. Users without entries
/// have no average and are left out; equal averages fall back to username
/// order.
pub fn rank(totals: Vec<UserTotals>) -> Vec<LeaderboardRow> {
    let mut scored: Vec<(f64, UserTotals)> = totals
        .into_iter()
        .filter(|t| t.entry_count > 0)
        .map(|t| (t.total_co2 / t.entry_count as f64, t))
        .collect();

    scored.sort_by(|(a_avg, a), (b_avg, b)| {
        a_avg
            .total_cmp(b_avg)
            .then_with(|| a.username.cmp(&b.username))
    });

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (average_co2, totals))| LeaderboardRow {
            rank: i + 1,
            username: totals.username,
            average_co2,
            total_co2: totals.total_co2,
            entry_count: totals.entry_count,
            tier: Tier::for_rank(i + 1),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(username: &str, total_co2: f64, entry_count: u64) -> UserTotals {
        UserTotals {
            username: username.to_string(),
            total_co2,
            entry_count,
        }
    }

    #[test]
    fn lower_average_ranks_higher() {
        let rows = rank(vec![
            totals("dana", 100.0, 10),
            totals("ali", 90.0, 3),
            totals("sam", 4.0, 2),
            totals("kim", 50.0, 10),
        ]);
        let order: Vec<_> = rows.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(order, ["sam", "kim", "dana", "ali"]);
        for pair in rows.windows(2) {
            assert!(pair[0].average_co2 <= pair[1].average_co2);
        }
        assert_eq!(rows[0].average_co2, 2.0);
        assert_eq!(rows[3].rank, 4);
    }

    #[test]
    fn users_without_entries_are_excluded() {
        let rows = rank(vec![totals("ghost", 0.0, 0), totals("real", 3.0, 1)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].username, "real");
    }

    #[test]
    fn ties_break_by_username() {
        let rows = rank(vec![
            totals("zoe", 10.0, 2),
            totals("amy", 5.0, 1),
            totals("max", 20.0, 4),
        ]);
        let order: Vec<_> = rows.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(order, ["amy", "max", "zoe"]);
    }

    #[test]
    fn top_three_get_tiers() {
        let rows = rank(
            (1..=5)
                .map(|i| totals(&format!("user{}", i), f64::from(i), 1))
                .collect(),
        );
        assert_eq!(rows[0].tier, Some(Tier::Gold));
        assert_eq!(rows[1].tier, Some(Tier::Silver));
        assert_eq!(rows[2].tier, Some(Tier::Bronze));
        assert_eq!(rows[3].tier, None);
    }

    #[test]
    fn empty_population_yields_empty_board() {
        assert!(rank(Vec::new()).is_empty());
    }
}
