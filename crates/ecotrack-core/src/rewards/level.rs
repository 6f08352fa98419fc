use serde::Serialize;

/// Points needed to reach level `i + 1`.
pub const LEVEL_THRESHOLDS: [u64; 10] = [0, 100, 300, 600, 1000, 2000, 2500, 3000, 3500, 4000];

pub const MAX_LEVEL: u32 = LEVEL_THRESHOLDS.len() as u32;

/// Level for a point total: the highest threshold not above `points`.
pub fn level_for(points: u64) -> u32 {
    LEVEL_THRESHOLDS
        .iter()
        .take_while(|&&threshold| points >= threshold)
        .count() as u32
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelProgress {
    pub level: u32,
    pub total_points: u64,
    /// Threshold of the next level, `None` at the maximum level.
    pub next_level_at: Option<u64>,
    pub points_to_next: u64,
    /// Fraction of the way from the current threshold to the next, 0..=1.
    pub progress: f64,
}

impl LevelProgress {
    pub fn for_points(points: u64) -> Self {
        let level = level_for(points);
        let floor = LEVEL_THRESHOLDS[(level - 1) as usize];
        match LEVEL_THRESHOLDS.get(level as usize) {
            Some(&next) => Self {
                level,
                total_points: points,
                next_level_at: Some(next),
                points_to_next: next - points,
                progress: (points - floor) as f64 / (next - floor) as f64,
            },
            None => Self {
                level,
                total_points: points,
                next_level_at: None,
                points_to_next: 0,
                progress: 1.0,
            },
        }
    }
}
