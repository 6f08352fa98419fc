//! Read-side summaries of a user's entry history.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use ecotrack_types::models::{Category, Entry};
use serde::{Deserialize, Serialize};

use crate::calculator::round_kg;

const RECENT_LIMIT: usize = 5;

/// "YYYY-MM" for a date.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeekGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
}

impl WeekGrade {
    pub fn for_total(kg: f64) -> Self {
        if kg < 30.0 {
            Self::APlus
        } else if kg < 60.0 {
            Self::A
        } else if kg < 100.0 {
            Self::B
        } else {
            Self::C
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub co2: f64,
    pub running_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub month: String,
    pub target_kg: f64,
    pub actual_kg: f64,
    pub remaining_kg: f64,
    pub on_track: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_co2: f64,
    pub entry_count: usize,
    pub days_span: i64,
    pub daily_average: f64,
    pub top_category: Category,
    pub by_day: Vec<DailyPoint>,
    pub by_month: BTreeMap<String, f64>,
    pub by_category: BTreeMap<Category, f64>,
    pub recent: Vec<Entry>,
    pub last_7_days_co2: f64,
    pub last_7_days_entries: usize,
    pub week_grade: WeekGrade,
    pub goals: Vec<GoalProgress>,
}

/// Dashboard payload. An empty history is reported as `NoData`, which is
/// distinct from a history that sums to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Dashboard {
    NoData,
    Data(Box<Summary>),
}

pub fn summarize(
    entries: &[Entry],
    monthly_goals: &BTreeMap<String, f64>,
    today: NaiveDate,
) -> Dashboard {
    let (Some(first), Some(last)) = (
        entries.iter().map(|e| e.date).min(),
        entries.iter().map(|e| e.date).max(),
    ) else {
        return Dashboard::NoData;
    };

    let total_co2: f64 = entries.iter().map(|e| e.co2_amount).sum();
    let days_span = (last - first).num_days() + 1;

    let mut per_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut by_month: BTreeMap<String, f64> = BTreeMap::new();
    let mut by_category: BTreeMap<Category, f64> = BTreeMap::new();
    let mut category_counts: HashMap<Category, usize> = HashMap::new();
    for entry in entries {
        *per_day.entry(entry.date).or_insert(0.0) += entry.co2_amount;
        *by_month.entry(month_key(entry.date)).or_insert(0.0) += entry.co2_amount;
        *by_category.entry(entry.category).or_insert(0.0) += entry.co2_amount;
        *category_counts.entry(entry.category).or_insert(0) += 1;
    }

    let mut running = 0.0;
    let by_day = per_day
        .into_iter()
        .map(|(date, co2)| {
            running += co2;
            DailyPoint {
                date,
                co2: round_kg(co2),
                running_total: round_kg(running),
            }
        })
        .collect();

    // Most frequent category; ties go to the earlier category.
    let top_category = category_counts
        .into_iter()
        .max_by(|(a, a_n), (b, b_n)| a_n.cmp(b_n).then_with(|| b.cmp(a)))
        .map(|(category, _)| category)
        .unwrap_or(Category::Other);

    let window_start = today - Duration::days(6);
    let last_week: Vec<&Entry> = entries
        .iter()
        .filter(|e| e.date >= window_start && e.date <= today)
        .collect();
    let last_7_days_co2: f64 = last_week.iter().map(|e| e.co2_amount).sum();

    let goals = monthly_goals
        .iter()
        .map(|(month, &target_kg)| {
            let actual_kg = by_month.get(month).copied().unwrap_or(0.0);
            GoalProgress {
                month: month.clone(),
                target_kg,
                actual_kg: round_kg(actual_kg),
                remaining_kg: round_kg((target_kg - actual_kg).max(0.0)),
                on_track: actual_kg <= target_kg,
            }
        })
        .collect();

    Dashboard::Data(Box::new(Summary {
        total_co2: round_kg(total_co2),
        entry_count: entries.len(),
        days_span,
        daily_average: round_kg(total_co2 / days_span.max(1) as f64),
        top_category,
        by_day,
        by_month: by_month.into_iter().map(|(k, v)| (k, round_kg(v))).collect(),
        by_category: by_category
            .into_iter()
            .map(|(k, v)| (k, round_kg(v)))
            .collect(),
        recent: sorted_newest_first(entries.to_vec())
            .into_iter()
            .take(RECENT_LIMIT)
            .collect(),
        last_7_days_co2: round_kg(last_7_days_co2),
        last_7_days_entries: last_week.len(),
        week_grade: WeekGrade::for_total(last_7_days_co2),
        goals,
    }))
}

/// Sort by date, newest first; entries on the same day by creation time.
pub fn sorted_newest_first(mut entries: Vec<Entry>) -> Vec<Entry> {
    entries.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    entries
}

/// History view filter. All bounds are inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryFilter {
    pub category: Option<Category>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl EntryFilter {
    pub fn matches(&self, entry: &Entry) -> bool {
        self.category.is_none_or(|c| entry.category == c)
            && self.from.is_none_or(|from| entry.date >= from)
            && self.to.is_none_or(|to| entry.date <= to)
    }

    /// Matching entries, newest first, with their combined CO₂.
    pub fn apply(&self, entries: Vec<Entry>) -> (Vec<Entry>, f64) {
        let selected: Vec<Entry> = entries.into_iter().filter(|e| self.matches(e)).collect();
        let total = round_kg(selected.iter().map(|e| e.co2_amount).sum());
        (sorted_newest_first(selected), total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{date, entry, entry_on};

    fn summary(dashboard: Dashboard) -> Summary {
        match dashboard {
            Dashboard::Data(summary) => *summary,
            Dashboard::NoData => panic!("expected data"),
        }
    }

    #[test]
    fn empty_history_is_no_data() {
        let dashboard = summarize(&[], &BTreeMap::new(), date(2026, 3, 10));
        assert_eq!(dashboard, Dashboard::NoData);
        let json = serde_json::to_value(&dashboard).unwrap();
        assert_eq!(json["status"], "no_data");
    }

    #[test]
    fn zero_emission_history_still_has_data() {
        let history = vec![entry(3, Category::Transportation, 0.0)];
        let s = summary(summarize(&history, &BTreeMap::new(), date(2026, 3, 3)));
        assert_eq!(s.total_co2, 0.0);
        assert_eq!(s.days_span, 1);
        assert_eq!(s.week_grade, WeekGrade::APlus);
    }

    #[test]
    fn groups_by_day_month_and_category() {
        let history = vec![
            entry(1, Category::Diet, 2.0),
            entry(1, Category::Transportation, 3.0),
            entry(10, Category::Diet, 5.0),
            entry_on(date(2026, 4, 2), Category::Energy, 10.0),
        ];
        let s = summary(summarize(&history, &BTreeMap::new(), date(2026, 4, 2)));

        assert_eq!(s.total_co2, 20.0);
        assert_eq!(s.entry_count, 4);
        assert_eq!(s.days_span, 33);
        assert_eq!(s.daily_average, round_kg(20.0 / 33.0));
        assert_eq!(s.top_category, Category::Diet);

        assert_eq!(s.by_day.len(), 3);
        assert_eq!(s.by_day[0].co2, 5.0);
        assert_eq!(s.by_day[2].running_total, 20.0);

        assert_eq!(s.by_month["2026-03"], 10.0);
        assert_eq!(s.by_month["2026-04"], 10.0);
        assert_eq!(s.by_category[&Category::Diet], 7.0);
    }

    #[test]
    fn top_category_tie_prefers_declaration_order() {
        let history = vec![
            entry(1, Category::Energy, 1.0),
            entry(2, Category::Transportation, 1.0),
        ];
        let s = summary(summarize(&history, &BTreeMap::new(), date(2026, 3, 2)));
        assert_eq!(s.top_category, Category::Transportation);
    }

    #[test]
    fn recent_lists_five_newest() {
        let history: Vec<Entry> = (1..=8).map(|d| entry(d, Category::Home, 1.0)).collect();
        let s = summary(summarize(&history, &BTreeMap::new(), date(2026, 3, 8)));
        let days: Vec<u32> = s.recent.iter().map(|e| e.date.day()).collect();
        assert_eq!(days, [8, 7, 6, 5, 4]);
        assert_eq!(s.last_7_days_entries, 7);
        assert_eq!(s.last_7_days_co2, 7.0);
    }

    #[test]
    fn goal_progress_compares_month_totals() {
        let history = vec![entry(1, Category::Diet, 40.0), entry(2, Category::Diet, 30.0)];
        let mut goals = BTreeMap::new();
        goals.insert("2026-03".to_string(), 100.0);
        goals.insert("2026-04".to_string(), 50.0);
        let s = summary(summarize(&history, &goals, date(2026, 3, 2)));

        assert_eq!(s.goals.len(), 2);
        assert_eq!(s.goals[0].actual_kg, 70.0);
        assert_eq!(s.goals[0].remaining_kg, 30.0);
        assert!(s.goals[0].on_track);
        assert_eq!(s.goals[1].actual_kg, 0.0);
    }

    #[test]
    fn week_grades_follow_thresholds() {
        assert_eq!(WeekGrade::for_total(29.9), WeekGrade::APlus);
        assert_eq!(WeekGrade::for_total(30.0), WeekGrade::A);
        assert_eq!(WeekGrade::for_total(99.0), WeekGrade::B);
        assert_eq!(WeekGrade::for_total(150.0), WeekGrade::C);
    }

    #[test]
    fn filter_selects_by_category_and_inclusive_dates() {
        let history = vec![
            entry(1, Category::Diet, 1.0),
            entry(5, Category::Diet, 2.0),
            entry(9, Category::Diet, 4.0),
            entry(5, Category::Energy, 8.0),
        ];
        let filter = EntryFilter {
            category: Some(Category::Diet),
            from: Some(date(2026, 3, 5)),
            to: Some(date(2026, 3, 9)),
        };
        let (selected, total) = filter.apply(history);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].date, date(2026, 3, 9));
        assert_eq!(total, 6.0);
    }
}
