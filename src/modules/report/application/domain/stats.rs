use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::entities::{ActivityRecord, Category, MonthStat, StatMap};
use crate::shared::format::round1;

/// Estimated duration, in days, per activity type.
const ACTIVE_DAYS_WEIGHT: [(&str, u32); 6] = [
    ("线上支教", 35),
    ("夏令营", 14),
    ("返乡实践", 7),
    ("Buddy", 48),
    ("蒲公英", 28),
    ("商火", 30),
];

const SUMMER_CAMP: &str = "夏令营";
const ACTIVE_DAYS_CAP: u32 = 365;

/// Keeps ASCII digits only, so `138-0000 0000` and `13800000000` match.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn weight_of(key: &str) -> Option<u32> {
    ACTIVE_DAYS_WEIGHT
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, days)| *days)
}

/// How many days one participation is assumed to span.
pub fn estimate_days(record: &ActivityRecord) -> u32 {
    if record.activity_name.contains(SUMMER_CAMP) {
        return weight_of(SUMMER_CAMP).unwrap_or(1);
    }
    weight_of(record.activity_type.trim()).unwrap_or(1)
}

pub fn active_days(records: &[ActivityRecord]) -> u32 {
    records
        .iter()
        .map(estimate_days)
        .sum::<u32>()
        .min(ACTIVE_DAYS_CAP)
}

/// Hours per category, rounded to one decimal, together with the main
/// category (first maximum in canonical order, computed before rounding).
pub fn category_hours(records: &[ActivityRecord]) -> (StatMap, Category) {
    let mut stats = StatMap::default();
    for record in records {
        stats.add(record.category(), record.hours);
    }
    let main = stats.main_category();
    (stats.map_values(round1), main)
}

pub fn total_hours(records: &[ActivityRecord]) -> f64 {
    round1(records.iter().map(|r| r.hours).sum())
}

/// `YYYY-MM` key used by month statistics.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub fn month_stats(records: &[ActivityRecord]) -> Vec<MonthStat> {
    let mut months: BTreeMap<String, f64> = BTreeMap::new();
    for record in records {
        if let Some(date) = record.activity_date {
            *months.entry(month_key(date)).or_default() += record.hours;
        }
    }
    months
        .into_iter()
        .map(|(month, hours)| MonthStat {
            month,
            hours: round1(hours),
        })
        .collect()
}

/// Number of distinct `YYYY-MM` months with a dated record.
pub fn active_month_count(records: &[ActivityRecord]) -> usize {
    let mut months: Vec<String> = records
        .iter()
        .filter_map(|r| r.activity_date.map(month_key))
        .collect();
    months.sort();
    months.dedup();
    months.len()
}


#[cfg(test)]
mod tests {
    use super::fixtures::record;
    use super::*;

    #[test]
    fn normalize_phone_strips_separators() {
        assert_eq!(normalize_phone("138-0000 0000"), "13800000000");
        assert_eq!(normalize_phone("（2024）001"), "2024001");
        assert_eq!(normalize_phone(""), "");
    }

    #[test]
    fn summer_camp_in_name_wins_over_type() {
        let camp = record("何处是中国·筑梦夏令营", "支教", "2024-07-20", 40.0);
        let online = record("线上课堂", "线上支教", "2024-03-01", 2.0);
        let plain = record("社区探访", "关怀", "2024-03-02", 2.0);

        assert_eq!(estimate_days(&camp), 14);
        assert_eq!(estimate_days(&online), 35);
        assert_eq!(estimate_days(&plain), 1);
    }

    #[test]
    fn active_days_is_capped() {
        let records: Vec<_> = (0..10)
            .map(|_| record("Buddy 计划", "Buddy", "2024-05-01", 1.0))
            .collect();

        assert_eq!(active_days(&records), 365);
    }

    #[test]
    fn category_hours_rounds_and_picks_main() {
        let records = vec![
            record("支教一", "支教", "2024-03-01", 2.25),
            record("巡河", "环保", "2024-04-01", 3.0),
            record("未知", "线上支教", "2024-04-02", 1.0),
        ];

        let (stats, main) = category_hours(&records);

        assert_eq!(stats.get(Category::Teaching), 2.2);
        assert_eq!(stats.get(Category::Eco), 3.0);
        assert_eq!(stats.get(Category::Others), 1.0);
        assert_eq!(main, Category::Eco);
    }

    #[test]
    fn month_stats_skip_undated_and_sort() {
        let records = vec![
            record("b", "关怀", "2024-05-03", 2.0),
            record("a", "关怀", "2024-03-01", 1.0),
            record("c", "关怀", "not a date", 7.0),
            record("d", "关怀", "2024-05-20", 0.5),
        ];

        let stats = month_stats(&records);

        assert_eq!(
            stats,
            vec![
                MonthStat {
                    month: "2024-03".to_string(),
                    hours: 1.0
                },
                MonthStat {
                    month: "2024-05".to_string(),
                    hours: 2.5
                },
            ]
        );
        assert_eq!(active_month_count(&records), 2);
    }
}
