use std::collections::{BTreeMap, HashSet};

use chrono::{Duration, NaiveDate};

use super::entities::{ActivityRecord, Milestone};
use super::stats::{estimate_days, month_key};
use crate::shared::format::compact_number;

const MAX_MILESTONES: usize = 8;
const FREQUENT_ACTIVITY_MIN: usize = 3;
const DIVERSE_TYPES_MIN: usize = 3;
const HOUR_THRESHOLDS: [u32; 5] = [1, 10, 30, 50, 100];

fn threshold_title(threshold: u32) -> String {
    match threshold {
        1 => "点亮第一小时".to_string(),
        10 => "十时成就".to_string(),
        50 => "半百见证".to_string(),
        100 => "百时成就".to_string(),
        other => format!("{other}小时里程碑"),
    }
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y.%m.%d").to_string())
        .unwrap_or_default()
}

/// One day of an activity's hours, spread evenly over its estimated span.
struct DailyShare<'a> {
    day: NaiveDate,
    hours: f64,
    activity_name: &'a str,
}

/// Spreads each dated record backwards from its date (the last day) over
/// `estimate_days` days. Undated records contribute nothing.
fn spread_daily<'a>(records: &[&'a ActivityRecord]) -> Vec<DailyShare<'a>> {
    let mut shares = Vec::new();
    for &record in records {
        let Some(end) = record.activity_date else {
            continue;
        };
        let days = estimate_days(record).max(1);
        let per_day = record.hours / f64::from(days);
        let start = end - Duration::days(i64::from(days) - 1);
        for offset in 0..days {
            shares.push(DailyShare {
                day: start + Duration::days(i64::from(offset)),
                hours: per_day,
                activity_name: record.activity_name.as_str(),
            });
        }
    }
    shares.sort_by_key(|s| s.day);
    shares
}

/// Index of the first element holding the maximum key.
fn first_max_by<T>(items: &[T], key: impl Fn(&T) -> f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, item) in items.iter().enumerate() {
        let value = key(item);
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((i, value)),
        }
    }
    best.map(|(i, _)| i)
}

/// Builds the year's timeline: first record, sustained and peak activities,
/// cumulative-hour thresholds, frequent and diverse participation, the
/// busiest month and the closing record.
///
/// Entries are unique by `(title, date)` and capped at eight.
pub fn generate_milestones(records: &[ActivityRecord]) -> Vec<Milestone> {
    if records.is_empty() {
        return Vec::new();
    }

    // dated ascending, undated last; sort is stable
    let mut sorted: Vec<&ActivityRecord> = records.iter().collect();
    sorted.sort_by_key(|r| (r.activity_date.is_none(), r.activity_date));

    let mut milestones = Vec::new();
    let mut push = |date: String, title: String, content: String| {
        milestones.push(Milestone {
            date,
            title,
            content,
        })
    };

    let first = sorted[0];
    push(
        fmt_date(first.activity_date),
        "志愿启程".to_string(),
        format!(
            "那一天，你在「{}」留下了第一条志愿记录。",
            first.activity_name
        ),
    );

    let days: Vec<u32> = sorted.iter().map(|r| estimate_days(r)).collect();

    if let Some(i) = days.iter().position(|d| *d > 1) {
        let record = sorted[i];
        push(
            fmt_date(record.activity_date),
            "连续投入".to_string(),
            format!(
                "在「{}」中，你持续投入了 {} 天，把热爱变成了坚持。",
                record.activity_name, days[i]
            ),
        );
    }

    if let Some(i) = first_max_by(&sorted, |r| r.hours) {
        let record = sorted[i];
        if record.hours > 0.0 {
            let hours = compact_number(record.hours);
            let content = if days[i] > 1 {
                format!(
                    "在「{}」这段 {} 天的旅程里，你累计贡献了 {} 小时，真的很燃！",
                    record.activity_name, days[i], hours
                )
            } else {
                format!(
                    "在「{}」中，你贡献了 {} 小时，这是你的高光时刻。",
                    record.activity_name, hours
                )
            };
            push(fmt_date(record.activity_date), "高光时刻".to_string(), content);
        }
    }

    if let Some(i) = first_max_by(&days, |d| f64::from(*d)) {
        if days[i] > 1 {
            let record = sorted[i];
            push(
                fmt_date(record.activity_date),
                "深度项目".to_string(),
                format!(
                    "你在「{}」中持续投入 {} 天，热忱与耐心都在路上发光。",
                    record.activity_name, days[i]
                ),
            );
        }
    }

    let daily = spread_daily(&sorted);
    let mut cumulative = 0.0;
    let mut reached: HashSet<u32> = HashSet::new();
    for share in &daily {
        cumulative += share.hours;
        for threshold in HOUR_THRESHOLDS {
            if !reached.contains(&threshold) && cumulative >= f64::from(threshold) {
                push(
                    fmt_date(Some(share.day)),
                    threshold_title(threshold),
                    format!(
                        "在「{}」的过程中，你的累计时长首次达到 {} 小时。",
                        share.activity_name, threshold
                    ),
                );
                reached.insert(threshold);
            }
        }
        if reached.len() == HOUR_THRESHOLDS.len() {
            break;
        }
    }

    // most repeated activity name; ties go to the one seen first
    let mut name_counts: Vec<(&str, usize, Option<NaiveDate>)> = Vec::new();
    for record in &sorted {
        match name_counts
            .iter_mut()
            .find(|(name, _, _)| *name == record.activity_name)
        {
            Some(entry) => entry.1 += 1,
            None => name_counts.push((record.activity_name.as_str(), 1, record.activity_date)),
        }
    }
    if let Some(i) = first_max_by(&name_counts, |(_, count, _)| *count as f64) {
        let (name, count, date) = name_counts[i];
        if count >= FREQUENT_ACTIVITY_MIN {
            push(
                fmt_date(date),
                "高频参与".to_string(),
                format!("你在「{name}」中共出现了 {count} 次，热爱不是三分钟，而是反复奔赴。"),
            );
        }
    }

    let mut types_seen: Vec<&str> = Vec::new();
    let mut third_type_date = None;
    for record in &sorted {
        let activity_type = record.activity_type.trim();
        if activity_type.is_empty() || types_seen.contains(&activity_type) {
            continue;
        }
        types_seen.push(activity_type);
        if types_seen.len() == DIVERSE_TYPES_MIN {
            third_type_date = record.activity_date;
        }
    }
    if types_seen.len() >= DIVERSE_TYPES_MIN {
        push(
            fmt_date(third_type_date),
            "多元参与".to_string(),
            format!(
                "这一年，你跨越了 {} 类志愿方向，温暖不止一种形状。",
                types_seen.len()
            ),
        );
    }

    let mut per_month: BTreeMap<String, f64> = BTreeMap::new();
    for share in &daily {
        *per_month.entry(month_key(share.day)).or_default() += share.hours;
    }
    let months: Vec<(String, f64)> = per_month.into_iter().collect();
    if let Some(i) = first_max_by(&months, |(_, hours)| *hours) {
        let (month, hours) = &months[i];
        if *hours > 0.0 {
            push(
                String::new(),
                "最忙的月份".to_string(),
                format!(
                    "{month} 你累计服务 {} 小时——那个月，你一定很闪亮。",
                    compact_number(*hours)
                ),
            );
        }
    }

    let last_index = sorted.len() - 1;
    let last = sorted[last_index];
    let content = if days[last_index] > 1 {
        format!(
            "这是本年度最后一段「{}」旅程（持续 {} 天），为你的志愿时光画上温暖句号。",
            last.activity_name, days[last_index]
        )
    } else {
        format!(
            "这是本年度最后一次「{}」，为你的志愿时光画上一个温暖的句号。",
            last.activity_name
        )
    };
    push(fmt_date(last.activity_date), "暖心收官".to_string(), content);

    let mut seen = HashSet::new();
    milestones
        .into_iter()
        .filter(|m| seen.insert((m.title.clone(), m.date.clone())))
        .take(MAX_MILESTONES)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::application::domain::stats::fixtures::record;

    fn titles(milestones: &[Milestone]) -> Vec<&str> {
        milestones.iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn empty_history_has_no_milestones() {
        assert!(generate_milestones(&[]).is_empty());
    }

    #[test]
    fn single_short_activity_opens_and_closes_the_year() {
        let records = vec![record("社区探访", "关怀", "2024-03-09", 3.0)];

        let milestones = generate_milestones(&records);

        assert_eq!(
            titles(&milestones),
            vec!["志愿启程", "高光时刻", "点亮第一小时", "最忙的月份", "暖心收官"]
        );
        assert_eq!(milestones[0].date, "2024.03.09");
        assert!(milestones[0].content.contains("社区探访"));
        assert_eq!(milestones[3].date, "");
        assert!(milestones[3].content.starts_with("2024-03 你累计服务 3 小时"));
    }

    #[test]
    fn thresholds_are_dated_inside_the_spread() {
        // 14 days ending 2024-07-20, 2 hours a day
        let records = vec![record("何处是中国·筑梦夏令营", "支教", "2024-07-20", 28.0)];

        let milestones = generate_milestones(&records);

        let ten = milestones.iter().find(|m| m.title == "十时成就").unwrap();
        assert_eq!(ten.date, "2024.07.11");
        let first_hour = milestones.iter().find(|m| m.title == "点亮第一小时").unwrap();
        assert_eq!(first_hour.date, "2024.07.07");
        assert!(milestones.iter().any(|m| m.title == "连续投入"));
        assert!(milestones.iter().any(|m| m.title == "深度项目"));
    }

    #[test]
    fn frequent_and_diverse_participation_are_recognised() {
        let records = vec![
            record("周末课堂", "支教", "2024-03-02", 2.0),
            record("周末课堂", "支教", "2024-03-09", 2.0),
            record("巡河", "环保", "2024-04-01", 1.0),
            record("周末课堂", "支教", "2024-04-13", 2.0),
            record("倾听热线", "心之旅", "2024-05-01", 1.0),
        ];

        let milestones = generate_milestones(&records);

        let frequent = milestones.iter().find(|m| m.title == "高频参与").unwrap();
        assert_eq!(frequent.date, "2024.03.02");
        assert!(frequent.content.contains("3 次"));
        let diverse = milestones.iter().find(|m| m.title == "多元参与").unwrap();
        assert_eq!(diverse.date, "2024.05.01");
    }

    #[test]
    fn never_more_than_eight_and_unique() {
        let records = vec![
            record("线上支教", "线上支教", "2024-03-30", 40.0),
            record("巡河", "环保", "2024-04-01", 5.0),
            record("倾听热线", "心之旅", "2024-05-01", 30.0),
            record("倾听热线", "心之旅", "2024-05-08", 30.0),
            record("倾听热线", "心之旅", "2024-05-15", 30.0),
            record("商火相传", "商火", "2024-10-01", 20.0),
        ];

        let milestones = generate_milestones(&records);

        assert_eq!(milestones.len(), 8);
        let mut keys: Vec<_> = milestones
            .iter()
            .map(|m| (m.title.clone(), m.date.clone()))
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 8);
    }

    #[test]
    fn undated_records_sort_last_and_leave_empty_dates() {
        let mut undated = record("整理物资", "其他", "", 2.0);
        undated.activity_date = None;
        let records = vec![undated, record("巡河", "环保", "2024-06-01", 1.0)];

        let milestones = generate_milestones(&records);

        assert_eq!(milestones[0].title, "志愿启程");
        assert!(milestones[0].content.contains("巡河"));
        let last = milestones.last().unwrap();
        assert_eq!(last.title, "暖心收官");
        assert_eq!(last.date, "");
    }
}
