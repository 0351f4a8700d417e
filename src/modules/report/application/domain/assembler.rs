use url::Url;

use super::entities::{
    ActivityRecord, ActivitySummary, AnnualReport, Category, GuestReport, OrgStats,
    VolunteerReport,
};
use super::milestones::generate_milestones;
use super::stats::{active_days, category_hours, month_stats, total_hours};
use super::tags::generate_tags;

pub const GALLERY_SIZE: usize = 6;
pub const MAX_CO_VOLUNTEERS: usize = 300;
/// Any origin works; only the path of the joined URL is kept.
const MEDIA_IMAGES_BASE: &str = "http://localhost/media/images";

const FALLBACK_LETTER_DEPT: &str = "其他";
const FALLBACK_LETTER: [&str; 2] = [
    "见字如面。",
    "这一年，你在人群里默默发光。愿你也被温柔以待。",
];

/// Server path for a cover file, each `/`-separated segment percent-encoded.
pub fn media_image_path(cover: &str) -> Option<String> {
    let mut url = Url::parse(MEDIA_IMAGES_BASE).ok()?;
    url.path_segments_mut().ok()?.extend(cover.split('/'));
    Some(url.path().to_string())
}

/// Most recent records first, undated ones last, at most [`GALLERY_SIZE`].
pub fn pick_gallery(records: &[ActivityRecord]) -> Vec<ActivitySummary> {
    let mut sorted: Vec<&ActivityRecord> = records.iter().collect();
    sorted.sort_by(|a, b| match (a.activity_date, b.activity_date) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    sorted
        .into_iter()
        .take(GALLERY_SIZE)
        .map(|record| ActivitySummary {
            activity_type: record.activity_type.clone(),
            title: record.activity_name.clone(),
            date: record
                .activity_date
                .map(|d| d.format("%Y.%m").to_string())
                .unwrap_or_default(),
            img: record
                .cover_img
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .and_then(media_image_path),
            hours: record.hours,
        })
        .collect()
}

/// Distinct activity names, in first-seen order.
pub fn activity_names(records: &[ActivityRecord]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for record in records {
        if !record.activity_name.is_empty() && !names.contains(&record.activity_name) {
            names.push(record.activity_name.clone());
        }
    }
    names
}

/// Everyone else seen in the same activities, most frequent first. Ties keep
/// the order in which names first appear in `related`.
pub fn co_volunteers(own: &[ActivityRecord], related: &[ActivityRecord]) -> Vec<String> {
    let Some(me) = own.first().map(|r| r.name.as_str()) else {
        return Vec::new();
    };

    let mut counts: Vec<(&str, usize)> = Vec::new();
    for record in related {
        let name = record.name.as_str();
        if name == me || name.is_empty() {
            continue;
        }
        match counts.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 += 1,
            None => counts.push((name, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(MAX_CO_VOLUNTEERS)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Letter lines for the main department, falling back to the generic
/// department and then to a built-in two-line letter.
pub fn pick_dept_letter(main: Category, org: &OrgStats) -> Vec<String> {
    let lines = org
        .dept_letters
        .get(main.label())
        .or_else(|| org.dept_letters.get(FALLBACK_LETTER_DEPT))
        .filter(|lines| !lines.is_empty());

    match lines {
        Some(lines) => lines.clone(),
        None => FALLBACK_LETTER.iter().map(|l| l.to_string()).collect(),
    }
}

/// Turns a person's records into the report payload. No records means the
/// visitor gets the organisation overview instead.
pub fn assemble(
    name: &str,
    records: &[ActivityRecord],
    related: &[ActivityRecord],
    org: OrgStats,
) -> AnnualReport {
    if records.is_empty() {
        return AnnualReport::Guest(GuestReport::new(org));
    }

    let total = total_hours(records);
    let (stats, main) = category_hours(records);

    AnnualReport::Volunteer(VolunteerReport {
        is_volunteer: true,
        name: name.to_string(),
        total_hours: total,
        main_type: main.label().to_string(),
        stats,
        tags: generate_tags(records, total, main),
        activities: pick_gallery(records),
        co_volunteers: co_volunteers(records, related),
        total_days: active_days(records),
        milestones: generate_milestones(records),
        month_stats: month_stats(records),
        letter_content: pick_dept_letter(main, &org),
        org_data: org,
    })
}
