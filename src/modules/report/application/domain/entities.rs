use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

use crate::shared::format::compact_number;

//
// ──────────────────────────────────────────────────────────
// Category
// ──────────────────────────────────────────────────────────
//

/// The five fixed service categories, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Teaching,
    Care,
    Eco,
    Mind,
    Others,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Teaching,
        Category::Care,
        Category::Eco,
        Category::Mind,
        Category::Others,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Teaching => "teaching",
            Category::Care => "care",
            Category::Eco => "eco",
            Category::Mind => "mind",
            Category::Others => "others",
        }
    }

    /// Department name as written in activity records and letters.
    pub fn label(self) -> &'static str {
        match self {
            Category::Teaching => "支教",
            Category::Care => "关怀",
            Category::Eco => "环保",
            Category::Mind => "心之旅",
            Category::Others => "其他",
        }
    }

    /// Unknown activity types fall into `Others`.
    pub fn from_activity_type(activity_type: &str) -> Self {
        Self::from_label(activity_type.trim()).unwrap_or(Category::Others)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    fn index(self) -> usize {
        self as usize
    }
}

//
// ──────────────────────────────────────────────────────────
// StatMap
// ──────────────────────────────────────────────────────────
//

/// Hours (or scores) per category. Always holds all five categories; a
/// category missing from the wire form reads as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatMap {
    values: [f64; 5],
}

impl StatMap {
    pub fn get(&self, category: Category) -> f64 {
        self.values[category.index()]
    }

    pub fn set(&mut self, category: Category, value: f64) {
        self.values[category.index()] = value;
    }

    pub fn add(&mut self, category: Category, value: f64) {
        self.values[category.index()] += value;
    }

    /// Entries in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// First category holding the maximum value.
    pub fn main_category(&self) -> Category {
        let mut best = Category::Teaching;
        for (category, value) in self.iter() {
            if value > self.get(best) {
                best = category;
            }
        }
        best
    }

    pub fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        let mut out = *self;
        for v in out.values.iter_mut() {
            *v = f(*v);
        }
        out
    }
}

impl FromIterator<(Category, f64)> for StatMap {
    fn from_iter<I: IntoIterator<Item = (Category, f64)>>(iter: I) -> Self {
        let mut map = StatMap::default();
        for (category, value) in iter {
            map.set(category, value);
        }
        map
    }
}

impl Serialize for StatMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(5))?;
        for (category, value) in self.iter() {
            map.serialize_entry(category.key(), &value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StatMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<HashMap<String, serde_json::Value>>::deserialize(deserializer)?;
        let mut map = StatMap::default();
        for (key, value) in raw.unwrap_or_default() {
            let Some(category) = Category::from_key(&key) else {
                continue;
            };
            let number = match &value {
                serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
                serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
                _ => 0.0,
            };
            map.set(category, number);
        }
        Ok(map)
    }
}

//
// ──────────────────────────────────────────────────────────
// Figure
// ──────────────────────────────────────────────────────────
//

/// Organisation totals are either plain numbers or display strings such as
/// `"1200+"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Figure {
    Number(f64),
    Text(String),
}

impl Default for Figure {
    fn default() -> Self {
        Figure::Number(0.0)
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Figure::Number(n) => write!(f, "{}", compact_number(*n)),
            Figure::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Figure {
    fn from(value: &str) -> Self {
        Figure::Text(value.to_string())
    }
}

//
// ──────────────────────────────────────────────────────────
// Activity record (one ledger row)
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    pub name: String,
    pub phone: String,
    pub activity_name: String,
    pub activity_type: String,
    pub activity_date: Option<NaiveDate>,
    pub hours: f64,
    pub cover_img: Option<String>,
}

impl ActivityRecord {
    pub fn category(&self) -> Category {
        Category::from_activity_type(&self.activity_type)
    }
}

//
// ──────────────────────────────────────────────────────────
// Organisation statistics
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrgStats {
    #[serde(default, alias = "totalOrgHours")]
    pub total_org_hours: Figure,
    #[serde(default, alias = "totalEvents")]
    pub total_events: Figure,
    #[serde(default, alias = "totalPeople")]
    pub total_people: Figure,
    #[serde(default, alias = "publicGallery")]
    pub public_gallery: Vec<String>,
    /// One-line department summaries shown by the mini-game cards.
    #[serde(default, alias = "deptSummaries")]
    pub dept_summaries: BTreeMap<String, String>,
    /// Letter lines per main department.
    #[serde(default, alias = "deptLetters")]
    pub dept_letters: BTreeMap<String, Vec<String>>,
}

impl Default for OrgStats {
    fn default() -> Self {
        let summaries = [
            ("支教", "这一年，我们用粉笔和笑声点亮了三省五地的课堂。"),
            ("关怀", "这一年，我们陪伴了无数个孤独的黄昏和清晨。"),
            ("环保", "这一年，我们用行动让星河更清澈。"),
            ("心之旅", "这一年，我们在一次次对话中，拥抱彼此的情绪。"),
        ];
        let letters: [(&str, [&str; 2]); 5] = [
            (
                "支教",
                [
                    "见字如面，小小的粉笔，曾在你的指尖跳舞。",
                    "因为有你，那些偏远的教室，多了一束温柔的光。",
                ],
            ),
            (
                "关怀",
                [
                    "你走进的每一间屋子，都悄悄改变了那里的空气。",
                    "你握住的每一只手，都把冬天拉近了春天。",
                ],
            ),
            (
                "环保",
                [
                    "你弯下腰捡起的一片片垃圾，是守护星河的最初一步。",
                    "山川湖海，会记得你轻轻的守护。",
                ],
            ),
            (
                "心之旅",
                [
                    "你愿意听别人说话的样子，本身就是一种很温柔的力量。",
                    "愿你也被温柔以待，在倾听别人的同时，好好照顾自己。",
                ],
            ),
            (
                "其他",
                [
                    "你可能已经忘记那些被你填满的周末，但时光记得。",
                    "谢谢你在忙碌的日子里，仍然愿意把时间留给公益。",
                ],
            ),
        ];

        Self {
            total_org_hours: Figure::from("12580"),
            total_events: Figure::from("86"),
            total_people: Figure::from("1200+"),
            public_gallery: Vec::new(),
            dept_summaries: summaries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            dept_letters: letters
                .into_iter()
                .map(|(k, lines)| (k.to_string(), lines.iter().map(|l| l.to_string()).collect()))
                .collect(),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Report records (wire shape of /api/get_annual_data)
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Tag {
    pub name: String,
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Milestone {
    /// `YYYY.MM.DD`, empty when the milestone has no single day.
    pub date: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActivitySummary {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub title: String,
    /// `YYYY.MM`, empty for undated records.
    pub date: String,
    pub img: Option<String>,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthStat {
    /// `YYYY-MM`
    pub month: String,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct VolunteerReport {
    pub is_volunteer: bool,
    pub name: String,
    #[serde(rename = "totalHours")]
    pub total_hours: f64,
    #[serde(rename = "mainType")]
    pub main_type: String,
    #[schema(value_type = Object)]
    pub stats: StatMap,
    pub tags: Vec<Tag>,
    pub activities: Vec<ActivitySummary>,
    pub co_volunteers: Vec<String>,
    pub org_data: OrgStats,
    pub total_days: u32,
    pub milestones: Vec<Milestone>,
    pub month_stats: Vec<MonthStat>,
    pub letter_content: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GuestReport {
    pub is_volunteer: bool,
    pub name: String,
    pub org_data: OrgStats,
}

pub const GUEST_NAME: &str = "未来的伙伴";

impl GuestReport {
    pub fn new(org_data: OrgStats) -> Self {
        Self {
            is_volunteer: false,
            name: GUEST_NAME.to_string(),
            org_data,
        }
    }
}

/// Either a personal report or, for visitors without records, the
/// organisation overview.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AnnualReport {
    Volunteer(VolunteerReport),
    Guest(GuestReport),
}

impl AnnualReport {
    pub fn is_volunteer(&self) -> bool {
        matches!(self, AnnualReport::Volunteer(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_activity_type_maps_to_others() {
        assert_eq!(Category::from_activity_type("支教"), Category::Teaching);
        assert_eq!(Category::from_activity_type(" 心之旅 "), Category::Mind);
        assert_eq!(Category::from_activity_type("线上支教"), Category::Others);
        assert_eq!(Category::from_activity_type(""), Category::Others);
    }

    #[test]
    fn stat_map_serializes_in_canonical_order() {
        let stats: StatMap = [(Category::Mind, 3.0), (Category::Teaching, 1.5)]
            .into_iter()
            .collect();

        let text = serde_json::to_string(&stats).unwrap();

        assert_eq!(
            text,
            r#"{"teaching":1.5,"care":0.0,"eco":0.0,"mind":3.0,"others":0.0}"#
        );
    }

    #[test]
    fn stat_map_tolerates_missing_and_textual_values() {
        let stats: StatMap =
            serde_json::from_value(json!({ "care": "12.5", "eco": 4, "bogus": 99 })).unwrap();

        assert_eq!(stats.get(Category::Care), 12.5);
        assert_eq!(stats.get(Category::Eco), 4.0);
        assert_eq!(stats.get(Category::Teaching), 0.0);
        assert_eq!(stats.total(), 16.5);
    }

    #[test]
    fn main_category_prefers_first_on_tie() {
        let stats: StatMap = [(Category::Eco, 5.0), (Category::Care, 5.0)]
            .into_iter()
            .collect();
        assert_eq!(stats.main_category(), Category::Care);

        assert_eq!(StatMap::default().main_category(), Category::Teaching);
    }

    #[test]
    fn figure_accepts_numbers_and_display_strings() {
        let org: OrgStats = serde_json::from_value(json!({
            "total_org_hours": 12580,
            "totalPeople": "1200+"
        }))
        .unwrap();

        assert_eq!(org.total_org_hours.to_string(), "12580");
        assert_eq!(org.total_people.to_string(), "1200+");
        assert_eq!(org.total_events.to_string(), "0");
        assert!(org.public_gallery.is_empty());
    }

    #[test]
    fn guest_report_serializes_flag_and_name() {
        let report = AnnualReport::Guest(GuestReport::new(OrgStats::default()));
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["is_volunteer"], false);
        assert_eq!(value["name"], GUEST_NAME);
        assert_eq!(value["org_data"]["total_people"], "1200+");
        assert!(!report.is_volunteer());
    }
}
