//! Client-side view of the `/api/get_annual_data` payload.
//!
//! Decoding accepts both camelCase and snake_case field names and fills every
//! missing or null field with its default, so a partial record still renders.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::report::application::domain::entities::{Category, OrgStats, StatMap};

pub const FALLBACK_TAG_DESC: &str = "这是属于你的年度独特印记。";
pub const FALLBACK_LETTER: [&str; 2] = ["见字如面。", "感谢这一年的付出。"];

/// Organisation overview shown to visitors without a volunteer record.
pub type OrgRecord = OrgStats;

fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Numbers, numeric strings and null all read as `f64`; anything else is 0.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    })
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MilestoneEntry {
    #[serde(deserialize_with = "or_default")]
    pub date: String,
    #[serde(deserialize_with = "or_default")]
    pub title: String,
    #[serde(deserialize_with = "or_default")]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ActivityEntry {
    #[serde(deserialize_with = "or_default")]
    pub title: String,
    pub img: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub date: String,
    #[serde(rename = "type", deserialize_with = "or_default")]
    pub activity_type: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub hours: f64,
}

/// A tag is either a bare name or a name with an explanation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TagEntry {
    Bare(String),
    Named {
        name: String,
        #[serde(default)]
        desc: Option<String>,
    },
}

impl TagEntry {
    pub fn name(&self) -> &str {
        match self {
            TagEntry::Bare(name) => name,
            TagEntry::Named { name, .. } => name,
        }
    }

    pub fn desc(&self) -> &str {
        match self {
            TagEntry::Named {
                desc: Some(desc), ..
            } => desc,
            _ => FALLBACK_TAG_DESC,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LetterContent {
    Paragraphs(Vec<String>),
    Single(String),
}

impl LetterContent {
    pub fn paragraphs(&self) -> Vec<String> {
        match self {
            LetterContent::Paragraphs(lines) => lines.clone(),
            LetterContent::Single(text) => vec![text.clone()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(alias = "is_volunteer", deserialize_with = "or_default")]
    pub is_volunteer: bool,
    #[serde(deserialize_with = "or_default")]
    pub name: String,
    #[serde(alias = "total_hours", deserialize_with = "lenient_f64")]
    pub total_hours: f64,
    #[serde(alias = "main_type", deserialize_with = "or_default")]
    pub main_type: String,
    pub stats: StatMap,
    #[serde(deserialize_with = "or_default")]
    pub milestones: Vec<MilestoneEntry>,
    #[serde(deserialize_with = "or_default")]
    pub activities: Vec<ActivityEntry>,
    #[serde(alias = "co_volunteers", deserialize_with = "or_default")]
    pub co_volunteers: Vec<String>,
    #[serde(alias = "letter_content")]
    pub letter_content: Option<LetterContent>,
    #[serde(deserialize_with = "or_default")]
    pub tags: Vec<TagEntry>,
    #[serde(alias = "org_data")]
    pub org_data: Option<OrgRecord>,
}

impl UserRecord {
    /// Letter paragraphs, or the short built-in letter when none were sent.
    pub fn letter_paragraphs(&self) -> Vec<String> {
        match &self.letter_content {
            Some(content) => content.paragraphs(),
            None => FALLBACK_LETTER.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// Main department label as the certificate shows it.
    pub fn core_field(&self) -> &str {
        match self.main_type.as_str() {
            "其他" | "others" => "综合",
            other => other,
        }
    }

    pub fn stat(&self, category: Category) -> f64 {
        self.stats.get(category)
    }
}

/// Which slide set a response selects.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchedRecord {
    Volunteer(UserRecord),
    Organization(OrgRecord),
}

impl FetchedRecord {
    /// Reads the `data` member of a successful response. The volunteer flag
    /// (`isVolunteer` or `is_volunteer`) selects the shape; an organisation
    /// record is read from `org_data`/`orgData`, or from `data` itself.
    pub fn from_data(data: &Value) -> Result<Self, serde_json::Error> {
        let flag = data
            .get("isVolunteer")
            .or_else(|| data.get("is_volunteer"))
            .and_then(Value::as_bool)
            .unwrap_or(false);

        if flag {
            return UserRecord::deserialize(data).map(FetchedRecord::Volunteer);
        }

        let org = data
            .get("org_data")
            .or_else(|| data.get("orgData"))
            .filter(|v| v.is_object())
            .unwrap_or(data);
        OrgRecord::deserialize(org).map(FetchedRecord::Organization)
    }

    pub fn is_volunteer(&self) -> bool {
        matches!(self, FetchedRecord::Volunteer(_))
    }

    pub fn org(&self) -> Option<&OrgRecord> {
        match self {
            FetchedRecord::Volunteer(user) => user.org_data.as_ref(),
            FetchedRecord::Organization(org) => Some(org),
        }
    }

    pub fn activities(&self) -> &[ActivityEntry] {
        match self {
            FetchedRecord::Volunteer(user) => &user.activities,
            FetchedRecord::Organization(_) => &[],
        }
    }
}
