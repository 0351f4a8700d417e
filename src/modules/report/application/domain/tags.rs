use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;

use super::entities::{ActivityRecord, Category, Tag};
use super::stats::{active_month_count, category_hours};

const MAX_TAGS: usize = 5;

const DEFAULT_TAGS: [(&str, &str); 4] = [
    ("星火初燃", "这是你志愿旅程的起点，星星之火，终将燎原。"),
    ("全能帮手", "哪里需要去哪里，你是团队中不可或缺的万能砖。"),
    ("新手上路", "欢迎加入志愿大家庭，未来的路我们一起走。"),
    ("冬日限定", "在这个冬天，你留下了温暖的足迹。"),
];

/// Activity-name patterns that unlock a themed tag.
const KEYWORD_TAGS: [(&str, &str, u32, &str); 5] = [
    (
        "商火相传",
        "薪火引路人",
        60,
        "商火相传限定称号。你是新生的引路人，接过传承的火炬，用陪伴温暖了他们的初秋。",
    ),
    (
        "夏令营",
        "筑梦师",
        62,
        "何处是中国·筑梦夏令营限定称号。感谢你为孩子们筑起了梦想的城堡。",
    ),
    ("支教|课堂|授课", "课堂派", 52, "活跃在三尺讲台，传播知识的种子。"),
    ("探访|陪伴|慰问", "陪伴系", 52, "你的陪伴，是这一年最长情的告白。"),
    ("环保|巡河|净滩", "地球合伙人", 52, "为了蔚蓝澄净的世界，你一直在努力。"),
];

/// `KEYWORD_TAGS` compiled once. The patterns are constants, so a failure
/// here is a programming error.
static KEYWORD_MATCHERS: LazyLock<Vec<(Regex, &str, u32, &str)>> = LazyLock::new(|| {
    KEYWORD_TAGS
        .iter()
        .map(|&(pattern, tag, weight, desc)| {
            let re = Regex::new(pattern)
                .unwrap_or_else(|e| panic!("keyword pattern {pattern:?} is invalid: {e}"));
            (re, tag, weight, desc)
        })
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    fn of_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    fn tag(self) -> (&'static str, &'static str) {
        match self {
            Season::Spring => ("春风送暖", "春风十里不如你，你在春季的活跃度最高。"),
            Season::Summer => ("夏立蝉鸣", "烈日炎炎，挡不住你的热情，你在夏季最为活跃。"),
            Season::Autumn => ("金秋行动", "金秋时节，收获满满，你在秋季留下了最多的足迹。"),
            Season::Winter => ("冬日融融", "寒冬腊月，你是温暖的火光，你在冬季最为活跃。"),
        }
    }
}

fn role_tag(main: Category) -> (&'static str, &'static str) {
    match main {
        Category::Teaching => (
            "点灯人",
            "你主要投身于支教项目。愿做那一盏灯，照亮孩子们前行的路。",
        ),
        Category::Care => (
            "暖心天使",
            "你主要投身于社会关怀。温柔如你，总是把老人和孩子放在心上。",
        ),
        Category::Eco => ("环保先锋", "你主要投身于环保项目。守护碧水蓝天，你一直在行动。"),
        Category::Mind => ("心灵向导", "你主要投身于心理服务。善于倾听，用温暖的话语治愈心灵。"),
        Category::Others => ("全能帮手", "不限领域，哪里需要去哪里，你是最可靠的伙伴。"),
    }
}

fn hours_tier(total_hours: f64) -> (String, u32, String) {
    let whole = total_hours as i64;
    let (name, weight, desc) = if total_hours >= 200.0 {
        (
            "星河守望者",
            100,
            format!("累计志愿时长达到 {whole} 小时。你不仅是参与者，更是这片星河的守望者。"),
        )
    } else if total_hours >= 120.0 {
        (
            "百时守护",
            90,
            "累计志愿时长突破 100 小时。百尺竿头，感谢你长久的坚持。".to_string(),
        )
    } else if total_hours >= 60.0 {
        (
            "志愿达人",
            80,
            format!("累计志愿时长 {whole} 小时。你已经是商院青协的中坚力量！"),
        )
    } else if total_hours >= 30.0 {
        (
            "温暖续航",
            70,
            "你的爱心如同电池，持续为需要帮助的人提供能量。".to_string(),
        )
    } else if total_hours >= 10.0 {
        (
            "萤火拾光",
            60,
            "点点萤火，汇聚成光。感谢你贡献的每一分钟。".to_string(),
        )
    } else {
        (
            "星火初燃",
            50,
            "这是你志愿旅程的起点，星星之火，终将燎原。".to_string(),
        )
    };
    (name.to_string(), weight, desc)
}

fn default_tags() -> Vec<Tag> {
    DEFAULT_TAGS
        .iter()
        .map(|(name, desc)| Tag {
            name: name.to_string(),
            desc: desc.to_string(),
        })
        .collect()
}

/// Builds up to five personalised titles.
///
/// Candidates carry a weight; the pool is ordered by weight (stable), reduced
/// to the first occurrence of each name and topped up from the default set.
pub fn generate_tags(records: &[ActivityRecord], total_hours: f64, main: Category) -> Vec<Tag> {
    if records.is_empty() {
        return default_tags();
    }

    let event_count = records.len();
    let type_count = records
        .iter()
        .map(|r| r.activity_type.trim())
        .filter(|t| !t.is_empty())
        .collect::<HashSet<_>>()
        .len();
    let active_months = active_month_count(records);

    let (stats, _) = category_hours(records);
    let total_by_type = stats.total();
    let main_share = if total_by_type > 0.0 {
        stats.get(main) / total_by_type
    } else {
        0.0
    };

    let mut season_hours = [0.0_f64; 4];
    for record in records {
        if let Some(date) = record.activity_date {
            let season = Season::of_month(date.month());
            season_hours[season as usize] += record.hours;
        }
    }
    let mut best_season = Season::Spring;
    for season in Season::ALL {
        if season_hours[season as usize] > season_hours[best_season as usize] {
            best_season = season;
        }
    }

    let mut candidates: Vec<(String, u32, String)> = Vec::new();

    candidates.push(hours_tier(total_hours));

    let (role, role_desc) = role_tag(main);
    candidates.push((role.to_string(), 85, role_desc.to_string()));

    if main_share >= 0.75 && total_hours >= 20.0 {
        candidates.push((
            "专精玩家".to_string(),
            65,
            format!(
                "你在{}领域投入了超过 75% 的精力，是当之无愧的专家。",
                main.label()
            ),
        ));
    } else if type_count >= 3 {
        candidates.push((
            "多栖玩家".to_string(),
            70,
            "涉猎广泛，多种类型的志愿活动中都能看到你的身影。".to_string(),
        ));
    }

    if event_count >= 8 {
        candidates.push((
            "高频出没".to_string(),
            75,
            format!("这一年你参加了 {event_count} 场活动，简直是志愿活动的“钉子户”！"),
        ));
    } else if active_months >= 6 {
        candidates.push((
            "月更达人".to_string(),
            72,
            "一年中有超过 6 个月都在做志愿，你的坚持令人动容。".to_string(),
        ));
    } else if active_months >= 4 {
        candidates.push((
            "持续发光".to_string(),
            58,
            "每个季度都能看到你的身影，感谢你的持续付出。".to_string(),
        ));
    }

    let (season_tag, season_desc) = best_season.tag();
    candidates.push((season_tag.to_string(), 40, season_desc.to_string()));

    let names_joined = records
        .iter()
        .map(|r| r.activity_name.trim())
        .collect::<Vec<_>>()
        .join(" ");
    for (re, tag, weight, desc) in KEYWORD_MATCHERS.iter() {
        if re.is_match(&names_joined) {
            candidates.push((tag.to_string(), *weight, desc.to_string()));
        }
    }

    candidates.sort_by(|a, b| b.1.cmp(&a.1));

    let mut seen = HashSet::new();
    let mut tags: Vec<Tag> = candidates
        .into_iter()
        .filter(|(name, _, _)| seen.insert(name.clone()))
        .map(|(name, _, desc)| Tag { name, desc })
        .take(MAX_TAGS)
        .collect();

    for fallback in default_tags() {
        if tags.len() >= MAX_TAGS {
            break;
        }
        if tags.iter().all(|t| t.name != fallback.name) {
            tags.push(fallback);
        }
    }

    tags
}
