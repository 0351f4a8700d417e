use crate::report::application::domain::entities::{
    ActivitySummary, Category, Milestone, MonthStat, OrgStats, StatMap, Tag, VolunteerReport,
};

pub fn sample_volunteer_report() -> VolunteerReport {
    VolunteerReport {
        is_volunteer: true,
        name: "林晓".to_string(),
        total_hours: 42.5,
        main_type: "支教".to_string(),
        stats: [(Category::Teaching, 30.0), (Category::Care, 12.5)]
            .into_iter()
            .collect::<StatMap>(),
        tags: vec![Tag {
            name: "筑梦人".to_string(),
            desc: "在讲台上留下了最多的时光".to_string(),
        }],
        activities: vec![ActivitySummary {
            activity_type: "支教".to_string(),
            title: "周末课堂".to_string(),
            date: "2024.03".to_string(),
            img: Some("/media/images/read.jpg".to_string()),
            hours: 4.0,
        }],
        co_volunteers: vec!["周一".to_string(), "陈二".to_string()],
        org_data: OrgStats::default(),
        total_days: 120,
        milestones: vec![Milestone {
            date: "2024.03.02".to_string(),
            title: "初次相遇".to_string(),
            content: "参加了第一次志愿活动：周末课堂".to_string(),
        }],
        month_stats: vec![MonthStat {
            month: "2024-03".to_string(),
            hours: 4.0,
        }],
        letter_content: vec!["见字如面。".to_string()],
    }
}
