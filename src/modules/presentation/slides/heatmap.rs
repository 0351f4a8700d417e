use super::{scroll_footer, slide};
use crate::presentation::markup::{el, Element};
use crate::presentation::record::ActivityEntry;

pub const INFO_BOX_ID: &str = "heatmap-info-box";
pub const CELL_CLASS: &str = "heatmap-cell";
pub const IDLE_MONTH_TEXT: &str = "这个月在积蓄力量";
const TITLE_SEPARATOR: &str = "、";

/// Month number from a date such as `2024.03`, `2024-3` or `2024/11`: the
/// leading digits of the second component. Anything outside 1–12 is `None`.
pub fn parse_month(date: &str) -> Option<u32> {
    let second = date.split(|c: char| matches!(c, '.' | '-' | '/')).nth(1)?;
    let digits: String = second
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let month: u32 = digits.parse().ok()?;
    (1..=12).contains(&month).then_some(month)
}

/// Activity titles per month, January first.
pub fn bucket_by_month(activities: &[ActivityEntry]) -> [Vec<String>; 12] {
    let mut months: [Vec<String>; 12] = Default::default();
    for activity in activities {
        if let Some(month) = parse_month(&activity.date) {
            months[(month - 1) as usize].push(activity.title.clone());
        }
    }
    months
}

pub fn active_month_count(months: &[Vec<String>; 12]) -> usize {
    months.iter().filter(|titles| !titles.is_empty()).count()
}

fn cell(month: u32, titles: &[String]) -> Element {
    let active = !titles.is_empty();
    let (background, content) = if active {
        ("background:rgba(166,28,38, 0.85);", titles.join(TITLE_SEPARATOR))
    } else {
        ("background:rgba(166,28,38, 0.05);", IDLE_MONTH_TEXT.to_string())
    };

    let mut cell = el("div")
        .class(CELL_CLASS)
        .style(background)
        .attr("data-action", "show-heatmap-tip")
        .attr("data-month", month.to_string())
        .attr("data-date", format!("{month}月"))
        .attr("data-content", content)
        .text(month.to_string());
    if active {
        cell.add_class("active");
    }
    cell
}

pub fn heatmap_slide(activities: &[ActivityEntry]) -> Element {
    let months = bucket_by_month(activities);
    let cells = (1..=12u32).map(|m| cell(m, &months[(m - 1) as usize]));

    let card = el("div")
        .class("paper-card")
        .ani("animate__zoomIn")
        .child(
            el("h3")
                .style("text-align:center; color:var(--ruc-red); margin-bottom:5px;")
                .text("志愿足迹"),
        )
        .child(el("div").style("width:40px; height:2px; background:#ddd; margin:10px auto 20px auto;"))
        .child(el("div").class("heatmap-grid").children(cells))
        .child(
            el("div")
                .id(INFO_BOX_ID)
                .class("heatmap-info-box")
                .child(el("div").class("hm-info-hint").text("点击深色月份，唤醒记忆")),
        )
        .child(
            el("div")
                .style("margin-top:15px; text-align:center; font-family:'KaiTi';")
                .text("这一年，你的身影")
                .child(el("br"))
                .text("点亮了 ")
                .child(
                    el("span")
                        .class("active-month-count")
                        .style("font-size:1.5rem; color:var(--ruc-red); font-family:'Impact';")
                        .text(active_month_count(&months).to_string()),
                )
                .text(" 个月份"),
        );

    slide().child(card).children(scroll_footer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::dom::{find_all_by_class, find_first_by_class};

    fn activity(title: &str, date: &str) -> ActivityEntry {
        ActivityEntry {
            title: title.to_string(),
            date: date.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn parses_month_from_common_separators() {
        assert_eq!(parse_month("2024.03"), Some(3));
        assert_eq!(parse_month("2024-9"), Some(9));
        assert_eq!(parse_month("2024/11/02"), Some(11));
        assert_eq!(parse_month("2025.9x"), Some(9));
        assert_eq!(parse_month("2024"), None);
        assert_eq!(parse_month("2024.13"), None);
        assert_eq!(parse_month("2024.00"), None);
        assert_eq!(parse_month("2024.春"), None);
        assert_eq!(parse_month(""), None);
    }

    #[test]
    fn active_months_count_distinct_parseable_months() {
        let activities = vec![
            activity("周末课堂", "2024.03"),
            activity("巡河", "2024-03"),
            activity("探访", "2024.09"),
            activity("整理物资", "2024"),
        ];

        let months = bucket_by_month(&activities);

        assert_eq!(active_month_count(&months), 2);
        assert_eq!(months[2], vec!["周末课堂", "巡河"]);
    }

    #[test]
    fn slide_has_twelve_cells_with_joined_titles() {
        let activities = vec![activity("周末课堂", "2024.03"), activity("巡河", "2024.03")];

        let slide = heatmap_slide(&activities);

        let cells = find_all_by_class(&slide, CELL_CLASS);
        assert_eq!(cells.len(), 12);
        let march = cells[2];
        assert!(march.has_class("active"));
        assert_eq!(march.get_attr("data-content"), Some("周末课堂、巡河"));
        assert_eq!(march.get_attr("data-date"), Some("3月"));
        assert!(!cells[0].has_class("active"));
        assert_eq!(cells[0].get_attr("data-content"), Some(IDLE_MONTH_TEXT));
        assert_eq!(
            find_first_by_class(&slide, "active-month-count")
                .unwrap()
                .text_content(),
            "1"
        );
    }
}
