use std::cmp::Ordering;

use super::{data_doubt_link, scroll_footer, slide};
use crate::presentation::markup::{el, Element};
use crate::report::application::domain::entities::{Category, StatMap};
use crate::shared::format::compact_number;

pub const SKILL_BAR_COUNT: usize = 4;
pub const RADAR_CANVAS_ID: &str = "radarChart";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillScore {
    pub category: Category,
    pub value: f64,
}

pub fn skill_label(category: Category) -> &'static str {
    match category {
        Category::Teaching => "支教项目",
        Category::Care => "社关项目",
        Category::Eco => "环保项目",
        Category::Mind => "心之旅",
        Category::Others => "综合服务",
    }
}

/// Single-colour stamp glyph per category.
fn icon_path(category: Category) -> Element {
    let path = el("path").attr("fill", "currentColor");
    match category {
        Category::Teaching => path.attr(
            "d",
            "M12 3L1 9l11 6 9-4.91V17h2V9M5 13.18v4L12 21l7-3.82v-4L12 17l-7-3.82z",
        ),
        Category::Care => path.attr(
            "d",
            "M12 21.35l-1.45-1.32C5.4 15.36 2 12.28 2 8.5 2 5.42 4.42 3 7.5 3c1.74 0 3.41.81 4.5 2.09C13.09 3.81 14.76 3 16.5 3 19.58 3 22 5.42 22 8.5c0 3.78-3.4 6.86-8.55 11.54L12 21.35z",
        ),
        Category::Eco => path
            .attr(
                "d",
                "M17 8C8 10 5.9 16.17 3.82 21.34 5.67 22.84 8.21 24 11 24c5.52 0 10-4.48 10-10 0-3.87-2.61-7.15-6-8.82z M11 22c-3.53 0-6.42-1.35-7.85-3.33L3 18.5c1.11-3.23 2.94-7.86 8-9.45.66 2.3 2.12 6.14 4.14 8.79l1.64 2.16C15.35 21.16 13.26 22 11 22z",
            )
            .attr("transform", "translate(0, -2)"),
        Category::Mind => path.attr(
            "d",
            "M9 21c0 .55.45 1 1 1h4c.55 0 1-.45 1-1v-1H9v1zm3-19C8.14 2 5 5.14 5 9c0 2.38 1.19 4.47 3 5.74V17c0 .55.45 1 1 1h6c.55 0 1-.45 1-1v-2.26c1.81-1.27 3-3.36 3-5.74 0-3.86-3.14-7-7-7zm2.85 11.1l-.85.6V16h-4v-2.3l-.85-.6C7.8 12.16 7 10.63 7 9c0-2.76 2.24-5 5-5s5 2.24 5 5c0 1.63-.8 3.16-2.15 4.1z",
        ),
        Category::Others => path.attr(
            "d",
            "M12 17.27L18.18 21l-1.64-7.03L22 9.24l-7.19-.61L12 2 9.19 8.63 2 9.24l5.46 4.73L5.82 21z",
        ),
    }
}

/// Categories by value, highest first; equal values keep canonical order.
pub fn rank_skills(stats: &StatMap) -> Vec<SkillScore> {
    let mut ranked: Vec<SkillScore> = stats
        .iter()
        .map(|(category, value)| SkillScore { category, value })
        .collect();
    ranked.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    ranked
}

/// Bar fill percentage; values are already on a 0–100 scale.
pub fn bar_percent(value: f64) -> f64 {
    if value > 0.0 {
        value.min(100.0)
    } else {
        0.0
    }
}

fn skill_row(index: usize, score: &SkillScore) -> Element {
    el("div")
        .class("skill-row")
        .style(&format!("animation-delay: {:.1}s", index as f64 * 0.1))
        .child(el("div").class("skill-name").text(skill_label(score.category)))
        .child(
            el("div").class("skill-track").child(
                el("div")
                    .class("skill-fill")
                    .attr(
                        "data-width",
                        format!("{}%", compact_number(bar_percent(score.value))),
                    )
                    .style("width: 0;"),
            ),
        )
        .child(el("div").class("skill-val").text(compact_number(score.value)))
}

/// Certification stamp for the top category, the radar canvas and the
/// top four categories as bars.
pub fn stamp_slide(stats: &StatMap) -> Element {
    let ranked = rank_skills(stats);
    let top = ranked
        .first()
        .map(|s| s.category)
        .unwrap_or(Category::Others);
    let stamp_text = skill_label(top).split('·').next().unwrap_or_default();

    let stamp = el("div")
        .class("stamp-area")
        .ani("animate__zoomIn")
        .child(
            el("div").class("stamp-box").child(
                el("div")
                    .class("stamp-inner")
                    .child(
                        el("svg")
                            .attr("viewBox", "0 0 24 24")
                            .attr("width", "45")
                            .attr("height", "45")
                            .style("color:#b53f3f; opacity:0.9;")
                            .child(icon_path(top)),
                    )
                    .child(el("div").class("stamp-text").text(stamp_text)),
            ),
        )
        .child(el("div").class("stamp-caption").text("核心领域认证"));

    let bars = ranked
        .iter()
        .take(SKILL_BAR_COUNT)
        .enumerate()
        .map(|(i, score)| skill_row(i, score));

    let card = el("div")
        .class("paper-card")
        .ani("animate__fadeInDown")
        .style("padding: 30px 20px;")
        .child(
            el("h3")
                .style("text-align:center; color:#555; margin-bottom:10px;")
                .text("年度能力评定"),
        )
        .child(stamp)
        .child(
            el("div")
                .class("radar-box")
                .style("height:180px; margin-top:15px;")
                .child(el("canvas").id(RADAR_CANVAS_ID)),
        )
        .child(
            el("div")
                .class("skill-list")
                .style("margin-top:25px;")
                .children(bars),
        )
        .child(data_doubt_link("如对数据有疑问请点击此处反馈哦~"));

    slide().child(card).children(scroll_footer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::dom::{find_all_by_class, find_by_id, find_first_by_class};

    fn stats(values: [f64; 5]) -> StatMap {
        Category::ALL.into_iter().zip(values).collect()
    }

    #[test]
    fn ranking_is_descending_and_stable_on_ties() {
        let ranked = rank_skills(&stats([5.0, 20.0, 5.0, 20.0, 1.0]));

        let order: Vec<Category> = ranked.iter().map(|s| s.category).collect();
        assert_eq!(
            order,
            vec![
                Category::Care,
                Category::Mind,
                Category::Teaching,
                Category::Eco,
                Category::Others
            ]
        );
    }

    #[test]
    fn renders_exactly_the_top_four_bars_capped_at_100() {
        let slide = stamp_slide(&stats([250.0, 40.0, 0.0, 12.5, 3.0]));

        let bars = find_all_by_class(&slide, "skill-row");
        assert_eq!(bars.len(), 4);

        let names: Vec<String> = find_all_by_class(&slide, "skill-name")
            .iter()
            .map(|n| n.text_content())
            .collect();
        assert_eq!(names, vec!["支教项目", "社关项目", "心之旅", "综合服务"]);

        let widths: Vec<&str> = find_all_by_class(&slide, "skill-fill")
            .iter()
            .filter_map(|f| f.get_attr("data-width"))
            .collect();
        assert_eq!(widths, vec!["100%", "40%", "12.5%", "3%"]);

        let values: Vec<String> = find_all_by_class(&slide, "skill-val")
            .iter()
            .map(|v| v.text_content())
            .collect();
        assert_eq!(values[0], "250");
    }

    #[test]
    fn stamp_shows_top_category_and_radar_canvas() {
        let slide = stamp_slide(&stats([0.0, 0.0, 8.0, 0.0, 0.0]));

        let stamp = find_first_by_class(&slide, "stamp-text").unwrap();
        assert_eq!(stamp.text_content(), "环保项目");
        assert!(find_by_id(&slide, RADAR_CANVAS_ID).is_some());
    }

    #[test]
    fn negative_values_render_empty_bars() {
        assert_eq!(bar_percent(-4.0), 0.0);
        assert_eq!(bar_percent(0.0), 0.0);
        assert_eq!(bar_percent(99.5), 99.5);
    }
}
