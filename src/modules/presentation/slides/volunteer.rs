use rand::Rng;

use super::{hanging_photo, rope_gallery, scroll_footer, seal_button, slide};
use crate::presentation::markup::{el, Element};
use crate::presentation::record::{ActivityEntry, MilestoneEntry, TagEntry};

pub const PARTNER_CANVAS_ID: &str = "partnerCanvas";
pub const MAX_PARTNER_NAMES: usize = 25;
pub const LETTER_SIGNATURE: &str = "2025 商院青协";

//
// ──────────────────────────────────────────────────────────
// Timeline
// ──────────────────────────────────────────────────────────
//

fn film_item(index: usize, milestone: &MilestoneEntry) -> Element {
    el("div")
        .class("film-item")
        .ani("animate__fadeInUp")
        .style(&format!("animation-delay:{:.1}s", 0.1 + index as f64 * 0.1))
        .child(el("div").class("film-dot"))
        .child(el("div").class("film-date").text(milestone.date.as_str()))
        .child(el("div").class("film-title").text(milestone.title.as_str()))
        .child(el("div").class("film-content").text(milestone.content.as_str()))
}

fn empty_film_item() -> Element {
    el("div")
        .class("film-item")
        .ani("animate__fadeInUp")
        .child(el("div").class("film-dot"))
        .child(
            el("div")
                .class("film-content")
                .style("text-align:center; color:#999; padding:20px 0;")
                .text("平凡的每一天")
                .child(el("br"))
                .text("都因为你的坚持而不凡"),
        )
}

/// Milestones in the order received; a placeholder entry when there are none.
pub fn timeline_slide(milestones: &[MilestoneEntry]) -> Element {
    let items: Vec<Element> = if milestones.is_empty() {
        vec![empty_film_item()]
    } else {
        milestones
            .iter()
            .enumerate()
            .map(|(i, m)| film_item(i, m))
            .collect()
    };

    slide()
        .child(
            el("div")
                .style("position:absolute; top:6%; left:0; width:100%; text-align:center; z-index:5;")
                .ani("animate__fadeInDown")
                .child(
                    el("div")
                        .style("font-size:1.6rem; color:#A61C26; font-weight:bold; letter-spacing:2px;")
                        .text("独家记忆"),
                )
                .child(
                    el("div")
                        .style("font-size:0.8rem; color:#888; margin-top:5px; font-family:'KaiTi';")
                        .text("Memory Timeline"),
                ),
        )
        .child(
            el("div")
                .class("film-container swiper-no-swiping")
                .children(items),
        )
        .children(scroll_footer())
}

//
// ──────────────────────────────────────────────────────────
// Gallery
// ──────────────────────────────────────────────────────────
//

/// One hanging photo per activity, in the order received.
pub fn gallery_slide(activities: &[ActivityEntry], rng: &mut impl Rng) -> Element {
    let pages: Vec<Element> = if activities.is_empty() {
        vec![el("div")
            .style("text-align:center;color:#999;padding-top:60px;")
            .text("本年度暂无活动影像记录")
            .child(el("br"))
            .text("期待你的下一次出发")]
    } else {
        activities
            .iter()
            .map(|act| {
                hanging_photo(
                    rng,
                    act.img.as_deref(),
                    160,
                    Some((act.title.as_str(), act.activity_type.as_str(), act.date.as_str())),
                )
            })
            .collect()
    };

    slide()
        .child(
            el("div")
                .style("position:absolute; top:12%; width:100%; text-align:center;")
                .ani("animate__fadeIn")
                .child(
                    el("h2")
                        .style("color:var(--ruc-red); margin-bottom:5px;")
                        .text("时光掠影"),
                )
                .child(
                    el("span")
                        .style("font-size:0.8rem; color:#888;")
                        .text("左右滑动查看"),
                ),
        )
        .child(rope_gallery(pages, true))
        .children(scroll_footer())
}

//
// ──────────────────────────────────────────────────────────
// Constellation
// ──────────────────────────────────────────────────────────
//

/// Names the particle animation floats, in the order received.
pub fn partner_names(co_volunteers: &[String]) -> Vec<String> {
    co_volunteers
        .iter()
        .take(MAX_PARTNER_NAMES)
        .cloned()
        .collect()
}

pub fn constellation_slide(co_volunteer_count: usize) -> Element {
    let overlay = el("div")
        .class("data-overlay")
        .ani("animate__fadeInUp")
        .child(
            el("div")
                .style("color:#555; margin-bottom:10px;")
                .text("这一年，你并不孤单"),
        )
        .child(
            el("div")
                .style("font-size:1rem; line-height:1.6; color:#333;")
                .text("与 ")
                .child(
                    el("span")
                        .class("highlight-num")
                        .text(co_volunteer_count.to_string()),
                )
                .text(" 位同行者")
                .child(el("br"))
                .text("在志愿路上留下了足迹"),
        )
        .child(el("div").style(
            "margin-top:15px; height:1px; background:linear-gradient(to right, transparent, #A61C26, transparent); opacity:0.3;",
        ))
        .child(
            el("p")
                .style("font-family:'KaiTi'; color:#666; font-size:0.9rem; margin-top:15px;")
                .text("每一次相遇，")
                .child(el("br"))
                .text("都是一条温暖的纽带。"),
        );

    slide()
        .child(
            el("div")
                .class("constellation-slide")
                .child(el("canvas").id(PARTNER_CANVAS_ID))
                .child(
                    el("div")
                        .style("position:absolute; top:10%; width:100%; text-align:center; z-index:5;")
                        .ani("animate__fadeInDown")
                        .child(
                            el("div")
                                .style("font-size:1.8rem; color:var(--ruc-red); letter-spacing:3px;")
                                .text("星火相聚"),
                        )
                        .child(
                            el("div")
                                .style("font-size:0.8rem; color:#888; font-family:'KaiTi';")
                                .text("Connection & Warmth"),
                        ),
                )
                .child(overlay),
        )
        .children(scroll_footer())
}

//
// ──────────────────────────────────────────────────────────
// Letter
// ──────────────────────────────────────────────────────────
//

pub fn letter_slide(name: &str, paragraphs: &[String]) -> Element {
    let body = paragraphs
        .iter()
        .map(|p| el("p").style("margin-bottom:10px;").text(p.as_str()));

    let letter = el("div")
        .class("envelope-letter")
        .child(
            el("div")
                .style("font-weight:bold; margin-bottom:10px; font-size:1.1rem; flex-shrink: 0;")
                .text(format!("亲爱的 {name}:")),
        )
        .child(
            el("div")
                .class("letter-scroll-area swiper-no-swiping")
                .children(body),
        )
        .child(
            el("div")
                .style("text-align:right; margin-top:10px; color:var(--ruc-red); font-size:0.85rem; flex-shrink: 0;")
                .text(LETTER_SIGNATURE),
        );

    slide()
        .child(
            el("div")
                .style("text-align:center; margin-bottom:10px; margin-top: 20px; color:#888; font-size: 0.9rem;")
                .ani("animate__fadeIn")
                .text("这里有一封给你的信"),
        )
        .child(
            el("div")
                .class("envelope-wrapper")
                .ani("animate__fadeInUp")
                .attr("data-action", "open-envelope")
                .child(el("div").class("envelope-body"))
                .child(el("div").class("envelope-flap"))
                .child(el("div").class("wax-seal"))
                .child(letter),
        )
        .child(
            el("div")
                .id("click-hint")
                .style("margin-top:60px; color:#bbb; font-size:0.8rem; text-align:center; animation: pulse 2s infinite;")
                .text("点击火漆印开启"),
        )
        .children(scroll_footer())
}

//
// ──────────────────────────────────────────────────────────
// Tags
// ──────────────────────────────────────────────────────────
//

pub fn tag_chip(tag: &TagEntry) -> Element {
    el("span")
        .class("tag-item")
        .attr("data-action", "show-tag")
        .attr("data-tag-name", tag.name())
        .attr("data-tag-desc", tag.desc())
        .text(tag.name())
}

pub fn tags_slide(tags: &[TagEntry]) -> Element {
    slide().child(
        el("div")
            .class("paper-card")
            .ani("animate__zoomIn")
            .style("text-align:center;")
            .child(el("h2").style("color:var(--ruc-red);").text("年度画像"))
            .child(
                el("div")
                    .style("margin-top:25px; margin-bottom:5px;")
                    .children(tags.iter().map(tag_chip)),
            )
            .child(el("div").class("click-hint-text").text("点击标签了解含义"))
            .child(
                el("p")
                    .style("font-family:'KaiTi'; color:#666; margin-bottom:30px;")
                    .text("感谢有你，微光成炬")
                    .child(el("br"))
                    .text("明年，我们继续同行"),
            )
            .child(seal_button("生成", "证书", Some("1rem"))),
    )
}
