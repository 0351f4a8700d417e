//! Slides for visitors without a volunteer record.

use rand::Rng;

use super::{data_doubt_link, hanging_photo, rope_gallery, seal_button, slide};
use crate::presentation::markup::{el, Element};
use crate::presentation::record::OrgRecord;

fn figure(value: String, caption: &str) -> Element {
    el("div")
        .child(
            el("div")
                .style("font-size:2.5rem; color:var(--ruc-red); font-family:'Impact';")
                .text(value),
        )
        .child(el("div").style("font-size:0.8rem; color:#666;").text(caption))
}

pub fn stats_slide(org: &OrgRecord) -> Element {
    slide().child(
        el("div")
            .class("paper-card")
            .ani("animate__fadeInUp")
            .style("text-align:center; padding: 40px 20px;")
            .child(
                el("div")
                    .style("color:var(--ruc-red); letter-spacing:2px; font-weight:bold; margin-bottom:20px;")
                    .text("RMBS 2025"),
            )
            .child(
                el("h1")
                    .style("font-size:2rem; color:#333; margin:0;")
                    .text("汇聚微光"),
            )
            .child(
                el("div")
                    .style("margin-top:40px; display:flex; flex-direction:column; gap:25px;")
                    .child(figure(org.total_org_hours.to_string(), "年度志愿总时长 (h)"))
                    .child(figure(org.total_events.to_string(), "开展公益活动 (场)")),
            ),
    )
}

pub fn public_gallery_slide(org: &OrgRecord, rng: &mut impl Rng) -> Element {
    let photos: Vec<Element> = org
        .public_gallery
        .iter()
        .map(|url| hanging_photo(rng, Some(url), 180, None))
        .collect();

    slide()
        .child(
            el("div")
                .style("position:absolute; top:15%; width:100%; text-align:center;")
                .child(el("h2").style("color:var(--ruc-red);").text("精彩回顾"))
                .child(
                    el("p")
                        .style("font-size:0.8rem; color:#666;")
                        .text("这一年，我们一起走过的路"),
                ),
        )
        .child(rope_gallery(photos, false))
}

pub fn join_us_slide() -> Element {
    slide().child(
        el("div")
            .class("paper-card")
            .ani("animate__zoomIn")
            .style("text-align:center;")
            .child(el("h2").style("color:var(--ruc-red);").text("期待有你"))
            .child(
                el("p")
                    .style("font-family:'KaiTi'; color:#666; margin:30px 0; line-height:1.8;")
                    .text("遗憾未能在今年的档案中找到你")
                    .child(el("br"))
                    .text("但明年的故事")
                    .child(el("br"))
                    .text("希望能由你来共同书写"),
            )
            .child(seal_button("加入", "我们", None))
            .child(data_doubt_link("对结果有疑问？")),
    )
}

/// Stats, public gallery and call to action, in that order.
pub fn org_slides(org: &OrgRecord, rng: &mut impl Rng) -> Vec<Element> {
    vec![stats_slide(org), public_gallery_slide(org, rng), join_us_slide()]
}
