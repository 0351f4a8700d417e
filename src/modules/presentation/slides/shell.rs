//! The static page: cover and gate slides, the static tail (mini-game and
//! closing poster slide), the overlay layer and the document wrapper.

use super::{scroll_footer, seal_button, slide};
use crate::presentation::markup::{el, Element};

pub const GAME_SLIDE_ID: &str = "game-slide";
pub const GAME_CARD_COUNT: usize = 4;
pub const OVERLAYS_ID: &str = "overlays";
pub const DEFAULT_POSTER_TAG: &str = "年度记忆";

const STYLESHEETS: [&str; 3] = [
    "https://cdn.jsdelivr.net/npm/swiper@11/swiper-bundle.min.css",
    "https://cdn.jsdelivr.net/npm/animate.css@4/animate.min.css",
    "/static/css/annual_report.css",
];

//
// ──────────────────────────────────────────────────────────
// Leading slides
// ──────────────────────────────────────────────────────────
//

pub fn cover_slide() -> Element {
    slide()
        .class("cover-slide")
        .child(
            el("div")
                .class("paper-card")
                .ani("animate__fadeInDown")
                .style("text-align:center; padding:40px 20px;")
                .child(
                    el("div")
                        .style("color:var(--ruc-red); letter-spacing:2px; font-weight:bold;")
                        .text("RMBS 2025"),
                )
                .child(
                    el("h1")
                        .style("font-size:2rem; color:#333; margin:15px 0;")
                        .text("志愿年度档案"),
                )
                .child(
                    el("p")
                        .style("font-family:'KaiTi'; color:#666;")
                        .text("微光成炬，温暖同行"),
                ),
        )
        .children(scroll_footer())
}

fn field(id: &str, placeholder: &str) -> Element {
    el("input")
        .id(id)
        .class("input-line")
        .attr("type", "text")
        .attr("placeholder", placeholder)
        .attr("autocomplete", "off")
}

/// The identity form. Forward paging stays locked here until a record exists.
pub fn gate_slide() -> Element {
    slide().child(
        el("div")
            .class("paper-card")
            .ani("animate__zoomIn")
            .style("text-align:center;")
            .child(el("h2").style("color:var(--ruc-red);").text("开启你的档案"))
            .child(field("input-name", "姓名"))
            .child(field("input-phone", "RUC学号"))
            .child(
                el("div")
                    .id("error-box")
                    .class("error-box")
                    .style("display:none;"),
            )
            .child(
                el("div")
                    .id("loading")
                    .style("display:none; color:#999; font-size:0.8rem;")
                    .text("正在翻阅档案..."),
            )
            .child(
                el("div")
                    .id("btn-fetch")
                    .class("btn-seal-wrapper")
                    .attr("data-action", "fetch")
                    .child(el("div").class("btn-seal"))
                    .child(el("div").class("seal-ink"))
                    .child(el("div").class("btn-text").text("查询")),
            ),
    )
}

//
// ──────────────────────────────────────────────────────────
// Static tail
// ──────────────────────────────────────────────────────────
//

fn game_icon(index: usize) -> Element {
    el("div")
        .id(&format!("icon-{index}"))
        .class("game-icon")
        .attr("data-action", "open-game")
        .attr("data-index", index.to_string())
}

pub fn game_slide() -> Element {
    slide()
        .id(GAME_SLIDE_ID)
        .class("game-slide")
        .child(
            el("div")
                .class("game-progress")
                .child(
                    el("div")
                        .class("game-progress-text")
                        .text("已点亮 ")
                        .child(el("span").id("collect-count").text("0"))
                        .text(format!(" / {GAME_CARD_COUNT}")),
                )
                .child(
                    el("div")
                        .class("progress-track")
                        .child(el("div").id("progress-fill").style("width: 0%;")),
                ),
        )
        .child(
            el("div")
                .class("game-map")
                .children((0..GAME_CARD_COUNT).map(game_icon)),
        )
        .child(
            el("div")
                .id("game-success-msg")
                .class("game-success-msg")
                .text("四盏灯已全部点亮，感谢你了解我们"),
        )
        .children(scroll_footer())
}

pub fn closing_slide() -> Element {
    slide().child(
        el("div")
            .class("paper-card")
            .ani("animate__zoomIn")
            .style("text-align:center;")
            .child(el("h2").style("color:var(--ruc-red);").text("把这一年带走"))
            .child(
                el("p")
                    .style("font-family:'KaiTi'; color:#666; margin-bottom:30px;")
                    .text("生成属于你的年度证书"),
            )
            .child(seal_button("生成", "证书", Some("1rem"))),
    )
}

/// Slides present before any record is fetched, in deck order.
pub fn leading_slides() -> Vec<Element> {
    vec![cover_slide(), gate_slide()]
}

pub fn tail_slides() -> Vec<Element> {
    vec![game_slide(), closing_slide()]
}

//
// ──────────────────────────────────────────────────────────
// Overlays
// ──────────────────────────────────────────────────────────
//

fn hidden_overlay(id: &str) -> Element {
    el("div").id(id).class("overlay").style("display:none;")
}

fn poster_modal() -> Element {
    let data_pair = |n: u8| {
        el("div")
            .class("p-data")
            .child(el("div").id(&format!("p-data{n}")).class("p-data-val"))
            .child(el("div").id(&format!("p-label{n}")).class("p-data-label"))
    };

    let card = el("div")
        .id("poster-card")
        .class("poster-card")
        .child(
            el("div")
                .id("p-img-bg")
                .class("p-img-bg")
                .attr("data-action", "open-img-choice")
                .child(el("div").id("p-tag-display").class("p-tag").text(DEFAULT_POSTER_TAG))
                .child(el("div").class("edit-hint-icon").text("点击换图")),
        )
        .child(el("div").id("p-name").class("p-name"))
        .child(el("div").id("p-desc").class("p-desc"))
        .child(el("div").class("p-data-row").child(data_pair(1)).child(data_pair(2)));

    hidden_overlay("poster-modal")
        .child(card)
        .child(
            el("div")
                .class("btn-save-img")
                .attr("data-action", "save-poster")
                .text("保存证书"),
        )
        .child(
            el("div")
                .class("modal-close")
                .attr("data-action", "close-poster")
                .text("×"),
        )
}

fn overlay_close(action: &str) -> Element {
    el("div").class("overlay-close").attr("data-action", action).text("×")
}

fn image_choice_overlay() -> Element {
    hidden_overlay("img-choice-overlay").child(
        el("div")
            .class("choice-card")
            .child(overlay_close("close-img-choice"))
            .child(
                el("div")
                    .id("btn-pick-from-gallery")
                    .class("choice-btn")
                    .attr("data-action", "open-photo-picker")
                    .text("从时光掠影选择"),
            )
            .child(
                el("div")
                    .class("choice-btn")
                    .attr("data-action", "trigger-upload")
                    .text("从相册上传"),
            )
            .child(
                el("input")
                    .id("image-upload-input")
                    .attr("type", "file")
                    .attr("accept", "image/*")
                    .style("display:none;"),
            ),
    )
}

fn photo_picker_overlay() -> Element {
    hidden_overlay("photo-picker-overlay").child(
        el("div")
            .class("picker-card")
            .child(overlay_close("close-photo-picker"))
            .child(el("div").class("picker-title").text("选择一张照片"))
            .child(el("div").id("photo-picker-grid").class("photo-picker-grid")),
    )
}

fn final_result_overlay() -> Element {
    el("div")
        .id("final-result-overlay")
        .class("final-result-overlay")
        .child(el("img").id("final-image").attr("alt", "证书"))
        .child(el("div").class("final-hint").text("长按图片保存"))
        .child(overlay_close("close-final-result"))
}

fn data_explanation_modal() -> Element {
    hidden_overlay("data-explanation-modal").child(
        el("div")
            .class("explain-card")
            .child(el("h3").text("数据说明"))
            .child(
                el("p").text(
                    "时长与活动记录来自各项目的志愿登记表，部分长期项目的天数为估算值。如有遗漏，请联系青协反馈。",
                ),
            )
            .child(
                el("div")
                    .class("explain-btn")
                    .attr("data-action", "close-data-explanation")
                    .text("知道了"),
            ),
    )
}

fn game_modal() -> Element {
    hidden_overlay("game-modal").child(
        el("div")
            .class("game-card")
            .child(
                el("div")
                    .class("swiper swiper-game")
                    .child(el("div").id("gm-swiper-wrapper").class("swiper-wrapper"))
                    .child(el("div").class("swiper-pagination")),
            )
            .child(el("div").id("gm-tag").class("card-tag"))
            .child(el("div").id("gm-title").class("card-title"))
            .child(el("div").class("card-divider"))
            .child(el("div").id("gm-desc").class("card-desc"))
            .child(
                el("div")
                    .class("card-stat")
                    .child(el("div").id("gm-stat-val").class("val"))
                    .child(el("div").id("gm-stat-label").class("label")),
            )
            .child(
                el("div")
                    .id("gm-btn")
                    .class("card-btn")
                    .attr("data-action", "close-game")
                    .text("点亮图标"),
            ),
    )
}

pub fn overlays() -> Element {
    el("div").id(OVERLAYS_ID).children([
        poster_modal(),
        image_choice_overlay(),
        photo_picker_overlay(),
        final_result_overlay(),
        data_explanation_modal(),
        game_modal(),
    ])
}

//
// ──────────────────────────────────────────────────────────
// Document
// ──────────────────────────────────────────────────────────
//

/// Full HTML document around the vertical deck.
pub fn page(slides: &[Element], overlays: &Element) -> String {
    let head = el("head")
        .child(el("meta").attr("charset", "utf-8"))
        .child(
            el("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1, user-scalable=no"),
        )
        .child(el("title").text("志愿年度档案"))
        .children(
            STYLESHEETS
                .iter()
                .map(|href| el("link").attr("rel", "stylesheet").attr("href", *href)),
        );

    let body = el("body")
        .child(
            el("div")
                .class("swiper swiper-v")
                .child(el("div").class("swiper-wrapper").children(slides.to_vec())),
        )
        .child(overlays.clone());

    let html = el("html").attr("lang", "zh-CN").child(head).child(body);
    format!("<!DOCTYPE html>{html}")
}
