//! One template function per slide kind. Each returns a `div.swiper-slide`
//! tree built from already-decoded record values.

pub mod generator;
pub mod heatmap;
pub mod org;
pub mod shell;
pub mod skills;
pub mod volunteer;

use rand::Rng;

use super::markup::{el, Element};

pub const SCROLL_HINT: &str = "↓ 继续向下查看更多";

pub fn slide() -> Element {
    el("div").class("swiper-slide")
}

/// Bottom fade plus the pulsing "keep scrolling" hint shared by most slides.
pub fn scroll_footer() -> [Element; 2] {
    [
        el("div").style(
            "position:absolute; bottom:0; left:0; width:100%; height:60px; \
             background:linear-gradient(to top, #F4F1EA 20%, transparent); \
             pointer-events:none; z-index:6;",
        ),
        el("div")
            .style(
                "position:absolute; bottom:15px; width:100%; text-align:center; \
                 font-size:0.75rem; color:#aaa; animation:pulse 2s infinite; z-index:7;",
            )
            .text(SCROLL_HINT),
    ]
}

/// Small random tilt for a hanging photo, in degrees within ±2.
pub fn photo_tilt(rng: &mut impl Rng) -> String {
    format!("{:.1}", rng.gen_range(-2.0..=2.0_f64))
}

/// A photo pinned to the gallery rope.
pub fn hanging_photo(
    rng: &mut impl Rng,
    img: Option<&str>,
    image_height: u32,
    caption: Option<(&str, &str, &str)>,
) -> Element {
    let mut photo = el("div")
        .class("hanging-photo")
        .style(&format!("transform: rotate({}deg);", photo_tilt(rng)))
        .child(el("div").class("wood-clip"));

    if let Some(src) = img.filter(|s| !s.trim().is_empty()) {
        photo = photo.child(
            el("img")
                .attr("src", src)
                .attr("crossorigin", "anonymous")
                .style(&format!(
                    "width:100%; height:{image_height}px; object-fit:cover; margin-bottom:10px;"
                )),
        );
    }

    if let Some((title, kind, date)) = caption {
        photo = photo
            .child(el("div").style("font-size:0.9rem; color:#333;").text(title))
            .child(
                el("div")
                    .style(
                        "font-size:0.7rem; color:#999; display:flex; justify-content:space-between;",
                    )
                    .child(el("span").text(kind))
                    .child(el("span").text(date)),
            );
    }

    slide().child(photo)
}

/// Rope scene holding a nested horizontal carousel of photos.
pub fn rope_gallery(pages: Vec<Element>, animated: bool) -> Element {
    let mut scene = el("div").class("rope-scene");
    if animated {
        scene = scene.ani("animate__fadeInRight");
    }
    scene
        .child(
            el("svg")
                .class("rope-svg")
                .attr("viewBox", "0 0 500 100")
                .attr("preserveAspectRatio", "none")
                .child(
                    el("path")
                        .attr("d", "M0,10 Q250,60 500,10")
                        .attr("stroke", "#8D6E63")
                        .attr("stroke-width", "2")
                        .attr("fill", "none"),
                ),
        )
        .child(
            el("div")
                .class("swiper swiper-h")
                .child(el("div").class("swiper-wrapper").children(pages)),
        )
}

/// The round seal button used for poster generation.
pub fn seal_button(first: &str, second: &str, font_size: Option<&str>) -> Element {
    let mut style =
        String::from("width:120px; height:120px; border-width:4px; margin:0 auto;");
    if let Some(size) = font_size {
        style.push_str(&format!(" font-size:{size};"));
    }
    el("div")
        .class("btn-seal")
        .style(&style)
        .attr("data-action", "make-poster")
        .text(first)
        .child(el("br"))
        .text(second)
}

pub fn data_doubt_link(text: &str) -> Element {
    el("div").style("margin-top:20px; text-align:center;").child(
        el("span")
            .class("data-doubt-link")
            .attr("data-action", "open-data-explanation")
            .text(text),
    )
}
