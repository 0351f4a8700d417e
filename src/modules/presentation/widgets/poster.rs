//! Certificate poster: filling the template, picking its photo, and
//! exporting it as an image.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::cmp::Ordering;
use thiserror::Error;
use tracing::error;

use crate::presentation::dom::{find_by_id, find_by_id_mut, find_first_by_class_mut};
use crate::presentation::markup::{el, Element, Node};
use crate::presentation::ports::capabilities::{RasterError, RasterOptions};
use crate::presentation::ports::Capabilities;
use crate::presentation::record::{ActivityEntry, FetchedRecord};
use crate::presentation::slides::shell::DEFAULT_POSTER_TAG;
use crate::report::application::domain::entities::{Figure, GUEST_NAME};
use crate::shared::format::compact_number;

pub const STOCK_POSTER_IMAGE: &str =
    "https://images.unsplash.com/photo-1524178232363-1fb2b075b655?w=400";
pub const GUEST_POSTER_TAG: &str = "期待有你";
pub const GALLERY_FALLBACK_TITLE: &str = "时光掠影";
pub const UPLOAD_PROMPT: &str = "给这张照片起个标题吧 (最多6个字)：";
pub const UPLOAD_PROMPT_DEFAULT: &str = "我的独家记忆";
pub const MAX_TAG_CHARS: usize = 6;
pub const EXPORT_FAILED_MESSAGE: &str = "生成失败，请稍后重试";
const DEFAULT_TOTAL_PEOPLE: &str = "500";
const MIN_EXPORT_SCALE: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PosterError {
    #[error("请先查询数据")]
    MissingRecord,
    #[error("No gallery photos to pick from")]
    MissingGalleryData,
    #[error("Unsupported image format")]
    UnsupportedImage,
    #[error(transparent)]
    ExportFailed(#[from] RasterError),
}

//
// ──────────────────────────────────────────────────────────
// Image helpers
// ──────────────────────────────────────────────────────────
//

/// First activity with the most hours among those carrying a photo.
pub fn best_activity(activities: &[ActivityEntry]) -> Option<&ActivityEntry> {
    activities
        .iter()
        .filter(|a| a.img.as_deref().is_some_and(|s| !s.trim().is_empty()))
        .fold(None, |best: Option<&ActivityEntry>, a| match best {
            Some(b) if b.hours.partial_cmp(&a.hours) != Some(Ordering::Less) => Some(b),
            _ => Some(a),
        })
}

/// Photo the poster starts with, and the activity title to tag it with.
pub fn default_poster_image(record: &FetchedRecord) -> (String, Option<String>) {
    if let Some(act) = best_activity(record.activities()) {
        if let Some(img) = &act.img {
            return (img.clone(), Some(act.title.clone()));
        }
    }
    let public = match record {
        FetchedRecord::Organization(org) => org.public_gallery.first(),
        FetchedRecord::Volunteer(_) => None,
    };
    match public {
        Some(url) => (url.clone(), None),
        None => (STOCK_POSTER_IMAGE.to_string(), None),
    }
}

/// Appends a `t=` parameter so a re-used URL is fetched again.
pub fn with_cache_buster(url: &str, stamp: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}t={stamp}")
}

/// Image type from the leading bytes.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => Some("image/png"),
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        [b'B', b'M', ..] => Some("image/bmp"),
        _ => None,
    }
}

pub fn image_data_url(bytes: &[u8]) -> Result<String, PosterError> {
    let mime = sniff_image_mime(bytes).ok_or(PosterError::UnsupportedImage)?;
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

pub fn export_scale(device_pixel_ratio: f64) -> f64 {
    let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    dpr.max(MIN_EXPORT_SCALE)
}

fn set_text(root: &mut Element, id: &str, text: &str) {
    if let Some(node) = find_by_id_mut(root, id) {
        node.set_text(text);
    }
}

fn set_display(root: &mut Element, id: &str, display: &str) {
    if let Some(node) = find_by_id_mut(root, id) {
        node.set_style_prop("display", display);
    }
}

fn set_background(root: &mut Element, url: &str) {
    if let Some(bg) = find_by_id_mut(root, "p-img-bg") {
        bg.set_style_prop("background-color", "#eee");
        bg.set_style_prop("background-image", &format!("url(\"{url}\")"));
    }
}

fn tag_text(root: &Element) -> String {
    find_by_id(root, "p-tag-display")
        .map(Element::text_content)
        .unwrap_or_default()
}

fn two_lines(first: &str, second: &str) -> Vec<Node> {
    vec![first.into(), el("br").into(), second.into()]
}

//
// ──────────────────────────────────────────────────────────
// Composer
// ──────────────────────────────────────────────────────────
//

/// Fills the poster. Once the user picks or uploads a photo, the default
/// photo is never applied again.
#[derive(Debug, Clone, Default)]
pub struct PosterComposer {
    replaced: bool,
}

impl PosterComposer {
    pub fn has_replaced_image(&self) -> bool {
        self.replaced
    }

    pub fn open(
        &mut self,
        overlays: &mut Element,
        record: Option<&FetchedRecord>,
        stamp: i64,
    ) -> Result<(), PosterError> {
        close_image_choice(overlays);
        close_photo_picker(overlays);

        let record = record.ok_or(PosterError::MissingRecord)?;

        if let Some(modal) = find_by_id_mut(overlays, "poster-modal") {
            modal.set_style_prop("display", "flex");
            modal.add_class("animate__animated");
            modal.add_class("animate__fadeIn");
        }

        if tag_text(overlays) == DEFAULT_POSTER_TAG && !record.is_volunteer() {
            set_text(overlays, "p-tag-display", GUEST_POSTER_TAG);
        }

        match record {
            FetchedRecord::Volunteer(user) => {
                set_text(overlays, "p-name", &user.name);
                if let Some(desc) = find_by_id_mut(overlays, "p-desc") {
                    desc.set_children(two_lines("这一年，你用行动诠释了温暖", "感谢你，世界因你而美好"));
                }
                set_text(overlays, "p-data1", &compact_number(user.total_hours));
                set_text(overlays, "p-label1", "服务时长");
                set_text(overlays, "p-data2", user.core_field());
                set_text(overlays, "p-label2", "核心领域");
            }
            FetchedRecord::Organization(org) => {
                set_text(overlays, "p-name", GUEST_NAME);
                if let Some(desc) = find_by_id_mut(overlays, "p-desc") {
                    desc.set_children(two_lines("2024年的故事里还没找到你，", "愿2025年，我们能并肩同行。"));
                }
                let people = match &org.total_people {
                    Figure::Number(n) if *n != 0.0 => compact_number(*n),
                    Figure::Text(s) if !s.is_empty() => s.clone(),
                    _ => DEFAULT_TOTAL_PEOPLE.to_string(),
                };
                set_text(overlays, "p-data1", &people);
                set_text(overlays, "p-label1", "汇聚爱心");
                set_text(overlays, "p-data2", &org.total_events.to_string());
                set_text(overlays, "p-label2", "公益活动");
            }
        }

        if !self.replaced {
            let (url, title) = default_poster_image(record);
            if let Some(title) = title {
                let current = tag_text(overlays);
                if current == DEFAULT_POSTER_TAG || current == GUEST_POSTER_TAG {
                    set_text(overlays, "p-tag-display", &title);
                }
            }
            set_background(overlays, &with_cache_buster(&url, stamp));
        }
        Ok(())
    }

    pub fn close(overlays: &mut Element) {
        set_display(overlays, "poster-modal", "none");
    }

    /// Shows the photo source choice. Without a record the caller goes
    /// straight to upload.
    pub fn open_image_choice(
        overlays: &mut Element,
        record: Option<&FetchedRecord>,
    ) -> Result<(), PosterError> {
        let record = record.ok_or(PosterError::MissingGalleryData)?;
        let has_gallery = !record.activities().is_empty();
        set_display(
            overlays,
            "btn-pick-from-gallery",
            if has_gallery { "block" } else { "none" },
        );
        set_display(overlays, "img-choice-overlay", "flex");
        Ok(())
    }

    /// Lists the activity photos. With none available the caller falls
    /// back to upload.
    pub fn open_photo_picker(
        overlays: &mut Element,
        record: Option<&FetchedRecord>,
    ) -> Result<(), PosterError> {
        close_image_choice(overlays);
        let activities = record
            .map(FetchedRecord::activities)
            .filter(|a| !a.is_empty())
            .ok_or(PosterError::MissingGalleryData)?;

        if let Some(grid) = find_by_id_mut(overlays, "photo-picker-grid") {
            let thumbs = activities.iter().enumerate().map(|(i, act)| {
                let title = match act.title.trim() {
                    "" => GALLERY_FALLBACK_TITLE,
                    t => t,
                };
                let mut thumb = el("div")
                    .class("photo-thumb")
                    .attr("data-action", "pick-photo")
                    .attr("data-index", i.to_string());
                if let Some(img) = &act.img {
                    thumb = thumb.child(
                        el("img")
                            .attr("src", img.as_str())
                            .attr("crossorigin", "anonymous")
                            .attr("alt", "Moment"),
                    );
                }
                Node::from(thumb.child(el("div").class("photo-thumb-title").text(title)))
            });
            grid.set_children(thumbs.collect());
        }
        set_display(overlays, "photo-picker-overlay", "flex");
        Ok(())
    }

    /// Uses a gallery photo; the tag becomes its title.
    pub fn select_from_gallery(
        &mut self,
        overlays: &mut Element,
        url: &str,
        title: Option<&str>,
        stamp: i64,
    ) {
        set_background(overlays, &with_cache_buster(url, stamp));
        let tag = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_POSTER_TAG);
        set_text(overlays, "p-tag-display", tag);
        self.replaced = true;
    }

    /// Uses an uploaded file, then asks for a short tag.
    pub fn handle_upload(
        &mut self,
        overlays: &mut Element,
        bytes: &[u8],
        capabilities: &Capabilities,
    ) -> Result<(), PosterError> {
        let data_url = image_data_url(bytes)?;
        if let Some(bg) = find_by_id_mut(overlays, "p-img-bg") {
            bg.set_style_prop("background-image", &format!("url(\"{data_url}\")"));
        }
        self.replaced = true;

        if let Some(answer) = capabilities.prompt(UPLOAD_PROMPT, UPLOAD_PROMPT_DEFAULT) {
            let tag: String = answer.trim().chars().take(MAX_TAG_CHARS).collect();
            if !tag.is_empty() {
                set_text(overlays, "p-tag-display", &tag);
            }
        }
        Ok(())
    }
}

pub fn close_image_choice(overlays: &mut Element) {
    set_display(overlays, "img-choice-overlay", "none");
}

pub fn close_photo_picker(overlays: &mut Element) {
    set_display(overlays, "photo-picker-overlay", "none");
}

pub fn close_final_result(overlays: &mut Element) {
    if let Some(overlay) = find_by_id_mut(overlays, "final-result-overlay") {
        overlay.remove_class("show");
    }
}

//
// ──────────────────────────────────────────────────────────
// Exporter
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportRequest {
    pub device_pixel_ratio: f64,
    pub card_width: u32,
    pub card_height: u32,
}

/// Copy of the poster card as it should be captured: no transform, margin
/// or shadow, and no edit hint.
fn capture_copy(card: &Element) -> Element {
    let mut copy = card.clone();
    copy.set_style_prop("transform", "none");
    copy.set_style_prop("margin", "0");
    copy.set_style_prop("box-shadow", "none");
    copy.set_style_prop("border-radius", "12px");
    if let Some(hint) = find_first_by_class_mut(&mut copy, "edit-hint-icon") {
        hint.set_style_prop("display", "none");
    }
    copy
}

/// Rasterises the poster card into `#final-image`. The save button shows a
/// busy state meanwhile and is restored whatever the outcome.
pub async fn export_poster(
    overlays: &mut Element,
    capabilities: &Capabilities,
    request: ExportRequest,
) -> Result<(), PosterError> {
    let original_label = find_first_by_class_mut(overlays, "btn-save-img").map(|btn| {
        let label = btn.child_nodes().to_vec();
        btn.set_text("正在绘制...");
        btn.add_class("btn-loading");
        label
    });

    let result = match find_by_id(overlays, "poster-card").map(capture_copy) {
        None => Err(RasterError("poster card missing".to_string())),
        Some(copy) => match &capabilities.rasterizer {
            None => Err(RasterError("no rasterizer available".to_string())),
            Some(rasterizer) => {
                let options = RasterOptions {
                    width: request.card_width,
                    height: request.card_height,
                    scale: export_scale(request.device_pixel_ratio),
                    use_cors: true,
                    transparent_background: true,
                };
                rasterizer.rasterize(&copy, &options).await
            }
        },
    };

    let outcome = match result {
        Ok(image) => {
            if let Some(img) = find_by_id_mut(overlays, "final-image") {
                img.set_attr("src", image);
            }
            if let Some(overlay) = find_by_id_mut(overlays, "final-result-overlay") {
                overlay.add_class("show");
            }
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "poster export failed");
            capabilities.alert(EXPORT_FAILED_MESSAGE);
            Err(PosterError::ExportFailed(e))
        }
    };

    if let (Some(label), Some(btn)) = (
        original_label,
        find_first_by_class_mut(overlays, "btn-save-img"),
    ) {
        btn.set_children(label);
        btn.remove_class("btn-loading");
    }
    outcome
}
