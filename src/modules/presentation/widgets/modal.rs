//! Tag explanation and data explanation overlays.

use std::time::Duration;

use crate::presentation::dom::{find_by_id, find_by_id_mut};
use crate::presentation::markup::{el, Element};
use crate::presentation::schedule::{Deferred, TaskQueue};

pub const TAG_MODAL_ID: &str = "tag-explain-modal";
pub const DATA_EXPLANATION_ID: &str = "data-explanation-modal";
pub const TAG_MODAL_FADE: Duration = Duration::from_millis(300);

fn tag_modal() -> Element {
    el("div")
        .id(TAG_MODAL_ID)
        .attr("data-action", "close-tag")
        .style("display:none;")
        .child(
            el("div")
                .class("tag-explain-card")
                .child(el("div").class("tag-explain-bg").text("TAG"))
                .child(el("div").id("tm-title").class("tag-explain-title").text("称号名称"))
                .child(el("div").id("tm-content").class("tag-explain-content"))
                .child(
                    el("button")
                        .class("tag-explain-btn")
                        .attr("data-action", "close-tag")
                        .text("知道了"),
                ),
        )
}

/// Adds the tag modal to `root` unless it is already there.
pub fn inject_tag_modal(root: &mut Element) {
    if find_by_id(root, TAG_MODAL_ID).is_none() {
        root.append(tag_modal());
    }
}

pub fn show_tag(root: &mut Element, name: &str, desc: &str) {
    inject_tag_modal(root);

    if let Some(title) = find_by_id_mut(root, "tm-title") {
        title.set_text(name);
    }
    if let Some(content) = find_by_id_mut(root, "tm-content") {
        content.set_text(desc);
    }
    if let Some(modal) = find_by_id_mut(root, TAG_MODAL_ID) {
        modal.set_style_prop("display", "flex");
        modal.add_class("show");
    }
}

/// Starts the fade out; `HideTagModal` finishes it.
pub fn close_tag(root: &mut Element, tasks: &mut TaskQueue) {
    if let Some(modal) = find_by_id_mut(root, TAG_MODAL_ID) {
        modal.remove_class("show");
        tasks.schedule(TAG_MODAL_FADE, Deferred::HideTagModal);
    }
}

pub fn hide_tag(root: &mut Element) {
    if let Some(modal) = find_by_id_mut(root, TAG_MODAL_ID) {
        modal.set_style_prop("display", "none");
    }
}

pub fn open_data_explanation(root: &mut Element) {
    if let Some(modal) = find_by_id_mut(root, DATA_EXPLANATION_ID) {
        modal.set_style_prop("display", "flex");
        modal.add_class("animate__animated");
        modal.add_class("animate__fadeIn");
    }
}

pub fn close_data_explanation(root: &mut Element) {
    if let Some(modal) = find_by_id_mut(root, DATA_EXPLANATION_ID) {
        modal.set_style_prop("display", "none");
    }
}
