use std::time::Duration;

use crate::presentation::dom::{find_by_id_mut, for_each_by_class_mut};
use crate::presentation::markup::{el, Element, Node};
use crate::presentation::schedule::{Deferred, TaskQueue};
use crate::presentation::slides::heatmap::{CELL_CLASS, INFO_BOX_ID};

pub const SELECTED_CLASS: &str = "selected";
pub const EMPHASIS_DURATION: Duration = Duration::from_millis(500);

/// Shows a month's activities in the info box, highlights that cell alone and
/// emphasises the box until `RevertHeatmapEmphasis` runs.
pub fn show_tip(root: &mut Element, month: u32, tasks: &mut TaskQueue) -> bool {
    let month_attr = month.to_string();
    let mut tip: Option<(String, String)> = None;

    for_each_by_class_mut(root, CELL_CLASS, &mut |cell| {
        if cell.get_attr("data-month") == Some(month_attr.as_str()) {
            cell.add_class(SELECTED_CLASS);
            tip = Some((
                cell.get_attr("data-date").unwrap_or_default().to_string(),
                cell.get_attr("data-content").unwrap_or_default().to_string(),
            ));
        } else {
            cell.remove_class(SELECTED_CLASS);
        }
    });

    let Some((date, content)) = tip else {
        return false;
    };
    let Some(info) = find_by_id_mut(root, INFO_BOX_ID) else {
        return false;
    };

    info.set_children(vec![
        Node::from(el("div").class("hm-info-date").text(date)),
        Node::from(el("div").class("hm-info-content").text(content)),
    ]);
    info.set_style_prop("border-color", "var(--ruc-red)");
    info.set_style_prop("background-color", "rgba(255, 255, 255, 0.9)");
    tasks.schedule(EMPHASIS_DURATION, Deferred::RevertHeatmapEmphasis);
    true
}

/// Drops the emphasis but keeps the text.
pub fn revert_emphasis(root: &mut Element) {
    if let Some(info) = find_by_id_mut(root, INFO_BOX_ID) {
        info.set_style_prop("border-color", "rgba(166, 28, 38, 0.3)");
        info.set_style_prop("background-color", "rgba(255, 255, 255, 0.5)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::dom::{find_all_by_class, find_by_id};
    use crate::presentation::record::ActivityEntry;
    use crate::presentation::slides::heatmap::heatmap_slide;

    fn slide() -> Element {
        heatmap_slide(&[
            ActivityEntry {
                title: "周末课堂".into(),
                date: "2024.03".into(),
                ..Default::default()
            },
            ActivityEntry {
                title: "探访".into(),
                date: "2024.09".into(),
                ..Default::default()
            },
        ])
    }

    #[test]
    fn highlight_is_exclusive_and_fills_the_info_box() {
        // Arrange
        let mut root = slide();
        let mut tasks = TaskQueue::new();

        // Act
        assert!(show_tip(&mut root, 3, &mut tasks));
        assert!(show_tip(&mut root, 9, &mut tasks));

        // Assert
        let selected = find_all_by_class(&root, SELECTED_CLASS);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].get_attr("data-month"), Some("9"));
        let info = find_by_id(&root, INFO_BOX_ID).unwrap();
        assert_eq!(info.text_content(), "9月探访");
        assert_eq!(find_all_by_class(&root, "active").len(), 2);
    }

    #[test]
    fn emphasis_reverts_after_half_a_second() {
        let mut root = slide();
        let mut tasks = TaskQueue::new();
        show_tip(&mut root, 3, &mut tasks);

        let due = tasks.advance(EMPHASIS_DURATION);
        assert_eq!(due, vec![Deferred::RevertHeatmapEmphasis]);
        revert_emphasis(&mut root);

        let info = find_by_id(&root, INFO_BOX_ID).unwrap();
        assert_eq!(
            info.style_prop("background-color").as_deref(),
            Some("rgba(255, 255, 255, 0.5)")
        );
        assert_eq!(info.text_content(), "3月周末课堂");
    }

    #[test]
    fn unknown_month_changes_nothing() {
        let mut root = slide();
        let mut tasks = TaskQueue::new();

        assert!(!show_tip(&mut root, 13, &mut tasks));
        assert!(tasks.is_empty());
    }
}
