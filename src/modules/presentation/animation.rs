//! Entrance animations and skill-bar fill.

use std::time::Duration;

use super::dom::for_each_by_class_mut;
use super::markup::Element;

pub const ANI_CLASS: &str = "ani";
pub const ANIMATED_CLASS: &str = "animate__animated";
pub const SKILL_FILL_CLASS: &str = "skill-fill";
pub const SKILL_BAR_DELAY: Duration = Duration::from_millis(300);

/// Hides every animated element under `root` so a replay does not flicker.
pub fn hide(root: &mut Element) {
    for_each_by_class_mut(root, ANI_CLASS, &mut |el| {
        el.set_style_prop("visibility", "hidden");
    });
}

/// Shows the animated elements of one slide and starts their animation
/// (the class named by `data-ani`).
pub fn play(slide: &mut Element) {
    for_each_by_class_mut(slide, ANI_CLASS, &mut |el| {
        el.set_style_prop("visibility", "visible");
        el.add_class(ANIMATED_CLASS);
        if let Some(animation) = el.get_attr("data-ani").map(str::to_string) {
            el.add_class(&animation);
        }
    });
}

/// Grows each skill bar from zero to its `data-width`.
pub fn fill_skill_bars(slide: &mut Element) {
    for_each_by_class_mut(slide, SKILL_FILL_CLASS, &mut |el| {
        if let Some(width) = el.get_attr("data-width").map(str::to_string) {
            el.set_style_prop("width", &width);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::dom::{find_all_by_class, find_by_id};
    use crate::presentation::markup::el;

    fn slide() -> Element {
        el("div").class("swiper-slide").children([
            el("div").id("card").ani("animate__zoomIn"),
            el("div")
                .class("skill-fill")
                .attr("data-width", "42%")
                .style("width: 0;"),
        ])
    }

    #[test]
    fn play_reveals_and_tags_animation() {
        let mut s = slide();
        hide(&mut s);
        assert_eq!(
            find_by_id(&s, "card").unwrap().style_prop("visibility").as_deref(),
            Some("hidden")
        );

        play(&mut s);

        let card = find_by_id(&s, "card").unwrap();
        assert_eq!(card.style_prop("visibility").as_deref(), Some("visible"));
        assert!(card.has_class(ANIMATED_CLASS));
        assert!(card.has_class("animate__zoomIn"));
    }

    #[test]
    fn skill_bars_take_their_declared_width() {
        let mut s = slide();

        fill_skill_bars(&mut s);

        let bar = find_all_by_class(&s, SKILL_FILL_CLASS)[0];
        assert_eq!(bar.style_prop("width").as_deref(), Some("42%"));
    }
}
