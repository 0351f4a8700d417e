//! Four theme cards on the game slide. Closing a card for the first time
//! lights its icon; lighting all four shows the celebration.

use std::time::Duration;

use crate::presentation::dom::{find_by_id_mut, find_first_by_class_mut};
use crate::presentation::markup::{el, Element, Node};
use crate::presentation::ports::Capabilities;
use crate::presentation::record::OrgRecord;
use crate::presentation::schedule::{Deferred, TaskQueue};
use crate::presentation::slides::shell::GAME_CARD_COUNT;

pub const CELEBRATION_DELAY: Duration = Duration::from_millis(600);
pub const LIGHT_VIBRATION_MS: u32 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct GameCard {
    pub title: &'static str,
    pub theme_color: &'static str,
    pub tag_name: &'static str,
    /// Department key into the organisation summaries.
    pub dept: &'static str,
    pub desc: &'static str,
    pub stat_value: &'static str,
    pub stat_label: &'static str,
    pub images: [&'static str; 3],
}

pub const GAME_CARDS: [GameCard; GAME_CARD_COUNT] = [
    GameCard {
        title: "筑梦 · 支教项目",
        theme_color: "#FF4757",
        tag_name: "Teaching",
        dept: "支教",
        desc: "跨越山海，我们在边疆与深山里推开一扇窗；走上云端，我们为远方的孩子种下希望。愿我们以点点星光，照亮孩子们的童年",
        stat_value: "500+",
        stat_label: "受益孩子",
        images: [
            "/media/images/dandelion.jpg",
            "/media/images/summercamp-2.jpg",
            "/media/images/read.jpg",
        ],
    },
    GameCard {
        title: "暖阳 · 社会关怀",
        theme_color: "#FFA502",
        tag_name: "Care",
        dept: "关怀",
        desc: "我们走进社区，牵起老人的手；我们俯身倾听，与孩子们游戏；我们坚守，在夜色操场边点亮鼓励的星光。每一次陪伴，都绽放笑容；每一次抵达，都是温暖和关怀的具象。",
        stat_value: "33",
        stat_label: "活动次数",
        images: [
            "/media/images/“守护折翼天使”.jpg",
            "/media/images/“雨露嘉禾”.jpg",
            "/media/images/“书香传情”.jpg",
        ],
    },
    GameCard {
        title: "绿动 · 环保项目",
        theme_color: "#2ED573",
        tag_name: "Environment",
        dept: "环保",
        desc: "校园里的每一个回收瓶，都是对地球的承诺；每一件回收的旧衣物，都是寄向远方的温暖。",
        stat_value: "478.8",
        stat_label: "累计减排（kg）",
        images: [
            "/media/images/parc.jpg",
            "/media/images/recycle-3.jpg",
            "/media/images/arbre.jpg",
        ],
    },
    GameCard {
        title: "心灵 · 心之旅",
        theme_color: "#1E90FF",
        tag_name: "Psychology",
        dept: "心之旅",
        desc: "从“商火相传”，到“共商心语”；从“方寸心语”，到心理疏导——我们始终以专业与热忱，为商院学子的心理健康保驾护航。",
        stat_value: "3500+",
        stat_label: "陪伴时间",
        images: [
            "/media/images/heart-cover.jpg",
            "/media/images/club-gather.jpg",
            "/media/images/club-gather2.jpg",
        ],
    },
];

/// Card text, preferring the organisation's own department summary.
pub fn card_description<'a>(card: &'a GameCard, org: Option<&'a OrgRecord>) -> &'a str {
    org.and_then(|o| o.dept_summaries.get(card.dept))
        .map(String::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(card.desc)
}

fn set_text(root: &mut Element, id: &str, text: &str) {
    if let Some(node) = find_by_id_mut(root, id) {
        node.set_text(text);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameProgress {
    lit: [bool; GAME_CARD_COUNT],
    count: usize,
    current: Option<usize>,
}

impl GameProgress {
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_lit(&self, index: usize) -> bool {
        self.lit.get(index).copied().unwrap_or(false)
    }

    pub fn is_complete(&self) -> bool {
        self.count == GAME_CARD_COUNT
    }

    /// Fills the game modal with card `index` and shows it.
    pub fn open_card(
        &mut self,
        overlays: &mut Element,
        index: usize,
        org: Option<&OrgRecord>,
    ) -> bool {
        let Some(card) = GAME_CARDS.get(index) else {
            return false;
        };

        set_text(overlays, "gm-tag", card.tag_name);
        set_text(overlays, "gm-title", card.title);
        set_text(overlays, "gm-desc", card_description(card, org));
        set_text(overlays, "gm-stat-val", card.stat_value);
        set_text(overlays, "gm-stat-label", card.stat_label);

        if let Some(divider) = find_first_by_class_mut(overlays, "card-divider") {
            divider.set_style_prop("background-color", card.theme_color);
        }
        if let Some(stat) = find_first_by_class_mut(overlays, "card-stat") {
            if let Some(value) = find_first_by_class_mut(stat, "val") {
                value.set_style_prop("color", card.theme_color);
            }
        }

        if let Some(wrapper) = find_by_id_mut(overlays, "gm-swiper-wrapper") {
            wrapper.set_children(
                card.images
                    .iter()
                    .map(|src| {
                        Node::from(
                            el("div")
                                .class("swiper-slide")
                                .child(el("img").attr("src", *src).attr("alt", "Moment")),
                        )
                    })
                    .collect(),
            );
        }

        let lit = self.lit[index];
        if let Some(button) = find_by_id_mut(overlays, "gm-btn") {
            button.set_style_prop("background-color", card.theme_color);
            button.set_text(if lit { "✨ 已点亮" } else { "点亮图标" });
            button.set_style_prop("opacity", if lit { "0.7" } else { "1" });
        }
        if let Some(modal) = find_by_id_mut(overlays, "game-modal") {
            modal.set_style_prop("display", "flex");
        }

        self.current = Some(index);
        true
    }

    /// Hides the modal. The first close of each card lights it; repeat
    /// closes never count again.
    pub fn close_card(
        &mut self,
        game_slide: &mut Element,
        overlays: &mut Element,
        capabilities: &Capabilities,
        tasks: &mut TaskQueue,
    ) {
        if let Some(modal) = find_by_id_mut(overlays, "game-modal") {
            modal.set_style_prop("display", "none");
        }

        let Some(index) = self.current else {
            return;
        };
        if self.lit[index] {
            return;
        }
        self.lit[index] = true;
        self.count += 1;

        for level in 1..=GAME_CARD_COUNT {
            game_slide.remove_class(&format!("bg-level-{level}"));
        }
        game_slide.add_class(&format!("bg-level-{}", self.count));

        if let Some(icon) = find_by_id_mut(game_slide, &format!("icon-{index}")) {
            icon.add_class("active");
        }
        set_text(game_slide, "collect-count", &self.count.to_string());
        if let Some(fill) = find_by_id_mut(game_slide, "progress-fill") {
            let percent = self.count * 100 / GAME_CARD_COUNT;
            fill.set_style_prop("width", &format!("{percent}%"));
        }

        capabilities.vibrate(LIGHT_VIBRATION_MS);

        if self.is_complete() {
            tasks.schedule(CELEBRATION_DELAY, Deferred::ShowGameCelebration);
        }
    }

    pub fn celebrate(game_slide: &mut Element) {
        if let Some(message) = find_by_id_mut(game_slide, "game-success-msg") {
            message.add_class("show");
        }
    }
}
