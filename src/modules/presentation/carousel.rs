//! The vertical slide deck: slide storage, paging, transition hooks and the
//! forward-navigation gate in front of the identity form.

use std::ops::Range;

use super::animation::{self, SKILL_BAR_DELAY};
use super::markup::Element;
use super::schedule::{Deferred, TaskQueue};

/// Position of the identity form (cover is 0).
pub const GATE_INDEX: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavGate {
    Locked,
    Unlocked,
}

impl NavGate {
    /// Locked only while the gate slide is active and no record exists.
    pub fn compute(active_index: usize, has_record: bool) -> Self {
        if active_index == GATE_INDEX && !has_record {
            NavGate::Locked
        } else {
            NavGate::Unlocked
        }
    }
}

/// Identifies one slide for as long as it stays in the deck, whatever
/// gets inserted or removed around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlideKey(u64);

#[derive(Debug, Clone)]
pub struct Carousel {
    slides: Vec<Element>,
    keys: Vec<SlideKey>,
    next_key: u64,
    active: usize,
    gate: NavGate,
}

impl Carousel {
    pub fn new(slides: Vec<Element>) -> Self {
        let mut carousel = Self {
            slides: Vec::new(),
            keys: Vec::new(),
            next_key: 0,
            active: 0,
            gate: NavGate::Unlocked,
        };
        carousel.insert_slides(0, slides);
        carousel
    }

    fn issue_keys(&mut self, count: usize) -> Vec<SlideKey> {
        let start = self.next_key;
        self.next_key += count as u64;
        (start..self.next_key).map(SlideKey).collect()
    }

    pub fn slides(&self) -> &[Element] {
        &self.slides
    }

    pub fn slide(&self, index: usize) -> Option<&Element> {
        self.slides.get(index)
    }

    pub fn slide_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.slides.get_mut(index)
    }

    pub fn key_at(&self, index: usize) -> Option<SlideKey> {
        self.keys.get(index).copied()
    }

    pub fn index_of(&self, key: SlideKey) -> Option<usize> {
        self.keys.iter().position(|k| *k == key)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn gate(&self) -> NavGate {
        self.gate
    }

    pub fn unlock(&mut self) {
        self.gate = NavGate::Unlocked;
    }

    /// Inserts `slides` before `index` (clamped to the end). The active
    /// slide keeps pointing at the same content.
    pub fn insert_slides(&mut self, index: usize, slides: Vec<Element>) {
        let index = index.min(self.slides.len());
        let count = slides.len();
        let keys = self.issue_keys(count);
        self.slides.splice(index..index, slides);
        self.keys.splice(index..index, keys);
        if count > 0 && self.active >= index && self.slides.len() > count {
            self.active += count;
        }
    }

    /// Removes a range of slides (clamped). An active slide inside the range
    /// moves to the slide before it.
    pub fn remove_range(&mut self, range: Range<usize>) {
        let end = range.end.min(self.slides.len());
        let start = range.start.min(end);
        if start == end {
            return;
        }
        self.slides.drain(start..end);
        self.keys.drain(start..end);
        if self.active >= end {
            self.active -= end - start;
        } else if self.active >= start {
            self.active = start.saturating_sub(1);
        }
        self.active = self.active.min(self.slides.len().saturating_sub(1));
    }

    /// Pages to `index`. Forward moves are refused while the gate is locked.
    pub fn slide_to(&mut self, index: usize, has_record: bool, tasks: &mut TaskQueue) -> bool {
        if index >= self.slides.len() || index == self.active {
            return false;
        }
        if index > self.active && self.gate == NavGate::Locked {
            return false;
        }
        self.on_transition_start();
        self.active = index;
        self.on_transition_end(has_record, tasks);
        true
    }

    pub fn slide_next(&mut self, has_record: bool, tasks: &mut TaskQueue) -> bool {
        self.slide_to(self.active + 1, has_record, tasks)
    }

    pub fn slide_prev(&mut self, has_record: bool, tasks: &mut TaskQueue) -> bool {
        match self.active.checked_sub(1) {
            Some(index) => self.slide_to(index, has_record, tasks),
            None => false,
        }
    }

    pub fn on_transition_start(&mut self) {
        for slide in &mut self.slides {
            animation::hide(slide);
        }
    }

    pub fn on_transition_end(&mut self, has_record: bool, tasks: &mut TaskQueue) {
        let active = self.active;
        if let (Some(slide), Some(&key)) = (self.slides.get_mut(active), self.keys.get(active)) {
            animation::play(slide);
            tasks.schedule(SKILL_BAR_DELAY, Deferred::FillSkillBars { slide: key });
        }
        self.gate = NavGate::compute(active, has_record);
    }

    /// Runs a due `FillSkillBars` task. A slide removed in the meantime is
    /// skipped.
    pub fn fill_skill_bars(&mut self, key: SlideKey) {
        if let Some(slide) = self.index_of(key).and_then(|i| self.slides.get_mut(i)) {
            animation::fill_skill_bars(slide);
        }
    }
}
