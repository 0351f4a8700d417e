//! Deferred work (the page's `setTimeout` calls) as an explicit queue that
//! the host drains with [`TaskQueue::advance`].

use std::time::Duration;

use super::carousel::SlideKey;

#[derive(Debug, Clone, PartialEq)]
pub enum Deferred {
    /// Copy each skill bar's `data-width` into its style on this slide.
    FillSkillBars { slide: SlideKey },
    RevertHeatmapEmphasis,
    /// Radar, constellation and nested carousels after slides are appended.
    PostRender,
    AdvancePastGate,
    ShowGameCelebration,
    HideTagModal,
}

#[derive(Debug, Clone)]
struct Scheduled {
    due: Duration,
    seq: u64,
    task: Deferred,
}

#[derive(Debug, Clone, Default)]
pub struct TaskQueue {
    now: Duration,
    next_seq: u64,
    pending: Vec<Scheduled>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay: Duration, task: Deferred) {
        self.pending.push(Scheduled {
            due: self.now + delay,
            seq: self.next_seq,
            task,
        });
        self.next_seq += 1;
    }

    /// Moves the clock forward and returns every task that came due, in due
    /// order (ties in scheduling order).
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Deferred> {
        self.now += elapsed;
        let now = self.now;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.due <= now);
        self.pending = pending;

        due.sort_by_key(|s| (s.due, s.seq));
        due.into_iter().map(|s| s.task).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn contains(&self, task: &Deferred) -> bool {
        self.pending.iter().any(|s| &s.task == task)
    }
}
