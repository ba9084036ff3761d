use std::collections::VecDeque;

use crate::camera::CameraConfig;
use crate::slide::{Section, SlideData};

/// Full copy of the mutable document, captured for undo/redo.
#[derive(Clone, PartialEq, Debug)]
pub struct DocumentSnapshot {
    pub slides: Vec<SlideData>,
    pub sections: Vec<Section>,
    pub camera_config: CameraConfig,
}

pub const MAX_HISTORY_LENGTH: usize = 5000;

/// Bounded undo/redo stacks over whole-document snapshots. Whole copies
/// rather than diffs: restoration is exact regardless of what the mutation
/// did, and the cap bounds memory over long editing sessions.
#[derive(Clone, Debug, Default)]
pub struct HistoryState {
    past: VecDeque<DocumentSnapshot>,
    future: VecDeque<DocumentSnapshot>,
}

impl HistoryState {
    pub fn new() -> Self {
        Self {
            past: VecDeque::new(),
            future: VecDeque::new(),
        }
    }

    /// Capture the pre-mutation document. Oldest entries are evicted once
    /// the cap is reached, and any redo state is invalidated.
    pub fn save_snapshot(&mut self, current: DocumentSnapshot) {
        self.past.push_back(current);
        while self.past.len() > MAX_HISTORY_LENGTH {
            self.past.pop_front();
        }
        self.future.clear();
    }

    /// Pop the most recent past snapshot, pushing `current` onto the front
    /// of the redo stack. Returns the snapshot to restore, or None when
    /// there is nothing to undo.
    pub fn undo(&mut self, current: DocumentSnapshot) -> Option<DocumentSnapshot> {
        let previous = self.past.pop_back()?;
        self.future.push_front(current);
        Some(previous)
    }

    /// Symmetric to `undo`: pop the nearest future snapshot, pushing
    /// `current` onto the past stack (still capped).
    pub fn redo(&mut self, current: DocumentSnapshot) -> Option<DocumentSnapshot> {
        let next = self.future.pop_front()?;
        self.past.push_back(current);
        while self.past.len() > MAX_HISTORY_LENGTH {
            self.past.pop_front();
        }
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slide::{default_sections, default_slides};

    fn snapshot_with_title(title: &str) -> DocumentSnapshot {
        let mut slides = default_slides();
        slides[0].title = title.to_string();
        DocumentSnapshot {
            slides,
            sections: default_sections(),
            camera_config: CameraConfig::default(),
        }
    }

    #[test]
    fn test_undo_restores_saved_snapshot_exactly() {
        let mut history = HistoryState::new();
        let before = snapshot_with_title("before");
        let after = snapshot_with_title("after");

        history.save_snapshot(before.clone());
        let restored = history.undo(after.clone()).unwrap();

        assert_eq!(restored, before);
        assert!(history.can_redo());
    }

    #[test]
    fn test_undo_then_redo_round_trips() {
        let mut history = HistoryState::new();
        let before = snapshot_with_title("before");
        let after = snapshot_with_title("after");

        history.save_snapshot(before.clone());
        let restored = history.undo(after.clone()).unwrap();
        let replayed = history.redo(restored).unwrap();

        assert_eq!(replayed, after);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_and_redo_are_noops_when_empty() {
        let mut history = HistoryState::new();
        assert!(history.undo(snapshot_with_title("x")).is_none());
        assert!(history.redo(snapshot_with_title("x")).is_none());
        assert_eq!(history.past_len(), 0);
        assert_eq!(history.future_len(), 0);
    }

    #[test]
    fn test_past_is_capped_with_fifo_eviction() {
        let mut history = HistoryState::new();
        for i in 0..(MAX_HISTORY_LENGTH + 10) {
            history.save_snapshot(snapshot_with_title(&format!("state {}", i)));
        }
        assert_eq!(history.past_len(), MAX_HISTORY_LENGTH);

        // unwind the whole stack; the bottom entry must be the oldest
        // survivor (entry 10), not entry 0
        let mut last = None;
        let mut cursor = snapshot_with_title("current");
        while let Some(s) = history.undo(cursor.clone()) {
            cursor = s.clone();
            last = Some(s);
        }
        assert_eq!(last.unwrap().slides[0].title, "state 10");
    }

    #[test]
    fn test_new_snapshot_clears_redo_stack() {
        let mut history = HistoryState::new();
        history.save_snapshot(snapshot_with_title("a"));
        history.undo(snapshot_with_title("b")).unwrap();
        assert!(history.can_redo());

        history.save_snapshot(snapshot_with_title("c"));
        assert!(!history.can_redo());
    }
}
