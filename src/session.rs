use chrono::{DateTime, Utc};

use crate::frame::Frame;

/// Result of the most recent successful analysis plus the user's selection.
///
/// Frames are identified by their position in `frames`; `selected` always has
/// the same length and starts out all `true`.
#[derive(Debug, Clone)]
pub struct Session {
    /// URL the frames were extracted from
    pub source_url: String,

    /// When the analysis result arrived
    pub analyzed_at: DateTime<Utc>,

    frames: Vec<Frame>,
    selected: Vec<bool>,
}

impl Session {
    /// Start a session with every frame selected
    pub fn new(source_url: String, frames: Vec<Frame>) -> Self {
        let selected = vec![true; frames.len()];
        Self {
            source_url,
            analyzed_at: Utc::now(),
            frames,
            selected,
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Flip selection for `index`.
    ///
    /// Panics if `index` is out of range for this session.
    pub fn toggle(&mut self, index: usize) {
        let len = self.selected.len();
        let flag = self
            .selected
            .get_mut(index)
            .unwrap_or_else(|| panic!("frame index {} out of range for session of {}", index, len));
        *flag = !*flag;
    }

    /// Clear selection for `index`; already-cleared flags stay cleared.
    ///
    /// Panics if `index` is out of range for this session.
    pub fn deselect(&mut self, index: usize) {
        let len = self.selected.len();
        let flag = self
            .selected
            .get_mut(index)
            .unwrap_or_else(|| panic!("frame index {} out of range for session of {}", index, len));
        *flag = false;
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    pub fn select_all(&mut self) {
        self.selected.iter_mut().for_each(|flag| *flag = true);
    }

    pub fn deselect_all(&mut self) {
        self.selected.iter_mut().for_each(|flag| *flag = false);
    }

    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|flag| **flag).count()
    }

    /// Indices currently selected, ascending
    pub fn selected_indices(&self) -> Vec<usize> {
        self.selected
            .iter()
            .enumerate()
            .filter_map(|(i, flag)| flag.then_some(i))
            .collect()
    }

    /// Frames at selected indices, in session order
    pub fn selected_frames(&self) -> Vec<Frame> {
        self.frames
            .iter()
            .zip(&self.selected)
            .filter(|(_, flag)| **flag)
            .map(|(frame, _)| frame.clone())
            .collect()
    }
}
