use crate::annotation::boundary::BoundaryEdit;
use crate::session::editor::SegmentTarget;
use crate::types::{TimeRange, Word};

/// Callbacks fired synchronously by [`EditorSession`](crate::session::editor::EditorSession),
/// once per state transition. Every method defaults to doing nothing.
pub trait SessionObserver: Send + Sync {
    fn on_load(&self, _words: &[Word]) {}

    fn on_change_word(&self, _word: &Word) {}

    fn on_boundary_edit(&self, _edit: &BoundaryEdit) {}

    fn on_click_segment(&self, _target: SegmentTarget, _range: TimeRange) {}
}

/// Logs every transition through `tracing`.
pub struct TracingObserver;

impl SessionObserver for TracingObserver {
    fn on_load(&self, words: &[Word]) {
        tracing::info!(word_count = words.len(), "session: transcript loaded");
    }

    fn on_change_word(&self, word: &Word) {
        tracing::info!(
            index = word.index,
            text = word.text.as_str(),
            start = word.start,
            end = word.end,
            "session: focus word"
        );
    }

    fn on_boundary_edit(&self, edit: &BoundaryEdit) {
        tracing::info!(
            clamped_start = edit.clamped_start,
            affected = edit.affected.len(),
            "session: boundary moved"
        );
    }

    fn on_click_segment(&self, target: SegmentTarget, range: TimeRange) {
        tracing::info!(
            target = ?target,
            start = range.start,
            end = range.end,
            "session: segment clicked"
        );
    }
}
