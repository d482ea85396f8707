//! Horizontal placement of segments as percentages of their container.

use serde::Serialize;

use crate::types::{TimeRange, Word};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentLayout {
    /// Offset from the container's left edge, in percent.
    pub left: f64,
    /// Width, in percent of the container.
    pub width: f64,
}

impl SegmentLayout {
    fn within(start: f64, end: f64, origin: f64, span: f64) -> Self {
        if span <= 0.0 {
            return Self {
                left: 0.0,
                width: 0.0,
            };
        }
        Self {
            left: (start - origin) / span * 100.0,
            width: (end - start) / span * 100.0,
        }
    }
}

/// Places each visible word relative to the whole window.
pub fn word_layout(visible: &[Word]) -> Vec<SegmentLayout> {
    let Some(first) = visible.first() else {
        return Vec::new();
    };
    let total: f64 = visible.iter().map(Word::dur).sum();
    visible
        .iter()
        .map(|word| SegmentLayout::within(word.start, word.end, first.start, total))
        .collect()
}

pub fn phone_layout(word: &Word) -> Vec<SegmentLayout> {
    word.phones
        .iter()
        .map(|phone| SegmentLayout::within(phone.start, phone.end, word.start, word.dur()))
        .collect()
}

/// Highlight of `window` inside a waveform drawn over `render`.
pub fn window_overlay(render: TimeRange, window: TimeRange) -> Option<SegmentLayout> {
    if render.is_degenerate() {
        return None;
    }
    Some(SegmentLayout::within(
        window.start,
        window.end,
        render.start,
        render.duration(),
    ))
}

/// Time under a cursor at `fraction` (0..=1) of the waveform width.
pub fn marker_time(render: TimeRange, fraction: f64) -> f64 {
    render.start + fraction.clamp(0.0, 1.0) * render.duration()
}
