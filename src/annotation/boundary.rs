use serde::Serialize;

use crate::annotation::timing::{clamp, round_to_nearest, snap_down, snap_up};
use crate::config::EditorConfig;
use crate::error::AnnotationError;
use crate::types::{IntervalRef, Word};

/// Outcome of a boundary edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryEdit {
    /// Value actually stored, after grid snapping and clamping.
    pub clamped_start: f64,
    /// Intervals whose start or end changed, in time order. Empty when nothing moved.
    pub affected: Vec<IntervalRef>,
}

/// Admissible range for a phone start, both ends on the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartBounds {
    pub lower: f64,
    pub upper: f64,
}

impl StartBounds {
    /// No admissible value exists when the neighbours are already at minimum length.
    pub fn is_pinned(&self) -> bool {
        self.lower > self.upper
    }
}

/// Bounds for moving the start of `words[word_index].phones[phone_index]`.
///
/// The lower bound is the start of the interval that precedes the phone in time
/// plus the minimum duration (0 for the very first phone); the upper bound keeps
/// the phone itself at minimum length.
pub fn start_bounds(
    words: &[Word],
    config: &EditorConfig,
    word_index: usize,
    phone_index: usize,
) -> Result<StartBounds, AnnotationError> {
    let phone = words
        .get(word_index)
        .and_then(|word| word.phones.get(phone_index))
        .ok_or(AnnotationError::OutOfRangeEdit {
            word: word_index,
            phone: phone_index,
        })?;
    let step = config.second_step;
    let min_dur = config.min_phone_duration;

    let lower = match previous_start(words, word_index, phone_index) {
        Some(prev_start) => snap_up(prev_start + min_dur, step),
        None => 0.0,
    };
    let upper = snap_down(phone.end - min_dur, step);
    Ok(StartBounds { lower, upper })
}

fn previous_start(words: &[Word], word_index: usize, phone_index: usize) -> Option<f64> {
    if phone_index > 0 {
        return Some(words[word_index].phones[phone_index - 1].start);
    }
    let prev_word = words.get(word_index.checked_sub(1)?)?;
    Some(
        prev_word
            .phones
            .last()
            .map_or(prev_word.start, |phone| phone.start),
    )
}

/// Moves the start of a phone and cascades the shared boundary.
///
/// Inside a word the previous phone's end follows. On a word's first phone the
/// word start follows, together with the previous word's end and its last phone's
/// end. Out-of-range indices fail before anything is touched.
pub fn set_phone_start(
    words: &mut [Word],
    config: &EditorConfig,
    word_index: usize,
    phone_index: usize,
    requested_start: f64,
) -> Result<BoundaryEdit, AnnotationError> {
    let bounds = start_bounds(words, config, word_index, phone_index)?;
    let current = words[word_index].phones[phone_index].start;

    if bounds.is_pinned() || !requested_start.is_finite() {
        tracing::debug!(
            word_index,
            phone_index,
            requested_start,
            lower = bounds.lower,
            upper = bounds.upper,
            "boundary: edit rejected, start stays in place"
        );
        return Ok(BoundaryEdit {
            clamped_start: current,
            affected: Vec::new(),
        });
    }

    let rounded = round_to_nearest(requested_start, config.second_step);
    let clamped = clamp(rounded, bounds.lower, bounds.upper);
    if clamped == current {
        return Ok(BoundaryEdit {
            clamped_start: clamped,
            affected: Vec::new(),
        });
    }

    let affected = apply_start(words, word_index, phone_index, clamped);
    tracing::debug!(
        word_index,
        phone_index,
        requested_start,
        clamped_start = clamped,
        affected = affected.len(),
        "boundary: moved phone start"
    );
    Ok(BoundaryEdit {
        clamped_start: clamped,
        affected,
    })
}

fn apply_start(
    words: &mut [Word],
    word_index: usize,
    phone_index: usize,
    start: f64,
) -> Vec<IntervalRef> {
    let mut affected = Vec::with_capacity(4);

    if phone_index > 0 {
        words[word_index].phones[phone_index - 1].end = start;
        affected.push(IntervalRef::Phone {
            word: word_index,
            phone: phone_index - 1,
        });
    } else {
        if word_index > 0 {
            let prev_word = &mut words[word_index - 1];
            prev_word.end = start;
            affected.push(IntervalRef::Word {
                word: word_index - 1,
            });
            if let Some(last_phone) = prev_word.phones.last_mut() {
                last_phone.end = start;
                affected.push(IntervalRef::Phone {
                    word: word_index - 1,
                    phone: prev_word.phones.len() - 1,
                });
            }
        }
        words[word_index].start = start;
        affected.push(IntervalRef::Word { word: word_index });
    }

    words[word_index].phones[phone_index].start = start;
    affected.push(IntervalRef::Phone {
        word: word_index,
        phone: phone_index,
    });
    affected
}
