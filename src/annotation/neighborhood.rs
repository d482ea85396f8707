use std::ops::Range;

use crate::error::AnnotationError;
use crate::types::{TimeRange, Word};

/// Index range of the `2 * margin + 1` words around `focus`.
///
/// A window that runs off one end is shifted toward the other instead of
/// shrinking; it is only shorter when the whole sequence is.
pub fn window_indices(len: usize, focus: usize, margin: usize) -> Result<Range<usize>, AnnotationError> {
    if focus >= len {
        return Err(AnnotationError::FocusOutOfRange { index: focus, len });
    }
    let size = margin.saturating_mul(2).saturating_add(1).min(len);
    let start = focus.saturating_sub(margin).min(len - size);
    Ok(start..start + size)
}

pub fn window(words: &[Word], focus: usize, margin: usize) -> Result<&[Word], AnnotationError> {
    let range = window_indices(words.len(), focus, margin)?;
    Ok(&words[range])
}

/// Time span covered by the window: first word start to last word end.
pub fn current_range(words: &[Word], focus: usize, margin: usize) -> Result<TimeRange, AnnotationError> {
    let visible = window(words, focus, margin)?;
    // A valid focus always yields at least the focus word.
    Ok(TimeRange::new(visible[0].start, visible[visible.len() - 1].end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::test_support::five_word_arena;

    fn indices(words: &[Word]) -> Vec<usize> {
        words.iter().map(|w| w.index).collect()
    }

    #[test]
    fn window_pushes_excess_to_the_far_end() {
        let words = five_word_arena();
        assert_eq!(indices(window(&words, 0, 1).unwrap()), vec![0, 1, 2]);
        assert_eq!(indices(window(&words, 4, 1).unwrap()), vec![2, 3, 4]);
        assert_eq!(indices(window(&words, 2, 1).unwrap()), vec![1, 2, 3]);
        assert_eq!(indices(window(&words, 1, 2).unwrap()), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn window_is_capped_by_sequence_length() {
        let words = five_word_arena();
        assert_eq!(window(&words, 3, 10).unwrap().len(), 5);
        assert_eq!(window(&words[..2], 1, 1).unwrap().len(), 2);
        assert_eq!(indices(window(&words, 3, 0).unwrap()), vec![3]);
    }

    #[test]
    fn focus_past_end_is_rejected() {
        let words = five_word_arena();
        assert!(matches!(
            window(&words, 5, 1),
            Err(AnnotationError::FocusOutOfRange { index: 5, len: 5 })
        ));
        assert!(window(&[], 0, 1).is_err());
    }

    #[test]
    fn current_range_spans_window() {
        let words = five_word_arena();
        assert_eq!(current_range(&words, 2, 1).unwrap(), TimeRange::new(1.0, 4.0));
        assert_eq!(current_range(&words, 0, 1).unwrap(), TimeRange::new(0.0, 3.0));
        assert_eq!(current_range(&words, 4, 1).unwrap(), TimeRange::new(2.0, 5.0));
    }

    #[test]
    fn huge_margin_does_not_overflow() {
        assert_eq!(window_indices(3, 1, usize::MAX).unwrap(), 0..3);
    }
}
