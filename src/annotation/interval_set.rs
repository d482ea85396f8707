use std::cmp::Ordering;

use crate::annotation::timing::{round_to_nearest, same_on_grid};
use crate::config::EditorConfig;
use crate::error::AnnotationError;
use crate::types::{Phone, RawInterval, RawTranscript, Word};

pub const WORDS_TIER: &str = "words";
pub const PHONES_TIER: &str = "phones";

/// Builds the word/phone arena from a parsed transcript.
///
/// Words keep their tier position as `index`. Each phone goes to the first word
/// (in time order) whose range contains it, compared on the `second_step` grid.
/// Phones no word contains are dropped with a warning, or fail the build when
/// `strict_containment` is set.
pub fn build(raw: &RawTranscript, config: &EditorConfig) -> Result<Vec<Word>, AnnotationError> {
    let raw_words = raw
        .tier(WORDS_TIER)
        .ok_or(AnnotationError::MissingTier { tier: WORDS_TIER })?;
    let raw_phones = raw
        .tier(PHONES_TIER)
        .ok_or(AnnotationError::MissingTier { tier: PHONES_TIER })?;
    let step = config.second_step;

    let mut words: Vec<Word> = Vec::with_capacity(raw_words.intervals.len());
    for (index, interval) in raw_words.intervals.iter().enumerate() {
        if !is_positive_span(interval) {
            return Err(AnnotationError::malformed(
                WORDS_TIER,
                index,
                format!("end {} is not after start {}", interval.xmax, interval.xmin),
            ));
        }
        if let Some(prev) = words.last() {
            if !same_on_grid(prev.end, interval.xmin, step) {
                return Err(AnnotationError::malformed(
                    WORDS_TIER,
                    index,
                    format!(
                        "starts at {} but the previous word ends at {}",
                        interval.xmin, prev.end
                    ),
                ));
            }
        }
        words.push(Word {
            index,
            text: interval.text.clone(),
            start: interval.xmin,
            end: interval.xmax,
            phones: Vec::new(),
        });
    }

    let mut cursor = 0usize;
    let mut dropped = 0usize;
    for (phone_index, interval) in raw_phones.intervals.iter().enumerate() {
        let owner = if is_positive_span(interval) {
            find_owner(&words, cursor, interval, step)
        } else {
            None
        };
        let Some(owner) = owner else {
            if config.strict_containment {
                return Err(AnnotationError::malformed(
                    PHONES_TIER,
                    phone_index,
                    format!(
                        "'{}' [{}, {}) is not contained in any word",
                        interval.text, interval.xmin, interval.xmax
                    ),
                ));
            }
            tracing::warn!(
                phone_index,
                text = interval.text.as_str(),
                xmin = interval.xmin,
                xmax = interval.xmax,
                "interval set: dropping phone not contained in any word"
            );
            dropped += 1;
            continue;
        };
        cursor = owner;
        words[owner].phones.push(Phone {
            text: interval.text.clone(),
            start: interval.xmin,
            end: interval.xmax,
        });
    }

    tracing::debug!(
        word_count = words.len(),
        phone_count = raw_phones.intervals.len() - dropped,
        dropped,
        "interval set: built word arena"
    );
    Ok(words)
}

fn is_positive_span(interval: &RawInterval) -> bool {
    interval.xmax.partial_cmp(&interval.xmin) == Some(Ordering::Greater)
}

/// Searches forward from `cursor` first since phone tiers are time ordered, then
/// falls back to the words before it.
fn find_owner(words: &[Word], cursor: usize, phone: &RawInterval, step: f64) -> Option<usize> {
    let contains = |word: &Word| {
        round_to_nearest(phone.xmin, step) >= round_to_nearest(word.start, step)
            && round_to_nearest(phone.xmax, step) <= round_to_nearest(word.end, step)
    };
    let cursor = cursor.min(words.len());
    words[cursor..]
        .iter()
        .position(contains)
        .map(|offset| cursor + offset)
        .or_else(|| words[..cursor].iter().position(contains))
}
