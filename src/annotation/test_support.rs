use crate::annotation::interval_set::{build, PHONES_TIER, WORDS_TIER};
use crate::config::EditorConfig;
use crate::types::{RawInterval, RawTier, RawTranscript, Word};

pub(crate) fn transcript(words: &[(&str, f64, f64)], phones: &[(&str, f64, f64)]) -> RawTranscript {
    let xmax = words.last().map(|&(_, _, end)| end).unwrap_or(0.0);
    RawTranscript {
        xmin: 0.0,
        xmax,
        tiers: vec![tier(WORDS_TIER, words, xmax), tier(PHONES_TIER, phones, xmax)],
    }
}

fn tier(name: &str, intervals: &[(&str, f64, f64)], xmax: f64) -> RawTier {
    RawTier {
        name: name.to_string(),
        xmin: 0.0,
        xmax,
        intervals: intervals
            .iter()
            .map(|&(text, xmin, xmax)| RawInterval {
                xmin,
                xmax,
                text: text.to_string(),
            })
            .collect(),
    }
}

/// word0 = phones [0,1) [1,2); word1 = phone [2,3).
pub(crate) fn two_word_transcript() -> RawTranscript {
    transcript(
        &[("ab", 0.0, 2.0), ("c", 2.0, 3.0)],
        &[("A", 0.0, 1.0), ("B", 1.0, 2.0), ("C", 2.0, 3.0)],
    )
}

pub(crate) fn two_word_arena() -> Vec<Word> {
    build(&two_word_transcript(), &EditorConfig::default()).expect("fixture builds")
}

/// Five one-phone words of one second each.
pub(crate) fn five_word_arena() -> Vec<Word> {
    let words = [
        ("w0", 0.0, 1.0),
        ("w1", 1.0, 2.0),
        ("w2", 2.0, 3.0),
        ("w3", 3.0, 4.0),
        ("w4", 4.0, 5.0),
    ];
    build(&transcript(&words, &words), &EditorConfig::default()).expect("fixture builds")
}
