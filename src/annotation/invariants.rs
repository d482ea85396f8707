use serde::Serialize;

use crate::config::EditorConfig;
use crate::types::{IntervalRef, Word};

const BOUNDARY_EPS: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    NonPositiveSpan {
        interval: IntervalRef,
        start: f64,
        end: f64,
    },
    BelowMinDuration {
        interval: IntervalRef,
        dur: f64,
    },
    WordGap {
        word: usize,
        prev_end: f64,
        start: f64,
    },
    PhoneGap {
        word: usize,
        phone: usize,
        expected: f64,
        found: f64,
    },
}

/// Lists every place where the arena breaks contiguity, partition or
/// minimum-duration rules. Words without phones are not checked for partition.
pub fn violations(words: &[Word], config: &EditorConfig) -> Vec<Violation> {
    let mut out = Vec::new();
    let min_dur = config.min_phone_duration;

    for (word_index, word) in words.iter().enumerate() {
        let word_ref = IntervalRef::Word { word: word_index };
        check_span(&mut out, word_ref, word.start, word.end, min_dur);

        if word_index > 0 {
            let prev_end = words[word_index - 1].end;
            if (prev_end - word.start).abs() > BOUNDARY_EPS {
                out.push(Violation::WordGap {
                    word: word_index,
                    prev_end,
                    start: word.start,
                });
            }
        }

        let mut expected = word.start;
        for (phone_index, phone) in word.phones.iter().enumerate() {
            let phone_ref = IntervalRef::Phone {
                word: word_index,
                phone: phone_index,
            };
            check_span(&mut out, phone_ref, phone.start, phone.end, min_dur);
            if (phone.start - expected).abs() > BOUNDARY_EPS {
                out.push(Violation::PhoneGap {
                    word: word_index,
                    phone: phone_index,
                    expected,
                    found: phone.start,
                });
            }
            expected = phone.end;
        }
        if let Some(last) = word.phones.last() {
            if (last.end - word.end).abs() > BOUNDARY_EPS {
                out.push(Violation::PhoneGap {
                    word: word_index,
                    phone: word.phones.len(),
                    expected: word.end,
                    found: last.end,
                });
            }
        }
    }
    out
}

fn check_span(out: &mut Vec<Violation>, interval: IntervalRef, start: f64, end: f64, min_dur: f64) {
    if end <= start {
        out.push(Violation::NonPositiveSpan {
            interval,
            start,
            end,
        });
    } else if end - start < min_dur - BOUNDARY_EPS {
        out.push(Violation::BelowMinDuration {
            interval,
            dur: end - start,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::test_support::{transcript, two_word_arena};
    use crate::annotation::interval_set::build;

    #[test]
    fn clean_arena_has_no_violations() {
        assert!(violations(&two_word_arena(), &EditorConfig::default()).is_empty());
    }

    #[test]
    fn detects_word_gap_and_phone_gap() {
        let mut words = two_word_arena();
        words[1].start = 2.5;
        words[0].phones[0].end = 0.9;
        let found = violations(&words, &EditorConfig::default());
        assert!(found.contains(&Violation::WordGap {
            word: 1,
            prev_end: 2.0,
            start: 2.5
        }));
        assert!(found.iter().any(|v| matches!(
            v,
            Violation::PhoneGap {
                word: 0,
                phone: 1,
                ..
            }
        )));
    }

    #[test]
    fn detects_short_phone() {
        let raw = transcript(
            &[("a", 0.0, 1.0)],
            &[("A", 0.0, 0.005), ("B", 0.005, 1.0)],
        );
        let config = EditorConfig {
            second_step: 0.001,
            ..EditorConfig::default()
        };
        let words = build(&raw, &config).unwrap();
        let found = violations(&words, &config);
        assert_eq!(found.len(), 1);
        assert!(matches!(
            found[0],
            Violation::BelowMinDuration {
                interval: IntervalRef::Phone { word: 0, phone: 0 },
                ..
            }
        ));
    }
}
