use crate::annotation::interval_set::{PHONES_TIER, WORDS_TIER};
use crate::types::{RawInterval, RawTier, RawTranscript, Word};

/// Writes the current word and phone boundaries back into the tier layout of the
/// transcript they were loaded from.
///
/// Tier order and bounds are preserved. The `words` tier is rebuilt from the words,
/// the `phones` tier from every word's phones in order, and any other tier is
/// copied unchanged.
pub fn export_transcript(raw: &RawTranscript, words: &[Word]) -> RawTranscript {
    let tiers = raw
        .tiers
        .iter()
        .map(|tier| {
            let intervals = match tier.name.as_str() {
                WORDS_TIER => words
                    .iter()
                    .map(|word| RawInterval {
                        xmin: word.start,
                        xmax: word.end,
                        text: word.text.clone(),
                    })
                    .collect(),
                PHONES_TIER => words
                    .iter()
                    .flat_map(|word| &word.phones)
                    .map(|phone| RawInterval {
                        xmin: phone.start,
                        xmax: phone.end,
                        text: phone.text.clone(),
                    })
                    .collect(),
                _ => tier.intervals.clone(),
            };
            RawTier {
                name: tier.name.clone(),
                xmin: tier.xmin,
                xmax: tier.xmax,
                intervals,
            }
        })
        .collect();

    RawTranscript {
        xmin: raw.xmin,
        xmax: raw.xmax,
        tiers,
    }
}
