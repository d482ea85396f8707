use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phone {
    pub text: String,
    /// Interval is [start, end) in seconds.
    pub start: f64,
    pub end: f64,
}

impl Phone {
    pub fn dur(&self) -> f64 {
        self.end - self.start
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Word {
    /// Position in the words tier, fixed at load time.
    pub index: usize,
    pub text: String,
    pub start: f64,
    pub end: f64,
    pub phones: Vec<Phone>,
}

impl Word {
    pub fn dur(&self) -> f64 {
        self.end - self.start
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }

    /// Silence and other unlabelled stretches carry empty text.
    pub fn is_silence(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Stable arena address of an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IntervalRef {
    Word { word: usize },
    Phone { word: usize, phone: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_degenerate(&self) -> bool {
        self.end.partial_cmp(&self.start) != Some(Ordering::Greater)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInterval {
    pub xmin: f64,
    pub xmax: f64,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTier {
    pub name: String,
    pub xmin: f64,
    pub xmax: f64,
    pub intervals: Vec<RawInterval>,
}

/// Tiered interval transcript as produced by the TextGrid parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTranscript {
    pub xmin: f64,
    pub xmax: f64,
    pub tiers: Vec<RawTier>,
}

impl RawTranscript {
    pub fn tier(&self, name: &str) -> Option<&RawTier> {
        self.tiers.iter().find(|tier| tier.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_ranges() {
        assert!(TimeRange::new(1.0, 1.0).is_degenerate());
        assert!(TimeRange::new(2.0, 1.0).is_degenerate());
        assert!(TimeRange::new(0.0, f64::NAN).is_degenerate());
        assert!(!TimeRange::new(0.0, 0.5).is_degenerate());
    }

    #[test]
    fn raw_transcript_from_json_defaults_text() {
        let json = r#"{
            "xmin": 0.0,
            "xmax": 1.0,
            "tiers": [
                { "name": "words", "xmin": 0.0, "xmax": 1.0, "intervals": [{ "xmin": 0.0, "xmax": 1.0 }] }
            ]
        }"#;
        let raw: RawTranscript = serde_json::from_str(json).expect("valid transcript json");
        let words = raw.tier("words").expect("words tier");
        assert_eq!(words.intervals[0].text, "");
        assert!(raw.tier("phones").is_none());
    }

    #[test]
    fn interval_ref_serializes_tagged() {
        let json = serde_json::to_string(&IntervalRef::Phone { word: 1, phone: 0 }).unwrap();
        assert_eq!(json, r#"{"kind":"phone","word":1,"phone":0}"#);
    }
}
