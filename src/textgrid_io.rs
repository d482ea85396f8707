use std::path::Path;

use textgrid::{Interval, TextGrid, Tier, TierType};

use crate::error::AnnotationError;
use crate::types::{RawInterval, RawTier, RawTranscript};

/// Copies the interval tiers of a parsed TextGrid. Point tiers carry no
/// boundaries to edit and are skipped.
pub fn raw_from_textgrid(textgrid: &TextGrid) -> RawTranscript {
    let mut tiers = Vec::with_capacity(textgrid.tiers.len());
    for tier in &textgrid.tiers {
        if tier.tier_type != TierType::IntervalTier {
            tracing::warn!(tier = tier.name.as_str(), "textgrid: skipping point tier");
            continue;
        }
        tiers.push(RawTier {
            name: tier.name.clone(),
            xmin: tier.xmin,
            xmax: tier.xmax,
            intervals: tier
                .intervals
                .iter()
                .map(|interval| RawInterval {
                    xmin: interval.xmin,
                    xmax: interval.xmax,
                    text: interval.text.clone(),
                })
                .collect(),
        });
    }
    RawTranscript {
        xmin: textgrid.xmin,
        xmax: textgrid.xmax,
        tiers,
    }
}

pub fn load_raw_transcript(path: &Path) -> Result<RawTranscript, AnnotationError> {
    let textgrid =
        TextGrid::from_file(path).map_err(|err| AnnotationError::textgrid("parse TextGrid", err))?;
    let raw = raw_from_textgrid(&textgrid);
    tracing::debug!(
        path = %path.display(),
        tiers = raw.tiers.len(),
        "textgrid: loaded"
    );
    Ok(raw)
}

/// Loads a transcript from a `.json` file in the serialized tier layout, or
/// from anything else as a TextGrid.
pub fn load_transcript_file(path: &Path) -> Result<RawTranscript, AnnotationError> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return load_raw_transcript(path);
    }
    let data =
        std::fs::read_to_string(path).map_err(|e| AnnotationError::io("read transcript", e))?;
    serde_json::from_str(&data).map_err(|e| AnnotationError::json("parse transcript", e))
}

pub fn to_textgrid(raw: &RawTranscript) -> Result<TextGrid, AnnotationError> {
    let mut textgrid = TextGrid::new(raw.xmin, raw.xmax)
        .map_err(|err| AnnotationError::textgrid("build TextGrid", err))?;
    for tier in &raw.tiers {
        let intervals = tier
            .intervals
            .iter()
            .map(|interval| Interval {
                xmin: interval.xmin,
                xmax: interval.xmax,
                text: interval.text.clone(),
            })
            .collect();
        textgrid
            .add_tier(Tier {
                name: tier.name.clone(),
                tier_type: TierType::IntervalTier,
                xmin: tier.xmin,
                xmax: tier.xmax,
                intervals,
                points: Vec::new(),
            })
            .map_err(|err| AnnotationError::textgrid("add TextGrid tier", err))?;
    }
    Ok(textgrid)
}

pub fn write_textgrid(path: &Path, raw: &RawTranscript) -> Result<(), AnnotationError> {
    let textgrid = to_textgrid(raw)?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| AnnotationError::io("create TextGrid output directory", e))?;
    }
    textgrid
        .to_file(path, false)
        .map_err(|err| AnnotationError::textgrid("write TextGrid", err))
}
