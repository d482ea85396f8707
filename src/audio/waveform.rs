use std::ops::Range;

use serde::Serialize;

use crate::audio::buffer::SampleBuffer;
use crate::error::AnnotationError;
use crate::types::TimeRange;

/// One pixel column of the decimated waveform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaveformBar {
    pub x: usize,
    /// Lowest sample seen in the column.
    pub y_min: f32,
    /// Highest sample seen in the column.
    pub y_max: f32,
    /// Top edge of the bar in canvas units, measured from the top.
    pub top: f32,
    /// Bar height in canvas units, never below one.
    pub height: f32,
}

/// Sample indices covered by `range`: `round(start * rate)..floor(end * rate)`,
/// clamped to `len`.
pub fn sample_span(sample_rate: u32, range: TimeRange, len: usize) -> Range<usize> {
    let rate = sample_rate as f64;
    let to_index = |value: f64| {
        if value.is_finite() && value > 0.0 {
            (value as usize).min(len)
        } else {
            0
        }
    };
    let start = to_index((range.start * rate).round());
    let end = to_index((range.end * rate).floor());
    start..end.max(start)
}

/// Min/max decimation of channel 0 over `range` into `width` columns of a canvas
/// `height` units tall.
///
/// Each column covers `ceil(samples / width)` samples. Min starts at +1 and max
/// at -1, so input is assumed normalised. Columns past the end of a short span
/// are drawn flat at the midline.
pub fn render(
    buffer: &SampleBuffer,
    range: TimeRange,
    width: usize,
    height: f32,
) -> Result<Vec<WaveformBar>, AnnotationError> {
    if range.is_degenerate() {
        return Err(AnnotationError::degenerate(range.start, range.end));
    }
    let samples = buffer.channel_data(0).unwrap_or(&[]);
    let segment = &samples[sample_span(buffer.sample_rate(), range, samples.len())];
    if width == 0 {
        return Ok(Vec::new());
    }

    let step = segment.len().div_ceil(width);
    let amp = height / 2.0;
    let bars = (0..width)
        .map(|x| {
            let from = (x * step).min(segment.len());
            let to = (from + step).min(segment.len());
            let column = &segment[from..to];
            let (y_min, y_max) = if column.is_empty() {
                (0.0, 0.0)
            } else {
                column
                    .iter()
                    .fold((1.0f32, -1.0f32), |(lo, hi), &s| (lo.min(s), hi.max(s)))
            };
            WaveformBar {
                x,
                y_min,
                y_max,
                top: (1.0 + y_min) * amp,
                height: ((y_max - y_min) * amp).max(1.0),
            }
        })
        .collect();

    tracing::debug!(
        start = range.start,
        end = range.end,
        width,
        samples = segment.len(),
        step,
        "waveform: rendered columns"
    );
    Ok(bars)
}
