use std::ops::Range;

use serde::Serialize;

use crate::audio::buffer::SampleBuffer;
use crate::error::AnnotationError;
use crate::types::TimeRange;

/// Stand-in for silence at the ends of the envelope. An exponential ramp cannot
/// start or end at exactly zero.
pub const GAIN_FLOOR: f64 = f64::EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GainPoint {
    /// Seconds from the start of playback.
    pub offset: f64,
    pub gain: f64,
}

/// Schedule for playing one range of a buffer with faded edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackPlan {
    /// Read position in the source, in seconds. Never negative.
    pub source_offset: f64,
    /// Seconds to play, fades included.
    pub play_duration: f64,
    /// Control points, interpolated exponentially between neighbours.
    pub gain_points: Vec<GainPoint>,
}

/// Plans bounded playback of `range` with `fade_in`/`fade_out` seconds of
/// padding on either side.
pub fn plan(range: TimeRange, fade_in: f64, fade_out: f64) -> Result<PlaybackPlan, AnnotationError> {
    if range.is_degenerate() {
        return Err(AnnotationError::degenerate(range.start, range.end));
    }
    let fade_in = fade_in.max(0.0);
    let fade_out = fade_out.max(0.0);
    let play_duration = range.duration() + fade_in + fade_out;
    let source_offset = (range.start - fade_in).max(0.0);

    Ok(PlaybackPlan {
        source_offset,
        play_duration,
        gain_points: vec![
            GainPoint {
                offset: 0.0,
                gain: GAIN_FLOOR,
            },
            GainPoint {
                offset: fade_in,
                gain: 1.0,
            },
            GainPoint {
                offset: play_duration - fade_out,
                gain: 1.0,
            },
            GainPoint {
                offset: play_duration,
                gain: GAIN_FLOOR,
            },
        ],
    })
}

impl PlaybackPlan {
    /// Gain at `t` seconds into playback.
    pub fn gain_at(&self, t: f64) -> f64 {
        let Some(first) = self.gain_points.first() else {
            return 1.0;
        };
        if t < first.offset {
            return first.gain;
        }
        for pair in self.gain_points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t < b.offset {
                let span = b.offset - a.offset;
                if span <= 0.0 {
                    return b.gain;
                }
                let progress = (t - a.offset) / span;
                return a.gain * (b.gain / a.gain).powf(progress);
            }
        }
        self.gain_points[self.gain_points.len() - 1].gain
    }

    /// Source frames the plan reads, clamped to a buffer of `len` frames.
    pub fn sample_span(&self, sample_rate: u32, len: usize) -> Range<usize> {
        let rate = sample_rate as f64;
        let start = ((self.source_offset * rate).round() as usize).min(len);
        let count = (self.play_duration * rate).round() as usize;
        start..start.saturating_add(count).min(len)
    }

    /// Cuts the planned span out of `buffer` with the envelope applied.
    pub fn render(&self, buffer: &SampleBuffer) -> Result<SampleBuffer, AnnotationError> {
        let rate = buffer.sample_rate();
        let span = self.sample_span(rate, buffer.frames());
        let gains: Vec<f32> = (0..span.len())
            .map(|frame| self.gain_at(frame as f64 / rate as f64) as f32)
            .collect();
        let channels = (0..buffer.channel_count())
            .filter_map(|channel| buffer.channel_data(channel))
            .map(|samples| {
                samples[span.clone()]
                    .iter()
                    .zip(&gains)
                    .map(|(&sample, &gain)| sample * gain)
                    .collect()
            })
            .collect();
        SampleBuffer::new(rate, channels)
    }
}
