use crate::error::AnnotationError;

/// Decoded audio, one `Vec<f32>` per channel, samples nominally in [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl SampleBuffer {
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> Result<Self, AnnotationError> {
        if sample_rate == 0 {
            return Err(AnnotationError::invalid_config("sample rate must be non-zero"));
        }
        if channels.is_empty() {
            return Err(AnnotationError::invalid_config(
                "sample buffer needs at least one channel",
            ));
        }
        let frames = channels[0].len();
        if channels.iter().any(|channel| channel.len() != frames) {
            return Err(AnnotationError::invalid_config(
                "all channels must have the same length",
            ));
        }
        Ok(Self {
            sample_rate,
            channels,
        })
    }

    pub fn mono(sample_rate: u32, samples: Vec<f32>) -> Result<Self, AnnotationError> {
        Self::new(sample_rate, vec![samples])
    }

    /// Splits frame-interleaved samples into planar channels; a trailing partial
    /// frame is discarded.
    pub fn from_interleaved(
        sample_rate: u32,
        channel_count: usize,
        interleaved: &[f32],
    ) -> Result<Self, AnnotationError> {
        if channel_count == 0 {
            return Err(AnnotationError::invalid_config(
                "sample buffer needs at least one channel",
            ));
        }
        let frames = interleaved.len() / channel_count;
        let mut channels = vec![Vec::with_capacity(frames); channel_count];
        for frame in interleaved.chunks_exact(channel_count) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }
        Self::new(sample_rate, channels)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn channel_data(&self, channel: usize) -> Option<&[f32]> {
        self.channels.get(channel).map(Vec::as_slice)
    }

    pub fn frames(&self) -> usize {
        self.channels[0].len()
    }

    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaved_is_split_per_channel() {
        let buffer = SampleBuffer::from_interleaved(4, 2, &[0.1, -0.1, 0.2, -0.2, 0.3]).unwrap();
        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.channel_data(0).unwrap(), &[0.1, 0.2]);
        assert_eq!(buffer.channel_data(1).unwrap(), &[-0.1, -0.2]);
        assert!(buffer.channel_data(2).is_none());
        assert_eq!(buffer.duration(), 0.5);
    }

    #[test]
    fn rejects_zero_rate_and_ragged_channels() {
        assert!(SampleBuffer::mono(0, vec![0.0]).is_err());
        assert!(SampleBuffer::new(8_000, vec![vec![0.0; 3], vec![0.0; 2]]).is_err());
        assert!(SampleBuffer::new(8_000, Vec::new()).is_err());
    }
}
