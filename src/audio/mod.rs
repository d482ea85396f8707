pub mod buffer;
pub mod envelope;
pub mod waveform;

pub use buffer::SampleBuffer;
