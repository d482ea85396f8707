use std::path::Path;

use claxon::FlacReader;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use textgrid_editor::SampleBuffer;

/// Decodes a FLAC or WAV file into planar samples normalised to [-1, 1].
pub fn read_audio(path: &Path) -> Result<SampleBuffer, String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("flac") => read_flac(path),
        Some("wav") => read_wav(path),
        _ => Err(format!(
            "Unsupported audio format for '{}'; expected .flac or .wav.",
            path.display()
        )),
    }
}

fn read_flac(path: &Path) -> Result<SampleBuffer, String> {
    let mut reader = FlacReader::open(path)
        .map_err(|err| format!("Failed to decode FLAC '{}': {err}", path.display()))?;
    let streaminfo = reader.streaminfo();
    let channels = streaminfo.channels as usize;
    let scale = int_scale(streaminfo.bits_per_sample);
    let sample_rate_hz = streaminfo.sample_rate;

    if channels == 0 {
        return Err(format!("FLAC has zero channels: {}", path.display()));
    }

    let mut interleaved = Vec::new();
    for sample in reader.samples() {
        let sample = sample
            .map_err(|err| format!("Failed reading sample from '{}': {err}", path.display()))?;
        interleaved.push(sample as f32 / scale);
    }
    SampleBuffer::from_interleaved(sample_rate_hz, channels, &interleaved)
        .map_err(|err| format!("Invalid audio in '{}': {err}", path.display()))
}

fn read_wav(path: &Path) -> Result<SampleBuffer, String> {
    let mut reader = WavReader::open(path)
        .map_err(|err| format!("Failed to open WAV '{}': {err}", path.display()))?;
    let spec = reader.spec();
    let read_err = |err: hound::Error| format!("Failed reading sample from '{}': {err}", path.display());

    let interleaved = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_err)?,
        SampleFormat::Int => {
            let scale = int_scale(spec.bits_per_sample as u32);
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|value| value as f32 / scale))
                .collect::<Result<Vec<_>, _>>()
                .map_err(read_err)?
        }
    };
    SampleBuffer::from_interleaved(spec.sample_rate, spec.channels as usize, &interleaved)
        .map_err(|err| format!("Invalid audio in '{}': {err}", path.display()))
}

/// Writes `buffer` as 32-bit float WAV.
pub fn write_wav(path: &Path, buffer: &SampleBuffer) -> Result<(), String> {
    let channel_count = buffer.channel_count();
    let spec = WavSpec {
        channels: u16::try_from(channel_count)
            .map_err(|_| format!("Too many channels for WAV output: {channel_count}"))?,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create clip output directory '{}': {err}",
                parent.display()
            )
        })?;
    }
    let write_err = |err: hound::Error| format!("Failed to write WAV '{}': {err}", path.display());
    let mut writer = WavWriter::create(path, spec).map_err(write_err)?;
    let channels: Vec<&[f32]> = (0..channel_count)
        .filter_map(|channel| buffer.channel_data(channel))
        .collect();
    for frame in 0..buffer.frames() {
        for channel in &channels {
            writer.write_sample(channel[frame]).map_err(write_err)?;
        }
    }
    writer.finalize().map_err(write_err)
}

fn int_scale(bits_per_sample: u32) -> f32 {
    if bits_per_sample > 1 {
        ((1_i64 << (bits_per_sample - 1)) - 1) as f32
    } else {
        1.0
    }
}
