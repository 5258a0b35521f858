//! WAV file I/O for the command-line tools.
//!
//! Samples are held per channel, normalized to `[-1.0, 1.0)`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

/// Decoded WAV contents, one `Vec` per channel
#[derive(Debug, Clone, PartialEq)]
pub struct WavData {
    pub sample_rate: u32,
    pub channels: Vec<Vec<f32>>,
}

impl WavData {
    pub fn num_frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }
}

/// On-disk sample encoding for [`save_wav`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum WavEncoding {
    /// 32-bit IEEE float
    Float,
    /// 16-bit signed PCM
    Int16,
}

pub fn read_wav<P: AsRef<Path>>(path: P) -> anyhow::Result<WavData> {
    let reader = WavReader::open(path.as_ref())
        .with_context(|| format!("Failed to open {}", path.as_ref().display()))?;
    let spec = reader.spec();
    if spec.channels == 0 {
        anyhow::bail!("WAV file has no channels");
    }

    let interleaved = read_samples(reader, &spec)?;
    Ok(WavData {
        sample_rate: spec.sample_rate,
        channels: deinterleave(&interleaved, spec.channels as usize),
    })
}

fn read_samples(
    mut reader: WavReader<BufReader<File>>,
    spec: &WavSpec,
) -> anyhow::Result<Vec<f32>> {
    let samples = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = 2_i32.pow(spec.bits_per_sample as u32 - 1) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    Ok(samples)
}

/// Split `[L, R, L, R, ...]` into per-channel buffers. A trailing partial
/// frame is dropped.
pub fn deinterleave(interleaved: &[f32], channels: usize) -> Vec<Vec<f32>> {
    let frames = interleaved.len() / channels;
    let mut out = vec![Vec::with_capacity(frames); channels];
    for frame in interleaved.chunks_exact(channels) {
        for (buf, &s) in out.iter_mut().zip(frame) {
            buf.push(s);
        }
    }
    out
}

/// Inverse of [`deinterleave`]; the shortest channel sets the frame count
pub fn interleave(channels: &[Vec<f32>]) -> Vec<f32> {
    let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
    let mut out = Vec::with_capacity(frames * channels.len());
    for i in 0..frames {
        out.extend(channels.iter().map(|c| c[i]));
    }
    out
}

pub fn save_wav<P: AsRef<Path>>(
    path: P,
    channels: &[Vec<f32>],
    sample_rate: u32,
    encoding: WavEncoding,
) -> anyhow::Result<()> {
    let spec = match encoding {
        WavEncoding::Float => WavSpec {
            channels: channels.len() as u16,
            sample_rate,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        },
        WavEncoding::Int16 => WavSpec {
            channels: channels.len() as u16,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        },
    };

    let mut writer = WavWriter::create(path.as_ref(), spec)
        .with_context(|| format!("Failed to create {}", path.as_ref().display()))?;
    for sample in interleave(channels) {
        match encoding {
            WavEncoding::Float => writer.write_sample(sample)?,
            WavEncoding::Int16 => writer.write_sample((sample * 32768.0).round() as i16)?,
        }
    }
    writer.finalize()?;
    Ok(())
}
