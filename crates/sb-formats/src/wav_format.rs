//! WAV encoding and decoding for PCM audio.

use crate::FormatError;
use sb_engine::Frame;
use std::io::Write;

// --- Writing ---

pub(crate) fn write_wav(w: &mut impl Write, frames: &[Frame], sample_rate: u32) -> std::io::Result<()> {
    let num_channels: u16 = 2;
    let bits_per_sample: u16 = 16;
    let block_align = num_channels * (bits_per_sample / 8);
    let data_size = frames.len() as u32 * block_align as u32;

    write_riff_header(w, data_size)?;
    write_fmt_chunk(w, num_channels, sample_rate, block_align, bits_per_sample)?;
    write_data_chunk(w, frames, data_size)
}

pub fn frames_to_wav(frames: &[Frame], sample_rate: u32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(44 + frames.len() * 4);
    write_wav(&mut buf, frames, sample_rate).expect("Vec<u8> write cannot fail");
    buf
}

fn write_riff_header(w: &mut impl Write, data_size: u32) -> std::io::Result<()> {
    w.write_all(b"RIFF")?;
    w.write_all(&(36 + data_size).to_le_bytes())?;
    w.write_all(b"WAVE")
}

fn write_fmt_chunk(
    w: &mut impl Write,
    num_channels: u16,
    sample_rate: u32,
    block_align: u16,
    bits_per_sample: u16,
) -> std::io::Result<()> {
    w.write_all(b"fmt ")?;
    w.write_all(&16u32.to_le_bytes())?;
    w.write_all(&1u16.to_le_bytes())?;
    w.write_all(&num_channels.to_le_bytes())?;
    w.write_all(&sample_rate.to_le_bytes())?;
    w.write_all(&(sample_rate * block_align as u32).to_le_bytes())?;
    w.write_all(&block_align.to_le_bytes())?;
    w.write_all(&bits_per_sample.to_le_bytes())
}

fn write_data_chunk(w: &mut impl Write, frames: &[Frame], data_size: u32) -> std::io::Result<()> {
    w.write_all(b"data")?;
    w.write_all(&data_size.to_le_bytes())?;
    for frame in frames {
        w.write_all(&frame.left.to_le_bytes())?;
        w.write_all(&frame.right.to_le_bytes())?;
    }
    Ok(())
}

// --- Reading ---

/// Decoded PCM audio, widened to 16-bit stereo frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioClip {
    pub sample_rate: u32,
    /// Channel count in the source file (1 or 2).
    pub channels: u16,
    pub frames: Vec<Frame>,
}

impl AudioClip {
    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames.len() as f64 / self.sample_rate as f64
    }
}

/// Load a WAV file from raw bytes.
pub fn load_wav(data: &[u8]) -> Result<AudioClip, FormatError> {
    let header = parse_header(data)?;
    let end = (header.data_offset + header.data_size).min(data.len());
    let raw = data.get(header.data_offset..end).ok_or(FormatError::UnexpectedEof)?;

    let frames = match (header.bits_per_sample, header.num_channels) {
        (8, 1) => raw.iter().map(|&b| Frame::mono(widen_u8(b))).collect(),
        (8, 2) => raw
            .chunks_exact(2)
            .map(|c| Frame { left: widen_u8(c[0]), right: widen_u8(c[1]) })
            .collect(),
        (16, 1) => raw
            .chunks_exact(2)
            .map(|c| Frame::mono(i16::from_le_bytes([c[0], c[1]])))
            .collect(),
        (16, 2) => raw
            .chunks_exact(4)
            .map(|c| Frame {
                left: i16::from_le_bytes([c[0], c[1]]),
                right: i16::from_le_bytes([c[2], c[3]]),
            })
            .collect(),
        (bits, ch) => {
            return Err(FormatError::Unsupported(format!("{}-bit {}-channel pcm", bits, ch)));
        }
    };

    Ok(AudioClip {
        sample_rate: header.sample_rate,
        channels: header.num_channels,
        frames,
    })
}

/// 8-bit WAV is unsigned with center 128.
fn widen_u8(b: u8) -> i16 {
    (b as i16 - 128) << 8
}

struct WavHeader {
    num_channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
    data_offset: usize,
    data_size: usize,
}

fn parse_header(data: &[u8]) -> Result<WavHeader, FormatError> {
    if data.len() < 44 {
        return Err(FormatError::UnexpectedEof);
    }
    if &data[0..4] != b"RIFF" || &data[8..12] != b"WAVE" {
        return Err(FormatError::InvalidHeader);
    }

    let mut pos = 12;
    let mut fmt: Option<(u16, u32, u16)> = None;
    let mut data_chunk: Option<(usize, usize)> = None;

    while pos + 8 <= data.len() {
        let chunk_id = &data[pos..pos + 4];
        let chunk_size = read_u32_le(data, pos + 4) as usize;

        if chunk_id == b"fmt " && chunk_size >= 16 && pos + 24 <= data.len() {
            let format = read_u16_le(data, pos + 8);
            if format != 1 {
                return Err(FormatError::Unsupported(format!("wav format tag {}", format)));
            }
            let channels = read_u16_le(data, pos + 10);
            let rate = read_u32_le(data, pos + 12);
            let bits = read_u16_le(data, pos + 22);
            fmt = Some((channels, rate, bits));
        } else if chunk_id == b"data" {
            data_chunk = Some((pos + 8, chunk_size));
        }

        pos = pos.saturating_add(8 + chunk_size);
        if pos % 2 != 0 {
            pos += 1;
        }
    }

    let (num_channels, sample_rate, bits_per_sample) = fmt.ok_or(FormatError::InvalidHeader)?;
    let (data_offset, data_size) = data_chunk.ok_or(FormatError::InvalidHeader)?;

    Ok(WavHeader { num_channels, sample_rate, bits_per_sample, data_offset, data_size })
}

fn read_u16_le(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}
