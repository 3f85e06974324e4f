//! Asset codecs for spritebeat.
//!
//! Decodes PNG sprite sheets into RGBA8 pixels and reads/writes PCM WAV.

mod sprite;
mod wav_format;

use std::path::Path;

pub use sprite::{load_png, SpriteSheet};
pub use wav_format::{frames_to_wav, load_wav, AudioClip};

/// Error type for asset decoding.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// Invalid file header or magic bytes
    #[error("invalid header")]
    InvalidHeader,
    /// Unexpected end of file
    #[error("unexpected end of file")]
    UnexpectedEof,
    /// Valid file using a variant we don't decode
    #[error("unsupported format: {0}")]
    Unsupported(String),
    /// Pixel buffer doesn't match the stated size
    #[error("pixel data is {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("png decode error: {0}")]
    Png(#[from] png::DecodingError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read and decode a PNG sprite sheet from disk.
pub fn read_sprite_sheet(path: impl AsRef<Path>) -> Result<SpriteSheet, FormatError> {
    let data = std::fs::read(path.as_ref())?;
    load_png(&data)
}

/// Read and decode a WAV file from disk.
pub fn read_audio_clip(path: impl AsRef<Path>) -> Result<AudioClip, FormatError> {
    let data = std::fs::read(path.as_ref())?;
    load_wav(&data)
}
