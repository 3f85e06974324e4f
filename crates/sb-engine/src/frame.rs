//! Audio frame type.

/// A stereo audio frame (16-bit integer).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub left: i16,
    pub right: i16,
}

impl Frame {
    /// Create a silent frame.
    pub const fn silence() -> Self {
        Self { left: 0, right: 0 }
    }

    /// Create a mono frame (same value for both channels).
    pub const fn mono(value: i16) -> Self {
        Self {
            left: value,
            right: value,
        }
    }

    /// Mono frame from a sample in `-1.0..=1.0`; out-of-range input clips.
    pub fn from_unit(sample: f32) -> Self {
        if !sample.is_finite() {
            return Self::silence();
        }
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        Self::mono(value)
    }

    pub fn is_silent(&self) -> bool {
        self.left == 0 && self.right == 0
    }
}
