//! Time-to-frame mapping.
//!
//! `frame_float = t * fps` is a continuous position. Loop mode uses it
//! directly (a sawtooth once reduced modulo the frame count); ping-pong mode
//! folds it into a triangle wave `0, 1, .., n-1, n-2, .., 1, 0, ..` while
//! keeping the fractional part, so blending stays continuous across the
//! direction change.

/// Absorbs float drift from stepping by `1/fps`, so `n` steps land on
/// frame `n` rather than just below it.
const STEP_EPSILON: f64 = 1e-9;

/// Frame to draw for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePosition {
    /// Frame index in `[0, total_frames)`.
    pub current: u32,
    /// The frame after `current`, wrapping to 0.
    pub next: u32,
    /// Fractional progress from `current` towards `next`, in `[0, 1)`.
    pub intra: f32,
}

/// Remap a continuous frame position into index space.
///
/// Negative and non-finite positions are treated as 0.
pub fn map_to_index(frame_float: f64, total_frames: u32, ping_pong: bool) -> f64 {
    let frame_float = if frame_float.is_finite() && frame_float > 0.0 { frame_float } else { 0.0 };
    if !ping_pong {
        return frame_float;
    }

    let total = total_frames.max(1) as u64;
    let period = (2 * total).saturating_sub(2).max(1);
    let whole = libm::floor(frame_float);
    let frac = frame_float - whole;
    let n = whole as u64 % period;

    if n < total {
        n as f64 + frac
    } else {
        (2 * total - 2 - n) as f64 + frac
    }
}

/// Frame position after `time` seconds at `fps`.
pub fn frame_position(time: f64, fps: f64, total_frames: u32, ping_pong: bool) -> FramePosition {
    let total = total_frames.max(1) as u64;
    let mapped = map_to_index(time * fps + STEP_EPSILON, total_frames, ping_pong);
    let whole = libm::floor(mapped);
    let current = (whole as u64 % total) as u32;

    FramePosition {
        current,
        next: ((current as u64 + 1) % total) as u32,
        intra: (mapped - whole) as f32,
    }
}
