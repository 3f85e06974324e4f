//! Animation clock and playback settings.

use crate::blend::{crossfade_alpha, BlendPlan};
use crate::mapper::{frame_position, FramePosition};

pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 60;
pub const DEFAULT_FPS: u32 = 6;

/// Default crossfade ramp in seconds.
pub const DEFAULT_BLEND_DURATION: f32 = 0.12;

/// Playback settings for the sprite animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackConfig {
    /// Frames per second, always within `MIN_FPS..=MAX_FPS`.
    pub fps: u32,
    /// Play forward then backward instead of wrapping to frame 0.
    pub ping_pong: bool,
    /// Crossfade adjacent frames.
    pub blend_enabled: bool,
    /// Crossfade ramp in seconds.
    pub blend_duration: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            ping_pong: false,
            blend_enabled: false,
            blend_duration: DEFAULT_BLEND_DURATION,
        }
    }
}

impl PlaybackConfig {
    /// Config at `fps`, clamped into range.
    pub fn with_fps(fps: u32) -> Self {
        Self {
            fps: fps.clamp(MIN_FPS, MAX_FPS),
            ..Self::default()
        }
    }

    /// Nudge fps by `delta`, clamped. Returns the new value.
    pub fn adjust_fps(&mut self, delta: i32) -> u32 {
        let fps = (self.fps as i64 + delta as i64).clamp(MIN_FPS as i64, MAX_FPS as i64);
        self.fps = fps as u32;
        self.fps
    }

    /// Duration of one frame in seconds.
    pub fn frame_seconds(&self) -> f64 {
        1.0 / self.fps.max(MIN_FPS) as f64
    }

    /// Frame position after `time` seconds.
    pub fn position_at(&self, time: f64, total_frames: u32) -> FramePosition {
        frame_position(time, self.fps as f64, total_frames, self.ping_pong)
    }

    /// Draw plan for a frame position under the current blend settings.
    pub fn blend_plan(&self, position: FramePosition) -> BlendPlan {
        if !self.blend_enabled {
            return BlendPlan::Single { frame: position.current };
        }
        BlendPlan::Crossfade {
            from: position.current,
            to: position.next,
            alpha: crossfade_alpha(position.intra, self.fps as f32, self.blend_duration),
        }
    }
}

/// Elapsed animation time, independent of wall-clock time.
///
/// Advances only while playing; stepping moves it by whole frames and only
/// while paused. Never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationClock {
    elapsed: f64,
    paused: bool,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed animation seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause or resume. Returns the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Advance by `dt` wall seconds if playing.
    pub fn tick(&mut self, dt: f64) {
        if self.paused || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.elapsed += dt;
    }

    /// Move one frame forward. No-op unless paused.
    pub fn step_forward(&mut self, config: &PlaybackConfig) -> bool {
        if !self.paused {
            return false;
        }
        self.elapsed += config.frame_seconds();
        true
    }

    /// Move one frame back, stopping at 0. No-op unless paused.
    pub fn step_backward(&mut self, config: &PlaybackConfig) -> bool {
        if !self.paused {
            return false;
        }
        self.elapsed = (self.elapsed - config.frame_seconds()).max(0.0);
        true
    }
}
