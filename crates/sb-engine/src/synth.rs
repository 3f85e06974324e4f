//! Two-voice percussion synth.

use alloc::vec::Vec;

use crate::frame::Frame;
use crate::pattern::Trigger;
use crate::voice::{HatVoice, KickVoice};

/// Output level of each voice before summing.
const KICK_GAIN: f32 = 0.8;
const HAT_GAIN: f32 = 0.3;

/// Renders kick and hat triggers into stereo frames.
///
/// `render_frame` and `render_into` never allocate, so the synth can run
/// inside an audio callback.
pub struct Synth {
    sample_rate: u32,
    kick: KickVoice,
    hat: HatVoice,
}

impl Synth {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            kick: KickVoice::new(sample_rate),
            hat: HatVoice::new(sample_rate),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Start a voice. Retriggering a sounding voice restarts it.
    pub fn trigger(&mut self, trigger: Trigger) {
        log::trace!("synth trigger {:?}", trigger);
        match trigger {
            Trigger::Kick => self.kick.trigger(),
            Trigger::Hat => self.hat.trigger(),
        }
    }

    /// Whether any voice is still sounding.
    pub fn is_silent(&self) -> bool {
        !self.kick.is_active() && !self.hat.is_active()
    }

    /// Generate one frame of audio.
    pub fn render_frame(&mut self) -> Frame {
        let kick = self.kick.next_sample() * KICK_GAIN;
        let hat = self.hat.next_sample() * HAT_GAIN;
        Frame::from_unit(kick + hat)
    }

    /// Fill `out` with frames.
    pub fn render_into(&mut self, out: &mut [Frame]) {
        for frame in out.iter_mut() {
            *frame = self.render_frame();
        }
    }

    /// Render `count` frames into a new buffer.
    pub fn render_frames(&mut self, count: usize) -> Vec<Frame> {
        let mut out = Vec::with_capacity(count);
        out.extend((0..count).map(|_| self.render_frame()));
        out
    }
}
