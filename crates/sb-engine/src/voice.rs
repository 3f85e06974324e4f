//! Percussion voices.
//!
//! Each voice owns its envelope and oscillator state and produces one mono
//! sample per call. Retriggering restarts the envelope from zero.

use core::f32::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::envelope::{Adsr, Envelope, EnvelopeState};
use crate::filter::Highpass;

/// Kick amplitude shape.
pub const KICK_ADSR: Adsr = Adsr::new(0.001, 0.08, 0.0, 0.08);
/// Seconds between kick onset and release.
const KICK_GATE: f32 = 0.1;
/// Kick pitch at onset and after the sweep.
const KICK_START_HZ: f32 = 60.0;
const KICK_END_HZ: f32 = 100.0;
const KICK_SWEEP_SECS: f32 = 0.06;

/// Hat amplitude shape.
pub const HAT_ADSR: Adsr = Adsr::new(0.001, 0.03, 0.0, 0.02);
const HAT_GATE: f32 = 0.05;
const HAT_CUTOFF_HZ: f32 = 8000.0;
const HAT_SEED: u64 = 0x5eed_0f_4a7;

/// Sine kick with a short upward pitch sweep.
#[derive(Clone, Debug)]
pub struct KickVoice {
    sample_rate: u32,
    envelope: Envelope,
    state: EnvelopeState,
    /// Oscillator phase in cycles, `0.0..1.0`.
    phase: f32,
    /// Samples since the last trigger.
    age: u32,
    sweep_samples: u32,
}

impl KickVoice {
    pub fn new(sample_rate: u32) -> Self {
        let sample_rate = sample_rate.max(1);
        Self {
            sample_rate,
            envelope: KICK_ADSR.to_envelope(KICK_GATE, 1.0, sample_rate),
            state: EnvelopeState::finished(),
            phase: 0.0,
            age: 0,
            sweep_samples: ((KICK_SWEEP_SECS * sample_rate as f32) as u32).max(1),
        }
    }

    /// Restart the kick from silence.
    pub fn trigger(&mut self) {
        self.state = EnvelopeState::new(&self.envelope);
        self.phase = 0.0;
        self.age = 0;
    }

    pub fn is_active(&self) -> bool {
        !self.state.is_finished()
    }

    /// Oscillator pitch at the current age.
    fn frequency(&self) -> f32 {
        let t = (self.age as f32 / self.sweep_samples as f32).min(1.0);
        KICK_START_HZ + (KICK_END_HZ - KICK_START_HZ) * t
    }

    /// Next mono sample in `-1.0..=1.0`.
    pub fn next_sample(&mut self) -> f32 {
        if self.state.is_finished() {
            return 0.0;
        }
        let out = libm::sinf(self.phase * TAU) * self.state.value();

        self.phase += self.frequency() / self.sample_rate as f32;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        self.age = self.age.saturating_add(1);
        self.state.advance(&self.envelope, 1);
        out
    }
}

/// White noise through a highpass.
#[derive(Clone, Debug)]
pub struct HatVoice {
    envelope: Envelope,
    state: EnvelopeState,
    rng: Pcg32,
    filter: Highpass,
}

impl HatVoice {
    pub fn new(sample_rate: u32) -> Self {
        Self::with_seed(sample_rate, HAT_SEED)
    }

    /// Hat with a fixed noise seed, for reproducible renders.
    pub fn with_seed(sample_rate: u32, seed: u64) -> Self {
        let sample_rate = sample_rate.max(1);
        Self {
            envelope: HAT_ADSR.to_envelope(HAT_GATE, 1.0, sample_rate),
            state: EnvelopeState::finished(),
            rng: Pcg32::seed_from_u64(seed),
            filter: Highpass::new(HAT_CUTOFF_HZ, sample_rate),
        }
    }

    /// Restart the hat from silence.
    pub fn trigger(&mut self) {
        self.state = EnvelopeState::new(&self.envelope);
    }

    pub fn is_active(&self) -> bool {
        !self.state.is_finished()
    }

    /// Next mono sample.
    pub fn next_sample(&mut self) -> f32 {
        // Noise runs continuously; the envelope gates it.
        let noise: f32 = self.rng.gen_range(-1.0..1.0);
        let filtered = self.filter.process(noise);
        if self.state.is_finished() {
            return 0.0;
        }
        let out = filtered * self.state.value();
        self.state.advance(&self.envelope, 1);
        out
    }
}
