//! Wall-clock to beat scheduling.
//!
//! The clock is polled once per rendered frame. Whenever the integer beat
//! under the current time differs from the last one fired, exactly one
//! event goes out for the current beat. Beats skipped between polls (a
//! stalled frame, or the track being switched off) are never replayed.

use crate::pattern::{BeatPattern, Trigger};
use arrayvec::ArrayVec;

pub const MIN_BPM: u32 = 40;
pub const MAX_BPM: u32 = 240;
pub const DEFAULT_BPM: u32 = 110;

/// Tempo change per key press.
pub const BPM_STEP: i32 = 5;

/// A beat crossing reported by `BeatClock::poll`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeatEvent {
    /// Beat number since time zero.
    pub index: u64,
    /// Low (kick) trigger fires on this beat.
    pub low: bool,
    /// High (hat) trigger fires on this beat.
    pub high: bool,
}

impl BeatEvent {
    fn new(index: u64) -> Self {
        Self {
            index,
            low: BeatPattern::low_fires(index),
            high: BeatPattern::high_fires(index),
        }
    }

    /// Triggers for this beat, low before high.
    pub fn triggers(&self) -> ArrayVec<Trigger, 2> {
        let mut out = ArrayVec::new();
        if self.low {
            out.push(Trigger::Kick);
        }
        if self.high {
            out.push(Trigger::Hat);
        }
        out
    }
}

/// Tempo plus the last beat that fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeatClock {
    bpm: u32,
    /// `None` until the first poll after creation or `reset`.
    last_beat: Option<u64>,
}

impl Default for BeatClock {
    fn default() -> Self {
        Self::new(DEFAULT_BPM)
    }
}

impl BeatClock {
    /// Clock at `bpm`, clamped to `MIN_BPM..=MAX_BPM`.
    pub fn new(bpm: u32) -> Self {
        Self {
            bpm: bpm.clamp(MIN_BPM, MAX_BPM),
            last_beat: None,
        }
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    pub fn last_beat(&self) -> Option<u64> {
        self.last_beat
    }

    /// Nudge the tempo by `delta` BPM, clamped. Returns the new tempo.
    pub fn adjust_bpm(&mut self, delta: i32) -> u32 {
        let bpm = (self.bpm as i64 + delta as i64).clamp(MIN_BPM as i64, MAX_BPM as i64);
        self.bpm = bpm as u32;
        self.bpm
    }

    /// Integer beat under `ms` milliseconds of wall-clock time.
    pub fn beat_at(&self, ms: f64) -> u64 {
        if !ms.is_finite() || ms <= 0.0 {
            return 0;
        }
        libm::floor(ms / 1000.0 * (self.bpm as f64 / 60.0)) as u64
    }

    /// Fire the beat under `ms` if it differs from the last one fired.
    pub fn poll(&mut self, ms: f64) -> Option<BeatEvent> {
        let beat = self.beat_at(ms);
        if self.last_beat == Some(beat) {
            return None;
        }
        self.last_beat = Some(beat);
        log::trace!("beat {} at {:.1} ms", beat, ms);
        Some(BeatEvent::new(beat))
    }

    /// Forget the last beat so the next poll starts fresh.
    pub fn reset(&mut self) {
        self.last_beat = None;
    }
}
