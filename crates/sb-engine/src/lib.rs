//! Playback engine for spritebeat's beat track.
//!
//! A `BeatClock` turns wall-clock time into beat events, the fixed
//! `BeatPattern` maps each beat to kick/hat triggers, and the `Synth`
//! renders those triggers into stereo frames.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod clock;
mod envelope;
mod filter;
mod frame;
mod pattern;
mod synth;
mod voice;

pub use clock::{BeatClock, BeatEvent, BPM_STEP, DEFAULT_BPM, MAX_BPM, MIN_BPM};
pub use envelope::{Adsr, BreakPoint, Envelope, EnvelopeState, MAX_BREAKPOINTS};
pub use filter::Highpass;
pub use frame::Frame;
pub use pattern::{BeatPattern, Trigger, PATTERN_LENGTH};
pub use synth::Synth;
pub use voice::{HatVoice, KickVoice, HAT_ADSR, KICK_ADSR};
