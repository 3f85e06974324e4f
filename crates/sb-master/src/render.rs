//! Offline rendering of the beat track.

use sb_engine::{BeatClock, Frame, Synth};

/// Render `seconds` of the beat pattern at `bpm`.
///
/// The beat clock is polled once per sample, so every beat lands on the
/// exact sample where its millisecond time falls.
pub fn render_beat_track(bpm: u32, seconds: f64, sample_rate: u32) -> Vec<Frame> {
    let sample_rate = sample_rate.max(1);
    let mut clock = BeatClock::new(bpm);
    let mut synth = Synth::new(sample_rate);

    let total = if seconds.is_finite() && seconds > 0.0 {
        (seconds * sample_rate as f64) as usize
    } else {
        0
    };

    let mut frames = Vec::with_capacity(total);
    for n in 0..total {
        let ms = n as f64 * 1000.0 / sample_rate as f64;
        if let Some(event) = clock.poll(ms) {
            for trigger in event.triggers() {
                synth.trigger(trigger);
            }
        }
        frames.push(synth.render_frame());
    }
    frames
}

/// Render the beat track straight to WAV bytes.
pub fn render_to_wav(bpm: u32, seconds: f64, sample_rate: u32) -> Vec<u8> {
    let frames = render_beat_track(bpm, seconds, sample_rate);
    sb_formats::frames_to_wav(&frames, sample_rate)
}
