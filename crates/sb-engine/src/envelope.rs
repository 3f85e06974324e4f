//! Amplitude envelopes.
//!
//! An `Envelope` is a short list of breakpoints joined by straight lines,
//! with time measured in samples. `Adsr` builds one for a note held for a
//! fixed time; `EnvelopeState` walks it one sample at a time.

use arrayvec::ArrayVec;

/// Maximum breakpoints per envelope. An ADSR with a hold needs 5.
pub const MAX_BREAKPOINTS: usize = 6;

/// A breakpoint in an envelope.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BreakPoint {
    /// Samples from the previous point (ignored for the first point).
    pub dt: u32,
    /// Level at this point.
    pub value: f32,
}

impl BreakPoint {
    pub fn new(dt: u32, value: f32) -> Self {
        Self { dt, value }
    }
}

/// A one-shot piecewise-linear curve.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    pub points: ArrayVec<BreakPoint, MAX_BREAKPOINTS>,
}

impl Envelope {
    /// Envelope from breakpoints; points past `MAX_BREAKPOINTS` are dropped.
    pub fn one_shot(pts: &[BreakPoint]) -> Self {
        Self {
            points: pts.iter().copied().take(MAX_BREAKPOINTS).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total length in samples.
    pub fn duration(&self) -> u32 {
        self.points.iter().skip(1).map(|p| p.dt).sum()
    }
}

/// Attack/decay/sustain/release shape, times in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Adsr {
    pub attack: f32,
    pub decay: f32,
    /// Sustain level as a fraction of the peak.
    pub sustain_level: f32,
    pub release: f32,
}

impl Adsr {
    pub const fn new(attack: f32, decay: f32, sustain_level: f32, release: f32) -> Self {
        Self { attack, decay, sustain_level, release }
    }

    /// Envelope for a note released `sustain_time` seconds after onset.
    ///
    /// If the release comes before attack and decay finish, the curve is cut
    /// at that point and releases from the level reached.
    pub fn to_envelope(&self, sustain_time: f32, peak: f32, sample_rate: u32) -> Envelope {
        let samples = |secs: f32| (secs.max(0.0) * sample_rate as f32) as u32;
        let attack = samples(self.attack);
        let decay = samples(self.decay);
        let gate = samples(sustain_time);
        let release = samples(self.release).max(1);
        let sustain = peak * self.sustain_level;

        let mut points = ArrayVec::<BreakPoint, MAX_BREAKPOINTS>::new();
        points.push(BreakPoint::new(0, 0.0));

        if gate <= attack {
            let level = if attack == 0 { peak } else { peak * gate as f32 / attack as f32 };
            points.push(BreakPoint::new(gate, level));
        } else if gate <= attack + decay {
            let t = (gate - attack) as f32 / decay.max(1) as f32;
            points.push(BreakPoint::new(attack, peak));
            points.push(BreakPoint::new(gate - attack, peak + (sustain - peak) * t));
        } else {
            points.push(BreakPoint::new(attack, peak));
            points.push(BreakPoint::new(decay, sustain));
            points.push(BreakPoint::new(gate - attack - decay, sustain));
        }
        points.push(BreakPoint::new(release, 0.0));

        Envelope { points }
    }
}

/// Runtime state for a playing envelope.
#[derive(Clone, Debug, Default)]
pub struct EnvelopeState {
    /// Current segment index (the "from" breakpoint).
    segment: u16,
    /// Samples elapsed within the current segment.
    time_in_segment: u32,
    /// Current output level.
    value: f32,
    /// Reached the last breakpoint.
    finished: bool,
}

impl EnvelopeState {
    /// Start at the first breakpoint.
    pub fn new(envelope: &Envelope) -> Self {
        let value = envelope.points.first().map_or(0.0, |p| p.value);
        Self {
            segment: 0,
            time_in_segment: 0,
            value,
            finished: envelope.points.len() < 2,
        }
    }

    /// A state that has already run out (silent).
    pub fn finished() -> Self {
        Self { finished: true, ..Self::default() }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance by `delta` samples.
    pub fn advance(&mut self, envelope: &Envelope, delta: u32) {
        if self.finished {
            return;
        }
        self.time_in_segment += delta;
        self.resolve(envelope);
    }

    /// Walk forward until `time_in_segment` falls inside the current segment.
    fn resolve(&mut self, envelope: &Envelope) {
        loop {
            let seg_idx = self.segment as usize;
            let Some(next) = envelope.points.get(seg_idx + 1) else {
                self.finished = true;
                self.value = envelope.points.get(seg_idx).map_or(0.0, |p| p.value);
                return;
            };

            if self.time_in_segment < next.dt {
                let from = envelope.points[seg_idx].value;
                let t = self.time_in_segment as f32 / next.dt as f32;
                self.value = from + (next.value - from) * t;
                return;
            }

            self.time_in_segment -= next.dt;
            self.segment += 1;
            self.value = next.value;
        }
    }
}
