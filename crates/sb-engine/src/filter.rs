//! Biquad highpass filter (Audio EQ Cookbook).

use core::f32::consts::PI;

/// Butterworth Q.
const DEFAULT_Q: f32 = core::f32::consts::FRAC_1_SQRT_2;

/// Second-order highpass.
#[derive(Clone, Debug)]
pub struct Highpass {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
    // Delay lines
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl Highpass {
    /// Butterworth highpass at `cutoff` Hz.
    pub fn new(cutoff: f32, sample_rate: u32) -> Self {
        Self::with_q(cutoff, DEFAULT_Q, sample_rate)
    }

    pub fn with_q(cutoff: f32, q: f32, sample_rate: u32) -> Self {
        let q = q.max(0.5);
        let nyquist = sample_rate.max(1) as f32 * 0.5;
        // Keep the cutoff strictly inside (0, nyquist)
        let cutoff = cutoff.clamp(1.0, nyquist * 0.99);
        let omega = 2.0 * PI * cutoff / sample_rate.max(1) as f32;
        let sin_omega = libm::sinf(omega);
        let cos_omega = libm::cosf(omega);
        let alpha = sin_omega / (2.0 * q);

        let a0 = 1.0 + alpha;
        Self {
            b0: (1.0 + cos_omega) / 2.0 / a0,
            b1: -(1.0 + cos_omega) / a0,
            b2: (1.0 + cos_omega) / 2.0 / a0,
            a1: -2.0 * cos_omega / a0,
            a2: (1.0 - alpha) / a0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Filter one sample.
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Clear the delay lines.
    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}
