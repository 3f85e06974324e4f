//! Crossfade between adjacent frames.

/// Opacity of the next frame for a crossfade at `intra` progress.
///
/// The ramp spans `max(1/fps, blend_duration)` seconds of the frame, so a
/// blend duration shorter than one frame fades over the whole frame and a
/// longer one never fully reaches the next frame before the cut.
pub fn crossfade_alpha(intra: f32, fps: f32, blend_duration: f32) -> f32 {
    let frame_seconds = 1.0 / fps.max(f32::EPSILON);
    let alpha = intra * frame_seconds / frame_seconds.max(blend_duration);
    if alpha.is_nan() {
        return 0.0;
    }
    alpha.clamp(0.0, 1.0)
}

/// What to draw for one tick: a single frame, or two frames stacked with
/// complementary opacity (current underneath, next on top).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BlendPlan {
    Single { frame: u32 },
    Crossfade { from: u32, to: u32, alpha: f32 },
}

impl BlendPlan {
    /// `(frame, opacity)` layers in back-to-front order.
    pub fn layers(&self) -> impl Iterator<Item = (u32, f32)> {
        let (first, second) = match *self {
            BlendPlan::Single { frame } => ((frame, 1.0), None),
            BlendPlan::Crossfade { from, to, alpha } => ((from, 1.0 - alpha), Some((to, alpha))),
        };
        core::iter::once(first).chain(second)
    }

    /// The frame that counts as "shown" (HUD, stepping).
    pub fn primary_frame(&self) -> u32 {
        match *self {
            BlendPlan::Single { frame } => frame,
            BlendPlan::Crossfade { from, .. } => from,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_blend_follows_intra() {
        // 6 fps -> 0.1667 s per frame, blend 0.12 s is shorter
        assert!((crossfade_alpha(0.5, 6.0, 0.12) - 0.5).abs() < 1e-6);
        assert!((crossfade_alpha(0.9, 6.0, 0.12) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn long_blend_is_scaled_down() {
        // 20 fps -> 0.05 s per frame, blend 0.1 s halves the ramp
        assert!((crossfade_alpha(1.0, 20.0, 0.1) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn zero_blend_duration_tracks_intra() {
        assert_eq!(crossfade_alpha(0.0, 6.0, 0.0), 0.0);
        assert!((crossfade_alpha(0.25, 6.0, 0.0) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn alpha_monotonic_and_bounded() {
        for &fps in &[1.0_f32, 6.0, 24.0, 60.0] {
            for &blend in &[0.0_f32, 0.01, 0.12, 0.5, 2.0] {
                let mut prev = 0.0;
                for i in 0..=100 {
                    let intra = i as f32 / 100.0;
                    let a = crossfade_alpha(intra, fps, blend);
                    assert!((0.0..=1.0).contains(&a));
                    assert!(a >= prev, "alpha decreased at intra={} fps={} blend={}", intra, fps, blend);
                    prev = a;
                }
            }
        }
    }

    #[test]
    fn out_of_range_intra_is_clamped() {
        assert_eq!(crossfade_alpha(-0.5, 6.0, 0.12), 0.0);
        assert_eq!(crossfade_alpha(3.0, 6.0, 0.12), 1.0);
    }

    #[test]
    fn single_plan_has_one_opaque_layer() {
        let layers: Vec<_> = BlendPlan::Single { frame: 3 }.layers().collect();
        assert_eq!(layers, vec![(3, 1.0)]);
    }

    #[test]
    fn crossfade_plan_layers_sum_to_one() {
        let plan = BlendPlan::Crossfade { from: 1, to: 2, alpha: 0.25 };
        let layers: Vec<_> = plan.layers().collect();
        assert_eq!(layers, vec![(1, 0.75), (2, 0.25)]);
        assert_eq!(plan.primary_frame(), 1);
    }
}
