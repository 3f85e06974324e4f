//! Fit-to-viewport placement of the displayed frame.

/// Share of the viewport the frame may cover on each axis.
pub const MARGIN_FACTOR: f32 = 0.6;

/// Largest upscale of a frame relative to its native size.
pub const MAX_UPSCALE: f32 = 2.0;

/// Uniform scale for a `frame` sized sprite inside `viewport`.
pub fn fit_scale(viewport: [f32; 2], frame: [f32; 2]) -> f32 {
    let max_w = viewport[0] * MARGIN_FACTOR;
    let max_h = viewport[1] * MARGIN_FACTOR;
    let fw = frame[0].max(f32::EPSILON);
    let fh = frame[1].max(f32::EPSILON);
    (max_w / fw).min(max_h / fh).min(MAX_UPSCALE).max(0.0)
}

/// Top-left and bottom-right corners of the frame centered in `viewport`.
pub fn placed_rect(viewport: [f32; 2], frame: [f32; 2]) -> ([f32; 2], [f32; 2]) {
    let scale = fit_scale(viewport, frame);
    let w = frame[0] * scale;
    let h = frame[1] * scale;
    let cx = viewport[0] * 0.5;
    let cy = viewport[1] * 0.5;
    ([cx - w * 0.5, cy - h * 0.5], [cx + w * 0.5, cy + h * 0.5])
}
