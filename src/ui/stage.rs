//! The animated sprite, centered on the canvas.

use sb_master::Session;

use super::SheetTexture;

const PLACEHOLDER: &str = "Loading...";

/// Draw the current frame (or crossfaded pair) behind everything else.
pub fn draw_sheet(ui: &imgui::Ui, viewport: [f32; 2], sheet: &SheetTexture, session: &Session) {
    let Some(geometry) = session.geometry() else {
        draw_placeholder(ui, viewport);
        return;
    };

    let frame = [geometry.frame_width(), geometry.frame_height()];
    let (p_min, p_max) = sb_sheet::placed_rect(viewport, frame);
    let draw_list = ui.get_background_draw_list();

    for (index, opacity) in session.blend_plan().layers() {
        if opacity <= 0.0 {
            continue;
        }
        let (uv_min, uv_max) = geometry.uv_rect(index, sheet.width, sheet.height);
        draw_list
            .add_image(sheet.texture_id, p_min, p_max)
            .uv_min(uv_min)
            .uv_max(uv_max)
            .col([1.0, 1.0, 1.0, opacity])
            .build();
    }
}

/// Centered text shown until a sheet is available.
pub fn draw_placeholder(ui: &imgui::Ui, viewport: [f32; 2]) {
    let size = ui.calc_text_size(PLACEHOLDER);
    let pos = [(viewport[0] - size[0]) * 0.5, (viewport[1] - size[1]) * 0.5];
    ui.get_background_draw_list()
        .add_text(pos, [0.0, 0.0, 0.0, 1.0], PLACEHOLDER);
}
