//! Status panel in the top-left corner.

use sb_master::Session;

const PANEL_POS: [f32; 2] = [8.0, 8.0];
const PANEL_SIZE: [f32; 2] = [320.0, 90.0];
const PANEL_ROUNDING: f32 = 6.0;
/// Black at 160/255.
const PANEL_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 160.0 / 255.0];
const TEXT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const TEXT_POS: [f32; 2] = [16.0, 12.0];

pub fn draw_hud(ui: &imgui::Ui, session: &Session) {
    let draw_list = ui.get_foreground_draw_list();
    let p_max = [PANEL_POS[0] + PANEL_SIZE[0], PANEL_POS[1] + PANEL_SIZE[1]];
    draw_list
        .add_rect(PANEL_POS, p_max, PANEL_COLOR)
        .filled(true)
        .rounding(PANEL_ROUNDING)
        .build();

    let line_height = ui.text_line_height();
    for (i, line) in session.hud_lines().iter().enumerate() {
        let pos = [TEXT_POS[0], TEXT_POS[1] + i as f32 * line_height];
        draw_list.add_text(pos, TEXT_COLOR, line);
    }
}
