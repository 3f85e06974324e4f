//! UI modules and per-frame composition.

mod hud;
pub mod input;
mod stage;

use sb_master::{Command, Controller};

/// Sprite sheet uploaded to the GPU.
#[derive(Clone, Copy, Debug)]
pub struct SheetTexture {
    pub texture_id: imgui::TextureId,
    pub width: u32,
    pub height: u32,
}

/// UI-facing state bundle. No GL/imgui/renderer fields.
pub struct GuiState {
    pub controller: Controller,
    pub sheet: Option<SheetTexture>,
}

impl GuiState {
    pub fn new(controller: Controller) -> Self {
        Self { controller, sheet: None }
    }
}

impl Default for GuiState {
    fn default() -> Self {
        Self::new(Controller::default())
    }
}

/// Build one frame: handle input, advance playback, queue draw commands.
pub fn build_ui(ui: &imgui::Ui, gui: &mut GuiState) {
    let commands = input::poll_commands(ui);
    process_commands(gui, &commands);

    let viewport = ui.io().display_size;
    let Some(sheet) = gui.sheet else {
        stage::draw_placeholder(ui, viewport);
        return;
    };

    gui.controller.tick(ui.io().delta_time as f64);
    stage::draw_sheet(ui, viewport, &sheet, gui.controller.session());
    hud::draw_hud(ui, gui.controller.session());
}

pub fn process_commands(gui: &mut GuiState, commands: &[Command]) {
    gui.controller.apply_all(commands);
}
