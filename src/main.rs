//! spritebeat - sprite-sheet animation player synchronized to a drum beat.
//! Uses winit + glutin + glow + imgui-rs for the GUI.

use anyhow::Context as _;
use clap::Parser;
use std::num::NonZeroU32;

use sb_master::{Controller, SpriteSheet};
use spritebeat::app::App;
use spritebeat::config::{self, Args};
use spritebeat::ui::GuiState;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::WindowId;

const WINDOW_SIZE: [f32; 2] = [960.0, 720.0];

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    config::init_logging(args.verbosity);
    log::info!("spritebeat starting");
    log::debug!("command-line args: {:?}", args);

    let mut controller = Controller::new(args.session());
    if let Some(path) = &args.audio {
        controller.load_backing_track(path);
    }

    let sheet = match sb_formats::read_sprite_sheet(&args.sheet) {
        Ok(sheet) => Some(sheet),
        Err(e) => {
            log::warn!("could not load sprite sheet {}: {}", args.sheet.display(), e);
            None
        }
    };

    let event_loop = EventLoop::new().context("creating event loop")?;
    let mut state = AppState {
        app: None,
        startup: Some(Startup {
            gui: GuiState::new(controller),
            sheet,
            frames_override: args.frames,
        }),
    };
    event_loop.run_app(&mut state).context("running event loop")?;
    Ok(())
}

/// Everything needed to build the `App` once a window can be created.
struct Startup {
    gui: GuiState,
    sheet: Option<SpriteSheet>,
    frames_override: Option<NonZeroU32>,
}

struct AppState {
    app: Option<App>,
    startup: Option<Startup>,
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        let Some(startup) = self.startup.take() else { return };

        let mut app = App::new(event_loop, WINDOW_SIZE[0], WINDOW_SIZE[1], startup.gui);
        if let Some(sheet) = &startup.sheet {
            if let Err(e) = app.load_sheet(sheet, startup.frames_override) {
                log::warn!("could not show sprite sheet: {:#}", e);
            }
        }
        self.app = Some(app);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(app) = &mut self.app else { return };

        let wrapped: winit::event::Event<()> = winit::event::Event::WindowEvent {
            window_id,
            event: event.clone(),
        };
        app.handle_event(&wrapped);

        match event {
            WindowEvent::CloseRequested => {
                app.gui.controller.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => app.handle_resize(size),
            WindowEvent::RedrawRequested => app.render_frame(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(app) = &self.app {
            app.window().request_redraw();
        }
    }
}
