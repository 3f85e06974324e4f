//! Headed GUI integration tests (custom harness, runs on main thread).
//!
//! Run with:
//!   cargo test --features test-harness --test gui_tests -- [filter]
//!
//! Screenshots saved to tests/output/ (gitignored).
//! Uses harness=false so EventLoop runs on macOS main thread.

use sb_master::{Command, Controller, SpriteSheet};
use spritebeat::app::App;
use spritebeat::ui::GuiState;

use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::EventLoopExtPumpEvents;
use winit::window::WindowId;

// ---------------------------------------------------------------------------
// Test framework
// ---------------------------------------------------------------------------

struct TestHarness {
    event_loop: EventLoop<()>,
    handler: TestHandler,
}

struct TestHandler {
    app: Option<App>,
    frames_rendered: usize,
    max_frames: usize,
}

impl TestHarness {
    fn new() -> Self {
        Self {
            event_loop: EventLoop::new().unwrap(),
            handler: TestHandler {
                app: None,
                frames_rendered: 0,
                max_frames: 5,
            },
        }
    }

    fn boot(&mut self) {
        for _ in 0..100 {
            self.event_loop
                .pump_app_events(Some(Duration::from_millis(16)), &mut self.handler);
            if self.handler.app.is_some() && self.handler.frames_rendered >= 3 {
                return;
            }
        }
        panic!("App did not become ready after pumping event loop");
    }

    fn app(&self) -> &App {
        self.handler.app.as_ref().unwrap()
    }

    fn app_mut(&mut self) -> &mut App {
        self.handler.app.as_mut().unwrap()
    }

    /// Upload a checkerboard strip: `frames` square frames, alternating
    /// red and blue.
    fn load_strip(&mut self, frames: u32, size: u32) {
        let (w, h) = (frames * size, size);
        let mut pixels = Vec::with_capacity((w * h * 4) as usize);
        for _y in 0..h {
            for x in 0..w {
                let frame = x / size;
                pixels.extend(if frame % 2 == 0 { [255, 0, 0, 255] } else { [0, 0, 255, 255] });
            }
        }
        let sheet = SpriteSheet::from_rgba(w, h, pixels).unwrap();
        self.app_mut().load_sheet(&sheet, None).expect("Failed to load sheet");
    }

    fn reset_session(&mut self) {
        self.app_mut().gui.controller = Controller::default();
        self.app_mut().gui.sheet = None;
    }

    fn inject(&mut self, commands: &[Command]) {
        self.app_mut().inject_commands(commands);
    }

    fn render(&mut self, count: usize) {
        let target = self.handler.frames_rendered + count;
        self.handler.max_frames = target + 10;
        for _ in 0..count * 20 {
            if let Some(app) = &self.handler.app {
                app.window().request_redraw();
            }
            self.event_loop
                .pump_app_events(Some(Duration::from_millis(16)), &mut self.handler);
            if self.handler.frames_rendered >= target {
                return;
            }
        }
    }

    fn screenshot(&self, path: &str) {
        self.app().screenshot(path);
    }

    /// Pixel at a point given as fractions of the framebuffer size.
    fn pixel_at(&self, fx: f32, fy: f32) -> [u8; 4] {
        let (pixels, w, h) = self.app().capture_pixels();
        let x = ((w as f32 * fx) as u32).min(w - 1);
        let y = ((h as f32 * fy) as u32).min(h - 1);
        let i = ((y * w + x) * 4) as usize;
        [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
    }
}

impl ApplicationHandler for TestHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        self.app = Some(App::new(event_loop, 800.0, 600.0, GuiState::default()));
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(app) = &mut self.app else { return };

        let wrapped = winit::event::Event::WindowEvent {
            window_id,
            event: event.clone(),
        };
        app.handle_event(&wrapped);

        match event {
            WindowEvent::Resized(size) => app.handle_resize(size),
            WindowEvent::RedrawRequested => {
                app.render_frame();
                self.frames_rendered += 1;
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(app) = &self.app {
            if self.frames_rendered < self.max_frames {
                app.window().request_redraw();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Test runner
// ---------------------------------------------------------------------------

type TestFn = fn(&mut TestHarness);

const TESTS: &[(&str, TestFn)] = &[
    ("app_boots_with_orange_canvas", test_app_boots_with_orange_canvas),
    ("sheet_is_drawn_centered", test_sheet_is_drawn_centered),
    ("paused_step_changes_frame", test_paused_step_changes_frame),
    ("commands_reach_session", test_commands_reach_session),
];

fn main() {
    let filter = std::env::args().nth(1).unwrap_or_default();

    let mut h = TestHarness::new();
    h.boot();

    let mut passed = 0;
    let mut failed = 0;

    for (name, test_fn) in TESTS {
        if !filter.is_empty() && !name.contains(filter.as_str()) {
            continue;
        }
        eprint!("  {name} ... ");
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| test_fn(&mut h))) {
            Ok(()) => {
                eprintln!("ok");
                passed += 1;
            }
            Err(e) => {
                let msg = if let Some(s) = e.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = e.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "unknown panic".to_string()
                };
                eprintln!("FAILED: {msg}");
                failed += 1;
            }
        }
    }

    eprintln!("\n{passed} passed, {failed} failed");
    if failed > 0 {
        std::process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

fn is_orange(p: [u8; 4]) -> bool {
    p[0] > 240 && (150..=180).contains(&p[1]) && p[2] < 15
}

fn test_app_boots_with_orange_canvas(h: &mut TestHarness) {
    h.reset_session();
    h.render(3);

    let (pixels, w, height) = h.app().capture_pixels();
    assert!(w > 0 && height > 0, "Window has nonzero dimensions");
    assert_eq!(pixels.len(), (w * height * 4) as usize);
    // Bottom-right corner is away from the placeholder text
    assert!(is_orange(h.pixel_at(0.95, 0.95)), "canvas should be orange");
    h.screenshot("tests/output/boot.png");
}

fn test_sheet_is_drawn_centered(h: &mut TestHarness) {
    h.reset_session();
    h.load_strip(4, 32);
    h.inject(&[Command::TogglePause]);
    h.render(3);

    // Frame 0 is red; it covers the center but not the corners
    let center = h.pixel_at(0.5, 0.5);
    assert!(center[0] > 200 && center[2] < 50, "center pixel {:?} should be red", center);
    assert!(is_orange(h.pixel_at(0.95, 0.95)));
    h.screenshot("tests/output/sheet_centered.png");
}

fn test_paused_step_changes_frame(h: &mut TestHarness) {
    h.reset_session();
    h.load_strip(4, 32);
    h.inject(&[Command::TogglePause, Command::StepForward]);
    h.render(3);

    assert_eq!(h.app().gui.controller.session().frame_position().current, 1);
    let center = h.pixel_at(0.5, 0.5);
    assert!(center[2] > 200 && center[0] < 50, "center pixel {:?} should be blue", center);
    h.screenshot("tests/output/stepped.png");
}

fn test_commands_reach_session(h: &mut TestHarness) {
    h.reset_session();
    h.load_strip(4, 32);
    h.inject(&[
        Command::TogglePause,
        Command::FpsUp,
        Command::TogglePingPong,
        Command::ToggleBlend,
        Command::BpmDown,
    ]);
    h.render(2);

    let session = h.app().gui.controller.session();
    assert!(session.clock().is_paused());
    assert_eq!(session.config().fps, 7);
    assert!(session.config().ping_pong);
    assert!(session.config().blend_enabled);
    assert_eq!(session.beat_clock().bpm(), 105);
    assert_eq!(session.hud_lines()[2], "Mode: PingPong  Blend: On");
}
