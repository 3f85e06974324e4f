//! Integration test: sheet -> grid -> session driven by simulated frame ticks.

use sb_master::{BlendPlan, Command, Controller, PlaybackConfig, Session, SpriteSheet};

const TICK: f64 = 1.0 / 60.0;

fn controller_with_strip(frames: u32, config: PlaybackConfig) -> Controller {
    let (w, h) = (frames * 16, 16);
    let sheet = SpriteSheet::from_rgba(w, h, vec![0; (w * h * 4) as usize]).unwrap();
    let mut ctl = Controller::new(Session::new(config, 110));
    ctl.load_sheet(&sheet, None).unwrap();
    ctl
}

/// Frame shown at the start of each animation frame period.
fn shown_sequence(ctl: &mut Controller, count: usize) -> Vec<u32> {
    let per_frame = (60 / ctl.session().config().fps) as usize;
    let mut out = Vec::new();
    for i in 0..count * per_frame {
        if i % per_frame == 0 {
            out.push(ctl.session().frame_position().current);
        }
        ctl.tick_at(TICK, 0.0);
    }
    out
}

#[test]
fn loop_mode_wraps() {
    let mut ctl = controller_with_strip(4, PlaybackConfig::default());
    assert_eq!(shown_sequence(&mut ctl, 9), [0, 1, 2, 3, 0, 1, 2, 3, 0]);
}

#[test]
fn ping_pong_reverses_at_the_ends() {
    let config = PlaybackConfig { ping_pong: true, ..Default::default() };
    let mut ctl = controller_with_strip(4, config);
    assert_eq!(shown_sequence(&mut ctl, 9), [0, 1, 2, 3, 2, 1, 0, 1, 2]);
}

#[test]
fn pause_freezes_and_steps() {
    let mut ctl = controller_with_strip(4, PlaybackConfig::default());
    ctl.apply(Command::TogglePause);
    for _ in 0..120 {
        ctl.tick_at(TICK, 0.0);
    }
    assert_eq!(ctl.session().clock().elapsed(), 0.0);

    ctl.apply_all(&[Command::StepForward, Command::StepForward, Command::StepForward]);
    assert_eq!(ctl.session().frame_position().current, 3);
    ctl.apply(Command::StepBackward);
    assert_eq!(ctl.session().frame_position().current, 2);
    assert_eq!(ctl.session().hud_lines()[0], "Frame 3/4");
}

#[test]
fn fps_change_takes_effect_next_tick() {
    let mut ctl = controller_with_strip(8, PlaybackConfig::default());
    for _ in 0..6 {
        ctl.apply(Command::FpsUp);
    }
    assert_eq!(ctl.session().config().fps, 12);
    // 0.5 s at 12 fps
    for _ in 0..30 {
        ctl.tick_at(TICK, 0.0);
    }
    assert_eq!(ctl.session().frame_position().current, 6);
}

#[test]
fn crossfade_layers_sum_to_one() {
    let config = PlaybackConfig { blend_enabled: true, ..Default::default() };
    let mut ctl = controller_with_strip(4, config);
    for _ in 0..25 {
        ctl.tick_at(TICK, 0.0);
        let plan = ctl.session().blend_plan();
        assert!(matches!(plan, BlendPlan::Crossfade { .. }));
        let total: f32 = plan.layers().map(|(_, opacity)| opacity).sum();
        assert!((total - 1.0).abs() < 1e-5);
    }
}

#[test]
fn beat_triggers_follow_wall_clock_not_animation() {
    let mut ctl = controller_with_strip(4, PlaybackConfig::default());
    ctl.session_mut().apply(Command::ToggleMusic);
    ctl.session_mut().apply(Command::TogglePause);

    // Paused animation still drives the beat track
    let fired: usize = (0..=120)
        .map(|i| ctl.tick_at(TICK, i as f64 * 1000.0 / 60.0).len())
        .sum();
    // 110 BPM over 2 s: beats 0..=3, kicks on 0 and 2
    assert_eq!(fired, 6);
}
