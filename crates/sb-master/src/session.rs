//! Playback session: all state the keyboard and the frame loop touch.

use sb_engine::{BeatClock, Trigger, BPM_STEP};
use sb_sheet::{AnimationClock, BlendPlan, FrameGeometry, FramePosition, PlaybackConfig};

/// A user command. Every key binding maps to exactly one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    TogglePause,
    FpsUp,
    FpsDown,
    /// One frame forward (only while paused).
    StepForward,
    /// One frame back, stopping at 0 (only while paused).
    StepBackward,
    ToggleBlend,
    TogglePingPong,
    ToggleMusic,
    BpmUp,
    BpmDown,
    /// User gesture that unlocks audio output.
    ActivateAudio,
}

/// Animation clock, playback settings and beat track state.
#[derive(Clone, Debug)]
pub struct Session {
    clock: AnimationClock,
    config: PlaybackConfig,
    beat: BeatClock,
    geometry: Option<FrameGeometry>,
    music_on: bool,
    audio_enabled: bool,
    /// The output device could not be opened.
    audio_unavailable: bool,
    backing_track: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PlaybackConfig::default(), BeatClock::default().bpm())
    }
}

impl Session {
    pub fn new(config: PlaybackConfig, bpm: u32) -> Self {
        let config = PlaybackConfig {
            fps: PlaybackConfig::with_fps(config.fps).fps,
            ..config
        };
        Self {
            clock: AnimationClock::new(),
            config,
            beat: BeatClock::new(bpm),
            geometry: None,
            music_on: false,
            audio_enabled: false,
            audio_unavailable: false,
            backing_track: None,
        }
    }

    /// Attach the sheet layout once the image has loaded.
    pub fn set_geometry(&mut self, geometry: FrameGeometry) {
        log::info!(
            "sheet grid: {} x {} frames of {}x{} px ({} total)",
            geometry.columns(),
            geometry.rows(),
            geometry.frame_width(),
            geometry.frame_height(),
            geometry.total_frames()
        );
        self.geometry = Some(geometry);
    }

    /// Name of the loaded backing track, shown on the HUD.
    pub fn set_backing_track(&mut self, name: Option<String>) {
        self.backing_track = name;
    }

    /// Mark the beat track as silent because no output device opened.
    pub fn set_audio_unavailable(&mut self, unavailable: bool) {
        self.audio_unavailable = unavailable;
    }

    pub fn is_audio_unavailable(&self) -> bool {
        self.audio_unavailable
    }

    pub fn geometry(&self) -> Option<&FrameGeometry> {
        self.geometry.as_ref()
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn beat_clock(&self) -> &BeatClock {
        &self.beat
    }

    pub fn is_music_on(&self) -> bool {
        self.music_on
    }

    pub fn is_audio_enabled(&self) -> bool {
        self.audio_enabled
    }

    pub fn backing_track(&self) -> Option<&str> {
        self.backing_track.as_deref()
    }

    /// Frames in the sheet, 1 until the image has loaded.
    pub fn total_frames(&self) -> u32 {
        self.geometry.map_or(1, |g| g.total_frames())
    }

    pub fn apply(&mut self, command: Command) {
        log::debug!("command {:?}", command);
        match command {
            Command::TogglePause => {
                self.clock.toggle_pause();
            }
            Command::FpsUp => {
                self.config.adjust_fps(1);
            }
            Command::FpsDown => {
                self.config.adjust_fps(-1);
            }
            Command::StepForward => {
                self.clock.step_forward(&self.config);
            }
            Command::StepBackward => {
                self.clock.step_backward(&self.config);
            }
            Command::ToggleBlend => self.config.blend_enabled = !self.config.blend_enabled,
            Command::TogglePingPong => self.config.ping_pong = !self.config.ping_pong,
            Command::ToggleMusic => {
                self.music_on = !self.music_on;
                if !self.music_on {
                    self.beat.reset();
                }
            }
            Command::BpmUp => {
                self.beat.adjust_bpm(BPM_STEP);
            }
            Command::BpmDown => {
                self.beat.adjust_bpm(-BPM_STEP);
            }
            Command::ActivateAudio => {
                // Only the first gesture restarts the beat timing
                if !self.audio_enabled {
                    self.audio_enabled = true;
                    if self.music_on {
                        self.beat.reset();
                    }
                }
            }
        }
    }

    pub fn apply_all(&mut self, commands: &[Command]) {
        for &command in commands {
            self.apply(command);
        }
    }

    /// Advance one rendered frame: `dt` seconds of animation (if playing)
    /// and the beat track polled at `wall_ms` (if music is on).
    pub fn advance(&mut self, dt: f64, wall_ms: f64) -> Vec<Trigger> {
        self.clock.tick(dt);
        if !self.music_on {
            return Vec::new();
        }
        match self.beat.poll(wall_ms) {
            Some(event) => {
                log::debug!("beat {} low={} high={}", event.index, event.low, event.high);
                event.triggers().into_iter().collect()
            }
            None => Vec::new(),
        }
    }

    pub fn frame_position(&self) -> FramePosition {
        self.config.position_at(self.clock.elapsed(), self.total_frames())
    }

    pub fn blend_plan(&self) -> BlendPlan {
        self.config.blend_plan(self.frame_position())
    }

    /// HUD text, one entry per line.
    pub fn hud_lines(&self) -> [String; 5] {
        let on_off = |b: bool| if b { "On" } else { "Off" };
        let mut music = format!("Music: {} BPM: {}", on_off(self.music_on), self.beat.bpm());
        if self.audio_unavailable {
            music.push_str(" (no audio)");
        }
        if let Some(track) = &self.backing_track {
            music.push_str(&format!("  Track: {}", track));
        }
        [
            format!("Frame {}/{}", self.frame_position().current + 1, self.total_frames()),
            format!(
                "FPS: {} ({})",
                self.config.fps,
                if self.clock.is_paused() { "Paused" } else { "Playing" }
            ),
            format!(
                "Mode: {}  Blend: {}",
                if self.config.ping_pong { "PingPong" } else { "Loop" },
                on_off(self.config.blend_enabled)
            ),
            music,
            "Keys: Space pause, Up/Down FPS, Left/Right step, B blend, P mode, M music, +/- BPM"
                .to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sb_sheet::detect_grid;

    fn four_frames() -> Session {
        let mut s = Session::default();
        s.set_geometry(detect_grid(256, 64, None).unwrap());
        s
    }

    #[test]
    fn defaults_match_startup_state() {
        let s = Session::default();
        assert_eq!(s.config().fps, 6);
        assert_eq!(s.beat_clock().bpm(), 110);
        assert!(!s.is_music_on());
        assert!(!s.clock().is_paused());
        assert_eq!(s.total_frames(), 1);
    }

    #[test]
    fn initial_values_are_clamped() {
        let s = Session::new(PlaybackConfig { fps: 0, ..Default::default() }, 999);
        assert_eq!(s.config().fps, 1);
        assert_eq!(s.beat_clock().bpm(), 240);
    }

    #[test]
    fn playing_advances_frames() {
        let mut s = four_frames();
        s.advance(0.5, 0.0);
        // 0.5 s at 6 fps = frame 3
        assert_eq!(s.frame_position().current, 3);
        s.advance(0.25, 0.0);
        // 4.5 frames wraps to 0
        assert_eq!(s.frame_position().current, 0);
    }

    #[test]
    fn step_only_while_paused() {
        let mut s = four_frames();
        s.apply(Command::StepForward);
        assert_eq!(s.clock().elapsed(), 0.0);

        s.apply(Command::TogglePause);
        s.apply_all(&[Command::StepForward, Command::StepForward]);
        assert_eq!(s.frame_position().current, 2);
        s.apply_all(&[Command::StepBackward; 5]);
        assert_eq!(s.clock().elapsed(), 0.0);
    }

    #[test]
    fn music_off_produces_no_triggers() {
        let mut s = four_frames();
        assert!(s.advance(0.016, 0.0).is_empty());
        assert!(s.advance(0.016, 600.0).is_empty());
    }

    #[test]
    fn music_on_triggers_pattern() {
        let mut s = Session::new(PlaybackConfig::default(), 120);
        s.apply(Command::ToggleMusic);
        assert_eq!(s.advance(0.0, 0.0), vec![Trigger::Kick, Trigger::Hat]);
        assert!(s.advance(0.0, 100.0).is_empty());
        assert_eq!(s.advance(0.0, 500.0), vec![Trigger::Hat]);
        assert_eq!(s.advance(0.0, 1000.0), vec![Trigger::Kick, Trigger::Hat]);
    }

    #[test]
    fn toggling_music_off_forgets_last_beat() {
        let mut s = Session::new(PlaybackConfig::default(), 120);
        s.apply(Command::ToggleMusic);
        s.advance(0.0, 0.0);
        s.apply(Command::ToggleMusic);
        assert_eq!(s.beat_clock().last_beat(), None);

        s.apply(Command::ToggleMusic);
        // Back on at 5.1 s: beat 10 only
        assert_eq!(s.advance(0.0, 5100.0), vec![Trigger::Kick, Trigger::Hat]);
        assert_eq!(s.beat_clock().last_beat(), Some(10));
    }

    #[test]
    fn activate_audio_resets_beat_when_music_on() {
        let mut s = Session::new(PlaybackConfig::default(), 120);
        s.apply(Command::ToggleMusic);
        s.advance(0.0, 0.0);
        s.apply(Command::ActivateAudio);
        assert!(s.is_audio_enabled());
        assert_eq!(s.beat_clock().last_beat(), None);
        // Same beat fires again after the reset
        assert_eq!(s.advance(0.0, 10.0), vec![Trigger::Kick, Trigger::Hat]);

        // Later clicks leave the beat alone
        s.apply(Command::ActivateAudio);
        assert_eq!(s.beat_clock().last_beat(), Some(0));
    }

    #[test]
    fn hud_reports_missing_audio_device() {
        let mut s = Session::new(PlaybackConfig::default(), 120);
        assert_eq!(s.hud_lines()[3], "Music: Off BPM: 120");
        s.set_audio_unavailable(true);
        assert!(s.is_audio_unavailable());
        assert_eq!(s.hud_lines()[3], "Music: Off BPM: 120 (no audio)");
    }

    #[test]
    fn fps_and_bpm_limits() {
        let mut s = Session::default();
        s.apply_all(&[Command::FpsUp; 100]);
        assert_eq!(s.config().fps, 60);
        s.apply_all(&[Command::FpsDown; 100]);
        assert_eq!(s.config().fps, 1);
        s.apply_all(&[Command::BpmUp; 100]);
        assert_eq!(s.beat_clock().bpm(), 240);
        s.apply_all(&[Command::BpmDown; 100]);
        assert_eq!(s.beat_clock().bpm(), 40);
    }

    #[test]
    fn hud_reflects_state() {
        let mut s = four_frames();
        s.apply_all(&[Command::TogglePause, Command::TogglePingPong, Command::ToggleBlend]);
        s.apply(Command::StepForward);
        let hud = s.hud_lines();
        assert_eq!(hud[0], "Frame 2/4");
        assert_eq!(hud[1], "FPS: 6 (Paused)");
        assert_eq!(hud[2], "Mode: PingPong  Blend: On");
        assert_eq!(hud[3], "Music: Off BPM: 110");

        s.set_backing_track(Some("loop.wav".into()));
        s.apply(Command::ToggleMusic);
        assert_eq!(s.hud_lines()[3], "Music: On BPM: 110  Track: loop.wav");
    }

    #[test]
    fn blend_plan_follows_toggle() {
        let mut s = four_frames();
        s.advance(0.25, 0.0);
        assert!(matches!(s.blend_plan(), BlendPlan::Single { frame: 1 }));
        s.apply(Command::ToggleBlend);
        assert!(matches!(s.blend_plan(), BlendPlan::Crossfade { from: 1, to: 2, .. }));
    }
}
