//! Headless controller for spritebeat.
//!
//! Owns the playback session and the audio link so the GUI and the CLI
//! share one code path for commands, ticking and beat-track rendering.

mod audio;
mod render;
mod session;

use std::path::Path;
use std::time::Instant;

pub use audio::AudioLink;
pub use render::{render_beat_track, render_to_wav};
pub use session::{Command, Session};

// Re-export common types so callers don't need the lower crates directly.
pub use sb_engine::{Frame, Trigger};
pub use sb_formats::{AudioClip, FormatError, SpriteSheet};
pub use sb_sheet::{BlendPlan, FrameGeometry, FramePosition, PlaybackConfig};

/// Session plus the lazily started audio output.
pub struct Controller {
    session: Session,
    audio: Option<AudioLink>,
    backing_track: Option<AudioClip>,
    /// Beat time origin.
    started: Instant,
}

impl Controller {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            audio: None,
            backing_track: None,
            started: Instant::now(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    // --- Assets ---

    /// Decode `sheet` and attach its grid to the session.
    pub fn load_sheet(
        &mut self,
        sheet: &SpriteSheet,
        frames_override: Option<std::num::NonZeroU32>,
    ) -> Result<FrameGeometry, sb_sheet::SheetError> {
        let geometry = sb_sheet::detect_grid(sheet.width(), sheet.height(), frames_override)?;
        self.session.set_geometry(geometry);
        Ok(geometry)
    }

    /// Load the optional backing track. Failures leave the session without one.
    pub fn load_backing_track(&mut self, path: &Path) {
        match sb_formats::read_audio_clip(path) {
            Ok(clip) => {
                log::info!(
                    "backing track {}: {:.1} s at {} Hz",
                    path.display(),
                    clip.duration_secs(),
                    clip.sample_rate
                );
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.session.set_backing_track(Some(name));
                self.backing_track = Some(clip);
            }
            Err(e) => log::warn!("could not load audio {}: {}", path.display(), e),
        }
    }

    pub fn backing_track(&self) -> Option<&AudioClip> {
        self.backing_track.as_ref()
    }

    // --- Audio ---

    /// Start the audio thread if it isn't running yet.
    pub fn activate_audio(&mut self) {
        if self.audio.is_none() {
            log::info!("activating audio output");
            self.audio = Some(AudioLink::start());
        }
    }

    pub fn audio_ready(&self) -> bool {
        self.audio.as_ref().is_some_and(AudioLink::is_ready)
    }

    /// Audio was activated but the device could not be opened.
    pub fn audio_failed(&self) -> bool {
        self.audio.as_ref().is_some_and(AudioLink::has_failed)
    }

    pub fn stop(&mut self) {
        if let Some(mut link) = self.audio.take() {
            link.stop();
        }
    }

    // --- Frame loop ---

    /// Apply a user command; music and mouse commands also unlock audio.
    pub fn apply(&mut self, command: Command) {
        if matches!(command, Command::ToggleMusic | Command::ActivateAudio) {
            self.activate_audio();
        }
        self.session.apply(command);
    }

    pub fn apply_all(&mut self, commands: &[Command]) {
        for &command in commands {
            self.apply(command);
        }
    }

    /// Advance one rendered frame of `dt` seconds at the current wall time.
    pub fn tick(&mut self, dt: f64) -> Vec<Trigger> {
        let wall_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        self.tick_at(dt, wall_ms)
    }

    /// Advance one rendered frame at an explicit wall time in milliseconds.
    ///
    /// Returns the triggers that fired; they reach the synth only if audio
    /// is ready.
    pub fn tick_at(&mut self, dt: f64, wall_ms: f64) -> Vec<Trigger> {
        if !self.session.is_audio_unavailable() && self.audio_failed() {
            self.session.set_audio_unavailable(true);
        }
        let triggers = self.session.advance(dt, wall_ms);
        if let Some(link) = self.audio.as_mut() {
            for &trigger in &triggers {
                link.trigger(trigger);
            }
        }
        triggers
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(Session::default())
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.stop();
    }
}
