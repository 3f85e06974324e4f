//! Command-line configuration and logging setup.

use clap::Parser;
use sb_master::{PlaybackConfig, Session};
use sb_sheet::{DEFAULT_BLEND_DURATION, DEFAULT_FPS};
use std::num::NonZeroU32;
use std::path::PathBuf;

/// Sprite-sheet animation player synchronized to a drum beat
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Sprite sheet to animate (PNG)
    #[arg(value_name = "SHEET", default_value = "sprite.png")]
    pub sheet: PathBuf,

    /// Backing track to load (WAV)
    #[arg(short = 'a', long = "audio", value_name = "FILE")]
    pub audio: Option<PathBuf>,

    /// Number of frames in a single-row sheet (skips grid detection)
    #[arg(short = 'n', long = "frames", value_name = "N")]
    pub frames: Option<NonZeroU32>,

    /// Animation speed in frames per second (1-60)
    #[arg(long = "fps", value_name = "N", default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Beat track tempo (40-240)
    #[arg(long = "bpm", value_name = "N", default_value_t = sb_engine::DEFAULT_BPM)]
    pub bpm: u32,

    /// Start in ping-pong mode
    #[arg(short = 'p', long = "ping-pong")]
    pub ping_pong: bool,

    /// Start with frame crossfading on
    #[arg(short = 'b', long = "blend")]
    pub blend: bool,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Args {
    /// Initial playback settings; out-of-range values are clamped.
    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            ping_pong: self.ping_pong,
            blend_enabled: self.blend,
            blend_duration: DEFAULT_BLEND_DURATION,
            ..PlaybackConfig::with_fps(self.fps)
        }
    }

    pub fn session(&self) -> Session {
        Session::new(self.playback_config(), self.bpm)
    }
}

/// Console logging at the level picked by `-v` flags; `RUST_LOG` still wins.
pub fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .filter_module("winit", log::LevelFilter::Warn)
        .format_timestamp_millis()
        .init();
}
