//! spritebeat CLI - sheet inspection and beat-track export.
//!
//! Usage:
//!   sb-cli inspect walk.png [--frames 8]
//!   sb-cli render --bpm 120 --seconds 8 --out beat.wav

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use sb_engine::DEFAULT_BPM;
use spritebeat::config::init_logging;

/// Headless tools for spritebeat
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbosity: u8,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Print the frame grid detected for a sprite sheet
    Inspect {
        #[arg(value_name = "SHEET")]
        sheet: PathBuf,

        /// Number of frames in a single-row sheet
        #[arg(short = 'n', long = "frames", value_name = "N")]
        frames: Option<NonZeroU32>,
    },
    /// Render the beat track to a WAV file
    Render {
        #[arg(long = "bpm", value_name = "N", default_value_t = DEFAULT_BPM)]
        bpm: u32,

        #[arg(long = "seconds", value_name = "S", default_value_t = 8.0)]
        seconds: f64,

        #[arg(long = "sample-rate", value_name = "HZ", default_value_t = 44100)]
        sample_rate: u32,

        #[arg(short = 'o', long = "out", value_name = "FILE")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        CliCommand::Inspect { sheet, frames } => inspect(&sheet, frames),
        CliCommand::Render { bpm, seconds, sample_rate, out } => render(bpm, seconds, sample_rate, &out),
    }
}

fn inspect(path: &Path, frames: Option<NonZeroU32>) -> anyhow::Result<()> {
    let sheet = sb_formats::read_sprite_sheet(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let geometry = sb_sheet::detect_grid(sheet.width(), sheet.height(), frames)?;

    println!("Sheet:   {} ({}x{})", path.display(), sheet.width(), sheet.height());
    println!("Grid:    {} columns x {} rows", geometry.columns(), geometry.rows());
    println!("Frame:   {}x{} px", geometry.frame_width(), geometry.frame_height());
    println!("Frames:  {}", geometry.total_frames());
    Ok(())
}

fn render(bpm: u32, seconds: f64, sample_rate: u32, out: &Path) -> anyhow::Result<()> {
    let bpm = bpm.clamp(sb_engine::MIN_BPM, sb_engine::MAX_BPM);
    let wav = sb_master::render_to_wav(bpm, seconds, sample_rate);
    std::fs::write(out, &wav).with_context(|| format!("writing {}", out.display()))?;
    println!("Wrote {} ({:.1} s at {} BPM, {} bytes)", out.display(), seconds, bpm, wav.len());
    Ok(())
}
