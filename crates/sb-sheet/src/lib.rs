//! Sprite-sheet animation types for spritebeat.
//!
//! This crate holds everything that turns "seconds since start" into
//! "which part of the sheet to draw, and how opaque": grid detection,
//! the loop/ping-pong frame mapper, crossfade alpha and the fit-to-viewport
//! layout. The GUI, the CLI and the tests all go through it.
//!
//! Designed to be `no_std` compatible.

#![cfg_attr(not(feature = "std"), no_std)]

mod blend;
mod clock;
mod grid;
mod layout;
mod mapper;

pub use blend::{crossfade_alpha, BlendPlan};
pub use clock::{AnimationClock, PlaybackConfig, DEFAULT_BLEND_DURATION, DEFAULT_FPS, MAX_FPS, MIN_FPS};
pub use grid::{detect_grid, FrameGeometry, PixelRect, SheetError, MAX_GRID_COLUMNS};
pub use layout::{fit_scale, placed_rect, MARGIN_FACTOR, MAX_UPSCALE};
pub use mapper::{frame_position, map_to_index, FramePosition};
