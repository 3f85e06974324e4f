//! spritebeat - sprite-sheet animation player with a procedural drum beat.
//!
//! The binary in `main.rs` and the headed GUI tests both build on `App`.

pub mod app;
pub mod config;
pub mod ui;
