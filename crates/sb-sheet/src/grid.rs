//! Sprite-sheet grid detection.
//!
//! Infers frame size and column/row counts from the pixel dimensions of the
//! sheet. The square-grid scan is a heuristic: it favours fewer columns and
//! can pick the wrong grid for sheets whose frames are not square.

use core::num::NonZeroU32;

/// Largest column count tried by the square-grid scan.
pub const MAX_GRID_COLUMNS: u32 = 8;

/// Error type for sheet geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SheetError {
    /// The image has a zero-sized dimension.
    #[error("sprite sheet has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

/// Layout of the frames inside a sprite sheet.
///
/// Frame sizes are fractional: a 100 px wide sheet split into 3 columns
/// has 33.33 px frames, and sampling uses the exact fraction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameGeometry {
    frame_width: f32,
    frame_height: f32,
    columns: u32,
    rows: u32,
}

/// A rectangle in sheet pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FrameGeometry {
    fn single_row(width: u32, height: u32, columns: u32) -> Self {
        Self {
            frame_width: width as f32 / columns as f32,
            frame_height: height as f32,
            columns,
            rows: 1,
        }
    }

    fn single_column(width: u32, height: u32, rows: u32) -> Self {
        Self {
            frame_width: width as f32,
            frame_height: height as f32 / rows as f32,
            columns: 1,
            rows,
        }
    }

    fn square(size: u32, columns: u32, rows: u32) -> Self {
        Self {
            frame_width: size as f32,
            frame_height: size as f32,
            columns,
            rows,
        }
    }

    pub fn frame_width(&self) -> f32 {
        self.frame_width
    }

    pub fn frame_height(&self) -> f32 {
        self.frame_height
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of frames in the sheet (`columns * rows`, always >= 1).
    pub fn total_frames(&self) -> u32 {
        self.columns * self.rows
    }

    /// Pixel rectangle of frame `index`, read row-major.
    pub fn source_rect(&self, index: u32) -> PixelRect {
        let index = index % self.total_frames();
        PixelRect {
            x: (index % self.columns) as f32 * self.frame_width,
            y: (index / self.columns) as f32 * self.frame_height,
            width: self.frame_width,
            height: self.frame_height,
        }
    }

    /// Normalized texture coordinates `(uv_min, uv_max)` of frame `index`
    /// inside a `sheet_width` x `sheet_height` texture.
    pub fn uv_rect(&self, index: u32, sheet_width: u32, sheet_height: u32) -> ([f32; 2], [f32; 2]) {
        let rect = self.source_rect(index);
        let w = sheet_width.max(1) as f32;
        let h = sheet_height.max(1) as f32;
        (
            [rect.x / w, rect.y / h],
            [(rect.x + rect.width) / w, (rect.y + rect.height) / h],
        )
    }
}

/// Detect the frame grid of a `width` x `height` sheet.
///
/// With `frames_override` the sheet is a single row of that many frames.
/// Otherwise the sheet starts as a single row (landscape) or single column
/// (portrait) of square-ish frames, then the first column count in
/// `1..=MAX_GRID_COLUMNS` that tiles the sheet with square frames wins.
pub fn detect_grid(
    width: u32,
    height: u32,
    frames_override: Option<NonZeroU32>,
) -> Result<FrameGeometry, SheetError> {
    if width == 0 || height == 0 {
        return Err(SheetError::EmptyImage { width, height });
    }

    if let Some(frames) = frames_override {
        return Ok(FrameGeometry::single_row(width, height, frames.get()));
    }

    let strip = if width >= height {
        FrameGeometry::single_row(width, height, (width / height).max(1))
    } else {
        FrameGeometry::single_column(width, height, (height / width).max(1))
    };

    Ok(scan_square_grid(width, height).unwrap_or(strip))
}

fn scan_square_grid(width: u32, height: u32) -> Option<FrameGeometry> {
    (1..=MAX_GRID_COLUMNS).find_map(|columns| {
        if width % columns != 0 {
            return None;
        }
        let size = width / columns;
        (height % size == 0).then(|| FrameGeometry::square(size, columns, height / size))
    })
}
