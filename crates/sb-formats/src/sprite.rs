//! PNG sprite sheet decoding.

use std::io::Cursor;

use crate::FormatError;

/// A decoded sprite sheet, always RGBA8, rows top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteSheet {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl SpriteSheet {
    /// Wrap raw RGBA8 pixels.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, FormatError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(FormatError::SizeMismatch { expected, actual: pixels.len() });
        }
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA of the pixel at (x, y), if inside the sheet.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// Decode PNG bytes to an RGBA8 sprite sheet.
pub fn load_png(data: &[u8]) -> Result<SpriteSheet, FormatError> {
    let mut decoder = png::Decoder::new(Cursor::new(data));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let pixels = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        png::ColorType::Indexed => {
            return Err(FormatError::Unsupported("indexed png without palette".into()));
        }
    };

    log::debug!("decoded {}x{} png ({:?})", info.width, info.height, info.color_type);
    SpriteSheet::from_rgba(info.width, info.height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
        writer.finish().unwrap();
        out
    }

    #[test]
    fn rgba_passthrough() {
        let data = [255, 0, 0, 255, 0, 255, 0, 128];
        let sheet = load_png(&encode(2, 1, png::ColorType::Rgba, &data)).unwrap();
        assert_eq!((sheet.width(), sheet.height()), (2, 1));
        assert_eq!(sheet.pixels(), &data);
    }

    #[test]
    fn rgb_gets_opaque_alpha() {
        let data = [10, 20, 30, 40, 50, 60];
        let sheet = load_png(&encode(1, 2, png::ColorType::Rgb, &data)).unwrap();
        assert_eq!(sheet.pixel(0, 0), Some([10, 20, 30, 255]));
        assert_eq!(sheet.pixel(0, 1), Some([40, 50, 60, 255]));
        assert_eq!(sheet.pixel(1, 0), None);
    }

    #[test]
    fn grayscale_expands() {
        let sheet = load_png(&encode(2, 1, png::ColorType::Grayscale, &[7, 200])).unwrap();
        assert_eq!(sheet.pixels(), &[7, 7, 7, 255, 200, 200, 200, 255]);

        let sheet = load_png(&encode(1, 1, png::ColorType::GrayscaleAlpha, &[9, 99])).unwrap();
        assert_eq!(sheet.pixels(), &[9, 9, 9, 99]);
    }

    #[test]
    fn garbage_rejected() {
        assert!(matches!(load_png(b"definitely not a png"), Err(FormatError::Png(_))));
    }

    #[test]
    fn from_rgba_checks_length() {
        assert!(SpriteSheet::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            SpriteSheet::from_rgba(2, 2, vec![0; 15]),
            Err(FormatError::SizeMismatch { expected: 16, actual: 15 })
        ));
    }
}
