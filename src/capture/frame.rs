//! Raw captured frames.

use image::RgbImage;

/// A single RGB frame captured from a screen region.
///
/// Pixel data is tightly packed RGB8, row-major. Frames are ephemeral:
/// produced once per capture, handed to the preprocessor, then dropped.
/// The sequence number exists only to correlate log lines with frames.
#[derive(Clone)]
pub struct RawFrame {
    /// Packed RGB pixel data.
    pixels: Vec<u8>,
    /// Frame width in pixels.
    width: u32,
    /// Frame height in pixels.
    height: u32,
    /// Monotonic sequence number assigned by the source.
    sequence: u64,
}

impl RawFrame {
    /// Bytes per pixel.
    pub const CHANNELS: usize = 3;

    /// Creates a new frame with the given parameters.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32, sequence: u64) -> Self {
        Self {
            pixels,
            width,
            height,
            sequence,
        }
    }

    /// Returns a reference to the packed RGB pixel data.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the frame width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the frame height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the sequence number.
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the total number of pixels (width * height).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Validates that the pixel buffer size matches dimensions.
    pub fn is_valid(&self) -> bool {
        self.pixels.len() == self.pixel_count() * Self::CHANNELS
    }

    /// Converts the frame into an [`RgbImage`] buffer.
    ///
    /// Returns `None` when the buffer length does not match the stated
    /// dimensions.
    pub fn to_rgb(&self) -> Option<RgbImage> {
        RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }
}

impl std::fmt::Debug for RawFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("sequence", &self.sequence)
            .field("pixel_bytes", &self.pixels.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_creation() {
        let pixels = vec![0u8; 320 * 240 * 3];
        let frame = RawFrame::new(pixels, 320, 240, 1);

        assert_eq!(frame.width(), 320);
        assert_eq!(frame.height(), 240);
        assert_eq!(frame.sequence(), 1);
        assert!(frame.is_valid());
    }

    #[test]
    fn test_frame_invalid_size() {
        let pixels = vec![0u8; 100]; // Wrong size
        let frame = RawFrame::new(pixels, 320, 240, 1);

        assert!(!frame.is_valid());
        assert!(frame.to_rgb().is_none());
    }

    #[test]
    fn test_to_rgb_preserves_pixels() {
        let pixels = vec![7u8; 4 * 2 * 3];
        let frame = RawFrame::new(pixels, 4, 2, 1);

        let rgb = frame.to_rgb().unwrap();
        assert_eq!(rgb.dimensions(), (4, 2));
        assert!(rgb.pixels().all(|p| p.0 == [7, 7, 7]));
    }
}
