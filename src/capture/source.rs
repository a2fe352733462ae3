//! Frame source abstraction.
//!
//! The sensor never talks to the OS directly: window lookup and region
//! capture sit behind the [`FrameSource`] trait, so a real screen-grab
//! backend and the synthetic mock used in tests are interchangeable.

use super::{frame::RawFrame, region::Region};
use thiserror::Error;

/// Errors that can occur while locating a window or grabbing a frame.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// No window with the requested title exists.
    #[error("window not found: '{0}'")]
    WindowNotFound(String),
    /// The requested capture region has no area.
    #[error("invalid capture region: ({left},{top})-({right},{bottom})")]
    InvalidRegion {
        /// Left edge of the rejected region.
        left: i32,
        /// Top edge of the rejected region.
        top: i32,
        /// Right edge of the rejected region.
        right: i32,
        /// Bottom edge of the rejected region.
        bottom: i32,
    },
    /// The backend failed to grab the region.
    #[error("failed to capture frame: {0}")]
    CaptureFailed(String),
}

impl CaptureError {
    /// Builds an [`CaptureError::InvalidRegion`] from the offending region.
    pub(crate) fn invalid_region(region: Region) -> Self {
        Self::InvalidRegion {
            left: region.left,
            top: region.top,
            right: region.right,
            bottom: region.bottom,
        }
    }
}

/// Trait for window-capture backends.
///
/// The sensing core depends only on these two operations; which windowing
/// system sits behind them is an external concern. Capture is treated as
/// an opaque, potentially slow synchronous call; retry and timeout policy
/// belong to the caller that owns the capture loop.
pub trait FrameSource {
    /// Resolves the on-screen rectangle of the window with the given title.
    fn locate_window(&mut self, title: &str) -> Result<Region, CaptureError>;

    /// Captures the pixels of a screen region as a raw RGB frame.
    fn capture(&mut self, region: Region) -> Result<RawFrame, CaptureError>;
}

/// Synthetic frame source for tests and the demo binary.
///
/// Pretends a single window exists and renders a deterministic road scene
/// into every captured frame: dark ground below a dim sky, with two bright
/// track borders converging toward a vanishing point. The sway of the
/// borders depends only on the frame sequence number, so a given
/// (region, sequence) pair always yields identical pixels.
#[derive(Debug)]
pub struct MockWindowSource {
    title: String,
    bounds: Region,
    sequence: u64,
}

impl MockWindowSource {
    /// Creates a mock source owning one window with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            bounds: Region::new(0, 0, 640, 480),
            sequence: 0,
        }
    }

    /// Overrides the fake window rectangle.
    pub fn with_bounds(mut self, bounds: Region) -> Self {
        self.bounds = bounds;
        self
    }

    fn render(&self, width: u32, height: u32) -> Vec<u8> {
        let horizon = (height as f64 * 0.4) as u32;
        let sway = ((self.sequence % 9) as i32 - 4) as f64 * (width as f64 / 96.0);
        let center = width as f64 / 2.0 + sway;

        let mut pixels = Vec::with_capacity((width * height) as usize * RawFrame::CHANNELS);
        for y in 0..height {
            for x in 0..width {
                let rgb: [u8; 3] = if y < horizon {
                    [16, 18, 26]
                } else {
                    let t = (y - horizon) as f64 / (height - horizon) as f64;
                    let span = t * width as f64 * 0.38;
                    let thickness = 1.5 + 2.5 * t;
                    let xf = x as f64;
                    let on_border = (xf - (center - span)).abs() <= thickness
                        || (xf - (center + span)).abs() <= thickness;
                    if on_border {
                        [235, 235, 225]
                    } else {
                        [10, 10, 10]
                    }
                };
                pixels.extend_from_slice(&rgb);
            }
        }
        pixels
    }
}

impl FrameSource for MockWindowSource {
    fn locate_window(&mut self, title: &str) -> Result<Region, CaptureError> {
        if title == self.title {
            tracing::debug!("resolved window '{}' at {:?}", title, self.bounds);
            Ok(self.bounds)
        } else {
            Err(CaptureError::WindowNotFound(title.to_string()))
        }
    }

    fn capture(&mut self, region: Region) -> Result<RawFrame, CaptureError> {
        if !region.is_valid() {
            return Err(CaptureError::invalid_region(region));
        }

        let (width, height) = (region.width(), region.height());
        let pixels = self.render(width, height);
        self.sequence += 1;
        Ok(RawFrame::new(pixels, width, height, self.sequence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_known_window() {
        let mut source = MockWindowSource::new("Game").with_bounds(Region::new(5, 5, 105, 85));
        let region = source.locate_window("Game").unwrap();
        assert_eq!(region, Region::new(5, 5, 105, 85));
    }

    #[test]
    fn test_locate_unknown_window_fails() {
        let mut source = MockWindowSource::new("Game");
        assert!(matches!(
            source.locate_window("Other"),
            Err(CaptureError::WindowNotFound(title)) if title == "Other"
        ));
    }

    #[test]
    fn test_capture_rejects_degenerate_region() {
        let mut source = MockWindowSource::new("Game");
        assert!(matches!(
            source.capture(Region::new(0, 0, 0, 100)),
            Err(CaptureError::InvalidRegion { .. })
        ));
    }

    #[test]
    fn test_capture_produces_valid_frames() {
        let mut source = MockWindowSource::new("Game");
        let region = Region::new(0, 0, 160, 120);

        let frame = source.capture(region).unwrap();
        assert_eq!(frame.width(), 160);
        assert_eq!(frame.height(), 120);
        assert_eq!(frame.sequence(), 1);
        assert!(frame.is_valid());

        let frame2 = source.capture(region).unwrap();
        assert_eq!(frame2.sequence(), 2);
    }

    #[test]
    fn test_capture_is_deterministic_per_sequence() {
        let region = Region::new(0, 0, 64, 64);
        let mut a = MockWindowSource::new("Game");
        let mut b = MockWindowSource::new("Game");

        let fa = a.capture(region).unwrap();
        let fb = b.capture(region).unwrap();
        assert_eq!(fa.pixels(), fb.pixels());
    }

    #[test]
    fn test_capture_contains_bright_borders() {
        let mut source = MockWindowSource::new("Game");
        let frame = source.capture(Region::new(0, 0, 128, 128)).unwrap();
        assert!(frame.pixels().iter().any(|&v| v > 200));
    }
}
