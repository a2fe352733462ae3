//! Frame preprocessing.
//!
//! Turns a raw color frame into the canonical 128x32 obstacle mask the
//! raycaster walks. The stage order is fixed: luminance, binary
//! threshold, edge detection, dilation, blur-and-rethreshold, canonical
//! resize, crop to the lower band nearest the vehicle. Every stage is
//! deterministic and side-effect-free, so identical frames always yield
//! identical masks.

mod binarize;
mod edges;
mod mask;
mod morphology;

pub use mask::Mask;

use crate::capture::{ConfigError, RawFrame};
use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when the preprocessor is handed a malformed frame.
///
/// This is a programming-contract violation, not a transient capture
/// problem: the current observation attempt is abandoned, never retried.
#[derive(Debug, Clone, Error)]
pub enum InvalidFrameError {
    /// The frame has no pixels.
    #[error("zero-area frame ({width}x{height})")]
    ZeroArea {
        /// Stated frame width.
        width: u32,
        /// Stated frame height.
        height: u32,
    },
    /// The pixel buffer does not match the stated dimensions.
    #[error("pixel buffer holds {actual} bytes, dimensions require {expected}")]
    BufferSize {
        /// Bytes the dimensions require.
        expected: usize,
        /// Bytes the buffer holds.
        actual: usize,
    },
}

/// Tunable constants of the preprocessing stages.
///
/// Defaults are the calibrated values; deployments rarely override more
/// than the binary cutoff when a game renders unusually dark tracks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessParams {
    /// Square working resolution raw frames are resized to before
    /// processing, decoupling stage constants from the capture size.
    pub working_size: u32,
    /// Binary cutoff separating bright track markings from background.
    pub binary_threshold: u8,
    /// Lower hysteresis threshold of the edge detector.
    pub edge_low: f32,
    /// Upper hysteresis threshold of the edge detector.
    pub edge_high: f32,
    /// Side length of the square dilation kernel (odd).
    pub dilation_kernel: u32,
    /// Number of dilation passes.
    pub dilation_iterations: u32,
    /// Canonical square resolution before cropping.
    pub canonical_size: u32,
    /// Height of the lower band kept as the mask.
    pub band_height: u32,
}

impl Default for PreprocessParams {
    fn default() -> Self {
        Self {
            working_size: 256,
            binary_threshold: 32,
            edge_low: 100.0,
            edge_high: 300.0,
            dilation_kernel: 5,
            dilation_iterations: 3,
            canonical_size: 128,
            band_height: 32,
        }
    }
}

impl PreprocessParams {
    /// Validates the stage constants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.working_size == 0 || self.canonical_size == 0 || self.band_height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if self.edge_low >= self.edge_high {
            return Err(ConfigError::EdgeThresholds);
        }
        if self.dilation_kernel == 0 || self.dilation_kernel % 2 == 0 {
            return Err(ConfigError::DilationKernel);
        }
        if self.canonical_size / 2 + self.band_height > self.canonical_size {
            return Err(ConfigError::CropBand);
        }
        Ok(())
    }
}

/// Converts raw frames into canonical obstacle masks.
///
/// Stateless apart from its parameters; every call is a pure function of
/// the input frame.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    params: PreprocessParams,
}

impl Preprocessor {
    /// Creates a preprocessor with the given stage constants.
    pub fn new(params: PreprocessParams) -> Self {
        Self { params }
    }

    /// The stage constants this preprocessor runs with.
    pub fn params(&self) -> &PreprocessParams {
        &self.params
    }

    /// Runs the full preprocessing pipeline on one frame.
    ///
    /// The output mask always has the canonical dimensions
    /// (`canonical_size` x `band_height`) regardless of the capture
    /// resolution.
    pub fn preprocess(&self, raw: &RawFrame) -> Result<Mask, InvalidFrameError> {
        if raw.width() == 0 || raw.height() == 0 {
            return Err(InvalidFrameError::ZeroArea {
                width: raw.width(),
                height: raw.height(),
            });
        }
        let rgb = raw.to_rgb().ok_or(InvalidFrameError::BufferSize {
            expected: raw.pixel_count() * RawFrame::CHANNELS,
            actual: raw.pixels().len(),
        })?;

        let p = &self.params;
        let rgb = imageops::resize(&rgb, p.working_size, p.working_size, FilterType::Triangle);
        let gray = imageops::grayscale(&rgb);
        let binary = binarize::threshold(&gray, p.binary_threshold);
        let edged = edges::detect(&binary, p.edge_low, p.edge_high);
        let thick = morphology::dilate(&edged, p.dilation_kernel, p.dilation_iterations);
        let cleaned = binarize::threshold(&morphology::blur3(&thick), 1);
        let canonical = imageops::resize(
            &cleaned,
            p.canonical_size,
            p.canonical_size,
            FilterType::Triangle,
        );
        let band = imageops::crop_imm(
            &canonical,
            0,
            p.canonical_size / 2,
            p.canonical_size,
            p.band_height,
        )
        .to_image();

        let mask = Mask::new(band.width(), band.height(), band.into_raw());
        tracing::debug!(
            sequence = raw.sequence(),
            occupancy = mask.occupancy(),
            "frame preprocessed"
        );
        Ok(mask)
    }
}
