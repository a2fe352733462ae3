//! Binary thresholding.

use image::{GrayImage, Luma};

/// Binary threshold: pixels strictly above `cutoff` become 255, the rest 0.
///
/// The strict comparison matters at the near-zero re-threshold after
/// blurring, where a cutoff of 1 must drop pixels that blurred down to 1.
pub fn threshold(image: &GrayImage, cutoff: u8) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        if image.get_pixel(x, y).0[0] > cutoff {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}
