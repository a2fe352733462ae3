//! Morphological cleanup of the edge image.
//!
//! Dilation thickens the thin edge response so a ray cannot slip through
//! a one-pixel gap; the blur-and-rethreshold pass afterwards collapses
//! speckle the dilation leaves behind.

use image::{GrayImage, Luma};

/// Dilates with a square structuring element, repeated `iterations` times.
///
/// `kernel` is the side length of the square and must be odd; pixels past
/// the border are treated as free space.
pub fn dilate(image: &GrayImage, kernel: u32, iterations: u32) -> GrayImage {
    debug_assert!(kernel % 2 == 1, "dilation kernel must be odd");
    let (width, height) = image.dimensions();
    let radius = (kernel / 2) as i32;

    let mut current = image.clone();
    for _ in 0..iterations {
        let src = &current;
        let next = GrayImage::from_fn(width, height, |x, y| {
            let mut max = 0u8;
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                    if nx >= 0 && ny >= 0 && nx < width as i32 && ny < height as i32 {
                        max = max.max(src.get_pixel(nx as u32, ny as u32).0[0]);
                    }
                }
            }
            Luma([max])
        });
        current = next;
    }
    current
}

/// 3x3 binomial blur (the separable 1-2-1 kernel), borders clamped.
pub fn blur3(image: &GrayImage) -> GrayImage {
    let (width, height) = image.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let mut acc = 0u32;
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                let nx = (x as i32 + dx).clamp(0, width as i32 - 1) as u32;
                let ny = (y as i32 + dy).clamp(0, height as i32 - 1) as u32;
                let weight = (2 - dx.abs()) as u32 * (2 - dy.abs()) as u32;
                acc += weight * image.get_pixel(nx, ny).0[0] as u32;
            }
        }
        Luma([(acc / 16) as u8])
    })
}
