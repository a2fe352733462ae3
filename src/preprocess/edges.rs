//! Two-threshold edge detection.
//!
//! Sobel gradients, non-maximum suppression along the quantized gradient
//! direction, then hysteresis: pixels at or above the high threshold seed
//! edges, pixels between the thresholds survive only when 8-connected to
//! a seed. Output is binary (0/255) and one to two pixels thick.

use image::{GrayImage, Luma};

/// Detects edges with a low/high hysteresis threshold pair.
///
/// Images smaller than the 3x3 gradient support come back empty.
pub fn detect(image: &GrayImage, low: f32, high: f32) -> GrayImage {
    let (width, height) = image.dimensions();
    if width < 3 || height < 3 {
        return GrayImage::new(width, height);
    }
    let w = width as usize;
    let len = w * height as usize;

    let mut gx = vec![0.0f32; len];
    let mut gy = vec![0.0f32; len];
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let p = |dx: i32, dy: i32| {
                image
                    .get_pixel((x as i32 + dx) as u32, (y as i32 + dy) as u32)
                    .0[0] as f32
            };
            let i = y as usize * w + x as usize;
            gx[i] =
                (p(1, -1) + 2.0 * p(1, 0) + p(1, 1)) - (p(-1, -1) + 2.0 * p(-1, 0) + p(-1, 1));
            gy[i] =
                (p(-1, 1) + 2.0 * p(0, 1) + p(1, 1)) - (p(-1, -1) + 2.0 * p(0, -1) + p(1, -1));
        }
    }

    let magnitude: Vec<f32> = gx.iter().zip(&gy).map(|(&a, &b)| a.hypot(b)).collect();

    // Keep only local maxima along the gradient direction, quantized to
    // the four pixel axes.
    let mut thin = vec![0.0f32; len];
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let i = y as usize * w + x as usize;
            let m = magnitude[i];
            if m == 0.0 {
                continue;
            }
            let mut d = gy[i].atan2(gx[i]).to_degrees();
            if d < 0.0 {
                d += 180.0;
            }
            let (ox, oy): (i32, i32) = if !(22.5..157.5).contains(&d) {
                (1, 0)
            } else if d < 67.5 {
                (1, 1)
            } else if d < 112.5 {
                (0, 1)
            } else {
                (-1, 1)
            };
            let ahead = ((y as i32 + oy) as usize) * w + (x as i32 + ox) as usize;
            let behind = ((y as i32 - oy) as usize) * w + (x as i32 - ox) as usize;
            if m >= magnitude[ahead] && m >= magnitude[behind] {
                thin[i] = m;
            }
        }
    }

    // Hysteresis: flood out from strong pixels through connected weak ones.
    let mut out = GrayImage::new(width, height);
    let mut visited = vec![false; len];
    let mut stack: Vec<(u32, u32)> = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let i = y as usize * w + x as usize;
            if thin[i] >= high {
                visited[i] = true;
                stack.push((x, y));
            }
        }
    }
    while let Some((x, y)) = stack.pop() {
        out.put_pixel(x, y, Luma([255]));
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                if nx < 0 || ny < 0 || nx >= width as i32 || ny >= height as i32 {
                    continue;
                }
                let j = ny as usize * w + nx as usize;
                if !visited[j] && thin[j] >= low {
                    visited[j] = true;
                    stack.push((nx as u32, ny as u32));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bright_square(size: u32, from: u32, to: u32) -> GrayImage {
        GrayImage::from_fn(size, size, |x, y| {
            if (from..to).contains(&x) && (from..to).contains(&y) {
                Luma([255])
            } else {
                Luma([0])
            }
        })
    }

    #[test]
    fn test_uniform_image_has_no_edges() {
        let dark = GrayImage::new(32, 32);
        assert!(detect(&dark, 100.0, 300.0).pixels().all(|p| p.0[0] == 0));

        let bright = GrayImage::from_fn(32, 32, |_, _| Luma([255]));
        assert!(detect(&bright, 100.0, 300.0).pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_square_produces_boundary_ring() {
        let image = bright_square(32, 8, 24);
        let edges = detect(&image, 100.0, 300.0);

        // Some boundary response, nothing deep inside or far outside.
        assert!(edges.pixels().any(|p| p.0[0] == 255));
        assert_eq!(edges.get_pixel(16, 16).0[0], 0);
        assert_eq!(edges.get_pixel(0, 0).0[0], 0);
        assert_eq!(edges.get_pixel(31, 31).0[0], 0);

        // Every edge pixel hugs the square boundary.
        for (x, y, p) in edges.enumerate_pixels() {
            if p.0[0] != 0 {
                let near_x = (7..=9).contains(&x) || (22..=24).contains(&x);
                let near_y = (7..=9).contains(&y) || (22..=24).contains(&y);
                assert!(
                    (near_x && (7..=24).contains(&y)) || (near_y && (7..=24).contains(&x)),
                    "stray edge at ({x},{y})"
                );
            }
        }
    }

    #[test]
    fn test_output_is_binary() {
        let edges = detect(&bright_square(32, 4, 28), 100.0, 300.0);
        assert!(edges.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn test_tiny_image_comes_back_empty() {
        let image = GrayImage::from_fn(2, 2, |_, _| Luma([255]));
        let edges = detect(&image, 100.0, 300.0);
        assert_eq!(edges.dimensions(), (2, 2));
        assert!(edges.pixels().all(|p| p.0[0] == 0));
    }
}
