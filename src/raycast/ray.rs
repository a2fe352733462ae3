//! Rays and the angle fan.

use std::f64::consts::PI;

/// A single cast ray: its angle and where it stopped.
///
/// Angles live in `[0, pi]`: 0 points along the mask's bottom row toward
/// increasing x, `pi/2` straight ahead (decreasing y), `pi` toward
/// decreasing x. The endpoint is the truncated pixel coordinate at which
/// the walk stopped; when a ray exits the frame this is the first
/// out-of-bounds coordinate, one step past the last free pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Cast angle in radians.
    pub angle: f64,
    /// Terminal pixel coordinate (x, y).
    pub end: (i32, i32),
}

/// Generates the fan of cast angles for `n_rays` probes.
///
/// With `keep_horizontal` the fan spans the closed interval `[0, pi]`
/// with spacing `pi / (n_rays - 1)`, endpoints included. Without it the
/// two horizontal endpoint angles are dropped, leaving `n_rays - 2`
/// entries at the same spacing; display overlays use that form to avoid
/// degenerate horizontal lines.
///
/// Callers validate `n_rays >= 3` at configuration time.
pub fn fan(n_rays: usize, keep_horizontal: bool) -> impl Iterator<Item = f64> {
    debug_assert!(n_rays >= 3);
    let step = PI / (n_rays - 1) as f64;
    let range = if keep_horizontal {
        0..n_rays
    } else {
        1..n_rays - 1
    };
    range.map(move |i| i as f64 * step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_spans_closed_interval() {
        let angles: Vec<f64> = fan(5, true).collect();
        assert_eq!(angles.len(), 5);
        assert_eq!(angles[0], 0.0);
        assert!((angles[2] - PI / 2.0).abs() < 1e-12);
        assert!((angles[4] - PI).abs() < 1e-12);
    }

    #[test]
    fn test_fan_ordering_invariant() {
        for n in [3usize, 5, 16, 33] {
            let step = PI / (n - 1) as f64;
            for (i, angle) in fan(n, true).enumerate() {
                assert_eq!(angle, i as f64 * step);
            }
        }
    }

    #[test]
    fn test_fan_without_horizontal_drops_endpoints() {
        let angles: Vec<f64> = fan(5, false).collect();
        let step = PI / 4.0;
        assert_eq!(angles.len(), 3);
        for (i, angle) in angles.iter().enumerate() {
            assert_eq!(*angle, (i + 1) as f64 * step);
        }
    }
}
