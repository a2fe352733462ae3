//! Observation assembly.

use super::{distance, Observation};
use crate::preprocess::Mask;
use crate::raycast::{Ray, RayCaster};

/// Builds the observation vector for one mask.
///
/// The authoritative sensing path always keeps the horizontal extremes,
/// so the vector length equals the configured ray count. Pure function of
/// the mask and the ray count.
pub fn build_observation(mask: &Mask, n_rays: usize) -> Observation {
    let caster = RayCaster::new(n_rays);
    let reference_point = mask.reference_point();
    let reference_size = mask.reference_size();

    let values = caster
        .cast(mask, true)
        .iter()
        .map(|ray| distance::normalize(ray, reference_point, reference_size) as f32)
        .collect();
    Observation::new(values)
}

/// Ray endpoints for overlay rendering.
///
/// Drops the two horizontal endpoint angles, whose lines degenerate on
/// screen. Purely cosmetic; never used for sensing.
pub fn display_rays(mask: &Mask, n_rays: usize) -> Vec<Ray> {
    RayCaster::new(n_rays).cast(mask, false)
}
