// Copyright @yucwang 2026

use crate::core::medium::Medium;
use crate::core::rng::LcgRng;
use crate::math::constants::{Float, Vector3f};

/// Exponential step against the majorant, by inversion of `1 - u`.
pub fn sample_free_flight(max_extinction: Float, u: Float) -> Float {
    -(1.0 - u).ln() / max_extinction
}

/// Delta tracking from `p` along unit direction `d`.
///
/// Tentative collisions are drawn against the medium's majorant and accepted
/// with probability `extinction / max_extinction`; a rejected candidate
/// becomes the start of the next step. Returns the accepted collision, or
/// `None` once a candidate leaves the volume.
pub fn sample_interaction(medium: &Medium, p: &Vector3f, d: &Vector3f, rng: &mut LcgRng) -> Option<Vector3f> {
    if d.norm_squared() == 0.0 {
        return None;
    }

    let max_extinction = medium.max_extinction();
    let mut s = *p;

    loop {
        s += d * sample_free_flight(max_extinction, rng.next_f32());
        if !medium.contains(&s) {
            return None;
        }

        if rng.next_f32() * max_extinction < medium.extinction(&s) {
            return Some(s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volumes::const_volume::ConstantVolume;
    use crate::volumes::sierpinski::SierpinskiVolume;
    use crate::math::aabb::AABB;

    fn fog(extent: Float, density: Float, max_extinction: Float) -> Medium {
        Medium::new(Vector3f::new(extent, extent, extent), 1.0, max_extinction,
                    Box::new(ConstantVolume::new_scalar(density)))
    }

    fn mean_flight(medium: &Medium, trials: usize, seed: u64) -> f64 {
        let mut rng = LcgRng::new(seed);
        let d = Vector3f::new(0.0, 0.0, 1.0);
        let mut sum = 0.0f64;
        for _ in 0..trials {
            let p = Vector3f::zeros();
            let hit = sample_interaction(medium, &p, &d, &mut rng).expect("huge box should not be escaped");
            sum += (hit - p).norm() as f64;
        }
        sum / trials as f64
    }

    #[test]
    fn test_mean_free_path_matches_majorant() {
        let medium = fog(1000.0, 1.0, 2.0);
        let mean = mean_flight(&medium, 20000, 1);
        assert!((mean - 0.5).abs() < 0.02, "mean free path {}", mean);
    }

    #[test]
    fn test_thin_medium_mean_free_path() {
        // Delta tracking through a medium at a quarter of its majorant.
        let medium = fog(1000.0, 0.25, 4.0);
        let mean = mean_flight(&medium, 20000, 2);
        assert!((mean - 1.0).abs() < 0.04, "mean free path {}", mean);
    }

    #[test]
    fn test_escapes_empty_medium() {
        let medium = fog(1.0, 0.0, 10.0);
        let mut rng = LcgRng::new(3);
        for _ in 0..100 {
            let hit = sample_interaction(&medium, &Vector3f::zeros(), &Vector3f::new(1.0, 0.0, 0.0), &mut rng);
            assert!(hit.is_none());
        }
    }

    #[test]
    fn test_collisions_stay_inside_and_in_solid_cells() {
        let bbox = AABB::centered(Vector3f::new(1.0, 1.0, 1.0));
        let medium = Medium::new(Vector3f::new(1.0, 1.0, 1.0), 0.8, 50.0,
                                 Box::new(SierpinskiVolume::new(bbox)));
        let mut rng = LcgRng::new(4);
        let d = Vector3f::new(0.3, 0.5, 0.8).normalize();
        let mut hits = 0;
        for _ in 0..500 {
            if let Some(s) = sample_interaction(&medium, &Vector3f::new(-0.45, -0.45, -0.45), &d, &mut rng) {
                assert!(medium.contains(&s));
                assert!(medium.extinction(&s) > 0.0);
                hits += 1;
            }
        }
        assert!(hits > 0);
    }

    #[test]
    fn test_zero_direction_reports_no_interaction() {
        let medium = fog(1.0, 0.0, 1.0);
        let mut rng = LcgRng::new(5);
        assert!(sample_interaction(&medium, &Vector3f::zeros(), &Vector3f::zeros(), &mut rng).is_none());
    }
}
