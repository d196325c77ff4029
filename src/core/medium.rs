// Copyright @yucwang 2026

use crate::core::volume::Volume;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};

/// Participating medium filling an origin-centered box. Immutable once
/// built, so a single instance is shared by every render thread.
pub struct Medium {
    bbox: AABB,
    albedo: Float,
    max_extinction: Float,
    density: Box<dyn Volume>,
}

impl Medium {
    pub fn new(extent: Vector3f, albedo: Float, max_extinction: Float, density: Box<dyn Volume>) -> Self {
        Self {
            bbox: AABB::centered(extent),
            albedo: albedo.clamp(0.0, 1.0),
            max_extinction,
            density,
        }
    }

    pub fn bbox(&self) -> &AABB {
        &self.bbox
    }

    pub fn extent(&self) -> Vector3f {
        self.bbox.diagnal()
    }

    pub fn albedo(&self) -> Float {
        self.albedo
    }

    pub fn max_extinction(&self) -> Float {
        self.max_extinction
    }

    /// Local extinction, always within [0, max_extinction].
    pub fn extinction(&self, p: &Vector3f) -> Float {
        let density = self.density.eval(*p);
        if density.is_nan() {
            return 0.0;
        }
        self.max_extinction * density.clamp(0.0, 1.0)
    }

    /// Entry distance along `d` from `o`, if the ray overlaps the volume.
    pub fn intersect(&self, o: &Vector3f, d: &Vector3f) -> Option<Float> {
        self.bbox.slab_intersect(o, d)
    }

    pub fn contains(&self, p: &Vector3f) -> bool {
        self.bbox.contains(p)
    }

    pub fn describe(&self) -> String {
        format!("Medium\n  extent: {:?}\n  albedo: {}\n  max_extinction: {}\n  density: {}",
                self.extent().as_slice(), self.albedo, self.max_extinction, self.density.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Overshoot;

    impl Volume for Overshoot {
        fn eval(&self, p_world: Vector3f) -> Float {
            p_world.x * 10.0
        }
    }

    #[test]
    fn test_extinction_is_bounded() {
        let medium = Medium::new(Vector3f::new(2.0, 2.0, 2.0), 0.8, 50.0, Box::new(Overshoot));
        assert_eq!(medium.extinction(&Vector3f::new(0.5, 0.0, 0.0)), 50.0);
        assert_eq!(medium.extinction(&Vector3f::new(-0.5, 0.0, 0.0)), 0.0);
        assert!((medium.extinction(&Vector3f::new(0.05, 0.0, 0.0)) - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_box_is_centered() {
        let medium = Medium::new(Vector3f::new(1.0, 2.0, 4.0), 1.5, 1.0, Box::new(Overshoot));
        assert_eq!(medium.bbox().p_min, Vector3f::new(-0.5, -1.0, -2.0));
        assert_eq!(medium.extent(), Vector3f::new(1.0, 2.0, 4.0));
        assert_eq!(medium.albedo(), 1.0);
        assert!(medium.contains(&Vector3f::new(0.0, 0.9, -1.9)));
        assert!(!medium.contains(&Vector3f::new(0.6, 0.0, 0.0)));
    }
}
