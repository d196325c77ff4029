// Copyright 2020 @TwoCookingMice

use super::constants::{ Float, Vector3f, FLOAT_MIN, FLOAT_MAX };
use super::ray::{ Ray3f };

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AABB {
    pub p_min: Vector3f,
    pub p_max: Vector3f
}

impl Default for AABB {
    fn default() -> Self {
        Self { p_min: Vector3f::new(FLOAT_MAX, FLOAT_MAX, FLOAT_MAX),
               p_max: Vector3f::new(FLOAT_MIN, FLOAT_MIN, FLOAT_MIN) }
    }
}

impl AABB {
    pub fn new(p_min: Vector3f, p_max: Vector3f) -> Self {
        let mut min = Vector3f::new(0.0, 0.0, 0.0);
        let mut max = Vector3f::new(0.0, 0.0, 0.0);
        for idx in 0..3 {
            min[idx] = p_min[idx].min(p_max[idx]);
            max[idx] = p_max[idx].max(p_min[idx]);
        }
        Self { p_min: min, p_max: max }
    }

    /// Box of full size `extent` centered at the origin.
    pub fn centered(extent: Vector3f) -> Self {
        let half = extent * 0.5;
        Self::new(-half, half)
    }

    pub fn center(&self) -> Vector3f {
        0.5f32 * self.p_min + 0.5f32 * self.p_max
    }

    pub fn expand_by_point(&mut self, p: &Vector3f) {
        for idx in 0..3 {
            self.p_min[idx] = self.p_min[idx].min(p[idx]);
            self.p_max[idx] = self.p_max[idx].max(p[idx]);
        }
    }

    pub fn expand_by_aabb(&mut self, other: &AABB) {
        for idx in 0..3 {
            self.p_min[idx] = self.p_min[idx].min(other.p_min[idx]);
            self.p_max[idx] = self.p_max[idx].max(other.p_max[idx]);
        }
    }

    /// Slab test. Returns the entry distance (clamped to zero, so an origin
    /// inside the box enters at 0) when the ray overlaps the box.
    ///
    /// Zero direction components divide to +-inf and fall out of the min/max
    /// reductions, so there is no special case for axis-parallel rays.
    pub fn slab_intersect(&self, o: &Vector3f, d: &Vector3f) -> Option<Float> {
        let mut t_min: Float = 0.0;
        let mut t_max = std::f32::INFINITY;

        for idx in 0..3 {
            let t0 = (self.p_min[idx] - o[idx]) / d[idx];
            let t1 = (self.p_max[idx] - o[idx]) / d[idx];
            t_min = t_min.max(t0.min(t1));
            t_max = t_max.min(t0.max(t1));
        }

        if t_min < t_max {
            Some(t_min)
        } else {
            None
        }
    }

    pub fn ray_intersect(&self, ray: &Ray3f) -> Option<Float> {
        self.slab_intersect(&ray.origin(), &ray.dir())
    }

    pub fn contains(&self, p: &Vector3f) -> bool {
        for idx in 0..3 {
            if p[idx] < self.p_min[idx] || p[idx] > self.p_max[idx] {
                return false;
            }
        }

        true
    }

    pub fn diagnal(&self) -> Vector3f {
        self.p_max - self.p_min
    }

    pub fn is_valid(&self) -> bool {
        let mut result = true;
        for idx in 0..3 {
            if self.p_min[idx] > self.p_max[idx] {
                result = false;
                break;
            }
        }

        result
    }
}

/* Test for AABB */
