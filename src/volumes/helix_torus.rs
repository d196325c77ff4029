// Copyright @yucwang 2026

use crate::core::volume::Volume;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};

const FALLOFF_POWER: i32 = 8;

/// Smooth torus lying in the xz-plane whose tube center winds around the
/// ring. Coordinates are normalized so the box spans [-1, 1]^3.
pub struct HelixTorusVolume {
    bbox: AABB,
    ring_radius: Float,
    tube_radius: Float,
    amplitude: Float,
    turns: Float,
}

impl HelixTorusVolume {
    pub fn new(bbox: AABB) -> Self {
        Self {
            bbox,
            ring_radius: 0.55,
            tube_radius: 0.3,
            amplitude: 0.12,
            turns: 6.0,
        }
    }

    fn tube_offset(&self, q: &Vector3f) -> (Float, Float) {
        let theta = q.z.atan2(q.x);
        let (sin_k, cos_k) = (self.turns * theta).sin_cos();
        let radial = (q.x * q.x + q.z * q.z).sqrt();

        let dx = (radial - self.ring_radius - self.amplitude * cos_k) / self.tube_radius;
        let dy = (q.y - self.amplitude * sin_k) / self.tube_radius;
        (dx, dy)
    }
}

impl Volume for HelixTorusVolume {
    fn eval(&self, p_world: Vector3f) -> Float {
        let half = self.bbox.diagnal() * 0.5;
        let q = (p_world - self.bbox.center()).component_div(&half);

        let (dx, dy) = self.tube_offset(&q);
        (1.0 - dx * dx - dy * dy).max(0.0).powi(FALLOFF_POWER)
    }

    fn describe(&self) -> String {
        format!("HelixTorusVolume(R = {}, r = {}, a = {}, k = {})",
                self.ring_radius, self.tube_radius, self.amplitude, self.turns)
    }
}
