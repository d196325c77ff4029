// Copyright @yucwang 2026

use crate::core::volume::Volume;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};

const REFINEMENT_LEVELS: usize = 3;

/// Menger-sponge style mask: solid (1) or void (0). Cells are measured in
/// world units from the box minimum, not stretched to the box, so only the
/// unit box holds exactly one sponge.
pub struct SierpinskiVolume {
    bbox: AABB,
}

impl SierpinskiVolume {
    pub fn new(bbox: AABB) -> Self {
        Self { bbox }
    }
}

impl Volume for SierpinskiVolume {
    fn eval(&self, p_world: Vector3f) -> Float {
        let mut s = p_world - self.bbox.p_min;

        for _ in 0..REFINEMENT_LEVELS {
            s *= 3.0;
            let odd = ((s.x as u32) & 1) + ((s.y as u32) & 1) + ((s.z as u32) & 1);
            if odd >= 2 {
                return 0.0;
            }
        }

        1.0
    }

    fn describe(&self) -> String {
        String::from("SierpinskiVolume")
    }
}
