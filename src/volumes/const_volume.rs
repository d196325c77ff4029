// Copyright @yucwang 2026

use crate::core::volume::Volume;
use crate::math::constants::{Float, Vector3f};

/// Homogeneous density.
pub struct ConstantVolume {
    value: Float,
}

impl ConstantVolume {
    pub fn new_scalar(value: Float) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
        }
    }
}

impl Volume for ConstantVolume {
    fn eval(&self, _p_world: Vector3f) -> Float {
        self.value
    }

    fn describe(&self) -> String {
        format!("ConstantVolume({})", self.value)
    }
}
