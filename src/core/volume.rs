// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f};

/// Normalized density field. `eval` returns a value in [0, 1] that the
/// owning medium scales by its majorant.
pub trait Volume: Send + Sync {
    fn eval(&self, p_world: Vector3f) -> Float;

    fn describe(&self) -> String {
        String::from("Volume")
    }
}
