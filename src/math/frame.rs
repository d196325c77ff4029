// Copyright @yucwang 2023

use super::constants::{ normalize_or_self, Vector3f };

/// Orthonormal basis. `x` points right, `y` up and `z` along the view
/// direction when built with `look_along`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub x: Vector3f,
    pub y: Vector3f,
    pub z: Vector3f
}

impl Frame {
    pub fn new(new_x: Vector3f, new_y: Vector3f, new_z: Vector3f) -> Frame {
        Frame {
            x: new_x,
            y: new_y,
            z: new_z
        }
    }

    /// right = normalize(up x forward), up' = normalize(forward x right).
    pub fn look_along(forward: &Vector3f, world_up: &Vector3f) -> Frame {
        let right = normalize_or_self(&world_up.cross(forward));
        let up = normalize_or_self(&forward.cross(&right));
        Frame::new(right, up, *forward)
    }
}
