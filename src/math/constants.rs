/* Copyright 2020 @Yuchen Wong */

use nalgebra as na;

pub type Float = f32;

pub type Vector2f = na::Vector2<Float>;
pub type Vector3f = na::Vector3<Float>;

pub const EPSILON: Float = 1e-4;
pub const PI: Float = 3.14159265359;

pub const FLOAT_MIN: Float = std::f32::MIN;
pub const FLOAT_MAX: Float = std::f32::MAX;

/// Squared length below which `normalize_or_self` leaves a vector untouched.
pub const NORMALIZE_EPSILON: Float = 1e-5;

/// Unit vector along `v`, or `v` itself when it is too short to normalize.
pub fn normalize_or_self(v: &Vector3f) -> Vector3f {
    let sqr_length = v.norm_squared();
    if sqr_length <= NORMALIZE_EPSILON {
        *v
    } else {
        v / sqr_length.sqrt()
    }
}
