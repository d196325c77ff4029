// Copyright @yucwang 2023

use super::constants::{ PI, Float, Vector2f, Vector3f };

/// Isotropic direction: phi = 2*pi*u.x, cos(theta) = 1 - 2*u.y.
pub fn square_to_uniform_sphere(u: &Vector2f) -> Vector3f {
    let phi: Float = 2. * PI * u.x;
    let cos_theta: Float = 1. - 2. * u.y;
    let sin_theta: Float = (1. - cos_theta * cos_theta).max(0.).sqrt();

    return Vector3f::new(phi.cos() * sin_theta, phi.sin() * sin_theta, cos_theta)
}
