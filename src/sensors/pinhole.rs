// Copyright @yucwang 2026

use crate::math::constants::{normalize_or_self, Float, Vector2f, Vector3f};
use crate::math::frame::Frame;
use crate::math::ray::Ray3f;

pub fn world_up() -> Vector3f {
    Vector3f::new(0.0, 1.0, 0.0)
}

#[derive(Debug, Copy, Clone)]
pub struct Camera {
    pub position: Vector3f,
    /// Unit view direction.
    pub forward: Vector3f,
    /// Full vertical field of view, radians.
    pub fov_y: Float,
    pub near: Float,
}

impl Camera {
    pub fn new(position: Vector3f, forward: Vector3f, fov_y: Float, near: Float) -> Self {
        Self {
            position,
            forward: normalize_or_self(&forward),
            fov_y,
            near,
        }
    }

    pub fn looking_at(position: Vector3f, target: Vector3f, fov_y: Float, near: Float) -> Self {
        Self::new(position, target - position, fov_y, near)
    }

    pub fn has_valid_basis(&self) -> bool {
        let right = world_up().cross(&self.forward);
        (self.forward.norm() - 1.0).abs() < 1e-3 && right.norm_squared() > 1e-8 && self.near > 0.0
    }
}

/// Image plane placed `near` in front of the camera. Pixel (0, 0) sits at
/// the lower-left corner; `y` grows along the camera's up vector.
pub struct PinholeSensor {
    origin: Vector3f,
    frame: Frame,
    lower_left: Vector3f,
    width_per_pixel: Float,
    height_per_pixel: Float,
    width: usize,
    height: usize,
}

impl PinholeSensor {
    pub fn new(camera: &Camera, width: usize, height: usize) -> Self {
        let frame = Frame::look_along(&camera.forward, &world_up());

        let plane_height = 2.0 * camera.near * (0.5 * camera.fov_y).tan();
        let plane_width = plane_height * (width as Float) / (height.max(1) as Float);
        let width_per_pixel = plane_width / (width.max(1) as Float);
        let height_per_pixel = plane_height / (height.max(1) as Float);

        let lower_left = camera.position + camera.forward * camera.near
            - frame.x * (0.5 * plane_width)
            - frame.y * (0.5 * plane_height);

        Self {
            origin: camera.position,
            frame,
            lower_left,
            width_per_pixel,
            height_per_pixel,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Ray through cell (`sx`, `sy`) of an `n x n` sub-pixel grid of pixel
    /// (`px`, `py`), offset by `jitter` in [0, 1)^2 inside the cell. Starts on
    /// the image plane.
    pub fn sample_ray(&self, px: usize, py: usize, sx: u32, sy: u32, n: u32, jitter: Vector2f) -> Ray3f {
        let n = n.max(1) as Float;
        let rx = (px as Float + (sx as Float + jitter.x) / n) * self.width_per_pixel;
        let ry = (py as Float + (sy as Float + jitter.y) / n) * self.height_per_pixel;

        let start = self.lower_left + self.frame.x * rx + self.frame.y * ry;
        Ray3f::new(start, start - self.origin)
    }

    pub fn describe(&self) -> String {
        format!("PinholeSensor\n  origin: {:?}\n  size: {}x{}\n  pixel: {} x {}",
                self.origin.as_slice(), self.width, self.height, self.width_per_pixel, self.height_per_pixel)
    }
}
