// Copyright @yucwang 2026

use crate::core::medium::Medium;
use crate::math::constants::{Float, Vector3f, PI};
use crate::sensors::pinhole::Camera;

pub const DEFAULT_ENTRY_BIAS: Float = 0.01;

/// Everything a frame needs, read-only for the whole render.
pub struct RenderContext {
    pub camera: Camera,
    pub medium: Medium,
    pub ambient: Vector3f,
    pub max_interactions: u32,
    pub width: usize,
    pub height: usize,
    /// Per-axis count; a pixel takes `samples_per_axis^2` samples.
    pub samples_per_axis: u32,
    /// Distance a ray is pushed past the volume entry point.
    pub entry_bias: Float,
}

impl RenderContext {
    pub fn new(camera: Camera, medium: Medium, width: usize, height: usize) -> Self {
        Self {
            camera,
            medium,
            ambient: Vector3f::new(1.0, 1.0, 1.0),
            max_interactions: 1024,
            width,
            height,
            samples_per_axis: 1,
            entry_bias: DEFAULT_ENTRY_BIAS,
        }
    }

    pub fn with_ambient(mut self, ambient: Vector3f) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_max_interactions(mut self, max_interactions: u32) -> Self {
        self.max_interactions = max_interactions;
        self
    }

    pub fn with_samples_per_axis(mut self, samples_per_axis: u32) -> Self {
        self.samples_per_axis = samples_per_axis;
        self
    }

    pub fn with_entry_bias(mut self, entry_bias: Float) -> Self {
        self.entry_bias = entry_bias;
        self
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_axis * self.samples_per_axis
    }

    /// Checks the preconditions under which every per-pixel computation is
    /// defined.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.medium.max_extinction() > 0.0) {
            return Err(format!("max extinction must be positive, got {}", self.medium.max_extinction()));
        }
        if self.samples_per_axis == 0 {
            return Err("samples per axis must be at least 1".to_string());
        }
        if self.width == 0 || self.height == 0 {
            return Err(format!("image size must be positive, got {}x{}", self.width, self.height));
        }
        if !(self.camera.fov_y > 0.0 && self.camera.fov_y < PI) {
            return Err(format!("field of view must lie in (0, pi) radians, got {}", self.camera.fov_y));
        }
        if self.ambient.iter().any(|c| !(*c >= 0.0)) {
            return Err(format!("ambient radiance must not be negative, got {:?}", self.ambient));
        }
        if !self.camera.has_valid_basis() {
            return Err("camera direction is degenerate or parallel to world up".to_string());
        }
        if self.entry_bias < 0.0 {
            return Err(format!("entry bias must not be negative, got {}", self.entry_bias));
        }
        Ok(())
    }
}
