// Copyright @yucwang 2026

use crate::core::context::RenderContext;
use crate::core::rng::LcgRng;
use crate::math::constants::Vector3f;
use crate::math::ray::Ray3f;

pub trait Integrator: Sync {
    /// Radiance carried back along one camera ray.
    fn trace_sample(&self, context: &RenderContext, ray: &Ray3f, rng: &mut LcgRng) -> Vector3f;
}
