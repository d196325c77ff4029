// Copyright @yucwang 2026

use crate::core::context::RenderContext;
use crate::core::integrator::Integrator;
use crate::core::rng::LcgRng;
use crate::integrators::delta_tracking::sample_interaction;
use crate::math::constants::{Float, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::warp::square_to_uniform_sphere;

/// Paths lighter than this play Russian roulette.
pub const ROULETTE_THRESHOLD: Float = 0.2;

/// Transient state of one sampled path.
#[derive(Debug, Copy, Clone)]
pub struct PathState {
    pub position: Vector3f,
    pub direction: Vector3f,
    pub weight: Float,
    pub interactions: u32,
}

impl PathState {
    pub fn new(position: Vector3f, direction: Vector3f) -> Self {
        Self {
            position,
            direction,
            weight: 1.0,
            interactions: 0,
        }
    }

    /// Applies absorption at a collision, then roulette when the weight
    /// drops below the threshold. Survivors are raised back to the
    /// threshold. Returns false if the path is terminated.
    pub fn absorb(&mut self, albedo: Float, rng: &mut LcgRng) -> bool {
        self.weight *= albedo;
        if self.weight < ROULETTE_THRESHOLD {
            if rng.next_f32() > self.weight / ROULETTE_THRESHOLD {
                return false;
            }
            self.weight = ROULETTE_THRESHOLD;
        }
        true
    }
}

/// Analog volumetric path tracer: the medium is lit only by the ambient
/// environment, reached when a path escapes the volume.
#[derive(Default)]
pub struct VolumePathIntegrator;

impl VolumePathIntegrator {
    pub fn new() -> Self {
        Self
    }
}

impl Integrator for VolumePathIntegrator {
    fn trace_sample(&self, context: &RenderContext, ray: &Ray3f, rng: &mut LcgRng) -> Vector3f {
        let medium = &context.medium;

        let t_min = match medium.intersect(&ray.origin(), &ray.dir()) {
            Some(t) => t,
            None => return context.ambient,
        };

        let mut path = PathState::new(ray.at(t_min + context.entry_bias), ray.dir());

        while let Some(p) = sample_interaction(medium, &path.position, &path.direction, rng) {
            path.position = p;
            path.interactions += 1;
            if path.interactions > context.max_interactions {
                return Vector3f::zeros();
            }

            if !path.absorb(medium.albedo(), rng) {
                return Vector3f::zeros();
            }

            path.direction = square_to_uniform_sphere(&rng.next_2d());
        }

        if path.interactions == 0 {
            path.weight = 1.0;
        }

        context.ambient * path.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::medium::Medium;
    use crate::math::aabb::AABB;
    use crate::sensors::pinhole::Camera;
    use crate::volumes::const_volume::ConstantVolume;
    use crate::volumes::sierpinski::SierpinskiVolume;

    fn context(density: Float, max_extinction: Float, albedo: Float) -> RenderContext {
        let medium = Medium::new(Vector3f::new(1.0, 1.0, 1.0), albedo, max_extinction,
                                 Box::new(ConstantVolume::new_scalar(density)));
        let camera = Camera::looking_at(Vector3f::new(0.0, 0.0, -2.0), Vector3f::zeros(), 1.0, 0.01);
        RenderContext::new(camera, medium, 1, 1).with_ambient(Vector3f::new(2.0, 3.0, 4.0))
    }

    #[test]
    fn test_miss_returns_ambient() {
        let context = context(1.0, 100.0, 0.5);
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, -2.0), Vector3f::new(0.0, 0.0, -1.0));
        let mut rng = LcgRng::new(0);
        assert_eq!(VolumePathIntegrator::new().trace_sample(&context, &ray, &mut rng), context.ambient);
    }

    #[test]
    fn test_empty_medium_is_transparent() {
        let context = context(0.0, 100.0, 0.5);
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, -2.0), Vector3f::new(0.0, 0.0, 1.0));
        let mut rng = LcgRng::new(0);
        for _ in 0..32 {
            assert_eq!(VolumePathIntegrator::new().trace_sample(&context, &ray, &mut rng), context.ambient);
        }
    }

    #[test]
    fn test_zero_max_interactions_returns_black() {
        let context = context(1.0, 1000.0, 1.0).with_max_interactions(0);
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, -2.0), Vector3f::new(0.0, 0.0, 1.0));
        let mut rng = LcgRng::new(9);
        for _ in 0..32 {
            assert_eq!(VolumePathIntegrator::new().trace_sample(&context, &ray, &mut rng), Vector3f::zeros());
        }
    }

    #[test]
    fn test_black_absorber() {
        let context = context(1.0, 1000.0, 0.0);
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, -2.0), Vector3f::new(0.0, 0.0, 1.0));
        let mut rng = LcgRng::new(11);
        for _ in 0..32 {
            assert_eq!(VolumePathIntegrator::new().trace_sample(&context, &ray, &mut rng), Vector3f::zeros());
        }
    }

    #[test]
    fn test_white_medium_conserves_energy() {
        // Without absorption every path eventually leaves with full weight.
        let context = context(1.0, 5.0, 1.0);
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, -2.0), Vector3f::new(0.0, 0.0, 1.0));
        let mut rng = LcgRng::new(13);
        for _ in 0..64 {
            assert_eq!(VolumePathIntegrator::new().trace_sample(&context, &ray, &mut rng), context.ambient);
        }
    }

    #[test]
    fn test_radiance_is_bounded_by_ambient() {
        let bbox = AABB::centered(Vector3f::new(1.0, 1.0, 1.0));
        let medium = Medium::new(Vector3f::new(1.0, 1.0, 1.0), 0.8, 200.0,
                                 Box::new(SierpinskiVolume::new(bbox)));
        let camera = Camera::looking_at(Vector3f::new(0.0, 0.1, -1.2), Vector3f::zeros(), 1.0, 0.01);
        let context = RenderContext::new(camera, medium, 1, 1).with_ambient(Vector3f::new(4.0, 4.0, 4.0));
        let integrator = VolumePathIntegrator::new();
        let mut rng = LcgRng::new(17);
        for i in 0..64 {
            let d = Vector3f::new(0.01 * i as Float - 0.3, 0.05, 1.0);
            let ray = Ray3f::new(Vector3f::new(0.0, 0.1, -1.2), d);
            let l = integrator.trace_sample(&context, &ray, &mut rng);
            for c in 0..3 {
                assert!(l[c] >= 0.0 && l[c] <= 4.0);
            }
        }
    }

    #[test]
    fn test_weight_stays_within_bounds() {
        let mut rng = LcgRng::new(21);
        for albedo in [0.05, 0.3, 0.8, 0.95, 1.0].iter() {
            for _ in 0..200 {
                let mut path = PathState::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0));
                for _ in 0..50 {
                    let before = path.weight;
                    if !path.absorb(*albedo, &mut rng) {
                        break;
                    }
                    assert!(path.weight <= 1.0);
                    assert!(path.weight >= ROULETTE_THRESHOLD);
                    assert!(path.weight <= before || path.weight == ROULETTE_THRESHOLD);
                }
            }
        }
    }

    #[test]
    fn test_roulette_survival_rate() {
        // weight 0.8 * 0.1 = 0.08 survives with probability 0.4.
        let mut rng = LcgRng::new(23);
        let trials = 20000;
        let mut survived = 0;
        for _ in 0..trials {
            let mut path = PathState::new(Vector3f::zeros(), Vector3f::zeros());
            path.weight = 0.8;
            if path.absorb(0.1, &mut rng) {
                survived += 1;
            }
        }
        let rate = survived as Float / trials as Float;
        assert!((rate - 0.4).abs() < 0.02, "survival rate {}", rate);
    }
}
