// Copyright @yucwang 2026

use crate::core::context::RenderContext;
use crate::core::integrator::Integrator;
use crate::core::rng::LcgRng;
use crate::math::constants::{Float, Vector3f};
use crate::sensors::pinhole::PinholeSensor;

pub const GAMMA: Float = 2.2;

/// Averaged radiance of a pixel and its display encoding.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PixelSample {
    pub radiance: Vector3f,
    pub bgra: [u8; 4],
}

/// Soft highlight compression.
pub fn tone_map(c: Float) -> Float {
    c * (1.0 + c * 0.1) / (1.0 + c)
}

/// Tone map, gamma encode and quantize one channel.
pub fn encode_channel(c: Float) -> u8 {
    let v = tone_map(c).max(0.0).powf(1.0 / GAMMA).clamp(0.0, 1.0);
    (255.0 * v) as u8
}

pub fn encode_bgra(radiance: &Vector3f) -> [u8; 4] {
    [
        encode_channel(radiance.z),
        encode_channel(radiance.y),
        encode_channel(radiance.x),
        255,
    ]
}

/// Monte Carlo estimate of one pixel over a jittered `n x n` grid of
/// sub-pixel rays.
pub struct PixelEstimator<'a> {
    context: &'a RenderContext,
    integrator: &'a dyn Integrator,
    sensor: PinholeSensor,
}

impl<'a> PixelEstimator<'a> {
    pub fn new(context: &'a RenderContext, integrator: &'a dyn Integrator) -> Self {
        Self {
            context,
            integrator,
            sensor: PinholeSensor::new(&context.camera, context.width, context.height),
        }
    }

    pub fn sensor(&self) -> &PinholeSensor {
        &self.sensor
    }

    pub fn shade_pixel(&self, px: usize, py: usize, rng: &mut LcgRng) -> PixelSample {
        let n = self.context.samples_per_axis.max(1);

        let mut accum = Vector3f::zeros();
        for sx in 0..n {
            for sy in 0..n {
                let ray = self.sensor.sample_ray(px, py, sx, sy, n, rng.next_2d());
                accum += self.integrator.trace_sample(self.context, &ray, rng);
            }
        }

        let radiance = accum * (1.0 / (n * n) as Float);
        PixelSample {
            radiance,
            bgra: encode_bgra(&radiance),
        }
    }
}
