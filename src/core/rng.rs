// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f};

/// Small random stream. Each worker owns its own; never shared between threads.
pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        Self { state: splitmix64(seed) }
    }

    /// Stream for one pixel of a render seeded with `seed`. All bits of the
    /// seed and both coordinates feed the key.
    pub fn for_pixel(seed: u64, x: usize, y: usize) -> Self {
        let key = splitmix64(splitmix64(seed) ^ x as u64);
        let key = splitmix64(key ^ y as u64);
        Self::new(key)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.state >> 32) as u32
    }

    /// Uniform in [0, 1).
    pub fn next_f32(&mut self) -> Float {
        ((self.next_u32() >> 8) as Float) * (1.0 / 16777216.0)
    }

    pub fn next_2d(&mut self) -> Vector2f {
        let u = self.next_f32();
        let v = self.next_f32();
        Vector2f::new(u, v)
    }
}

fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = LcgRng::new(42);
        let mut b = LcgRng::new(42);
        for _ in 0..64 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_unit_interval() {
        let mut rng = LcgRng::new(7);
        let mut sum = 0.0f64;
        let n = 20000;
        for _ in 0..n {
            let u = rng.next_f32();
            assert!(u >= 0.0 && u < 1.0);
            sum += u as f64;
        }
        let mean = sum / n as f64;
        assert!((mean - 0.5).abs() < 0.02, "mean {}", mean);
    }

    #[test]
    fn test_neighbouring_pixels_differ() {
        let mut a = LcgRng::for_pixel(0, 10, 10);
        let mut b = LcgRng::for_pixel(0, 11, 10);
        let sa: Vec<u32> = (0..4).map(|_| a.next_u32()).collect();
        let sb: Vec<u32> = (0..4).map(|_| b.next_u32()).collect();
        assert_ne!(sa, sb);
    }

    fn first_draws(mut rng: LcgRng) -> Vec<u32> {
        (0..4).map(|_| rng.next_u32()).collect()
    }

    #[test]
    fn test_far_apart_pixels_differ() {
        assert_ne!(first_draws(LcgRng::for_pixel(0, 3, 5)), first_draws(LcgRng::for_pixel(0, 3 + 65536, 5)));
        assert_ne!(first_draws(LcgRng::for_pixel(0, 3, 5)), first_draws(LcgRng::for_pixel(0, 3, 5 + 65536)));
        assert_ne!(first_draws(LcgRng::for_pixel(0, 3, 5)), first_draws(LcgRng::for_pixel(0, 5, 3)));
    }

    #[test]
    fn test_high_seed_bits_matter() {
        assert_ne!(first_draws(LcgRng::for_pixel(1, 7, 7)), first_draws(LcgRng::for_pixel(1 | (1 << 40), 7, 7)));
        assert_eq!(first_draws(LcgRng::for_pixel(1 << 40, 7, 7)), first_draws(LcgRng::for_pixel(1 << 40, 7, 7)));
    }
}
