// Copyright 2020 @TwoCookingMice

use super::constants::Vector3f;

use std::vec::Vec;

pub const BYTES_PER_PIXEL: usize = 4;

/// Frame buffer. `data` holds tightly packed B, G, R, A bytes, row `y` at
/// offset `y * width * 4`; row 0 is the bottom of the image. `radiance`
/// keeps the averaged linear value each pixel was encoded from.
#[derive(Debug, Clone)]
pub struct Bitmap {
    data: Vec<u8>,
    radiance: Vec<Vector3f>,
    height: usize,
    width: usize
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        let pixel_number = width * height;
        Self { data: vec!(0u8; pixel_number * BYTES_PER_PIXEL),
               radiance: vec!(Vector3f::zeros(); pixel_number),
               width: width,
               height: height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) out of bounds", x, y);
        x + self.width * y
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, bgra: [u8; 4], radiance: Vector3f) {
        let idx = self.offset(x, y);
        self.data[idx * BYTES_PER_PIXEL..(idx + 1) * BYTES_PER_PIXEL].copy_from_slice(&bgra);
        self.radiance[idx] = radiance;
    }

    pub fn bgra(&self, x: usize, y: usize) -> [u8; 4] {
        let idx = self.offset(x, y) * BYTES_PER_PIXEL;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2], self.data[idx + 3]]
    }

    pub fn radiance(&self, x: usize, y: usize) -> Vector3f {
        self.radiance[self.offset(x, y)]
    }

    pub fn raw_bytes(&self) -> &[u8] {
        &self.data
    }
}

/* Test for Bitmap */
