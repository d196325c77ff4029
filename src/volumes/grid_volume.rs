// Copyright @yucwang 2026

use crate::core::volume::Volume;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};
use crate::volumes::VolumeFilterMode;

/// Dense `n^3` density grid stretched over `bbox`. Samples sit at cell
/// centers; lookups outside the grid clamp to the border cells.
pub struct GridVolume {
    data: Vec<Float>,
    res: usize,
    bbox: AABB,
    filter_mode: VolumeFilterMode,
}

impl GridVolume {
    pub fn new(res: usize, bbox: AABB) -> Self {
        Self {
            data: vec![0.0; res * res * res],
            res,
            bbox,
            filter_mode: VolumeFilterMode::Trilinear,
        }
    }

    pub fn from_data(res: usize, data: Vec<Float>, bbox: AABB) -> Result<Self, String> {
        let expected = res
            .checked_mul(res)
            .and_then(|v| v.checked_mul(res))
            .ok_or_else(|| "grid dimensions overflow".to_string())?;
        if data.len() != expected {
            return Err(format!("grid of resolution {} needs {} values, got {}", res, expected, data.len()));
        }
        Ok(Self {
            data,
            res,
            bbox,
            filter_mode: VolumeFilterMode::Trilinear,
        })
    }

    pub fn set_filter_mode(&mut self, filter_mode: VolumeFilterMode) {
        self.filter_mode = filter_mode;
    }

    pub fn resolution(&self) -> usize {
        self.res
    }

    pub fn bbox(&self) -> &AABB {
        &self.bbox
    }

    pub fn data(&self) -> &[Float] {
        &self.data
    }

    /// Fraction of cells with non-zero density.
    pub fn occupancy(&self) -> Float {
        if self.data.is_empty() {
            return 0.0;
        }
        let filled = self.data.iter().filter(|v| **v > 0.0).count();
        filled as Float / self.data.len() as Float
    }

    pub fn cell_center(&self, x: usize, y: usize, z: usize) -> Vector3f {
        let cell = self.bbox.diagnal() / (self.res as Float);
        self.bbox.p_min + Vector3f::new(
            (x as Float + 0.5) * cell.x,
            (y as Float + 0.5) * cell.y,
            (z as Float + 0.5) * cell.z,
        )
    }

    fn index(res: usize, x: usize, y: usize, z: usize) -> usize {
        (z * res + y) * res + x
    }

    pub fn fetch(&self, x: usize, y: usize, z: usize) -> Float {
        self.data[Self::index(self.res, x, y, z)]
    }

    pub fn set(&mut self, x: usize, y: usize, z: usize, value: Float) {
        let idx = Self::index(self.res, x, y, z);
        self.data[idx] = value;
    }

    fn clamp_index(&self, i: isize) -> usize {
        i.clamp(0, self.res as isize - 1) as usize
    }

    /// Continuous grid coordinate; integer values land on cell centers.
    fn grid_coord(&self, p_world: Vector3f) -> Vector3f {
        let rel = (p_world - self.bbox.p_min).component_div(&self.bbox.diagnal());
        rel * (self.res as Float) - Vector3f::new(0.5, 0.5, 0.5)
    }

    fn sample_nearest(&self, g: Vector3f) -> Float {
        let x0 = self.clamp_index((g.x + 0.5).floor() as isize);
        let y0 = self.clamp_index((g.y + 0.5).floor() as isize);
        let z0 = self.clamp_index((g.z + 0.5).floor() as isize);

        self.fetch(x0, y0, z0)
    }

    fn sample_trilinear(&self, g: Vector3f) -> Float {
        let x0 = g.x.floor() as isize;
        let y0 = g.y.floor() as isize;
        let z0 = g.z.floor() as isize;

        let tx = g.x - x0 as Float;
        let ty = g.y - y0 as Float;
        let tz = g.z - z0 as Float;

        let x0u = self.clamp_index(x0);
        let y0u = self.clamp_index(y0);
        let z0u = self.clamp_index(z0);
        let x1u = self.clamp_index(x0 + 1);
        let y1u = self.clamp_index(y0 + 1);
        let z1u = self.clamp_index(z0 + 1);

        let c000 = self.fetch(x0u, y0u, z0u);
        let c100 = self.fetch(x1u, y0u, z0u);
        let c010 = self.fetch(x0u, y1u, z0u);
        let c110 = self.fetch(x1u, y1u, z0u);
        let c001 = self.fetch(x0u, y0u, z1u);
        let c101 = self.fetch(x1u, y0u, z1u);
        let c011 = self.fetch(x0u, y1u, z1u);
        let c111 = self.fetch(x1u, y1u, z1u);

        let c00 = c000 * (1.0 - tx) + c100 * tx;
        let c10 = c010 * (1.0 - tx) + c110 * tx;
        let c01 = c001 * (1.0 - tx) + c101 * tx;
        let c11 = c011 * (1.0 - tx) + c111 * tx;

        let c0 = c00 * (1.0 - ty) + c10 * ty;
        let c1 = c01 * (1.0 - ty) + c11 * ty;

        c0 * (1.0 - tz) + c1 * tz
    }
}

impl Volume for GridVolume {
    fn eval(&self, p_world: Vector3f) -> Float {
        if self.data.is_empty() {
            return 0.0;
        }

        let diag = self.bbox.diagnal();
        if diag.x.abs() < 1e-8 || diag.y.abs() < 1e-8 || diag.z.abs() < 1e-8 {
            return 0.0;
        }

        let g = self.grid_coord(p_world);
        match self.filter_mode {
            VolumeFilterMode::Nearest => self.sample_nearest(g),
            VolumeFilterMode::Trilinear => self.sample_trilinear(g),
        }
    }

    fn describe(&self) -> String {
        format!("GridVolume({}^3, {:?}, occupancy {:.3})", self.res, self.filter_mode, self.occupancy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_x(res: usize) -> GridVolume {
        let mut grid = GridVolume::new(res, AABB::centered(Vector3f::new(1.0, 1.0, 1.0)));
        for z in 0..res {
            for y in 0..res {
                for x in 0..res {
                    grid.set(x, y, z, x as Float / (res - 1) as Float);
                }
            }
        }
        grid
    }

    #[test]
    fn test_cell_centers_reproduce_samples() {
        let grid = ramp_x(4);
        for x in 0..4 {
            let p = grid.cell_center(x, 1, 2);
            assert!((grid.eval(p) - grid.fetch(x, 1, 2)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_linear_between_centers() {
        let grid = ramp_x(4);
        let a = grid.cell_center(1, 0, 0);
        let b = grid.cell_center(2, 0, 0);
        let mid = 0.5 * a + 0.5 * b;
        assert!((grid.eval(mid) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_clamps_outside() {
        let grid = ramp_x(4);
        assert!((grid.eval(Vector3f::new(-3.0, 0.0, 0.0)) - 0.0).abs() < 1e-6);
        assert!((grid.eval(Vector3f::new(3.0, 0.0, 0.0)) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_nearest_filter() {
        let mut grid = ramp_x(4);
        grid.set_filter_mode(VolumeFilterMode::Nearest);
        let a = grid.cell_center(1, 0, 0);
        let b = grid.cell_center(2, 0, 0);
        let p = 0.8 * a + 0.2 * b;
        assert_eq!(grid.eval(p), grid.fetch(1, 0, 0));
    }

    #[test]
    fn test_from_data_checks_length() {
        let bbox = AABB::centered(Vector3f::new(1.0, 1.0, 1.0));
        assert!(GridVolume::from_data(2, vec![0.0; 7], bbox).is_err());
        let grid = GridVolume::from_data(2, vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], bbox)
            .expect("valid grid");
        assert_eq!(grid.resolution(), 2);
        assert!((grid.occupancy() - 0.125).abs() < 1e-6);
    }
}
