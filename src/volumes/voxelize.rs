// Copyright @yucwang 2026

use crate::math::aabb::AABB;
use crate::math::constants::Float;
use crate::shapes::triangle_mesh::TriangleMesh;
use crate::volumes::grid_volume::GridVolume;

use std::thread;

/// Rasterizes a closed mesh into an `res^3` occupancy grid over `bbox`:
/// cells whose center is inside the mesh get density 1. Z slices are split
/// across `threads` scoped workers.
pub fn voxelize_mesh(mesh: &TriangleMesh, res: usize, bbox: AABB, threads: usize) -> GridVolume {
    let mut grid = GridVolume::new(res, bbox);
    if res == 0 || mesh.is_empty() {
        return grid;
    }

    let slice_len = res * res;
    let mut data = vec![0.0 as Float; slice_len * res];
    let slices_per_worker = (res + threads.max(1) - 1) / threads.max(1);
    let grid_ref = &grid;

    thread::scope(|scope| {
        for (chunk_index, chunk) in data.chunks_mut(slice_len * slices_per_worker).enumerate() {
            scope.spawn(move || {
                let z_start = chunk_index * slices_per_worker;
                for (local_z, slice) in chunk.chunks_mut(slice_len).enumerate() {
                    let z = z_start + local_z;
                    for y in 0..res {
                        for x in 0..res {
                            if mesh.is_inside(&grid_ref.cell_center(x, y, z)) {
                                slice[y * res + x] = 1.0;
                            }
                        }
                    }
                }
            });
        }
    });

    match GridVolume::from_data(res, data, bbox) {
        Ok(filled) => grid = filled,
        Err(e) => log::error!("Voxelization produced an invalid grid: {}.", e),
    }
    log::info!("Voxelized {} triangles into {}^3 cells, occupancy {:.3}.",
               mesh.len(), res, grid.occupancy());
    grid
}
