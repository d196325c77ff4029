// Copyright @yucwang 2026

pub mod const_volume;
pub mod grid_volume;
pub mod helix_torus;
pub mod sierpinski;
pub mod voxelize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VolumeFilterMode {
    Nearest,
    Trilinear,
}
