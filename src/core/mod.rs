// Copyright @yucwang 2021

pub mod context;
pub mod integrator;
pub mod medium;
pub mod rng;
pub mod scene_loader;
pub mod volume;
