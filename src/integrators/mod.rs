// Copyright @yucwang 2026

pub mod delta_tracking;
pub mod volume_path;
