// Copyright @yucwang 2023

pub mod bmp_utils;
pub mod exr_utils;
pub mod image_utils;
pub mod obj_utils;
