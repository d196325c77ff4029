// Copyright @yucwang 2021

pub mod estimator;
pub mod renderer;
pub mod simple;
