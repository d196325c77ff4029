// Copyright @yucwang 2021

use crate::core::context::RenderContext;
use crate::math::bitmap::Bitmap;

pub trait Renderer {
    fn render(&self, context: &RenderContext) -> Bitmap;
}
