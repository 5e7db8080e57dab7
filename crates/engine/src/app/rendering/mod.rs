mod canvas;
mod renderer;

pub use canvas::{Canvas, PixelBuffer};
pub(crate) use renderer::Renderer;
