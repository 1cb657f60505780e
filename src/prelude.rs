pub use crate::{
    draw_line, draw_triangle, Color, Mesh, PixelBuffer, RenderError, Renderer, RendererConfig,
};

pub use glam::{IVec2, Vec3};
