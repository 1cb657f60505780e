#![forbid(unsafe_code)]

pub mod io;
pub mod mesh;
pub mod prelude;
pub mod raster;
pub mod renderer;
pub mod targets;
pub mod types;

pub use crate::{
    io::{load_obj, load_obj_str, write_tga, ObjError, TgaError},
    mesh::{Mesh, MeshError},
    raster::{draw_line, draw_triangle},
    renderer::{RenderError, Renderer, RendererConfig},
    targets::{PixelBuffer, PixelError},
    types::Color,
};
