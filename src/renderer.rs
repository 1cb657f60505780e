use crate::{
    io::tga::{write_tga, TgaError},
    mesh::MeshError,
    raster,
    targets::{PixelBuffer, PixelError},
    types::Color,
    Mesh,
};
use glam::{IVec2, Vec3};
use std::{error::Error, fmt, path::Path, time::Instant};

#[derive(Debug)]
pub enum RenderError {
    Pixel(PixelError),
    Mesh(MeshError),
    Tga(TgaError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixel(err) => write!(f, "pixel buffer: {err}"),
            Self::Mesh(err) => write!(f, "invalid mesh: {err}"),
            Self::Tga(err) => write!(f, "tga: {err}"),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Pixel(err) => Some(err),
            Self::Mesh(err) => Some(err),
            Self::Tga(err) => Some(err),
        }
    }
}

impl From<PixelError> for RenderError {
    fn from(err: PixelError) -> Self {
        Self::Pixel(err)
    }
}

impl From<MeshError> for RenderError {
    fn from(err: MeshError) -> Self {
        Self::Mesh(err)
    }
}

impl From<TgaError> for RenderError {
    fn from(err: TgaError) -> Self {
        Self::Tga(err)
    }
}

#[derive(Clone, Debug)]
pub struct RendererConfig {
    width: i32,
    height: i32,
    color: Color,
    rle: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            color: Color::WHITE,
            rle: true,
        }
    }
}

impl RendererConfig {
    pub fn new(width: i32, height: i32) -> Self {
        Self::default().with_size(width, height)
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_rle(mut self, rle: bool) -> Self {
        self.rle = rle;
        self
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn rle(&self) -> bool {
        self.rle
    }
}

/// Orthographic wireframe renderer: x and y in `[-1, 1]` span the image, z is dropped.
#[derive(Clone, Debug)]
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn project(&self, v: Vec3) -> IVec2 {
        let x = (v.x + 1.0) * self.config.width as f32 / 2.0;
        let y = (v.y + 1.0) * self.config.height as f32 / 2.0;
        IVec2::new(x as i32, y as i32)
    }

    /// Draws every face edge of `mesh` and returns the image flipped so that
    /// +y points up.
    pub fn render(&self, mesh: &Mesh) -> Result<PixelBuffer, RenderError> {
        mesh.validate()?;
        let mut buf = PixelBuffer::new(self.config.width, self.config.height)?;
        let screen: Vec<IVec2> = mesh.positions.iter().map(|&p| self.project(p)).collect();

        for face in &mesh.faces {
            for j in 0..3 {
                let a = screen[face[j] as usize];
                let b = screen[face[(j + 1) % 3] as usize];
                raster::draw_line(a.x, a.y, b.x, b.y, &mut buf, self.config.color);
            }
        }

        let flipped = buf.flip_vertically();
        debug_assert!(flipped, "freshly allocated buffer has pixel data");
        log::debug!(
            "rendered {} faces into {}x{}",
            mesh.face_count(),
            buf.width(),
            buf.height()
        );
        Ok(buf)
    }

    pub fn render_to_file(&self, mesh: &Mesh, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let start = Instant::now();
        let buf = self.render(mesh)?;
        let rendered = start.elapsed();
        write_tga(&buf, path, self.config.rle)?;
        log::info!(
            "render: {:?}, write: {:?}",
            rendered,
            start.elapsed() - rendered
        );
        Ok(())
    }
}
