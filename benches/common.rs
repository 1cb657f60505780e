use wiretga::{mesh::Mesh, raster, renderer::RendererConfig, targets::PixelBuffer, types::Color};

use glam::Vec3;

pub const WIDTH: i32 = 800;
pub const HEIGHT: i32 = 800;

#[allow(dead_code)]
pub fn make_config() -> RendererConfig {
    RendererConfig::new(WIDTH, HEIGHT)
}

/// A grid of tetrahedra shrunk into clip space, so every edge lands on screen.
#[allow(dead_code)]
pub fn make_mesh() -> Mesh {
    let cell = Mesh::tetrahedron();
    let mut mesh = Mesh::new();

    let grid = 6;
    let spacing = 1.0 / grid as f32 * 1.8;
    for y in 0..grid {
        for x in 0..grid {
            let offset = Vec3::new(
                (x as f32 - (grid as f32 - 1.0) * 0.5) * spacing,
                (y as f32 - (grid as f32 - 1.0) * 0.5) * spacing,
                0.0,
            );
            let base = mesh.positions.len() as u32;
            mesh.positions
                .extend(cell.positions.iter().map(|&p| p * spacing * 0.8 + offset));
            for f in &cell.faces {
                mesh.push_face([base + f[0], base + f[1], base + f[2]]);
            }
        }
    }

    mesh
}

/// Sparse wireframe-like content: long black runs broken by short lines.
#[allow(dead_code)]
pub fn make_buffer() -> PixelBuffer {
    let mut buf = PixelBuffer::new(WIDTH, HEIGHT).unwrap();
    for i in 0..64 {
        let x = i * 12;
        raster::draw_line(x, 0, WIDTH - 1 - x, HEIGHT - 1, &mut buf, Color::WHITE);
        raster::draw_line(0, x, WIDTH - 1, x / 2, &mut buf, Color::new(200, 40, 40));
    }
    buf
}
