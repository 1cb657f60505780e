use crate::{targets::PixelBuffer, types::Color};
use glam::IVec2;

/// Draws the segment `(x0, y0)-(x1, y1)` inclusive of both endpoints.
///
/// Integer Bresenham: one pixel per unit step along the dominant axis, so
/// steep segments have no gaps. Pixels outside `buf` are clipped silently.
/// Distances and the error term are carried in `i64`, and the walk only
/// visits dominant-axis positions that fall inside the buffer.
pub fn draw_line(x0: i32, y0: i32, x1: i32, y1: i32, buf: &mut PixelBuffer, color: Color) {
    let (mut x0, mut y0, mut x1, mut y1) = (
        i64::from(x0),
        i64::from(y0),
        i64::from(x1),
        i64::from(y1),
    );
    let steep = (x0 - x1).abs() < (y0 - y1).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let derr = (y1 - y0).abs() * 2;
    let ystep = if y1 > y0 { 1 } else { -1 };

    let extent = (if steep { buf.height() } else { buf.width() }) as i64;
    let first = x0.max(0);
    let last = x1.min(extent - 1);
    if first > last {
        log::trace!("line ({x0}, {y0})-({x1}, {y1}) entirely clipped");
        return;
    }

    let (mut y, mut err) = advance(y0, ystep, dx, derr, first - x0);
    let mut clipped = (first - x0) + (x1 - last);

    for x in first..=last {
        let written = match (i32::try_from(x), i32::try_from(y)) {
            (Ok(x), Ok(y)) if steep => buf.set_pixel(y, x, color).is_ok(),
            (Ok(x), Ok(y)) => buf.set_pixel(x, y, color).is_ok(),
            _ => false,
        };
        if !written {
            clipped += 1;
        }
        err += derr;
        if err > dx {
            y += ystep;
            err -= dx * 2;
        }
    }

    if clipped > 0 {
        log::trace!("line ({x0}, {y0})-({x1}, {y1}): {clipped} pixels clipped");
    }
}

/// Secondary coordinate and error term after `steps` iterations of the walk.
///
/// Each iteration adds `derr <= 2 * dx`, so the secondary axis moves at most
/// once per step and the move count is `ceil((steps * derr - dx) / (2 * dx))`.
fn advance(y0: i64, ystep: i64, dx: i64, derr: i64, steps: i64) -> (i64, i64) {
    if steps == 0 || dx == 0 {
        return (y0, 0);
    }
    let total = i128::from(steps) * i128::from(derr);
    let two_dx = i128::from(dx) * 2;
    let moves = (total + i128::from(dx) - 1) / two_dx;
    let err = total - moves * two_dx;
    (y0 + ystep * moves as i64, err as i64)
}

/// Outlines a triangle by drawing `a-b`, `b-c` and `c-a`.
pub fn draw_triangle(a: IVec2, b: IVec2, c: IVec2, buf: &mut PixelBuffer, color: Color) {
    for (p, q) in [(a, b), (b, c), (c, a)] {
        draw_line(p.x, p.y, q.x, q.y, buf, color);
    }
}
