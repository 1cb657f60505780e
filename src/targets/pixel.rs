use crate::types::Color;
use std::{error::Error, fmt};

pub const BYTES_PER_PIXEL: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelError {
    InvalidDimension { width: i32, height: i32 },
    OutOfBounds { x: i32, y: i32 },
}

impl fmt::Display for PixelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidDimension { width, height } => {
                write!(f, "invalid buffer dimension {width}x{height}")
            }
            Self::OutOfBounds { x, y } => write!(f, "pixel ({x}, {y}) out of bounds"),
        }
    }
}

impl Error for PixelError {}

/// Row-major BGR pixel storage, 3 bytes per pixel.
///
/// Rows are stored top to bottom in write order; renderers that treat the
/// origin as bottom-left call [`PixelBuffer::flip_vertically`] once before
/// encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: i32, height: i32) -> Result<Self, PixelError> {
        if width <= 0 || height <= 0 {
            return Err(PixelError::InvalidDimension { width, height });
        }
        let (w, h) = (width as usize, height as usize);
        Ok(Self {
            width: w,
            height: h,
            data: vec![0u8; w * h * BYTES_PER_PIXEL],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn clear(&mut self, color: Color) {
        let bgr = color.to_bgr_bytes();
        for px in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&bgr);
        }
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<(), PixelError> {
        let idx = self.offset(x, y)?;
        self.data[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&color.to_bgr_bytes());
        Ok(())
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Result<Color, PixelError> {
        let idx = self.offset(x, y)?;
        Ok(Color::from_bgr_bytes([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
        ]))
    }

    /// Swaps row `j` with row `height - 1 - j` for the top half of the image.
    ///
    /// Returns `false` without touching anything when there is no pixel data.
    pub fn flip_vertically(&mut self) -> bool {
        if self.data.is_empty() {
            return false;
        }
        let stride = self.width * BYTES_PER_PIXEL;
        let mut scratch = vec![0u8; stride];
        for j in 0..self.height / 2 {
            let top = j * stride;
            let bottom = (self.height - 1 - j) * stride;
            scratch.copy_from_slice(&self.data[top..top + stride]);
            self.data.copy_within(bottom..bottom + stride, top);
            self.data[bottom..bottom + stride].copy_from_slice(&scratch);
        }
        true
    }

    pub fn hash64(&self) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        fn mix(h: &mut u64, b: u8) {
            *h ^= b as u64;
            *h = h.wrapping_mul(0x100000001b3);
        }
        for b in (self.width as u64).to_le_bytes() {
            mix(&mut h, b);
        }
        for b in (self.height as u64).to_le_bytes() {
            mix(&mut h, b);
        }
        for &b in &self.data {
            mix(&mut h, b);
        }
        h
    }

    fn offset(&self, x: i32, y: i32) -> Result<usize, PixelError> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return Err(PixelError::OutOfBounds { x, y });
        }
        Ok((x as usize + y as usize * self.width) * BYTES_PER_PIXEL)
    }
}

#[cfg(test)]
mod tests {
    use super::{PixelBuffer, PixelError};
    use crate::types::Color;

    #[test]
    fn new_buffer_is_zeroed() {
        for (w, h) in [(1, 1), (3, 2), (17, 5), (64, 64)] {
            let buf = PixelBuffer::new(w, h).unwrap();
            assert_eq!(buf.as_bytes().len(), (w * h * 3) as usize);
            assert!(buf.as_bytes().iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert_eq!(
            PixelBuffer::new(0, 4),
            Err(PixelError::InvalidDimension { width: 0, height: 4 })
        );
        assert!(PixelBuffer::new(4, -1).is_err());
    }

    #[test]
    fn set_pixel_writes_bgr_at_row_major_offset() {
        let mut buf = PixelBuffer::new(4, 3).unwrap();
        buf.set_pixel(2, 1, Color::new(10, 20, 30)).unwrap();
        let idx = (2 + 4) * 3;
        assert_eq!(&buf.as_bytes()[idx..idx + 3], &[30, 20, 10]);
        assert_eq!(buf.get_pixel(2, 1), Ok(Color::new(10, 20, 30)));
    }

    #[test]
    fn out_of_bounds_leaves_buffer_unchanged() {
        let mut buf = PixelBuffer::new(2, 2).unwrap();
        let before = buf.clone();
        for (x, y) in [(-1, 0), (0, -1), (2, 0), (0, 2)] {
            assert_eq!(
                buf.set_pixel(x, y, Color::WHITE),
                Err(PixelError::OutOfBounds { x, y })
            );
            assert!(buf.get_pixel(x, y).is_err());
        }
        assert_eq!(buf, before);
    }

    #[test]
    fn flip_swaps_rows_and_twice_restores() {
        let mut buf = PixelBuffer::new(3, 3).unwrap();
        buf.set_pixel(0, 0, Color::RED).unwrap();
        buf.set_pixel(1, 1, Color::GREEN).unwrap();
        buf.set_pixel(2, 2, Color::BLUE).unwrap();
        let original = buf.clone();

        assert!(buf.flip_vertically());
        assert_eq!(buf.get_pixel(0, 2), Ok(Color::RED));
        assert_eq!(buf.get_pixel(1, 1), Ok(Color::GREEN));
        assert_eq!(buf.get_pixel(2, 0), Ok(Color::BLUE));
        assert_eq!(buf.get_pixel(0, 0), Ok(Color::BLACK));

        assert!(buf.flip_vertically());
        assert_eq!(buf, original);
    }

    #[test]
    fn flip_even_height() {
        let mut buf = PixelBuffer::new(2, 4).unwrap();
        for y in 0..4 {
            buf.set_pixel(0, y, Color::new(y as u8, 0, 0)).unwrap();
        }
        buf.flip_vertically();
        for y in 0..4 {
            assert_eq!(buf.get_pixel(0, y), Ok(Color::new((3 - y) as u8, 0, 0)));
        }
    }

    #[test]
    fn hash_tracks_content() {
        let mut buf = PixelBuffer::new(4, 3).unwrap();
        let empty = buf.hash64();
        buf.set_pixel(3, 2, Color::WHITE).unwrap();
        assert_ne!(buf.hash64(), empty);
        assert_eq!(buf.hash64(), buf.clone().hash64());
        buf.clear(Color::BLACK);
        assert_eq!(buf.hash64(), empty);
    }
}
