use crate::{io::rle, targets::PixelBuffer};
use std::{
    error::Error,
    fmt,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

pub const HEADER_LEN: usize = 18;
pub const FOOTER: [u8; 18] = *b"TRUEVISION-XFILE.\0";

pub const TYPE_UNCOMPRESSED_RGB: u8 = 2;
pub const TYPE_RLE_RGB: u8 = 10;
const DESCRIPTOR_TOP_LEFT: u8 = 0x20;

#[derive(Debug)]
pub enum TgaError {
    Io(io::Error),
    DimensionTooLarge { width: usize, height: usize },
}

impl fmt::Display for TgaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::DimensionTooLarge { width, height } => {
                write!(f, "image {width}x{height} does not fit a tga header")
            }
        }
    }
}

impl Error for TgaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::DimensionTooLarge { .. } => None,
        }
    }
}

impl From<io::Error> for TgaError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TgaHeader {
    pub id_length: u8,
    pub color_map_type: u8,
    pub data_type_code: u8,
    pub color_map_origin: i16,
    pub color_map_length: i16,
    pub color_map_depth: u8,
    pub x_origin: i16,
    pub y_origin: i16,
    pub width: i16,
    pub height: i16,
    pub bits_per_pixel: u8,
    pub image_descriptor: u8,
}

impl TgaHeader {
    pub fn for_buffer(buf: &PixelBuffer, rle: bool) -> Result<Self, TgaError> {
        let too_large = || TgaError::DimensionTooLarge {
            width: buf.width(),
            height: buf.height(),
        };
        let width = i16::try_from(buf.width()).map_err(|_| too_large())?;
        let height = i16::try_from(buf.height()).map_err(|_| too_large())?;
        Ok(Self {
            data_type_code: if rle {
                TYPE_RLE_RGB
            } else {
                TYPE_UNCOMPRESSED_RGB
            },
            width,
            height,
            bits_per_pixel: 24,
            image_descriptor: DESCRIPTOR_TOP_LEFT,
            ..Self::default()
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0] = self.id_length;
        out[1] = self.color_map_type;
        out[2] = self.data_type_code;
        out[3..5].copy_from_slice(&self.color_map_origin.to_le_bytes());
        out[5..7].copy_from_slice(&self.color_map_length.to_le_bytes());
        out[7] = self.color_map_depth;
        out[8..10].copy_from_slice(&self.x_origin.to_le_bytes());
        out[10..12].copy_from_slice(&self.y_origin.to_le_bytes());
        out[12..14].copy_from_slice(&self.width.to_le_bytes());
        out[14..16].copy_from_slice(&self.height.to_le_bytes());
        out[16] = self.bits_per_pixel;
        out[17] = self.image_descriptor;
        out
    }
}

/// Writes a complete TGA stream: header, payload, area references and footer.
pub fn encode_tga<W: Write>(buf: &PixelBuffer, out: &mut W, rle: bool) -> Result<(), TgaError> {
    let header = TgaHeader::for_buffer(buf, rle)?;
    out.write_all(&header.to_bytes())?;
    if rle {
        rle::encode(buf, out)?;
    } else {
        out.write_all(buf.as_bytes())?;
    }
    // developer area ref, extension area ref
    out.write_all(&[0u8; 8])?;
    out.write_all(&FOOTER)?;
    Ok(())
}

/// Creates (or truncates) `path` and writes `buf` into it.
///
/// A failure part way through leaves a truncated file behind.
pub fn write_tga(buf: &PixelBuffer, path: impl AsRef<Path>, rle: bool) -> Result<(), TgaError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    encode_tga(buf, &mut out, rle)?;
    out.flush()?;
    log::debug!(
        "wrote {}x{} tga ({}) to {}",
        buf.width(),
        buf.height(),
        if rle { "rle" } else { "raw" },
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{encode_tga, write_tga, TgaError, TgaHeader, FOOTER, HEADER_LEN};
    use crate::{targets::PixelBuffer, types::Color};
    use std::io::{self, Write};

    fn sample() -> PixelBuffer {
        let mut buf = PixelBuffer::new(5, 3).unwrap();
        buf.set_pixel(1, 1, Color::WHITE).unwrap();
        buf.set_pixel(4, 2, Color::new(1, 2, 3)).unwrap();
        buf
    }

    #[test]
    fn header_layout_is_little_endian() {
        let buf = PixelBuffer::new(800, 300).unwrap();
        let bytes = TgaHeader::for_buffer(&buf, true).unwrap().to_bytes();
        assert_eq!(
            bytes,
            [0, 0, 10, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x20, 0x03, 0x2c, 0x01, 24, 0x20]
        );
    }

    #[test]
    fn raw_file_layout() {
        let buf = sample();
        let mut out = Vec::new();
        encode_tga(&buf, &mut out, false).unwrap();
        assert_eq!(out.len(), HEADER_LEN + 5 * 3 * 3 + 8 + FOOTER.len());
        assert_eq!(out[2], 2);
        assert_eq!(&out[HEADER_LEN..HEADER_LEN + 45], buf.as_bytes());
        let tail = &out[out.len() - 26..];
        assert_eq!(&tail[..8], &[0u8; 8]);
        assert_eq!(&tail[8..], b"TRUEVISION-XFILE.\0");
    }

    #[test]
    fn raw_and_rle_share_dimensions_and_footer() {
        let buf = sample();
        let mut raw = Vec::new();
        let mut rle = Vec::new();
        encode_tga(&buf, &mut raw, false).unwrap();
        encode_tga(&buf, &mut rle, true).unwrap();

        assert_eq!(raw[2], 2);
        assert_eq!(rle[2], 10);
        assert_eq!(&raw[12..17], &rle[12..17]);
        assert_eq!(raw[16], 24);
        assert_eq!(&raw[raw.len() - 26..], &rle[rle.len() - 26..]);
        assert_ne!(raw.len(), rle.len());
    }

    #[test]
    fn oversized_buffer_is_rejected() {
        let buf = PixelBuffer::new(40_000, 1).unwrap();
        let mut out = Vec::new();
        assert!(matches!(
            encode_tga(&buf, &mut out, false),
            Err(TgaError::DimensionTooLarge { width: 40_000, height: 1 })
        ));
        assert!(out.is_empty());
    }

    struct FailAfter(usize);

    impl Write for FailAfter {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            if self.0 == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            let n = data.len().min(self.0);
            self.0 -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_surfaces_as_io_error() {
        let buf = sample();
        for budget in [0, 10, HEADER_LEN + 4] {
            let res = encode_tga(&buf, &mut FailAfter(budget), true);
            assert!(matches!(res, Err(TgaError::Io(_))));
        }
    }

    #[test]
    fn write_tga_roundtrips_through_disk() {
        let buf = sample();
        let path = std::env::temp_dir().join(format!("wiretga-{}-raw.tga", std::process::id()));
        write_tga(&buf, &path, true).unwrap();
        let on_disk = std::fs::read(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let mut expected = Vec::new();
        encode_tga(&buf, &mut expected, true).unwrap();
        assert_eq!(on_disk, expected);
    }

    #[test]
    fn write_tga_reports_create_failure() {
        let buf = sample();
        let path = std::env::temp_dir()
            .join("wiretga-missing-dir")
            .join("nested")
            .join("out.tga");
        assert!(matches!(write_tga(&buf, &path, false), Err(TgaError::Io(_))));
    }
}
