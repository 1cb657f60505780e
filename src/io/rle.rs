//! TGA run-length packetization of a [`PixelBuffer`].
//!
//! The pixel stream is split, in scan order, into packets of at most
//! [`MAX_PACKET_PIXELS`] pixels. A raw packet is a header byte `n - 1`
//! followed by `n` BGR triples; a run packet is a header byte `n + 127`
//! (high bit set) followed by the single repeated triple.

use crate::{
    targets::{pixel::BYTES_PER_PIXEL, PixelBuffer},
    types::Color,
};
use std::io::{self, Write};

pub const MAX_PACKET_PIXELS: usize = 128;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Packet<'a> {
    /// `pixels` holds `pixel_count() * 3` BGR bytes, copied verbatim.
    Raw { pixels: &'a [u8] },
    Run { pixel: Color, len: usize },
}

impl Packet<'_> {
    pub fn pixel_count(&self) -> usize {
        match *self {
            Packet::Raw { pixels } => pixels.len() / BYTES_PER_PIXEL,
            Packet::Run { len, .. } => len,
        }
    }

    pub fn is_run(&self) -> bool {
        matches!(self, Packet::Run { .. })
    }

    pub fn header_byte(&self) -> u8 {
        match *self {
            Packet::Raw { .. } => (self.pixel_count() - 1) as u8,
            Packet::Run { len, .. } => (len + 127) as u8,
        }
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&[self.header_byte()])?;
        match *self {
            Packet::Raw { pixels } => out.write_all(pixels),
            Packet::Run { pixel, .. } => out.write_all(&pixel.to_bgr_bytes()),
        }
    }
}

/// Iterator over the RLE packets covering a pixel buffer.
#[derive(Clone, Debug)]
pub struct Packets<'a> {
    data: &'a [u8],
    pos: usize,
    npixels: usize,
}

pub fn packets(buf: &PixelBuffer) -> Packets<'_> {
    Packets {
        data: buf.as_bytes(),
        pos: 0,
        npixels: buf.pixel_count(),
    }
}

impl<'a> Packets<'a> {
    fn pixel(&self, i: usize) -> &'a [u8] {
        &self.data[i * BYTES_PER_PIXEL..(i + 1) * BYTES_PER_PIXEL]
    }
}

impl<'a> Iterator for Packets<'a> {
    type Item = Packet<'a>;

    fn next(&mut self) -> Option<Packet<'a>> {
        if self.pos >= self.npixels {
            return None;
        }
        let start = self.pos;
        let mut run_length = 1usize;
        let mut raw = true;

        while start + run_length < self.npixels && run_length < MAX_PACKET_PIXELS {
            let cur = start + run_length - 1;
            let succ_eq = self.pixel(cur) == self.pixel(cur + 1);
            if run_length == 1 {
                raw = !succ_eq;
            }
            // A raw run that hits a repeat gives its last pixel to the
            // following run packet.
            if raw && succ_eq {
                run_length -= 1;
                break;
            }
            if !raw && !succ_eq {
                break;
            }
            run_length += 1;
        }

        self.pos += run_length;
        let first = start * BYTES_PER_PIXEL;
        if raw {
            Some(Packet::Raw {
                pixels: &self.data[first..first + run_length * BYTES_PER_PIXEL],
            })
        } else {
            let p = self.pixel(start);
            Some(Packet::Run {
                pixel: Color::from_bgr_bytes([p[0], p[1], p[2]]),
                len: run_length,
            })
        }
    }
}

/// Streams every packet of `buf` into `out`, stopping at the first write error.
pub fn encode<W: Write>(buf: &PixelBuffer, out: &mut W) -> io::Result<()> {
    let mut raw_packets = 0usize;
    let mut run_packets = 0usize;
    for packet in packets(buf) {
        packet.write_to(out)?;
        if packet.is_run() {
            run_packets += 1;
        } else {
            raw_packets += 1;
        }
    }
    log::trace!(
        "rle: {} pixels -> {raw_packets} raw + {run_packets} run packets",
        buf.pixel_count()
    );
    Ok(())
}
