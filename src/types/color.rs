/// 24-bit color stored in TGA's native channel order (blue, green, red).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { b, g, r }
    }

    pub const fn from_bgr_bytes(bytes: [u8; 3]) -> Self {
        Self {
            b: bytes[0],
            g: bytes[1],
            r: bytes[2],
        }
    }

    pub const fn to_bgr_bytes(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }

    /// Parses `r,g,b` with decimal channels, e.g. `255,128,0`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut it = s.trim().split(',').map(|c| c.trim().parse::<u8>());
        let r = it.next()?.ok()?;
        let g = it.next()?.ok()?;
        let b = it.next()?.ok()?;
        if it.next().is_some() {
            return None;
        }
        Some(Self::new(r, g, b))
    }
}
