// src/view/color.rs
//
// Hex branding constants → RGB, resolved at compile time.

use crate::config::consts::{
    BACKGROUND_COLOR, MUTED_COLOR, PALETTE, PRIMARY_COLOR, SECONDARY_BACKGROUND_COLOR, TEXT_COLOR,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#RRGGBB`. Only used on constants, so a bad literal fails the build.
    pub const fn hex(s: &str) -> Self {
        let b = s.as_bytes();
        assert!(b.len() == 7 && b[0] == b'#', "colour must look like #RRGGBB");
        Self {
            r: byte(b[1], b[2]),
            g: byte(b[3], b[4]),
            b: byte(b[5], b[6]),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

const fn nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("invalid hex digit"),
    }
}

const fn byte(hi: u8, lo: u8) -> u8 {
    nibble(hi) * 16 + nibble(lo)
}

pub const PRIMARY: Rgb = Rgb::hex(PRIMARY_COLOR);
pub const TEXT: Rgb = Rgb::hex(TEXT_COLOR);
pub const BACKGROUND: Rgb = Rgb::hex(BACKGROUND_COLOR);
pub const SECONDARY_BACKGROUND: Rgb = Rgb::hex(SECONDARY_BACKGROUND_COLOR);
pub const MUTED: Rgb = Rgb::hex(MUTED_COLOR);

pub const PALETTE_RGB: [Rgb; PALETTE.len()] = {
    let mut out = [Rgb::new(0, 0, 0); PALETTE.len()];
    let mut i = 0;
    while i < PALETTE.len() {
        out[i] = Rgb::hex(PALETTE[i]);
        i += 1;
    }
    out
};

/// Palette colour for the `i`-th entity; wraps around.
pub fn palette(i: usize) -> Rgb {
    PALETTE_RGB[i % PALETTE_RGB.len()]
}
