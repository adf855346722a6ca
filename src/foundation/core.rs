use crate::foundation::error::{SwarmError, SwarmResult};

pub use kurbo::{Point, Vec2};

/// Size of the animated surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Construct a viewport. Zero-area viewports are valid inputs and simply
    /// produce empty sample sets downstream.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Return `true` when the viewport has no pixels.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (straight, not premultiplied).
    pub a: u8,
}

impl Rgba8 {
    /// Fully opaque color from RGB channels.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a `#rrggbb` or `#rrggbbaa` hex string.
    pub fn from_hex(s: &str) -> SwarmResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() {
            return Err(SwarmError::validation(format!("invalid hex color '{s}'")));
        }
        let channel = |i: usize| -> SwarmResult<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| SwarmError::validation(format!("invalid hex color '{s}'")))
        };
        match hex.len() {
            6 => Ok(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: 255,
            }),
            8 => Ok(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: channel(6)?,
            }),
            _ => Err(SwarmError::validation(format!(
                "hex color '{s}' must have 6 or 8 digits"
            ))),
        }
    }

    /// Convert to premultiplied RGBA8 bytes.
    pub fn to_premul_bytes(self) -> [u8; 4] {
        let a16 = u16::from(self.a);
        let premul = |c: u8| -> u8 { (((u16::from(c) * a16) + 127) / 255) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }
}

/// Fixed categorical palette particles draw their color from at spawn time.
pub const PALETTE: [Rgba8; 7] = [
    Rgba8::opaque(0xec, 0x48, 0x99), // pink
    Rgba8::opaque(0x8b, 0x5c, 0xf6), // violet
    Rgba8::opaque(0xf5, 0x9e, 0x0b), // amber
    Rgba8::opaque(0x10, 0xb9, 0x81), // emerald
    Rgba8::opaque(0x3b, 0x82, 0xf6), // blue
    Rgba8::opaque(0xef, 0x44, 0x44), // red
    Rgba8::opaque(0xf9, 0x73, 0x16), // orange
];
