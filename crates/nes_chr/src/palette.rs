use crate::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Number of entries in a CHR palette (one per 2-bit index).
pub const PALETTE_SIZE: usize = 4;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    /// Parses `RRGGBB`, with or without a leading `#`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ConfigError::InvalidColor(s.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The four colors a decoded tile index maps to.
///
/// Entry 0 doubles as the background for grid cells without a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette([Rgb; PALETTE_SIZE]);

impl Palette {
    /// Black, dark gray, light gray, white.
    pub const GRAYSCALE: Palette = Palette([
        Rgb::new(0x00, 0x00, 0x00),
        Rgb::new(0x55, 0x55, 0x55),
        Rgb::new(0xAA, 0xAA, 0xAA),
        Rgb::new(0xFF, 0xFF, 0xFF),
    ]);

    /// Builds a palette from exactly four colors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PaletteSize`] for any other number of colors.
    pub fn new(colors: &[Rgb]) -> Result<Self, ConfigError> {
        let colors: [Rgb; PALETTE_SIZE] = colors
            .try_into()
            .map_err(|_| ConfigError::PaletteSize(colors.len()))?;
        Ok(Self(colors))
    }

    /// Builds a palette from four `RRGGBB` strings.
    ///
    /// The count is checked before any string is parsed.
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self, ConfigError> {
        if colors.len() != PALETTE_SIZE {
            return Err(ConfigError::PaletteSize(colors.len()));
        }
        let parsed = colors
            .iter()
            .map(|c| c.as_ref().parse())
            .collect::<Result<Vec<Rgb>, _>>()?;
        Self::new(&parsed)
    }

    /// Color for a 2-bit tile index.
    #[inline]
    pub fn color(&self, index: u8) -> Rgb {
        debug_assert!((index as usize) < PALETTE_SIZE, "tile index {index} out of range");
        self.0[(index & 0b11) as usize]
    }

    /// Background fill color (entry 0).
    #[inline]
    pub fn background(&self) -> Rgb {
        self.0[0]
    }

    pub fn colors(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.0
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::GRAYSCALE
    }
}
