//! # nes_chr
//!
//! Extracts the CHR ROM tile graphics embedded in an iNES cartridge image and
//! rasterizes them into a single RGB tile sheet.
//!
//! ## Features
//!
//! - **Header**: parses the 16-byte iNES header and locates the CHR ROM segment
//! - **Tiles**: decodes 2-bitplane 8x8 tiles into palette indices
//! - **Raster**: composites every tile into a fixed-column grid through a 4-color palette
//!
//! ## Quick Start
//!
//! ```ignore
//! use nes_chr::{rasterize_rom, RasterOptions};
//!
//! let rom = std::fs::read("game.nes")?;
//! let (header, sheet) = rasterize_rom(&rom, &RasterOptions::default())?;
//! println!("{} tiles -> {}x{}", header.tile_count(), sheet.width(), sheet.height());
//! ```

use thiserror::Error;

pub mod header;
pub mod palette;
pub mod raster;
pub mod tile;

pub use header::InesHeader;
pub use palette::{Palette, Rgb};
pub use raster::{rasterize, rasterize_rom, PixelBuffer, RasterOptions};
pub use tile::{decode_tile, TileIndices};

/// Malformed or truncated cartridge data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Input is shorter than the 16-byte header
    #[error("file too small to contain an iNES header")]
    TooSmall,

    /// First four bytes are not `NES\x1a`
    #[error("invalid signature (not an iNES ROM)")]
    InvalidSignature,

    /// The cartridge declares zero CHR ROM banks and uses CHR RAM instead
    #[error("ROM has no CHR ROM (uses CHR RAM)")]
    NoChrRom,

    /// The CHR segment extends past the end of the input
    #[error("truncated ROM: CHR ROM ends at byte {needed}, file has {actual}")]
    Truncated { needed: usize, actual: usize },

    /// Graphics segment holds less than one whole tile
    #[error("no tile data")]
    NoTileData,
}

/// Invalid caller-supplied parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("palette must have exactly 4 colors, got {0}")]
    PaletteSize(usize),

    #[error("invalid color format: {0:?} (expected RRGGBB)")]
    InvalidColor(String),

    #[error("tiles per row must be at least 1")]
    ZeroTilesPerRow,

    #[error("scale factor must be at least 1")]
    ZeroScale,

    /// Requested image exceeds [`DIMENSION_LIMIT`] per side or [`PIXEL_LIMIT`] in total
    #[error("image dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: usize, height: usize },
}

/// Errors that can occur while extracting or rasterizing CHR data.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for CHR operations.
pub type Result<T> = core::result::Result<T, Error>;

// iNES layout constants
pub(crate) const HEADER_SIZE: usize = 16;
pub(crate) const TRAINER_SIZE: usize = 512;
pub(crate) const PRG_ROM_UNIT: usize = 16384;
pub(crate) const CHR_ROM_UNIT: usize = 8192;

/// Size of one encoded tile in bytes.
pub const TILE_SIZE: usize = 16;
/// Width and height of a tile in pixels.
pub const TILE_DIM: usize = 8;

/// Largest width or height, in pixels, of a rasterized or upscaled image.
pub const DIMENSION_LIMIT: usize = 1 << 24;
/// Largest total pixel count of a rasterized or upscaled image.
pub const PIXEL_LIMIT: usize = 1 << 28;
