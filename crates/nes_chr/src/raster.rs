//! Tile sheet compositing.

use crate::tile::decode_tile;
use crate::{
    ConfigError, FormatError, InesHeader, Palette, Result, Rgb, DIMENSION_LIMIT, PIXEL_LIMIT,
    TILE_DIM, TILE_SIZE,
};

const BYTES_PER_PIXEL: usize = 3;

/// Rejects sizes past the limits before anything is allocated.
///
/// Callers pass saturated products, so an overflowed side reads as `usize::MAX`.
fn check_dimensions(width: usize, height: usize) -> std::result::Result<(), ConfigError> {
    if width > DIMENSION_LIMIT
        || height > DIMENSION_LIMIT
        || width.saturating_mul(height) > PIXEL_LIMIT
    {
        return Err(ConfigError::DimensionsTooLarge { width, height });
    }
    Ok(())
}

/// Options for laying out and coloring the tile sheet.
#[derive(Clone, Debug)]
pub struct RasterOptions {
    /// Colors for tile indices 0-3. Entry 0 is also the background.
    pub palette: Palette,

    /// Number of tiles per grid row. The sheet is `tiles_per_row * 8` pixels wide.
    pub tiles_per_row: usize,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            palette: Palette::GRAYSCALE,
            tiles_per_row: 16,
        }
    }
}

/// A rasterized RGB image.
///
/// Pixels are stored row-major, 3 bytes per pixel `[R, G, B]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a `width x height` buffer filled with `fill`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DimensionsTooLarge`] past [`DIMENSION_LIMIT`] or [`PIXEL_LIMIT`].
    pub fn filled(width: usize, height: usize, fill: Rgb) -> std::result::Result<Self, ConfigError> {
        check_dimensions(width, height)?;
        let pixels = [fill.r, fill.g, fill.b].repeat(width * height);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Color at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * BYTES_PER_PIXEL;
        Some(Rgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }

    #[inline]
    fn put(&mut self, x: usize, y: usize, color: Rgb) {
        let i = (y * self.width + x) * BYTES_PER_PIXEL;
        self.pixels[i..i + BYTES_PER_PIXEL].copy_from_slice(&[color.r, color.g, color.b]);
    }

    /// Raw RGB bytes, `width * height * 3` long.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Nearest-neighbor magnification: every pixel becomes a `factor x factor` block.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroScale`] if `factor` is 0
    /// - [`ConfigError::DimensionsTooLarge`] if the magnified image would exceed the limits
    pub fn upscale(&self, factor: usize) -> std::result::Result<PixelBuffer, ConfigError> {
        if factor == 0 {
            return Err(ConfigError::ZeroScale);
        }
        let width = self.width.saturating_mul(factor);
        let height = self.height.saturating_mul(factor);
        check_dimensions(width, height)?;

        if factor == 1 || self.pixels.is_empty() {
            return Ok(PixelBuffer {
                width,
                height,
                pixels: self.pixels.clone(),
            });
        }

        let row_bytes = width * BYTES_PER_PIXEL;
        let mut pixels = Vec::with_capacity(row_bytes * height);

        for src_row in self.pixels.chunks_exact(self.width * BYTES_PER_PIXEL) {
            let start = pixels.len();
            for px in src_row.chunks_exact(BYTES_PER_PIXEL) {
                for _ in 0..factor {
                    pixels.extend_from_slice(px);
                }
            }
            // The remaining factor - 1 rows repeat the one just written
            for _ in 1..factor {
                pixels.extend_from_within(start..start + row_bytes);
            }
        }

        Ok(PixelBuffer {
            width,
            height,
            pixels,
        })
    }
}

/// Rasterizes raw CHR data into a tile sheet.
///
/// Tile `t` is placed at column `t % tiles_per_row`, row `t / tiles_per_row`.
/// Cells past the last tile keep the background color, and trailing bytes that
/// do not form a whole 16-byte tile are ignored.
///
/// # Errors
///
/// - [`ConfigError::ZeroTilesPerRow`] if `opts.tiles_per_row` is 0
/// - [`FormatError::NoTileData`] if `chr` holds less than one tile
/// - [`ConfigError::DimensionsTooLarge`] if the sheet would exceed the size limits
///
/// # Example
///
/// ```rust
/// use nes_chr::{rasterize, RasterOptions};
///
/// let chr = [0u8; 32]; // two blank tiles
/// let sheet = rasterize(&chr, &RasterOptions::default())?;
/// assert_eq!((sheet.width(), sheet.height()), (128, 8));
/// # Ok::<(), nes_chr::Error>(())
/// ```
pub fn rasterize(chr: &[u8], opts: &RasterOptions) -> Result<PixelBuffer> {
    let tiles_per_row = opts.tiles_per_row;
    if tiles_per_row == 0 {
        return Err(ConfigError::ZeroTilesPerRow.into());
    }

    let tile_count = chr.len() / TILE_SIZE;
    if tile_count == 0 {
        return Err(FormatError::NoTileData.into());
    }

    let rows = tile_count.div_ceil(tiles_per_row);
    let width = tiles_per_row.saturating_mul(TILE_DIM);
    let height = rows.saturating_mul(TILE_DIM);
    tracing::debug!(tile_count, tiles_per_row, width, height, "rasterizing CHR data");

    let palette = &opts.palette;
    let mut sheet = PixelBuffer::filled(width, height, palette.background())?;

    // A trailing partial tile lands in the remainder and is never drawn
    let (tiles, _partial) = chr.as_chunks::<TILE_SIZE>();
    for (t, tile) in tiles.iter().enumerate() {
        let indices = decode_tile(tile);

        let tile_x = (t % tiles_per_row) * TILE_DIM;
        let tile_y = (t / tiles_per_row) * TILE_DIM;
        for (y, row) in indices.iter().enumerate() {
            for (x, &index) in row.iter().enumerate() {
                sheet.put(tile_x + x, tile_y + y, palette.color(index));
            }
        }
    }

    Ok(sheet)
}

/// Parses a full iNES image, extracts its CHR ROM and rasterizes it.
///
/// # Errors
///
/// Any [`FormatError`] from header parsing or CHR extraction, plus the
/// errors of [`rasterize`].
pub fn rasterize_rom(rom: &[u8], opts: &RasterOptions) -> Result<(InesHeader, PixelBuffer)> {
    let header = InesHeader::parse(rom)?;
    let chr = header.chr_rom(rom)?;
    let sheet = rasterize(chr, opts)?;
    Ok((header, sheet))
}
