//! 2-bitplane tile decoding.
//!
//! A tile is 16 bytes: eight bytes of the low bitplane followed by eight bytes
//! of the high bitplane, one byte per pixel row. Bit 7 of each byte is the
//! leftmost pixel.

use crate::{TILE_DIM, TILE_SIZE};

/// Palette indices (0-3) of one decoded tile, indexed `[row][column]`.
pub type TileIndices = [[u8; TILE_DIM]; TILE_DIM];

/// Decodes one 16-byte tile into an 8x8 grid of palette indices.
///
/// # Example
///
/// ```rust
/// use nes_chr::decode_tile;
///
/// let mut tile = [0u8; 16];
/// tile[0] = 0x80; // low plane, leftmost pixel of row 0
/// tile[8] = 0x81; // high plane, leftmost and rightmost pixels of row 0
///
/// let indices = decode_tile(&tile);
/// assert_eq!(indices[0], [3, 0, 0, 0, 0, 0, 0, 2]);
/// ```
pub fn decode_tile(tile: &[u8; TILE_SIZE]) -> TileIndices {
    let (low_plane, high_plane) = tile.split_at(TILE_DIM);
    let mut indices = [[0u8; TILE_DIM]; TILE_DIM];

    for (row, (&low, &high)) in indices.iter_mut().zip(low_plane.iter().zip(high_plane)) {
        for (x, index) in row.iter_mut().enumerate() {
            let shift = 7 - x;
            let low_bit = (low >> shift) & 1;
            let high_bit = (high >> shift) & 1;
            *index = (high_bit << 1) | low_bit;
        }
    }

    indices
}
