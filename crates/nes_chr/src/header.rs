use crate::{FormatError, CHR_ROM_UNIT, HEADER_SIZE, PRG_ROM_UNIT, TILE_SIZE, TRAINER_SIZE};
use std::fmt;

/// iNES file signature, `NES` followed by MS-DOS end-of-file.
pub const MAGIC: [u8; 4] = *b"NES\x1a";

const FLAG_TRAINER: u8 = 0x04;

/// The parts of the iNES header needed to locate the CHR ROM.
///
/// Derived once from the first 16 bytes of the file. Only the signature,
/// the two bank counts and the trainer bit of flags 6 are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InesHeader {
    /// PRG ROM size in bytes (bank count x 16 KB)
    pub prg_rom_size: usize,
    /// CHR ROM size in bytes (bank count x 8 KB)
    pub chr_rom_size: usize,
    /// Whether a 512-byte trainer precedes the PRG ROM
    pub has_trainer: bool,
    /// Byte offset of the CHR ROM within the file
    pub chr_rom_offset: usize,
}

impl InesHeader {
    /// Parses the header from the start of a ROM image.
    ///
    /// # Errors
    ///
    /// - [`FormatError::TooSmall`] if `bytes` is shorter than 16 bytes
    /// - [`FormatError::InvalidSignature`] if the magic is not `NES\x1a`
    pub fn parse(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes.len() < HEADER_SIZE {
            return Err(FormatError::TooSmall);
        }
        if bytes[0..4] != MAGIC {
            return Err(FormatError::InvalidSignature);
        }

        let prg_rom_size = bytes[4] as usize * PRG_ROM_UNIT;
        let chr_rom_size = bytes[5] as usize * CHR_ROM_UNIT;
        let has_trainer = bytes[6] & FLAG_TRAINER != 0;
        let trainer_size = if has_trainer { TRAINER_SIZE } else { 0 };

        let header = Self {
            prg_rom_size,
            chr_rom_size,
            has_trainer,
            chr_rom_offset: HEADER_SIZE + trainer_size + prg_rom_size,
        };
        tracing::debug!(
            prg_rom_size,
            chr_rom_size,
            has_trainer,
            chr_rom_offset = header.chr_rom_offset,
            "parsed iNES header"
        );
        Ok(header)
    }

    /// Byte offset of the PRG ROM, just past the header and optional trainer.
    #[inline]
    pub fn prg_rom_offset(&self) -> usize {
        self.chr_rom_offset - self.prg_rom_size
    }

    /// Returns true if the cartridge ships CHR ROM rather than CHR RAM.
    #[inline]
    pub fn has_chr_rom(&self) -> bool {
        self.chr_rom_size > 0
    }

    /// Number of whole 16-byte tiles in the CHR ROM.
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.chr_rom_size / TILE_SIZE
    }

    /// Slices the CHR ROM out of the full ROM image.
    ///
    /// # Errors
    ///
    /// - [`FormatError::NoChrRom`] if the header declares no CHR banks
    /// - [`FormatError::Truncated`] if the segment runs past the end of `rom`
    pub fn chr_rom<'a>(&self, rom: &'a [u8]) -> Result<&'a [u8], FormatError> {
        if !self.has_chr_rom() {
            return Err(FormatError::NoChrRom);
        }
        let end = self.chr_rom_offset + self.chr_rom_size;
        if end > rom.len() {
            return Err(FormatError::Truncated {
                needed: end,
                actual: rom.len(),
            });
        }
        Ok(&rom[self.chr_rom_offset..end])
    }
}

impl fmt::Display for InesHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PRG ROM: {} KB", self.prg_rom_size / 1024)?;
        writeln!(f, "CHR ROM: {} KB", self.chr_rom_size / 1024)?;
        writeln!(f, "Trainer: {}", if self.has_trainer { "Yes" } else { "No" })?;
        write!(f, "Tiles: {}", self.tile_count())
    }
}
