use nes_chr::*;
use pretty_assertions::assert_eq;

fn make_header(prg_units: u8, chr_units: u8, trainer: bool) -> [u8; 16] {
    let mut header = [0u8; 16];
    header[0..4].copy_from_slice(b"NES\x1a");
    header[4] = prg_units;
    header[5] = chr_units;
    header[6] = if trainer { 0x04 } else { 0x00 };
    header
}

#[test]
fn test_header_field_recovery() {
    for prg_units in [0u8, 1, 2, 8, 255] {
        for chr_units in [0u8, 1, 4, 255] {
            for trainer in [false, true] {
                let header = InesHeader::parse(&make_header(prg_units, chr_units, trainer))
                    .expect("synthetic header should parse");
                assert_eq!(header.prg_rom_size, prg_units as usize * 16384);
                assert_eq!(header.chr_rom_size, chr_units as usize * 8192);
                assert_eq!(header.has_trainer, trainer);
            }
        }
    }
}

#[test]
fn test_chr_offset() {
    for prg_units in [0u8, 1, 2, 32, 255] {
        for trainer in [false, true] {
            let header = InesHeader::parse(&make_header(prg_units, 1, trainer)).unwrap();
            let trainer_size = if trainer { 512 } else { 0 };
            let expected = 16 + trainer_size + prg_units as usize * 16384;
            assert_eq!(header.chr_rom_offset, expected);
            assert_eq!(header.prg_rom_offset(), if trainer { 528 } else { 16 });
        }
    }
}

#[test]
fn test_only_trainer_bit_is_read() {
    let mut bytes = make_header(1, 1, false);
    bytes[6] = 0xFB; // every flag bit except the trainer
    assert!(!InesHeader::parse(&bytes).unwrap().has_trainer);

    bytes[6] = 0x04;
    assert!(InesHeader::parse(&bytes).unwrap().has_trainer);
}

#[test]
fn test_reject_too_small() {
    let result = InesHeader::parse(&[b'N', b'E', b'S', 0x1a, 1, 1, 0, 0, 0, 0]);
    assert_eq!(result, Err(FormatError::TooSmall));

    assert_eq!(InesHeader::parse(&[]), Err(FormatError::TooSmall));
}

#[test]
fn test_reject_bad_signature() {
    let mut bytes = make_header(1, 1, false);
    bytes[3] = 0x00;
    assert_eq!(InesHeader::parse(&bytes), Err(FormatError::InvalidSignature));

    let result = InesHeader::parse(b"GARBAGE!GARBAGE!");
    assert_eq!(result, Err(FormatError::InvalidSignature));
}

#[test]
fn test_header_only_input_parses() {
    // Exactly 16 bytes is enough for the header itself
    let header = InesHeader::parse(&make_header(2, 1, false)).unwrap();
    assert_eq!(header.tile_count(), 512);
}

#[test]
fn test_chr_rom_slice() {
    let mut rom = make_header(1, 1, true).to_vec();
    rom.extend(std::iter::repeat(0xEE).take(512)); // trainer
    rom.extend(std::iter::repeat(0x11).take(16384)); // PRG
    rom.extend((0..8192).map(|i| (i % 251) as u8)); // CHR

    let header = InesHeader::parse(&rom).unwrap();
    let chr = header.chr_rom(&rom).unwrap();
    assert_eq!(chr.len(), 8192);
    assert_eq!(chr[0], 0);
    assert_eq!(chr[251], 0);
    assert_eq!(chr[8191], (8191 % 251) as u8);
}

#[test]
fn test_chr_rom_ignores_trailing_bytes() {
    let mut rom = make_header(0, 1, false).to_vec();
    rom.extend(std::iter::repeat(0x22).take(8192));
    rom.extend(std::iter::repeat(0x33).take(100));

    let header = InesHeader::parse(&rom).unwrap();
    let chr = header.chr_rom(&rom).unwrap();
    assert_eq!(chr.len(), 8192);
    assert!(chr.iter().all(|&b| b == 0x22));
}

#[test]
fn test_chr_rom_truncated() {
    let mut rom = make_header(1, 1, false).to_vec();
    rom.extend(std::iter::repeat(0).take(16384 + 100));

    let header = InesHeader::parse(&rom).unwrap();
    assert_eq!(
        header.chr_rom(&rom),
        Err(FormatError::Truncated {
            needed: 16 + 16384 + 8192,
            actual: 16 + 16384 + 100,
        })
    );
}

#[test]
fn test_chr_ram_cartridge() {
    let mut rom = make_header(1, 0, false).to_vec();
    rom.extend(std::iter::repeat(0).take(16384));

    let header = InesHeader::parse(&rom).unwrap();
    assert!(!header.has_chr_rom());
    assert_eq!(header.tile_count(), 0);
    assert_eq!(header.chr_rom(&rom), Err(FormatError::NoChrRom));
}

#[test]
fn test_info_display() {
    let header = InesHeader::parse(&make_header(2, 1, true)).unwrap();
    assert_eq!(
        header.to_string(),
        "PRG ROM: 32 KB\nCHR ROM: 8 KB\nTrainer: Yes\nTiles: 512"
    );
}

#[test]
fn test_error_messages() {
    assert!(FormatError::TooSmall.to_string().contains("too small"));
    assert!(FormatError::InvalidSignature
        .to_string()
        .contains("invalid signature"));
    assert_eq!(FormatError::NoTileData.to_string(), "no tile data");
}
