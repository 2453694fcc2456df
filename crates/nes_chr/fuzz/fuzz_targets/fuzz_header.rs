#![no_main]

use libfuzzer_sys::fuzz_target;
use nes_chr::InesHeader;

fuzz_target!(|data: &[u8]| {
    // Parsing and slicing must never panic, whatever the header claims
    if let Ok(header) = InesHeader::parse(data) {
        if let Ok(chr) = header.chr_rom(data) {
            assert_eq!(chr.len(), header.chr_rom_size);
        }
    }
});
