#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nes_chr::{rasterize, Palette, RasterOptions, Rgb};

#[derive(Debug, Arbitrary)]
struct Input {
    colors: [(u8, u8, u8); 4],
    tiles_per_row: u8,
    scale: u8,
    chr: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let colors = input.colors.map(|(r, g, b)| Rgb::new(r, g, b));
    let Ok(palette) = Palette::new(&colors) else {
        return;
    };
    let opts = RasterOptions {
        palette,
        tiles_per_row: input.tiles_per_row as usize,
    };

    if let Ok(sheet) = rasterize(&input.chr, &opts) {
        assert_eq!(sheet.as_raw().len(), sheet.width() * sheet.height() * 3);
        let _ = sheet.upscale((input.scale % 4) as usize);
    }
});
