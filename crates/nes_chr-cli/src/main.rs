//! chrdump - Dump NES CHR ROM tiles to PNG
//!
//! A command-line tool for rendering the CHR ROM of an iNES cartridge image
//! as a tile sheet.

use clap::Parser;
use nes_chr::{rasterize, ConfigError, FormatError, InesHeader, Palette, RasterOptions};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chrdump")]
#[command(version)]
#[command(about = "Dump CHR ROM data from NES ROMs to PNG images", long_about = None)]
struct Cli {
    /// Input NES ROM file (.nes)
    rom: PathBuf,

    /// Output PNG file (default: <rom>_chr.png next to the ROM)
    output: Option<PathBuf>,

    /// Four hex colors (RRGGBB) for the palette
    #[arg(short, long, num_args = 4, value_name = "COLOR")]
    palette: Option<Vec<String>>,

    /// Scale factor for output image
    #[arg(short, long, default_value = "1")]
    scale: usize,

    /// Number of tiles per row in the output image
    #[arg(long, default_value = "16")]
    tiles_per_row: usize,

    /// Print ROM info and exit
    #[arg(short, long)]
    info: bool,

    /// Log decoding details to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Format(#[from] FormatError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
}

impl From<nes_chr::Error> for CliError {
    fn from(err: nes_chr::Error) -> Self {
        match err {
            nes_chr::Error::Format(e) => CliError::Format(e),
            nes_chr::Error::Config(e) => CliError::Config(e),
        }
    }
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Read { .. } | CliError::Write { .. } => ExitCode::from(1),
            CliError::Config(_) => ExitCode::from(2),
            CliError::Format(_) => ExitCode::from(3),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    // Parameters are validated before the ROM is touched
    let palette = match &cli.palette {
        Some(colors) => Palette::from_hex(colors.as_slice())?,
        None => Palette::GRAYSCALE,
    };
    if cli.scale == 0 {
        return Err(ConfigError::ZeroScale.into());
    }
    let opts = RasterOptions {
        palette,
        tiles_per_row: cli.tiles_per_row,
    };
    if opts.tiles_per_row == 0 {
        return Err(ConfigError::ZeroTilesPerRow.into());
    }

    let rom = fs::read(&cli.rom).map_err(|source| CliError::Read {
        path: cli.rom.clone(),
        source,
    })?;
    tracing::debug!(path = %cli.rom.display(), bytes = rom.len(), "read ROM");
    let header = InesHeader::parse(&rom)?;

    if cli.info {
        let name = cli.rom.file_name().unwrap_or(cli.rom.as_os_str());
        println!("ROM: {}", name.to_string_lossy());
        println!("{}", header);
        return Ok(());
    }

    let chr = header.chr_rom(&rom)?;
    let sheet = rasterize(chr, &opts)?.upscale(cli.scale)?;

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.rom));

    let (width, height) = (sheet.width(), sheet.height());
    image::save_buffer(
        &output_path,
        sheet.as_raw(),
        width as u32,
        height as u32,
        image::ColorType::Rgb8,
    )
    .map_err(|source| CliError::Write {
        path: output_path.clone(),
        source,
    })?;

    eprintln!("Saved: {}", output_path.display());
    eprintln!(
        "Tiles: {} ({} KB)",
        header.tile_count(),
        header.chr_rom_size / 1024
    );
    eprintln!("Image: {}x{}", width, height);

    Ok(())
}

/// `<dir>/<stem>_chr.png` for a ROM at `<dir>/<stem>.nes`.
fn default_output_path(rom: &Path) -> PathBuf {
    let stem = rom
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "rom".to_string());
    rom.with_file_name(format!("{}_chr.png", stem))
}
