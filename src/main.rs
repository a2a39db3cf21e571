mod formats;
mod grid;
mod palette;
mod png_bridge;
mod quantize;
mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use palette::Palette;
use png_bridge::{BridgeError, IndexedPng};

#[derive(Parser)]
#[command(name = "hpltool", about = "Convert between HPL palettes and indexed PNG images")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract a PNG image's palette into an .hpl file next to it
    Frompng {
        /// Image input path
        image: PathBuf,
    },
    /// Render an .hpl palette as a 16x16 swatch grid PNG
    Topng {
        /// Palette input path
        palette: PathBuf,
        /// Side length of each colour square in pixels
        #[arg(short, long, default_value_t = render::DEF_COLOUR_SQUARE_SIZE,
              value_parser = clap::value_parser!(u32).range(1..))]
        size: u32,
    },
    /// Rewrite an indexed PNG in place with the colours of an .hpl palette
    Newpal {
        /// Image input path
        image: PathBuf,
        /// Palette input path
        palette: PathBuf,
    },
}

fn convert_to_hpl(image_path: &Path) -> Result<(), BridgeError> {
    let mut palette = Palette::new();

    match IndexedPng::load(image_path) {
        Ok(img) => palette.load_image_palette(&img.rgb, &img.alpha)?,
        // Truecolour PNGs carry no PLTE chunk; build a palette from their
        // pixels instead, as long as they use at most 256 colours.
        Err(BridgeError::NotIndexed(_)) => {
            let img = image::open(image_path)?.to_rgba8();
            let extracted = quantize::palette_from_rgba(&img)?;
            palette.load_colours(extracted.colours)?;
        }
        Err(e) => return Err(e),
    }

    palette.save_hpl(&image_path.with_extension("hpl"))?;
    Ok(())
}

fn convert_from_hpl(hpl_path: &Path, size: u32) -> Result<(), BridgeError> {
    let mut palette = Palette::new();
    palette.load_hpl(hpl_path)?;

    let sheet = render::render_swatch(&palette, size)?;
    sheet.save(&hpl_path.with_extension("png"))?;
    Ok(())
}

fn replace_palette(image_path: &Path, hpl_path: &Path) -> Result<(), BridgeError> {
    let mut img = IndexedPng::load(image_path)?;

    let mut palette = Palette::new();
    palette.load_hpl(hpl_path)?;

    // Pixel indices are kept as-is; only the palette arrays change.
    let (rgb, alpha) = palette.image_palette()?;
    img.rgb = rgb;
    img.alpha = alpha;
    img.save(image_path)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Frompng { image } => convert_to_hpl(image),
        Command::Topng { palette, size } => convert_from_hpl(palette, *size),
        Command::Newpal { image, palette } => replace_palette(image, palette),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
