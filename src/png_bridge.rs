//! # Indexed PNG Bridge
//!
//! Adapter around the `png` crate for the one image container the tool
//! understands: 8-bit indexed PNGs. It hands the palette layer the flat RGB
//! array from the PLTE chunk plus the parallel tRNS alpha array, along with
//! the raw index byte per pixel, and writes the same shape back out. The
//! palette and codec layers never touch the container format themselves.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use thiserror::Error;

use crate::grid;
use crate::palette::{PaletteError, RGB_CHUNK};

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("not an indexed PNG (colour type {0:?})")]
    NotIndexed(png::ColorType),
    #[error("unsupported bit depth {0:?}, only 8-bit indexed PNGs are handled")]
    UnsupportedDepth(png::BitDepth),
    #[error("indexed PNG carries no PLTE chunk")]
    MissingPalette,
    #[error("pixel ({0}, {1}) outside the image bounds")]
    PixelOutOfBounds(u32, u32),
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error(transparent)]
    Decode(#[from] png::DecodingError),
    #[error(transparent)]
    Encode(#[from] png::EncodingError),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An 8-bit indexed image: one palette index byte per pixel, plus the
/// palette arrays it indexes into.
#[derive(Debug)]
pub struct IndexedPng {
    pub width: u32,
    pub height: u32,
    /// Flat PLTE data, 3 bytes per colour.
    pub rgb: Vec<u8>,
    /// Per-colour alpha, padded to the PLTE entry count (PNG permits a
    /// short tRNS chunk; missing entries are opaque).
    pub alpha: Vec<u8>,
    pub pixels: Vec<u8>,
}

impl IndexedPng {
    pub fn read(r: impl Read) -> Result<Self, BridgeError> {
        let decoder = png::Decoder::new(r);
        let mut reader = decoder.read_info()?;

        let (rgb, mut alpha) = {
            let info = reader.info();
            if info.color_type != png::ColorType::Indexed {
                return Err(BridgeError::NotIndexed(info.color_type));
            }
            if info.bit_depth != png::BitDepth::Eight {
                return Err(BridgeError::UnsupportedDepth(info.bit_depth));
            }
            let rgb = info
                .palette
                .as_ref()
                .ok_or(BridgeError::MissingPalette)?
                .to_vec();
            let alpha = info.trns.as_ref().map_or_else(Vec::new, |trns| trns.to_vec());
            (rgb, alpha)
        };
        alpha.resize(rgb.len() / RGB_CHUNK, 0xFF);

        let mut pixels = vec![0u8; reader.output_buffer_size()];
        let frame = reader.next_frame(&mut pixels)?;
        pixels.truncate(frame.buffer_size());

        Ok(IndexedPng {
            width: frame.width,
            height: frame.height,
            rgb,
            alpha,
            pixels,
        })
    }

    pub fn write(&self, w: impl Write) -> Result<(), BridgeError> {
        let mut encoder = png::Encoder::new(w, self.width, self.height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_palette(self.rgb.clone());
        encoder.set_trns(self.alpha.clone());
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.pixels)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, BridgeError> {
        Self::read(BufReader::new(File::open(path)?))
    }

    pub fn save(&self, path: &Path) -> Result<(), BridgeError> {
        self.write(BufWriter::new(File::create(path)?))
    }

    /// Grid cell of the palette entry referenced by pixel (x, y).
    pub fn palette_index_at(&self, x: u32, y: u32) -> Result<(usize, usize), BridgeError> {
        if x >= self.width || y >= self.height {
            return Err(BridgeError::PixelOutOfBounds(x, y));
        }
        let index = self.pixels[grid::pixel_offset(self.width, x, y)];
        Ok(grid::to_coordinate(index as usize)?)
    }
}
